use super::dto::{
    self, AddNote, AssignTaxi, B2bDispatchRow, BookingDetail, BookingRow, CancelBooking,
    CompleteTrip, MarkPaid,
};
use super::{service, status};
use crate::database::error::DbError;
use crate::modules::audit;
use crate::modules::auth::middleware::{self, RequestUser};
use crate::modules::b2b::dto::CreditBookingRow;
use crate::modules::common::error_codes;
use crate::modules::common::extractors::{CompanyId, DbConnection, ValidatedJson};
use crate::modules::common::responses::{internal_error_res, ApiResponse, SimpleError};
use crate::modules::pricing;
use crate::server::controller::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Extension, Router,
};
use entity::{
    b2b_booking, b2b_company, booking, booking_note,
    enums::{AuditAction, B2bBookingStatus, BookingStatus},
    taxi_assignment, user,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::collections::HashMap;

pub fn create_user_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/my", get(my_bookings))
        .route("/company", get(my_company_bookings))
        .layer(axum::middleware::from_fn_with_state(
            state,
            middleware::require_user,
        ))
}

pub fn create_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list_paid_bookings))
        .route("/bookings/:booking_id", get(get_booking_ticket))
        .route("/bookings/:booking_id/assign-taxi", post(assign_taxi))
        .route("/bookings/:booking_id/status", patch(update_status))
        .route("/bookings/:booking_id/complete", post(complete_trip))
        .route("/bookings/:booking_id/cancel", post(cancel_booking))
        .route(
            "/bookings/:booking_id/notes",
            get(list_notes).post(add_note),
        )
        .route("/history/completed", get(completed_history))
        .route("/history/cancelled", get(cancelled_history))
        .route("/pending-payments", get(pending_payments))
        .route("/b2b-bookings", get(list_b2b_bookings))
        .route(
            "/b2b-bookings/:booking_id/assign-taxi",
            post(b2b_assign_taxi),
        )
        .route("/b2b-bookings/:booking_id/status", patch(b2b_update_status))
        .route("/b2b-bookings/:booking_id/complete", post(b2b_complete_trip))
        .route("/b2b-bookings/:booking_id/cancel", post(b2b_cancel_booking))
        .route("/b2b-bookings/:booking_id/mark-paid", post(b2b_mark_paid))
        .layer(axum::middleware::from_fn(middleware::require_admin))
        .layer(axum::middleware::from_fn_with_state(
            state,
            middleware::require_user,
        ))
}

async fn find_booking(
    db: &DatabaseConnection,
    booking_id: i32,
) -> Result<booking::Model, (StatusCode, SimpleError)> {
    booking::Entity::find_by_id(booking_id)
        .one(db)
        .await
        .map_err(DbError::from)?
        .ok_or((StatusCode::NOT_FOUND, SimpleError::from("booking not found")))
}

async fn find_b2b_booking(
    db: &DatabaseConnection,
    booking_id: i32,
) -> Result<b2b_booking::Model, (StatusCode, SimpleError)> {
    b2b_booking::Entity::find_by_id(booking_id)
        .one(db)
        .await
        .map_err(DbError::from)?
        .ok_or((StatusCode::NOT_FOUND, SimpleError::from("booking not found")))
}

fn refuse_invalid_transition(allowed: bool) -> Result<(), (StatusCode, SimpleError)> {
    if !allowed {
        return Err((
            StatusCode::BAD_REQUEST,
            SimpleError::from(error_codes::INVALID_STATUS_TRANSITION),
        ));
    }

    Ok(())
}

/// Lists the bookings of the request user, newest first
#[utoipa::path(
    get,
    path = "/bookings/my",
    tag = "booking",
    security(("access_token" = [])),
    responses(
        (status = OK, body = Vec<BookingRow>),
        (status = UNAUTHORIZED, description = "invalid session", body = SimpleError),
    ),
)]
pub async fn my_bookings(
    Extension(req_user): Extension<RequestUser>,
    DbConnection(db): DbConnection,
) -> Result<ApiResponse<Vec<BookingRow>>, (StatusCode, SimpleError)> {
    let bookings = booking::Entity::find()
        .filter(booking::Column::CustomerId.eq(req_user.user.id))
        .order_by_desc(booking::Column::CreatedAt)
        .find_also_related(taxi_assignment::Entity)
        .all(&db)
        .await
        .map_err(DbError::from)?
        .into_iter()
        .map(|(booking, assignment)| BookingRow { booking, assignment })
        .collect();

    Ok(ApiResponse::data(bookings))
}

/// Lists the credit bookings of the request user company, newest first
#[utoipa::path(
    get,
    path = "/bookings/company",
    tag = "booking",
    security(("access_token" = [])),
    responses(
        (status = OK, body = Vec<CreditBookingRow>),
        (
            status = FORBIDDEN,
            description = "request user is not linked to a company",
            body = SimpleError,
        ),
    ),
)]
pub async fn my_company_bookings(
    CompanyId(company_id): CompanyId,
    DbConnection(db): DbConnection,
) -> Result<ApiResponse<Vec<CreditBookingRow>>, (StatusCode, SimpleError)> {
    let bookings = b2b_booking::Entity::find()
        .filter(b2b_booking::Column::CompanyId.eq(company_id))
        .order_by_desc(b2b_booking::Column::CreatedAt)
        .find_also_related(taxi_assignment::Entity)
        .all(&db)
        .await
        .map_err(DbError::from)?
        .into_iter()
        .map(|(booking, assignment)| CreditBookingRow { booking, assignment })
        .collect();

    Ok(ApiResponse::data(bookings))
}

/// Lists paid bookings awaiting dispatch, newest first
#[utoipa::path(
    get,
    path = "/admin/bookings",
    tag = "admin",
    security(("access_token" = [])),
    responses(
        (status = OK, body = Vec<BookingRow>),
        (status = FORBIDDEN, description = "admin access required", body = SimpleError),
    ),
)]
pub async fn list_paid_bookings(
    DbConnection(db): DbConnection,
) -> Result<ApiResponse<Vec<BookingRow>>, (StatusCode, SimpleError)> {
    let bookings = booking::Entity::find()
        .filter(booking::Column::Status.eq(BookingStatus::Paid))
        .order_by_desc(booking::Column::CreatedAt)
        .find_also_related(taxi_assignment::Entity)
        .all(&db)
        .await
        .map_err(DbError::from)?
        .into_iter()
        .map(|(booking, assignment)| BookingRow { booking, assignment })
        .collect();

    Ok(ApiResponse::data(bookings))
}

/// Gets the dispatch ticket of a booking: assignment and customer included
#[utoipa::path(
    get,
    path = "/admin/bookings/{booking_id}",
    tag = "admin",
    security(("access_token" = [])),
    params(
        ("booking_id" = i32, Path, description = "id of the booking"),
    ),
    responses(
        (status = OK, body = BookingDetail),
        (status = NOT_FOUND, description = "booking not found", body = SimpleError),
    ),
)]
pub async fn get_booking_ticket(
    Path(booking_id): Path<i32>,
    DbConnection(db): DbConnection,
) -> Result<ApiResponse<BookingDetail>, (StatusCode, SimpleError)> {
    let booking = find_booking(&db, booking_id).await?;

    let assignment = taxi_assignment::Entity::find()
        .filter(taxi_assignment::Column::BookingId.eq(booking.id))
        .one(&db)
        .await
        .map_err(DbError::from)?;

    let customer = user::Entity::find_by_id(booking.customer_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .map(dto::CustomerInfo::from);

    Ok(ApiResponse::data(BookingDetail {
        booking,
        assignment,
        customer,
    }))
}

/// Assigns a driver and cab to a booking
///
/// a booking holds at most one assignment, re-assigning overwrites the
/// previous driver and cab
#[utoipa::path(
    post,
    path = "/admin/bookings/{booking_id}/assign-taxi",
    tag = "admin",
    security(("access_token" = [])),
    params(
        ("booking_id" = i32, Path, description = "id of the booking"),
    ),
    request_body = AssignTaxi,
    responses(
        (status = OK, body = TaxiAssignment),
        (status = BAD_REQUEST, description = "invalid dto error message", body = SimpleError),
        (status = NOT_FOUND, description = "booking not found", body = SimpleError),
    ),
)]
pub async fn assign_taxi(
    Path(booking_id): Path<i32>,
    Extension(req_user): Extension<RequestUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AssignTaxi>,
) -> Result<ApiResponse<taxi_assignment::Model>, (StatusCode, SimpleError)> {
    let booking = find_booking(&state.db, booking_id).await?;

    let assignment = service::assign_taxi_to_booking(&state.db, booking, payload)
        .await
        .map_err(DbError::from)?;

    audit::service::record(
        &state.db,
        "BOOKING",
        booking_id,
        AuditAction::Update,
        None,
        audit::service::snapshot(&assignment),
        req_user.user.id,
        "taxi assigned to booking",
    )
    .await
    .or(Err(internal_error_res()))?;

    Ok(ApiResponse::new("taxi assigned successfully", assignment))
}

/// Moves a booking to another lifecycle status
#[utoipa::path(
    patch,
    path = "/admin/bookings/{booking_id}/status",
    tag = "admin",
    security(("access_token" = [])),
    params(
        ("booking_id" = i32, Path, description = "id of the booking"),
    ),
    request_body = UpdateStatus,
    responses(
        (status = OK, body = Booking),
        (
            status = BAD_REQUEST,
            description = "INVALID_STATUS_TRANSITION",
            body = SimpleError,
        ),
        (status = NOT_FOUND, description = "booking not found", body = SimpleError),
    ),
)]
pub async fn update_status(
    Path(booking_id): Path<i32>,
    Extension(req_user): Extension<RequestUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<dto::UpdateStatus>,
) -> Result<ApiResponse<booking::Model>, (StatusCode, SimpleError)> {
    let booking = find_booking(&state.db, booking_id).await?;

    refuse_invalid_transition(status::consumer_transition_allowed(
        booking.status,
        payload.status,
    ))?;

    let old_snapshot = audit::service::snapshot(&booking);

    let mut update: booking::ActiveModel = booking.into();
    update.status = Set(payload.status);

    let updated = update.update(&state.db).await.map_err(DbError::from)?;

    audit::service::record(
        &state.db,
        "BOOKING",
        updated.id,
        AuditAction::Update,
        old_snapshot,
        audit::service::snapshot(&updated),
        req_user.user.id,
        "booking status updated",
    )
    .await
    .or(Err(internal_error_res()))?;

    Ok(ApiResponse::new("status updated successfully", updated))
}

/// Completes a trip and settles its final fare
///
/// the fare is recomputed server side from the actual distance, the rate
/// and the tolls, applying the minimum distance floor from the global
/// pricing settings
#[utoipa::path(
    post,
    path = "/admin/bookings/{booking_id}/complete",
    tag = "admin",
    security(("access_token" = [])),
    params(
        ("booking_id" = i32, Path, description = "id of the booking"),
    ),
    request_body = CompleteTrip,
    responses(
        (status = OK, body = Booking),
        (
            status = BAD_REQUEST,
            description = "invalid dto error message or INVALID_STATUS_TRANSITION",
            body = SimpleError,
        ),
        (status = NOT_FOUND, description = "booking not found", body = SimpleError),
    ),
)]
pub async fn complete_trip(
    Path(booking_id): Path<i32>,
    Extension(req_user): Extension<RequestUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CompleteTrip>,
) -> Result<ApiResponse<booking::Model>, (StatusCode, SimpleError)> {
    let booking = find_booking(&state.db, booking_id).await?;

    refuse_invalid_transition(status::consumer_transition_allowed(
        booking.status,
        BookingStatus::Completed,
    ))?;

    let rate_per_km = payload
        .rate_per_km
        .or(service::implied_rate(
            booking.estimated_fare,
            booking.distance_km,
        ))
        .ok_or((
            StatusCode::BAD_REQUEST,
            SimpleError::from("rate per km is required when the booking has no distance estimate"),
        ))?;

    let settings = pricing::routes::get_or_create_settings(&state.db)
        .await
        .map_err(DbError::from)?;

    let toll_charges = payload.toll_charges.unwrap_or(0.0);
    let final_fare =
        pricing::fare::compute_final_fare(payload.actual_km, rate_per_km, toll_charges, &settings);

    let old_snapshot = audit::service::snapshot(&booking);

    let mut update: booking::ActiveModel = booking.into();
    update.status = Set(BookingStatus::Completed);
    update.actual_km = Set(Some(payload.actual_km));
    update.toll_charges = Set(Some(toll_charges));
    update.total_amount = Set(Some(final_fare));

    let updated = update.update(&state.db).await.map_err(DbError::from)?;

    audit::service::record(
        &state.db,
        "BOOKING",
        updated.id,
        AuditAction::Update,
        old_snapshot,
        audit::service::snapshot(&updated),
        req_user.user.id,
        "trip completed with recomputed final fare",
    )
    .await
    .or(Err(internal_error_res()))?;

    Ok(ApiResponse::new("trip completed successfully", updated))
}

/// Cancels a booking, the reason is mandatory and kept on the row
#[utoipa::path(
    post,
    path = "/admin/bookings/{booking_id}/cancel",
    tag = "admin",
    security(("access_token" = [])),
    params(
        ("booking_id" = i32, Path, description = "id of the booking"),
    ),
    request_body = CancelBooking,
    responses(
        (status = OK, body = Booking),
        (
            status = BAD_REQUEST,
            description = "missing reason or INVALID_STATUS_TRANSITION",
            body = SimpleError,
        ),
        (status = NOT_FOUND, description = "booking not found", body = SimpleError),
    ),
)]
pub async fn cancel_booking(
    Path(booking_id): Path<i32>,
    Extension(req_user): Extension<RequestUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CancelBooking>,
) -> Result<ApiResponse<booking::Model>, (StatusCode, SimpleError)> {
    let booking = find_booking(&state.db, booking_id).await?;

    refuse_invalid_transition(status::consumer_transition_allowed(
        booking.status,
        BookingStatus::Cancelled,
    ))?;

    let old_snapshot = audit::service::snapshot(&booking);

    let mut update: booking::ActiveModel = booking.into();
    update.status = Set(BookingStatus::Cancelled);
    update.cancel_reason = Set(Some(payload.reason.clone()));

    let updated = update.update(&state.db).await.map_err(DbError::from)?;

    audit::service::record(
        &state.db,
        "BOOKING",
        updated.id,
        AuditAction::Update,
        old_snapshot,
        audit::service::snapshot(&updated),
        req_user.user.id,
        &payload.reason,
    )
    .await
    .or(Err(internal_error_res()))?;

    Ok(ApiResponse::new("booking cancelled", updated))
}

/// Lists the internal notes of a booking in creation order
#[utoipa::path(
    get,
    path = "/admin/bookings/{booking_id}/notes",
    tag = "admin",
    security(("access_token" = [])),
    params(
        ("booking_id" = i32, Path, description = "id of the booking"),
    ),
    responses(
        (status = OK, body = Vec<BookingNote>),
        (status = NOT_FOUND, description = "booking not found", body = SimpleError),
    ),
)]
pub async fn list_notes(
    Path(booking_id): Path<i32>,
    DbConnection(db): DbConnection,
) -> Result<ApiResponse<Vec<booking_note::Model>>, (StatusCode, SimpleError)> {
    find_booking(&db, booking_id).await?;

    let notes = booking_note::Entity::find()
        .filter(booking_note::Column::BookingId.eq(booking_id))
        .order_by_asc(booking_note::Column::CreatedAt)
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(ApiResponse::data(notes))
}

/// Appends a internal note to a booking, notes are never edited or removed
#[utoipa::path(
    post,
    path = "/admin/bookings/{booking_id}/notes",
    tag = "admin",
    security(("access_token" = [])),
    params(
        ("booking_id" = i32, Path, description = "id of the booking"),
    ),
    request_body = AddNote,
    responses(
        (status = CREATED, body = BookingNote),
        (status = NOT_FOUND, description = "booking not found", body = SimpleError),
    ),
)]
pub async fn add_note(
    Path(booking_id): Path<i32>,
    Extension(req_user): Extension<RequestUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AddNote>,
) -> Result<(StatusCode, ApiResponse<booking_note::Model>), (StatusCode, SimpleError)> {
    find_booking(&state.db, booking_id).await?;

    let note = booking_note::ActiveModel {
        booking_id: Set(booking_id),
        note: Set(payload.note),
        created_by: Set(Some(req_user.user.id)),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(DbError::from)?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::new("note added successfully", note),
    ))
}

/// Lists completed bookings for the history view, newest first
#[utoipa::path(
    get,
    path = "/admin/history/completed",
    tag = "admin",
    security(("access_token" = [])),
    responses(
        (status = OK, body = Vec<Booking>),
        (status = FORBIDDEN, description = "admin access required", body = SimpleError),
    ),
)]
pub async fn completed_history(
    DbConnection(db): DbConnection,
) -> Result<ApiResponse<Vec<booking::Model>>, (StatusCode, SimpleError)> {
    let bookings = booking::Entity::find()
        .filter(booking::Column::Status.eq(BookingStatus::Completed))
        .order_by_desc(booking::Column::CreatedAt)
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(ApiResponse::data(bookings))
}

/// Lists cancelled bookings with their reasons, newest first
#[utoipa::path(
    get,
    path = "/admin/history/cancelled",
    tag = "admin",
    security(("access_token" = [])),
    responses(
        (status = OK, body = Vec<Booking>),
        (status = FORBIDDEN, description = "admin access required", body = SimpleError),
    ),
)]
pub async fn cancelled_history(
    DbConnection(db): DbConnection,
) -> Result<ApiResponse<Vec<booking::Model>>, (StatusCode, SimpleError)> {
    let bookings = booking::Entity::find()
        .filter(booking::Column::Status.eq(BookingStatus::Cancelled))
        .order_by_desc(booking::Column::CreatedAt)
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(ApiResponse::data(bookings))
}

/// Lists bookings stuck awaiting payment, newest first
#[utoipa::path(
    get,
    path = "/admin/pending-payments",
    tag = "admin",
    security(("access_token" = [])),
    responses(
        (status = OK, body = Vec<Booking>),
        (status = FORBIDDEN, description = "admin access required", body = SimpleError),
    ),
)]
pub async fn pending_payments(
    DbConnection(db): DbConnection,
) -> Result<ApiResponse<Vec<booking::Model>>, (StatusCode, SimpleError)> {
    let bookings = booking::Entity::find()
        .filter(booking::Column::Status.eq(BookingStatus::PendingPayment))
        .order_by_desc(booking::Column::CreatedAt)
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(ApiResponse::data(bookings))
}

/// Lists every B2B booking for the dispatch panel, newest first
#[utoipa::path(
    get,
    path = "/admin/b2b-bookings",
    tag = "admin",
    security(("access_token" = [])),
    responses(
        (status = OK, body = Vec<B2bDispatchRow>),
        (status = FORBIDDEN, description = "admin access required", body = SimpleError),
    ),
)]
pub async fn list_b2b_bookings(
    DbConnection(db): DbConnection,
) -> Result<ApiResponse<Vec<B2bDispatchRow>>, (StatusCode, SimpleError)> {
    let bookings = b2b_booking::Entity::find()
        .order_by_desc(b2b_booking::Column::CreatedAt)
        .find_also_related(b2b_company::Entity)
        .all(&db)
        .await
        .map_err(DbError::from)?;

    let booking_ids: Vec<i32> = bookings.iter().map(|(b, _)| b.id).collect();

    let mut assignments: HashMap<i32, taxi_assignment::Model> = taxi_assignment::Entity::find()
        .filter(taxi_assignment::Column::B2bBookingId.is_in(booking_ids))
        .all(&db)
        .await
        .map_err(DbError::from)?
        .into_iter()
        .filter_map(|a| a.b2b_booking_id.map(|id| (id, a)))
        .collect();

    let rows = bookings
        .into_iter()
        .map(|(booking, company)| B2bDispatchRow {
            assignment: assignments.remove(&booking.id),
            booking,
            company,
        })
        .collect();

    Ok(ApiResponse::data(rows))
}

/// Assigns a driver and cab to a B2B booking
#[utoipa::path(
    post,
    path = "/admin/b2b-bookings/{booking_id}/assign-taxi",
    tag = "admin",
    security(("access_token" = [])),
    params(
        ("booking_id" = i32, Path, description = "id of the B2B booking"),
    ),
    request_body = AssignTaxi,
    responses(
        (status = OK, body = TaxiAssignment),
        (status = BAD_REQUEST, description = "invalid dto error message", body = SimpleError),
        (status = NOT_FOUND, description = "booking not found", body = SimpleError),
    ),
)]
pub async fn b2b_assign_taxi(
    Path(booking_id): Path<i32>,
    Extension(req_user): Extension<RequestUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AssignTaxi>,
) -> Result<ApiResponse<taxi_assignment::Model>, (StatusCode, SimpleError)> {
    let booking = find_b2b_booking(&state.db, booking_id).await?;

    let assignment = service::assign_taxi_to_b2b_booking(&state.db, booking, payload)
        .await
        .map_err(DbError::from)?;

    audit::service::record(
        &state.db,
        "B2B_BOOKING",
        booking_id,
        AuditAction::Update,
        None,
        audit::service::snapshot(&assignment),
        req_user.user.id,
        "taxi assigned to booking",
    )
    .await
    .or(Err(internal_error_res()))?;

    Ok(ApiResponse::new("taxi assigned successfully", assignment))
}

/// Moves a B2B booking to another lifecycle status
#[utoipa::path(
    patch,
    path = "/admin/b2b-bookings/{booking_id}/status",
    tag = "admin",
    security(("access_token" = [])),
    params(
        ("booking_id" = i32, Path, description = "id of the B2B booking"),
    ),
    request_body = UpdateB2bStatus,
    responses(
        (status = OK, body = B2bBooking),
        (
            status = BAD_REQUEST,
            description = "INVALID_STATUS_TRANSITION",
            body = SimpleError,
        ),
        (status = NOT_FOUND, description = "booking not found", body = SimpleError),
    ),
)]
pub async fn b2b_update_status(
    Path(booking_id): Path<i32>,
    Extension(req_user): Extension<RequestUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<dto::UpdateB2bStatus>,
) -> Result<ApiResponse<b2b_booking::Model>, (StatusCode, SimpleError)> {
    let booking = find_b2b_booking(&state.db, booking_id).await?;

    refuse_invalid_transition(status::b2b_transition_allowed(booking.status, payload.status))?;

    let old_snapshot = audit::service::snapshot(&booking);

    let mut update: b2b_booking::ActiveModel = booking.into();
    update.status = Set(payload.status);

    let updated = update.update(&state.db).await.map_err(DbError::from)?;

    audit::service::record(
        &state.db,
        "B2B_BOOKING",
        updated.id,
        AuditAction::Update,
        old_snapshot,
        audit::service::snapshot(&updated),
        req_user.user.id,
        "booking status updated",
    )
    .await
    .or(Err(internal_error_res()))?;

    Ok(ApiResponse::new("status updated successfully", updated))
}

/// Completes a B2B trip and settles its final billed amount
#[utoipa::path(
    post,
    path = "/admin/b2b-bookings/{booking_id}/complete",
    tag = "admin",
    security(("access_token" = [])),
    params(
        ("booking_id" = i32, Path, description = "id of the B2B booking"),
    ),
    request_body = CompleteTrip,
    responses(
        (status = OK, body = B2bBooking),
        (
            status = BAD_REQUEST,
            description = "invalid dto error message or INVALID_STATUS_TRANSITION",
            body = SimpleError,
        ),
        (status = NOT_FOUND, description = "booking not found", body = SimpleError),
    ),
)]
pub async fn b2b_complete_trip(
    Path(booking_id): Path<i32>,
    Extension(req_user): Extension<RequestUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CompleteTrip>,
) -> Result<ApiResponse<b2b_booking::Model>, (StatusCode, SimpleError)> {
    let booking = find_b2b_booking(&state.db, booking_id).await?;

    refuse_invalid_transition(status::b2b_transition_allowed(
        booking.status,
        B2bBookingStatus::Completed,
    ))?;

    let rate_per_km = payload
        .rate_per_km
        .or(service::implied_rate(
            booking.estimated_fare,
            booking.distance_km,
        ))
        .ok_or((
            StatusCode::BAD_REQUEST,
            SimpleError::from("rate per km is required when the booking has no distance estimate"),
        ))?;

    let settings = pricing::routes::get_or_create_settings(&state.db)
        .await
        .map_err(DbError::from)?;

    let toll_charges = payload.toll_charges.unwrap_or(0.0);
    let final_fare =
        pricing::fare::compute_final_fare(payload.actual_km, rate_per_km, toll_charges, &settings);

    let old_snapshot = audit::service::snapshot(&booking);

    let mut update: b2b_booking::ActiveModel = booking.into();
    update.status = Set(B2bBookingStatus::Completed);
    update.actual_km = Set(Some(payload.actual_km));
    update.toll_charges = Set(Some(toll_charges));
    update.total_amount = Set(final_fare);

    let updated = update.update(&state.db).await.map_err(DbError::from)?;

    audit::service::record(
        &state.db,
        "B2B_BOOKING",
        updated.id,
        AuditAction::Update,
        old_snapshot,
        audit::service::snapshot(&updated),
        req_user.user.id,
        "trip completed with recomputed final fare",
    )
    .await
    .or(Err(internal_error_res()))?;

    Ok(ApiResponse::new("trip completed successfully", updated))
}

/// Cancels a B2B booking, the reason is mandatory and kept on the row
#[utoipa::path(
    post,
    path = "/admin/b2b-bookings/{booking_id}/cancel",
    tag = "admin",
    security(("access_token" = [])),
    params(
        ("booking_id" = i32, Path, description = "id of the B2B booking"),
    ),
    request_body = CancelBooking,
    responses(
        (status = OK, body = B2bBooking),
        (
            status = BAD_REQUEST,
            description = "missing reason or INVALID_STATUS_TRANSITION",
            body = SimpleError,
        ),
        (status = NOT_FOUND, description = "booking not found", body = SimpleError),
    ),
)]
pub async fn b2b_cancel_booking(
    Path(booking_id): Path<i32>,
    Extension(req_user): Extension<RequestUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CancelBooking>,
) -> Result<ApiResponse<b2b_booking::Model>, (StatusCode, SimpleError)> {
    let booking = find_b2b_booking(&state.db, booking_id).await?;

    refuse_invalid_transition(status::b2b_transition_allowed(
        booking.status,
        B2bBookingStatus::Cancelled,
    ))?;

    let old_snapshot = audit::service::snapshot(&booking);

    let mut update: b2b_booking::ActiveModel = booking.into();
    update.status = Set(B2bBookingStatus::Cancelled);
    update.cancel_reason = Set(Some(payload.reason.clone()));

    let updated = update.update(&state.db).await.map_err(DbError::from)?;

    audit::service::record(
        &state.db,
        "B2B_BOOKING",
        updated.id,
        AuditAction::Update,
        old_snapshot,
        audit::service::snapshot(&updated),
        req_user.user.id,
        &payload.reason,
    )
    .await
    .or(Err(internal_error_res()))?;

    Ok(ApiResponse::new("booking cancelled", updated))
}

/// Marks a completed B2B bill as settled offline
///
/// the settlement mode and remarks are kept on the booking, the company
/// ledger itself is credited separately through the billing payments
#[utoipa::path(
    post,
    path = "/admin/b2b-bookings/{booking_id}/mark-paid",
    tag = "admin",
    security(("access_token" = [])),
    params(
        ("booking_id" = i32, Path, description = "id of the B2B booking"),
    ),
    request_body = MarkPaid,
    responses(
        (status = OK, body = B2bBooking),
        (
            status = BAD_REQUEST,
            description = "only completed bookings can be marked paid",
            body = SimpleError,
        ),
        (status = NOT_FOUND, description = "booking not found", body = SimpleError),
    ),
)]
pub async fn b2b_mark_paid(
    Path(booking_id): Path<i32>,
    Extension(req_user): Extension<RequestUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<MarkPaid>,
) -> Result<ApiResponse<b2b_booking::Model>, (StatusCode, SimpleError)> {
    let booking = find_b2b_booking(&state.db, booking_id).await?;

    refuse_invalid_transition(status::b2b_transition_allowed(
        booking.status,
        B2bBookingStatus::Paid,
    ))?;

    let old_snapshot = audit::service::snapshot(&booking);

    let mut update: b2b_booking::ActiveModel = booking.into();
    update.status = Set(B2bBookingStatus::Paid);
    update.payment_mode = Set(Some(payload.mode));
    update.payment_remarks = Set(payload.remarks);
    update.paid_at = Set(Some(chrono::Utc::now().into()));

    let updated = update.update(&state.db).await.map_err(DbError::from)?;

    audit::service::record(
        &state.db,
        "B2B_BOOKING",
        updated.id,
        AuditAction::Update,
        old_snapshot,
        audit::service::snapshot(&updated),
        req_user.user.id,
        "bill marked as paid offline",
    )
    .await
    .or(Err(internal_error_res()))?;

    Ok(ApiResponse::new("bill marked as paid", updated))
}
