use super::dto::{
    self, ApprovalOutcome, CompanyDetails, CompanyMember, CreditBookingRow, FleetAssignment,
    ListRequestsQuery, RequestWithCompany,
};
use super::service::{self, ApproveError};
use crate::database::error::DbError;
use crate::modules::auth::middleware::{self, RequestUser};
use crate::modules::common::extractors::{CompanyId, DbConnection, ValidatedJson, ValidatedQuery};
use crate::modules::common::responses::{internal_error_res, ApiResponse, SimpleError};
use crate::server::controller::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Router,
};
use entity::{
    b2b_booking, b2b_company, b2b_request, b2b_user, company_fleet,
    enums::{B2bBookingStatus, TaxiAssignStatus},
    fleet_vehicle, taxi_assignment, user,
};
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/requests", get(list_requests))
        .route("/requests/:request_id", get(get_request))
        .route("/requests/:request_id/approve", post(approve_request))
        .route("/requests/:request_id/reject", post(reject_request))
        .route("/companies", get(list_companies))
        .route(
            "/companies/:company_id/fleet",
            get(get_company_fleet).post(manage_company_fleet),
        )
        .layer(axum::middleware::from_fn(middleware::require_admin))
        .route("/company/my", get(my_company))
        .route("/company/:company_id", get(get_company))
        .route("/bookings", get(company_bookings).post(create_credit_booking))
        .route("/my-fleet", get(my_fleet))
        .layer(axum::middleware::from_fn_with_state(
            state,
            middleware::require_user,
        ))
        .route("/register", post(submit_request))
}

/// Submits a company onboarding request from the public contact form
#[utoipa::path(
    post,
    path = "/b2b/register",
    tag = "b2b",
    request_body = SubmitRequest,
    responses(
        (status = CREATED, body = B2bRequest),
        (
            status = BAD_REQUEST,
            description = "invalid dto error message or a request with the email already exists",
            body = SimpleError,
        ),
    ),
)]
pub async fn submit_request(
    DbConnection(db): DbConnection,
    ValidatedJson(payload): ValidatedJson<dto::SubmitRequest>,
) -> Result<(StatusCode, ApiResponse<b2b_request::Model>), (StatusCode, SimpleError)> {
    let existing = b2b_request::Entity::find()
        .filter(b2b_request::Column::ContactEmail.eq(&payload.email))
        .one(&db)
        .await
        .map_err(DbError::from)?;

    if existing.is_some() {
        return Err((
            StatusCode::BAD_REQUEST,
            SimpleError::from("a request with this email already exists"),
        ));
    }

    let request = b2b_request::ActiveModel {
        contact_name: Set(payload.name),
        contact_email: Set(payload.email),
        contact_phone: Set(payload.phone),
        company_name: Set(payload.company),
        message: Set(payload.message),
        ..Default::default()
    }
    .insert(&db)
    .await
    .map_err(DbError::from)?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::new(
            "registration request submitted successfully, our team will contact you shortly",
            request,
        ),
    ))
}

/// Lists onboarding requests, newest first
#[utoipa::path(
    get,
    path = "/b2b/requests",
    tag = "b2b",
    security(("access_token" = [])),
    params(ListRequestsQuery),
    responses(
        (status = OK, body = Vec<RequestWithCompany>),
        (status = FORBIDDEN, description = "admin access required", body = SimpleError),
    ),
)]
pub async fn list_requests(
    ValidatedQuery(query): ValidatedQuery<dto::ListRequestsQuery>,
    DbConnection(db): DbConnection,
) -> Result<ApiResponse<Vec<RequestWithCompany>>, (StatusCode, SimpleError)> {
    let mut select = b2b_request::Entity::find()
        .find_also_related(b2b_company::Entity)
        .order_by_desc(b2b_request::Column::CreatedAt);

    if let Some(status) = query.status {
        select = select.filter(b2b_request::Column::Status.eq(status));
    }

    let requests = select
        .all(&db)
        .await
        .map_err(DbError::from)?
        .into_iter()
        .map(|(request, company)| RequestWithCompany { request, company })
        .collect();

    Ok(ApiResponse::data(requests))
}

/// Gets a onboarding request with the company it resolved to
#[utoipa::path(
    get,
    path = "/b2b/requests/{request_id}",
    tag = "b2b",
    security(("access_token" = [])),
    params(
        ("request_id" = i32, Path, description = "id of the request"),
    ),
    responses(
        (status = OK, body = RequestWithCompany),
        (status = NOT_FOUND, description = "request not found", body = SimpleError),
    ),
)]
pub async fn get_request(
    Path(request_id): Path<i32>,
    DbConnection(db): DbConnection,
) -> Result<ApiResponse<RequestWithCompany>, (StatusCode, SimpleError)> {
    let result = b2b_request::Entity::find_by_id(request_id)
        .find_also_related(b2b_company::Entity)
        .one(&db)
        .await
        .map_err(DbError::from)?;

    let Some((request, company)) = result else {
        return Err((StatusCode::NOT_FOUND, SimpleError::from("request not found")));
    };

    Ok(ApiResponse::data(RequestWithCompany { request, company }))
}

/// Approves a onboarding request
///
/// creates or resolves the company and the contact user account in one
/// transaction, new accounts start with the system assigned password and
/// must set their own on first login
#[utoipa::path(
    post,
    path = "/b2b/requests/{request_id}/approve",
    tag = "b2b",
    security(("access_token" = [])),
    params(
        ("request_id" = i32, Path, description = "id of the request"),
    ),
    request_body = ReviewRequest,
    responses(
        (status = OK, body = ApprovalOutcome),
        (status = NOT_FOUND, description = "request not found", body = SimpleError),
        (status = BAD_REQUEST, description = "request already approved", body = SimpleError),
    ),
)]
pub async fn approve_request(
    Path(request_id): Path<i32>,
    Extension(req_user): Extension<RequestUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<dto::ReviewRequest>,
) -> Result<ApiResponse<ApprovalOutcome>, (StatusCode, SimpleError)> {
    let outcome = service::approve_request(
        &state.db,
        request_id,
        req_user.user.id,
        payload.admin_notes,
    )
    .await
    .map_err(|e| match e {
        ApproveError::RequestNotFound => {
            (StatusCode::NOT_FOUND, SimpleError::from("request not found"))
        }
        ApproveError::AlreadyApproved => (
            StatusCode::BAD_REQUEST,
            SimpleError::from("request already approved"),
        ),
        ApproveError::Internal => internal_error_res(),
    })?;

    Ok(ApiResponse::new("request approved successfully", outcome))
}

/// Rejects a onboarding request
#[utoipa::path(
    post,
    path = "/b2b/requests/{request_id}/reject",
    tag = "b2b",
    security(("access_token" = [])),
    params(
        ("request_id" = i32, Path, description = "id of the request"),
    ),
    request_body = ReviewRequest,
    responses(
        (status = OK, body = B2bRequest),
        (status = NOT_FOUND, description = "request not found", body = SimpleError),
    ),
)]
pub async fn reject_request(
    Path(request_id): Path<i32>,
    Extension(req_user): Extension<RequestUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<dto::ReviewRequest>,
) -> Result<ApiResponse<b2b_request::Model>, (StatusCode, SimpleError)> {
    let rejected = service::reject_request(
        &state.db,
        request_id,
        req_user.user.id,
        payload.admin_notes,
    )
    .await
    .map_err(DbError::from)?
    .ok_or((StatusCode::NOT_FOUND, SimpleError::from("request not found")))?;

    Ok(ApiResponse::new("request rejected", rejected))
}

/// Lists every onboarded company, sorted by name
#[utoipa::path(
    get,
    path = "/b2b/companies",
    tag = "b2b",
    security(("access_token" = [])),
    responses(
        (status = OK, body = Vec<B2bCompany>),
        (status = FORBIDDEN, description = "admin access required", body = SimpleError),
    ),
)]
pub async fn list_companies(
    DbConnection(db): DbConnection,
) -> Result<ApiResponse<Vec<b2b_company::Model>>, (StatusCode, SimpleError)> {
    let companies = b2b_company::Entity::find()
        .order_by_asc(b2b_company::Column::CompanyName)
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(ApiResponse::data(companies))
}

/// Gets the company profile of the request user
#[utoipa::path(
    get,
    path = "/b2b/company/my",
    tag = "b2b",
    security(("access_token" = [])),
    responses(
        (status = OK, body = B2bCompany),
        (
            status = FORBIDDEN,
            description = "request user is not linked to a company",
            body = SimpleError,
        ),
    ),
)]
pub async fn my_company(
    CompanyId(company_id): CompanyId,
    DbConnection(db): DbConnection,
) -> Result<ApiResponse<b2b_company::Model>, (StatusCode, SimpleError)> {
    let company = b2b_company::Entity::find_by_id(company_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or((StatusCode::NOT_FOUND, SimpleError::from("company not found")))?;

    Ok(ApiResponse::data(company))
}

/// Gets a company with its member accounts
#[utoipa::path(
    get,
    path = "/b2b/company/{company_id}",
    tag = "b2b",
    security(("access_token" = [])),
    params(
        ("company_id" = i32, Path, description = "id of the company"),
    ),
    responses(
        (status = OK, body = CompanyDetails),
        (status = NOT_FOUND, description = "company not found", body = SimpleError),
    ),
)]
pub async fn get_company(
    Path(company_id): Path<i32>,
    DbConnection(db): DbConnection,
) -> Result<ApiResponse<CompanyDetails>, (StatusCode, SimpleError)> {
    let company = b2b_company::Entity::find_by_id(company_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or((StatusCode::NOT_FOUND, SimpleError::from("company not found")))?;

    let members = b2b_user::Entity::find()
        .filter(b2b_user::Column::CompanyId.eq(company.id))
        .find_also_related(user::Entity)
        .all(&db)
        .await
        .map_err(DbError::from)?
        .into_iter()
        .filter_map(|(link, account)| {
            account.map(|a| CompanyMember::from_link_and_user(&link, a))
        })
        .collect();

    Ok(ApiResponse::data(CompanyDetails { company, members }))
}

/// Lists the fleet assigned to a company with its catalog vehicles
#[utoipa::path(
    get,
    path = "/b2b/companies/{company_id}/fleet",
    tag = "b2b",
    security(("access_token" = [])),
    params(
        ("company_id" = i32, Path, description = "id of the company"),
    ),
    responses(
        (status = OK, body = Vec<FleetAssignment>),
        (status = FORBIDDEN, description = "admin access required", body = SimpleError),
    ),
)]
pub async fn get_company_fleet(
    Path(company_id): Path<i32>,
    DbConnection(db): DbConnection,
) -> Result<ApiResponse<Vec<FleetAssignment>>, (StatusCode, SimpleError)> {
    let fleet = company_fleet::Entity::find()
        .filter(company_fleet::Column::CompanyId.eq(company_id))
        .find_also_related(fleet_vehicle::Entity)
        .all(&db)
        .await
        .map_err(DbError::from)?
        .into_iter()
        .map(|(assignment, vehicle)| FleetAssignment { assignment, vehicle })
        .collect();

    Ok(ApiResponse::data(fleet))
}

/// Assigns a catalog vehicle to a company or updates its negotiated price
///
/// upserts on (company, vehicle), a retried assignment updates the price
/// instead of duplicating the row
#[utoipa::path(
    post,
    path = "/b2b/companies/{company_id}/fleet",
    tag = "b2b",
    security(("access_token" = [])),
    params(
        ("company_id" = i32, Path, description = "id of the company"),
    ),
    request_body = ManageCompanyFleet,
    responses(
        (status = OK, body = CompanyFleetAssignment),
        (status = BAD_REQUEST, description = "invalid dto error message", body = SimpleError),
        (status = NOT_FOUND, description = "company or vehicle not found", body = SimpleError),
    ),
)]
pub async fn manage_company_fleet(
    Path(company_id): Path<i32>,
    DbConnection(db): DbConnection,
    ValidatedJson(payload): ValidatedJson<dto::ManageCompanyFleet>,
) -> Result<ApiResponse<company_fleet::Model>, (StatusCode, SimpleError)> {
    b2b_company::Entity::find_by_id(company_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or((StatusCode::NOT_FOUND, SimpleError::from("company not found")))?;

    fleet_vehicle::Entity::find_by_id(payload.fleet_vehicle_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or((StatusCode::NOT_FOUND, SimpleError::from("vehicle not found")))?;

    let assignment = company_fleet::ActiveModel {
        company_id: Set(company_id),
        fleet_vehicle_id: Set(payload.fleet_vehicle_id),
        custom_price_per_km: Set(payload.custom_price_per_km),
        is_active: Set(payload.is_active.unwrap_or(true)),
        ..Default::default()
    };

    let assignment = company_fleet::Entity::insert(assignment)
        .on_conflict(
            OnConflict::columns([
                company_fleet::Column::CompanyId,
                company_fleet::Column::FleetVehicleId,
            ])
            .update_columns([
                company_fleet::Column::CustomPricePerKm,
                company_fleet::Column::IsActive,
            ])
            .to_owned(),
        )
        .exec_with_returning(&db)
        .await
        .map_err(DbError::from)?;

    Ok(ApiResponse::new("fleet updated successfully", assignment))
}

/// Lists the vehicles available to the request user company
///
/// an assignment shows up only while both it and its catalog vehicle are
/// active, the company price overrides the catalog one
#[utoipa::path(
    get,
    path = "/b2b/my-fleet",
    tag = "b2b",
    security(("access_token" = [])),
    responses(
        (status = OK, body = Vec<FleetVehicle>),
        (
            status = FORBIDDEN,
            description = "request user is not linked to a company",
            body = SimpleError,
        ),
    ),
)]
pub async fn my_fleet(
    CompanyId(company_id): CompanyId,
    DbConnection(db): DbConnection,
) -> Result<ApiResponse<Vec<fleet_vehicle::Model>>, (StatusCode, SimpleError)> {
    let vehicles = company_fleet::Entity::find()
        .filter(company_fleet::Column::CompanyId.eq(company_id))
        .filter(company_fleet::Column::IsActive.eq(true))
        .find_also_related(fleet_vehicle::Entity)
        .all(&db)
        .await
        .map_err(DbError::from)?
        .into_iter()
        .filter_map(|(assignment, vehicle)| {
            vehicle.filter(|v| v.is_active).map(|mut v| {
                v.base_price_per_km = assignment.custom_price_per_km;
                v
            })
        })
        .collect();

    Ok(ApiResponse::data(vehicles))
}

/// Lists the credit bookings of the request user company, newest first
#[utoipa::path(
    get,
    path = "/b2b/bookings",
    tag = "b2b",
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
pub async fn company_bookings(
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

/// Books a ride on company credit
///
/// credit bookings skip the payment step, start CONFIRMED and bill the
/// amount against the company ledger
#[utoipa::path(
    post,
    path = "/b2b/bookings",
    tag = "b2b",
    security(("access_token" = [])),
    request_body = CreateCreditBooking,
    responses(
        (status = CREATED, body = B2bBooking),
        (
            status = FORBIDDEN,
            description = "request user is not linked to a company",
            body = SimpleError,
        ),
        (status = BAD_REQUEST, description = "invalid dto error message", body = SimpleError),
    ),
)]
pub async fn create_credit_booking(
    CompanyId(company_id): CompanyId,
    Extension(req_user): Extension<RequestUser>,
    DbConnection(db): DbConnection,
    ValidatedJson(payload): ValidatedJson<dto::CreateCreditBooking>,
) -> Result<(StatusCode, ApiResponse<b2b_booking::Model>), (StatusCode, SimpleError)> {
    let booking = b2b_booking::ActiveModel {
        company_id: Set(company_id),
        booked_by: Set(req_user.user.id),
        pickup_location: Set(payload.pickup_location),
        drop_location: Set(payload.drop_location),
        scheduled_at: Set(payload.scheduled_at),
        distance_km: Set(payload.distance_km),
        estimated_fare: Set(payload.estimated_fare),
        total_amount: Set(payload.total_amount),
        car_model: Set(payload.car_model),
        status: Set(B2bBookingStatus::Confirmed),
        taxi_assign_status: Set(TaxiAssignStatus::NotAssigned),
        ..Default::default()
    }
    .insert(&db)
    .await
    .map_err(DbError::from)?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::new("booking confirmed on company credit", booking),
    ))
}
