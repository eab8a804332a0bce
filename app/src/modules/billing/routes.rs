use super::dto::{CompanyBillingView, RecordPayment};
use super::service;
use crate::database::error::DbError;
use crate::modules::auth::middleware::{self, RequestUser};
use crate::modules::common::extractors::{CompanyId, DbConnection, ValidatedJson};
use crate::modules::common::responses::{ApiResponse, SimpleError};
use crate::server::controller::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Router,
};
use chrono::Utc;
use entity::{b2b_booking, b2b_company, b2b_payment};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/payments", post(record_payment))
        .route("/companies/:company_id/bookings", get(company_billing_view))
        .layer(axum::middleware::from_fn(middleware::require_admin))
        .route("/payments", get(my_company_payments))
        .layer(axum::middleware::from_fn_with_state(
            state,
            middleware::require_user,
        ))
}

async fn company_must_exist(
    db: &DatabaseConnection,
    company_id: i32,
) -> Result<b2b_company::Model, (StatusCode, SimpleError)> {
    b2b_company::Entity::find_by_id(company_id)
        .one(db)
        .await
        .map_err(DbError::from)?
        .ok_or((StatusCode::NOT_FOUND, SimpleError::from("company not found")))
}

/// Records a ledger payment received from a company
#[utoipa::path(
    post,
    path = "/b2b/payments",
    tag = "billing",
    security(("access_token" = [])),
    request_body = RecordPayment,
    responses(
        (status = CREATED, body = B2bPayment),
        (
            status = BAD_REQUEST,
            description = "invalid dto error message, amounts must be positive",
            body = SimpleError,
        ),
        (status = NOT_FOUND, description = "company not found", body = SimpleError),
    ),
)]
pub async fn record_payment(
    Extension(req_user): Extension<RequestUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RecordPayment>,
) -> Result<(StatusCode, ApiResponse<b2b_payment::Model>), (StatusCode, SimpleError)> {
    company_must_exist(&state.db, payload.company_id).await?;

    let payment = b2b_payment::ActiveModel {
        company_id: Set(payload.company_id),
        amount: Set(payload.amount),
        payment_mode: Set(payload.payment_mode),
        reference_no: Set(payload.reference_no),
        notes: Set(payload.notes),
        paid_at: Set(Utc::now().into()),
        created_by: Set(Some(req_user.user.id)),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(DbError::from)?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::new("payment recorded successfully", payment),
    ))
}

/// Lists the ledger payments of the request user company, newest first
#[utoipa::path(
    get,
    path = "/b2b/payments",
    tag = "billing",
    security(("access_token" = [])),
    responses(
        (status = OK, body = Vec<B2bPayment>),
        (
            status = FORBIDDEN,
            description = "request user is not linked to a company",
            body = SimpleError,
        ),
    ),
)]
pub async fn my_company_payments(
    CompanyId(company_id): CompanyId,
    DbConnection(db): DbConnection,
) -> Result<ApiResponse<Vec<b2b_payment::Model>>, (StatusCode, SimpleError)> {
    let payments = b2b_payment::Entity::find()
        .filter(b2b_payment::Column::CompanyId.eq(company_id))
        .order_by_desc(b2b_payment::Column::PaidAt)
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(ApiResponse::data(payments))
}

/// Bookings and billing position of a company
///
/// bookings, ledger payments, the billing summary and the per month
/// breakdown, the dispatch panel billing tab renders straight from this
#[utoipa::path(
    get,
    path = "/b2b/companies/{company_id}/bookings",
    tag = "billing",
    security(("access_token" = [])),
    params(
        ("company_id" = i32, Path, description = "id of the company"),
    ),
    responses(
        (status = OK, body = CompanyBillingView),
        (status = NOT_FOUND, description = "company not found", body = SimpleError),
    ),
)]
pub async fn company_billing_view(
    Path(company_id): Path<i32>,
    DbConnection(db): DbConnection,
) -> Result<ApiResponse<CompanyBillingView>, (StatusCode, SimpleError)> {
    company_must_exist(&db, company_id).await?;

    let bookings = b2b_booking::Entity::find()
        .filter(b2b_booking::Column::CompanyId.eq(company_id))
        .order_by_desc(b2b_booking::Column::CreatedAt)
        .all(&db)
        .await
        .map_err(DbError::from)?;

    let payments = b2b_payment::Entity::find()
        .filter(b2b_payment::Column::CompanyId.eq(company_id))
        .order_by_desc(b2b_payment::Column::PaidAt)
        .all(&db)
        .await
        .map_err(DbError::from)?;

    let billing_summary = service::summarize(&bookings, &payments);
    let monthly_breakdown = service::monthly_breakdown(&bookings, &payments);

    Ok(ApiResponse::data(CompanyBillingView {
        bookings,
        payments,
        billing_summary,
        monthly_breakdown,
    }))
}
