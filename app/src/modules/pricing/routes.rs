use super::dto::UpdatePricingSettings;
use crate::database::error::DbError;
use crate::modules::audit;
use crate::modules::auth::middleware::{self, RequestUser};
use crate::modules::common::extractors::{DbConnection, ValidatedJson};
use crate::modules::common::responses::{internal_error_res, ApiResponse, SimpleError};
use crate::server::controller::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Extension, Router,
};
use chrono::Utc;
use entity::{enums::AuditAction, pricing_settings};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_settings).put(update_settings))
        .layer(axum::middleware::from_fn(middleware::require_admin))
        .layer(axum::middleware::from_fn_with_state(
            state,
            middleware::require_user,
        ))
        .route("/public", get(get_public_settings))
}

/// fetches the single settings row, creating it with defaults when missing
pub async fn get_or_create_settings(
    db: &DatabaseConnection,
) -> Result<pricing_settings::Model, sea_orm::DbErr> {
    if let Some(settings) = pricing_settings::Entity::find().one(db).await? {
        return Ok(settings);
    }

    pricing_settings::ActiveModel {
        min_km_threshold: Set(100.0),
        min_km_airport_apply: Set(false),
        min_km_oneway_apply: Set(false),
        min_km_roundtrip_apply: Set(false),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Gets the global pricing settings, without requiring a login
///
/// exposed publicly so estimated fares can be computed client side
#[utoipa::path(
    get,
    path = "/pricing/public",
    tag = "pricing",
    responses(
        (status = OK, body = PricingSettings),
    ),
)]
pub async fn get_public_settings(
    DbConnection(db): DbConnection,
) -> Result<ApiResponse<pricing_settings::Model>, (StatusCode, SimpleError)> {
    let settings = get_or_create_settings(&db).await.map_err(DbError::from)?;

    Ok(ApiResponse::data(settings))
}

/// Gets the global pricing settings
#[utoipa::path(
    get,
    path = "/pricing",
    tag = "pricing",
    security(("access_token" = [])),
    responses(
        (status = OK, body = PricingSettings),
        (status = FORBIDDEN, description = "admin access required", body = SimpleError),
    ),
)]
pub async fn get_settings(
    DbConnection(db): DbConnection,
) -> Result<ApiResponse<pricing_settings::Model>, (StatusCode, SimpleError)> {
    let settings = get_or_create_settings(&db).await.map_err(DbError::from)?;

    Ok(ApiResponse::data(settings))
}

/// Updates the global pricing settings
///
/// absent fields are left untouched, the change is recorded on the audit trail
#[utoipa::path(
    put,
    path = "/pricing",
    tag = "pricing",
    security(("access_token" = [])),
    request_body = UpdatePricingSettings,
    responses(
        (status = OK, body = PricingSettings),
        (status = BAD_REQUEST, description = "invalid dto error message", body = SimpleError),
        (status = FORBIDDEN, description = "admin access required", body = SimpleError),
    ),
)]
pub async fn update_settings(
    Extension(req_user): Extension<RequestUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdatePricingSettings>,
) -> Result<ApiResponse<pricing_settings::Model>, (StatusCode, SimpleError)> {
    let current = get_or_create_settings(&state.db)
        .await
        .map_err(DbError::from)?;

    let old_snapshot = audit::service::snapshot(&current);

    let mut settings: pricing_settings::ActiveModel = current.into();

    if let Some(threshold) = payload.min_km_threshold {
        settings.min_km_threshold = Set(threshold);
    }
    if let Some(apply) = payload.min_km_airport_apply {
        settings.min_km_airport_apply = Set(apply);
    }
    if let Some(apply) = payload.min_km_oneway_apply {
        settings.min_km_oneway_apply = Set(apply);
    }
    if let Some(apply) = payload.min_km_roundtrip_apply {
        settings.min_km_roundtrip_apply = Set(apply);
    }

    settings.updated_at = Set(Some(Utc::now().into()));

    let updated = settings.update(&state.db).await.map_err(DbError::from)?;

    audit::service::record(
        &state.db,
        "PRICING",
        updated.id,
        AuditAction::Update,
        old_snapshot,
        audit::service::snapshot(&updated),
        req_user.user.id,
        "updated global pricing settings",
    )
    .await
    .or(Err(internal_error_res()))?;

    Ok(ApiResponse::new("settings updated successfully", updated))
}
