use super::dto::{CreateFleetVehicle, UpdateFleetVehicle};
use super::repository;
use crate::modules::audit;
use crate::modules::auth::middleware::{self, RequestUser};
use crate::modules::common::extractors::{DbConnection, ValidatedJson};
use crate::modules::common::responses::{internal_error_res, ApiResponse, SimpleError};
use crate::server::controller::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Router,
};
use entity::{enums::AuditAction, fleet_vehicle};

pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/all", get(list_all_vehicles))
        .route("/", post(create_vehicle))
        .route(
            "/:vehicle_id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .layer(axum::middleware::from_fn(middleware::require_admin))
        .layer(axum::middleware::from_fn_with_state(
            state,
            middleware::require_user,
        ))
        .route("/", get(list_vehicles))
}

/// Lists the active fleet catalog, without requiring a login
#[utoipa::path(
    get,
    path = "/fleet",
    tag = "fleet",
    responses(
        (status = OK, body = Vec<FleetVehicle>),
    ),
)]
pub async fn list_vehicles(
    DbConnection(db): DbConnection,
) -> Result<ApiResponse<Vec<fleet_vehicle::Model>>, (StatusCode, SimpleError)> {
    let vehicles = repository::list_active(&db).await?;

    Ok(ApiResponse::data(vehicles))
}

/// Lists the whole catalog including deactivated vehicles
#[utoipa::path(
    get,
    path = "/fleet/all",
    tag = "fleet",
    security(("access_token" = [])),
    responses(
        (status = OK, body = Vec<FleetVehicle>),
        (status = FORBIDDEN, description = "admin access required", body = SimpleError),
    ),
)]
pub async fn list_all_vehicles(
    DbConnection(db): DbConnection,
) -> Result<ApiResponse<Vec<fleet_vehicle::Model>>, (StatusCode, SimpleError)> {
    let vehicles = repository::list_all(&db).await?;

    Ok(ApiResponse::data(vehicles))
}

/// Gets a catalog vehicle by id
#[utoipa::path(
    get,
    path = "/fleet/{vehicle_id}",
    tag = "fleet",
    security(("access_token" = [])),
    params(
        ("vehicle_id" = i32, Path, description = "id of the vehicle"),
    ),
    responses(
        (status = OK, body = FleetVehicle),
        (status = NOT_FOUND, description = "vehicle not found", body = SimpleError),
    ),
)]
pub async fn get_vehicle(
    Path(vehicle_id): Path<i32>,
    DbConnection(db): DbConnection,
) -> Result<ApiResponse<fleet_vehicle::Model>, (StatusCode, SimpleError)> {
    let vehicle = repository::find_by_id(&db, vehicle_id).await?;

    Ok(ApiResponse::data(vehicle))
}

/// Adds a vehicle to the fleet catalog
#[utoipa::path(
    post,
    path = "/fleet",
    tag = "fleet",
    security(("access_token" = [])),
    request_body = CreateFleetVehicle,
    responses(
        (status = CREATED, body = FleetVehicle),
        (status = BAD_REQUEST, description = "invalid dto error message", body = SimpleError),
    ),
)]
pub async fn create_vehicle(
    Extension(req_user): Extension<RequestUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateFleetVehicle>,
) -> Result<(StatusCode, ApiResponse<fleet_vehicle::Model>), (StatusCode, SimpleError)> {
    let created = repository::create(&state.db, &payload).await?;

    audit::service::record(
        &state.db,
        "FLEET_VEHICLE",
        created.id,
        AuditAction::Create,
        None,
        audit::service::snapshot(&created),
        req_user.user.id,
        "added vehicle to the fleet catalog",
    )
    .await
    .or(Err(internal_error_res()))?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::new("vehicle created successfully", created),
    ))
}

/// Updates a catalog vehicle
#[utoipa::path(
    put,
    path = "/fleet/{vehicle_id}",
    tag = "fleet",
    security(("access_token" = [])),
    params(
        ("vehicle_id" = i32, Path, description = "id of the vehicle"),
    ),
    request_body = UpdateFleetVehicle,
    responses(
        (status = OK, body = FleetVehicle),
        (status = NOT_FOUND, description = "vehicle not found", body = SimpleError),
    ),
)]
pub async fn update_vehicle(
    Path(vehicle_id): Path<i32>,
    Extension(req_user): Extension<RequestUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateFleetVehicle>,
) -> Result<ApiResponse<fleet_vehicle::Model>, (StatusCode, SimpleError)> {
    let current = repository::find_by_id(&state.db, vehicle_id).await?;
    let old_snapshot = audit::service::snapshot(&current);

    let updated = repository::update(&state.db, current, &payload).await?;

    audit::service::record(
        &state.db,
        "FLEET_VEHICLE",
        updated.id,
        AuditAction::Update,
        old_snapshot,
        audit::service::snapshot(&updated),
        req_user.user.id,
        "updated fleet catalog vehicle",
    )
    .await
    .or(Err(internal_error_res()))?;

    Ok(ApiResponse::new("vehicle updated successfully", updated))
}

/// Deactivates a catalog vehicle
///
/// company assignments reference catalog rows, so this is a soft delete
#[utoipa::path(
    delete,
    path = "/fleet/{vehicle_id}",
    tag = "fleet",
    security(("access_token" = [])),
    params(
        ("vehicle_id" = i32, Path, description = "id of the vehicle"),
    ),
    responses(
        (status = OK, description = "vehicle deactivated"),
        (status = NOT_FOUND, description = "vehicle not found", body = SimpleError),
    ),
)]
pub async fn delete_vehicle(
    Path(vehicle_id): Path<i32>,
    Extension(req_user): Extension<RequestUser>,
    State(state): State<AppState>,
) -> Result<ApiResponse<()>, (StatusCode, SimpleError)> {
    let current = repository::find_by_id(&state.db, vehicle_id).await?;
    let old_snapshot = audit::service::snapshot(&current);

    let deactivated = repository::soft_delete(&state.db, current).await?;

    audit::service::record(
        &state.db,
        "FLEET_VEHICLE",
        deactivated.id,
        AuditAction::Delete,
        old_snapshot,
        audit::service::snapshot(&deactivated),
        req_user.user.id,
        "deactivated fleet catalog vehicle",
    )
    .await
    .or(Err(internal_error_res()))?;

    Ok(ApiResponse::msg("vehicle deactivated successfully"))
}
