use super::dto::{CreateDriver, ListDriversQuery, UpdateDriver};
use crate::database::error::DbError;
use crate::modules::audit;
use crate::modules::auth::middleware::{self, RequestUser};
use crate::modules::common::extractors::{DbConnection, ValidatedJson, ValidatedQuery};
use crate::modules::common::responses::{internal_error_res, ApiResponse, SimpleError};
use crate::server::controller::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Router,
};
use entity::{driver, enums::AuditAction};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_drivers).post(create_driver))
        .route(
            "/:driver_id",
            get(get_driver).put(update_driver).delete(delete_driver),
        )
        .layer(axum::middleware::from_fn(middleware::require_admin))
        .layer(axum::middleware::from_fn_with_state(
            state,
            middleware::require_user,
        ))
}

async fn find_driver(
    db: &DatabaseConnection,
    driver_id: i32,
) -> Result<driver::Model, (StatusCode, SimpleError)> {
    driver::Entity::find_by_id(driver_id)
        .one(db)
        .await
        .map_err(DbError::from)?
        .ok_or((StatusCode::NOT_FOUND, SimpleError::from("driver not found")))
}

async fn phone_in_use(
    db: &DatabaseConnection,
    phone: &str,
) -> Result<bool, (StatusCode, SimpleError)> {
    let existing = driver::Entity::find()
        .filter(driver::Column::Phone.eq(phone))
        .one(db)
        .await
        .map_err(DbError::from)?;

    Ok(existing.is_some())
}

/// Lists the driver registry, sorted by name
#[utoipa::path(
    get,
    path = "/admin/drivers",
    tag = "driver",
    security(("access_token" = [])),
    params(ListDriversQuery),
    responses(
        (status = OK, body = Vec<Driver>),
        (status = FORBIDDEN, description = "admin access required", body = SimpleError),
    ),
)]
pub async fn list_drivers(
    ValidatedQuery(query): ValidatedQuery<ListDriversQuery>,
    DbConnection(db): DbConnection,
) -> Result<ApiResponse<Vec<driver::Model>>, (StatusCode, SimpleError)> {
    let mut select = driver::Entity::find().order_by_asc(driver::Column::Name);

    if query.active_only.unwrap_or(false) {
        select = select.filter(driver::Column::IsActive.eq(true));
    }

    let drivers = select.all(&db).await.map_err(DbError::from)?;

    Ok(ApiResponse::data(drivers))
}

/// Gets a registry driver by id
#[utoipa::path(
    get,
    path = "/admin/drivers/{driver_id}",
    tag = "driver",
    security(("access_token" = [])),
    params(
        ("driver_id" = i32, Path, description = "id of the driver"),
    ),
    responses(
        (status = OK, body = Driver),
        (status = NOT_FOUND, description = "driver not found", body = SimpleError),
    ),
)]
pub async fn get_driver(
    Path(driver_id): Path<i32>,
    DbConnection(db): DbConnection,
) -> Result<ApiResponse<driver::Model>, (StatusCode, SimpleError)> {
    let driver = find_driver(&db, driver_id).await?;

    Ok(ApiResponse::data(driver))
}

/// Registers a new driver
#[utoipa::path(
    post,
    path = "/admin/drivers",
    tag = "driver",
    security(("access_token" = [])),
    request_body = CreateDriver,
    responses(
        (status = CREATED, body = Driver),
        (
            status = BAD_REQUEST,
            description = "invalid dto error message or phone already registered",
            body = SimpleError,
        ),
    ),
)]
pub async fn create_driver(
    Extension(req_user): Extension<RequestUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateDriver>,
) -> Result<(StatusCode, ApiResponse<driver::Model>), (StatusCode, SimpleError)> {
    if phone_in_use(&state.db, &payload.phone).await? {
        return Err((
            StatusCode::BAD_REQUEST,
            SimpleError::from("driver with this phone already exists"),
        ));
    }

    let created = driver::ActiveModel {
        name: Set(payload.name),
        phone: Set(payload.phone),
        license_no: Set(payload.license_no),
        is_active: Set(payload.is_active.unwrap_or(true)),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(DbError::from)?;

    audit::service::record(
        &state.db,
        "DRIVER",
        created.id,
        AuditAction::Create,
        None,
        audit::service::snapshot(&created),
        req_user.user.id,
        "driver added to registry",
    )
    .await
    .or(Err(internal_error_res()))?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::new("driver registered successfully", created),
    ))
}

/// Updates a registry driver
#[utoipa::path(
    put,
    path = "/admin/drivers/{driver_id}",
    tag = "driver",
    security(("access_token" = [])),
    params(
        ("driver_id" = i32, Path, description = "id of the driver"),
    ),
    request_body = UpdateDriver,
    responses(
        (status = OK, body = Driver),
        (status = NOT_FOUND, description = "driver not found", body = SimpleError),
        (
            status = BAD_REQUEST,
            description = "another driver already holds the phone",
            body = SimpleError,
        ),
    ),
)]
pub async fn update_driver(
    Path(driver_id): Path<i32>,
    Extension(req_user): Extension<RequestUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateDriver>,
) -> Result<ApiResponse<driver::Model>, (StatusCode, SimpleError)> {
    let existing = find_driver(&state.db, driver_id).await?;

    if let Some(phone) = &payload.phone {
        if *phone != existing.phone && phone_in_use(&state.db, phone).await? {
            return Err((
                StatusCode::BAD_REQUEST,
                SimpleError::from("another driver with this phone already exists"),
            ));
        }
    }

    let old_snapshot = audit::service::snapshot(&existing);

    let mut driver: driver::ActiveModel = existing.into();

    if let Some(name) = payload.name {
        driver.name = Set(name);
    }
    if let Some(phone) = payload.phone {
        driver.phone = Set(phone);
    }
    if let Some(license_no) = payload.license_no {
        driver.license_no = Set(Some(license_no));
    }
    if let Some(is_active) = payload.is_active {
        driver.is_active = Set(is_active);
    }

    let updated = driver.update(&state.db).await.map_err(DbError::from)?;

    audit::service::record(
        &state.db,
        "DRIVER",
        updated.id,
        AuditAction::Update,
        old_snapshot,
        audit::service::snapshot(&updated),
        req_user.user.id,
        "driver details updated",
    )
    .await
    .or(Err(internal_error_res()))?;

    Ok(ApiResponse::new("driver updated successfully", updated))
}

/// Deactivates a registry driver
///
/// assignments keep referencing the driver by name, so this is a soft delete
#[utoipa::path(
    delete,
    path = "/admin/drivers/{driver_id}",
    tag = "driver",
    security(("access_token" = [])),
    params(
        ("driver_id" = i32, Path, description = "id of the driver"),
    ),
    responses(
        (status = OK, description = "driver deactivated"),
        (status = NOT_FOUND, description = "driver not found", body = SimpleError),
    ),
)]
pub async fn delete_driver(
    Path(driver_id): Path<i32>,
    Extension(req_user): Extension<RequestUser>,
    State(state): State<AppState>,
) -> Result<ApiResponse<()>, (StatusCode, SimpleError)> {
    let existing = find_driver(&state.db, driver_id).await?;
    let old_snapshot = audit::service::snapshot(&existing);

    let mut driver: driver::ActiveModel = existing.into();
    driver.is_active = Set(false);
    let deactivated = driver.update(&state.db).await.map_err(DbError::from)?;

    audit::service::record(
        &state.db,
        "DRIVER",
        deactivated.id,
        AuditAction::Delete,
        old_snapshot,
        None,
        req_user.user.id,
        "driver deactivated",
    )
    .await
    .or(Err(internal_error_res()))?;

    Ok(ApiResponse::msg("driver deactivated successfully"))
}
