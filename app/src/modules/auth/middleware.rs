use super::jwt;
use crate::{
    modules::common::{
        error_codes::{INVALID_TOKEN, NO_BEARER_TOKEN},
        responses::{internal_error_msg, SimpleError},
    },
    server::controller::AppState,
};
use axum::{extract::State, response::Response};
use entity::{role, user};
use http::{HeaderMap, StatusCode};
use sea_orm::EntityTrait;

/// The authenticated user for the request, loaded from the bearer token,
/// available as a axum extension on routes behind `require_user`
#[derive(Clone)]
pub struct RequestUser {
    pub user: user::Model,
    pub role: String,
    /// id of the B2B company the user is linked to, if any
    pub company_id: Option<i32>,
}

impl RequestUser {
    pub fn is_admin(&self) -> bool {
        self.role == role::ADMIN
    }

    pub fn get_company_id(&self) -> Option<i32> {
        self.company_id
    }
}

fn get_bearer_token_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// middleware for routes that require a logged in user, this queries the DB to
/// get the request user by the id on his bearer token, so use it only within
/// routes that need the user data, adds the following extensions:
///
/// - `RequestUser`
pub async fn require_user<B>(
    State(state): State<AppState>,
    mut req: http::Request<B>,
    next: axum::middleware::Next<B>,
) -> Result<Response, (StatusCode, SimpleError)> {
    let token = get_bearer_token_from_headers(req.headers())
        .ok_or((StatusCode::UNAUTHORIZED, SimpleError::from(NO_BEARER_TOKEN)))?;

    let claims = jwt::decode(token)
        .or(Err((StatusCode::UNAUTHORIZED, SimpleError::from(INVALID_TOKEN))))?
        .claims;

    let maybe_user = user::Entity::find_by_id(claims.uid)
        .find_also_related(role::Entity)
        .one(&state.db)
        .await
        .or(Err(internal_error_msg("failed to fetch request user")))?;

    let Some((user, maybe_role)) = maybe_user else {
        return Err((StatusCode::UNAUTHORIZED, SimpleError::from(INVALID_TOKEN)));
    };

    let role = maybe_role.ok_or(internal_error_msg("user has no role"))?;

    let company_id = state
        .auth_service
        .get_company_for_user(user.id)
        .await
        .or(Err(internal_error_msg("failed to fetch user company")))?
        .map(|c| c.id);

    req.extensions_mut().insert(RequestUser {
        user,
        role: role.name,
        company_id,
    });

    Ok(next.run(req).await)
}

/// middleware for admin only routes, must be layered after `require_user`
/// since it relies on the `RequestUser` extension
pub async fn require_admin<B>(
    req: http::Request<B>,
    next: axum::middleware::Next<B>,
) -> Result<Response, (StatusCode, SimpleError)> {
    let req_user = req
        .extensions()
        .get::<RequestUser>()
        .ok_or(internal_error_msg("request user not loaded"))?;

    if !req_user.is_admin() {
        return Err((
            StatusCode::FORBIDDEN,
            SimpleError::from("admin access required"),
        ));
    }

    Ok(next.run(req).await)
}
