use super::dto::{
    self, B2bSignInResponse, ProfileDto, SignInResponse, UserDto,
};
use super::middleware::RequestUser;
use super::rate_limit::{Decision, RateLimiter};
use crate::modules::common::error_codes::EMAIL_IN_USE;
use crate::modules::common::extractors::ValidatedJson;
use crate::modules::common::responses::{
    internal_error_res, ApiResponse, SimpleError,
};
use crate::server::controller::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Router,
};
use axum_client_ip::SecureClientIp;
use entity::role;

pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(me).patch(update_me))
        .route("/request-phone-otp", post(request_phone_otp))
        .route("/confirm-phone-otp", post(confirm_phone_otp))
        .layer(axum::middleware::from_fn_with_state(
            state,
            super::middleware::require_user,
        ))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/b2b-login", post(b2b_login))
        .route("/b2b-set-password", post(b2b_set_password))
        .route("/request-password-reset", post(request_password_reset))
        .route("/reset-password", post(reset_password))
}

/// rejects the request with a 429 when the limiter window for the client ip is full
fn check_rate_limit(
    limiter: &dyn RateLimiter,
    client_ip: &SecureClientIp,
) -> Result<(), (StatusCode, SimpleError)> {
    if let Decision::Limited { retry_after_secs } = limiter.check(&client_ip.0.to_string()) {
        return Err((
            StatusCode::TOO_MANY_REQUESTS,
            SimpleError::from(format!(
                "too many attempts, retry in {} seconds",
                retry_after_secs
            )),
        ));
    }

    Ok(())
}

fn invalid_credentials() -> (StatusCode, SimpleError) {
    (
        StatusCode::UNAUTHORIZED,
        SimpleError::from("invalid credentials"),
    )
}

/// the B2B endpoints only serve accounts under the b2b_user role
fn require_b2b_role(role_name: &str) -> Result<(), (StatusCode, SimpleError)> {
    if role_name != role::B2B_USER {
        return Err((
            StatusCode::FORBIDDEN,
            SimpleError::from("not a b2b account"),
        ));
    }

    Ok(())
}

/// Registers a new customer account
///
/// creates the user under the customer role and returns it with a fresh access token
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterUser,
    responses(
        (
            status = CREATED,
            description = "account created",
            body = SignInResponse,
        ),
        (
            status = BAD_REQUEST,
            description = "invalid dto error message",
            body = SimpleError,
        ),
        (
            status = CONFLICT,
            description = "EMAIL_IN_USE error code",
            body = SimpleError,
        ),
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<dto::RegisterUser>,
) -> Result<(StatusCode, ApiResponse<SignInResponse>), (StatusCode, SimpleError)> {
    let email_in_use = state
        .auth_service
        .check_email_in_use(&payload.email)
        .await
        .or(Err(internal_error_res()))?;

    if email_in_use {
        return Err((StatusCode::CONFLICT, SimpleError::from(EMAIL_IN_USE)));
    }

    let user = state
        .auth_service
        .register_customer(payload)
        .await
        .or(Err(internal_error_res()))?;

    let token = state
        .auth_service
        .sign_token(user.id, &user.role)
        .or(Err(internal_error_res()))?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::new("account created", SignInResponse { token, user }),
    ))
}

/// Signs in by credentials (email, password)
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = SignIn,
    responses(
        (
            status = OK,
            description = "sign in successful",
            body = SignInResponse,
        ),
        (
            status = UNAUTHORIZED,
            description = "invalid credentials",
            body = SimpleError,
        ),
        (
            status = TOO_MANY_REQUESTS,
            description = "too many attempts for this client ip",
            body = SimpleError,
        ),
    ),
)]
pub async fn login(
    client_ip: SecureClientIp,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<dto::SignIn>,
) -> Result<ApiResponse<SignInResponse>, (StatusCode, SimpleError)> {
    use super::service::UserFromCredentialsError as Err;

    check_rate_limit(state.login_limiter.as_ref(), &client_ip)?;

    let (user, user_role) = state
        .auth_service
        .get_user_from_credentials(&payload.email, &payload.password)
        .await
        .map_err(|e| match e {
            Err::InternalError => internal_error_res(),
            // do not reveal which of the email or password was wrong
            Err::NotFound | Err::InvalidPassword | Err::PasswordNotSet => invalid_credentials(),
        })?;

    state.auth_service.update_last_login(user.id).await.ok();

    let token = state
        .auth_service
        .sign_token(user.id, &user_role.name)
        .or(Err(internal_error_res()))?;

    let user = UserDto::from_model_and_role(user, user_role.name);

    Ok(ApiResponse::new(
        "login successful",
        SignInResponse { token, user },
    ))
}

/// Signs in a B2B account
///
/// accounts created by a request approval still hold the system assigned
/// password, for those the response flags that a password setup is required
/// instead of issuing a token
#[utoipa::path(
    post,
    path = "/auth/b2b-login",
    tag = "auth",
    request_body = SignIn,
    responses(
        (
            status = OK,
            description = "sign in successful or password setup required",
            body = B2bSignInResponse,
        ),
        (
            status = UNAUTHORIZED,
            description = "invalid credentials",
            body = SimpleError,
        ),
        (
            status = FORBIDDEN,
            description = "account role is not b2b_user or has no company link",
            body = SimpleError,
        ),
    ),
)]
pub async fn b2b_login(
    client_ip: SecureClientIp,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<dto::SignIn>,
) -> Result<ApiResponse<B2bSignInResponse>, (StatusCode, SimpleError)> {
    use super::service::UserFromCredentialsError as Err;

    check_rate_limit(state.login_limiter.as_ref(), &client_ip)?;

    let (user, user_role) = state
        .auth_service
        .get_user_from_credentials(&payload.email, &payload.password)
        .await
        .map_err(|e| match e {
            Err::InternalError => internal_error_res(),
            Err::NotFound | Err::InvalidPassword | Err::PasswordNotSet => invalid_credentials(),
        })?;

    require_b2b_role(&user_role.name)?;

    if user.is_first_login {
        return Ok(ApiResponse::new(
            "password setup required before first login",
            B2bSignInResponse {
                requires_password_setup: true,
                token: None,
                user: None,
                company: None,
            },
        ));
    }

    let company = state
        .auth_service
        .get_company_for_user(user.id)
        .await
        .or(Err(internal_error_res()))?
        .ok_or((
            StatusCode::FORBIDDEN,
            SimpleError::from("no company account linked to this user"),
        ))?;

    state.auth_service.update_last_login(user.id).await.ok();

    let token = state
        .auth_service
        .sign_token(user.id, &user_role.name)
        .or(Err(internal_error_res()))?;

    Ok(ApiResponse::new(
        "login successful",
        B2bSignInResponse {
            requires_password_setup: false,
            token: Some(token),
            user: Some(UserDto::from_model_and_role(user, user_role.name)),
            company: Some(company),
        },
    ))
}

/// Sets the definitive password for a first login B2B account
///
/// on success the account is logged in right away, the response is the
/// same as a regular B2B login
#[utoipa::path(
    post,
    path = "/auth/b2b-set-password",
    tag = "auth",
    request_body = SetFirstPassword,
    responses(
        (
            status = OK,
            description = "password set and account logged in",
            body = B2bSignInResponse,
        ),
        (
            status = NOT_FOUND,
            description = "no account with this email",
            body = SimpleError,
        ),
        (
            status = FORBIDDEN,
            description = "account role is not b2b_user or has no company link",
            body = SimpleError,
        ),
        (
            status = BAD_REQUEST,
            description = "account already set its password",
            body = SimpleError,
        ),
    ),
)]
pub async fn b2b_set_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<dto::SetFirstPassword>,
) -> Result<ApiResponse<B2bSignInResponse>, (StatusCode, SimpleError)> {
    let (user, user_role) = state
        .auth_service
        .find_user_with_role(&payload.email)
        .await
        .or(Err(internal_error_res()))?
        .ok_or((
            StatusCode::NOT_FOUND,
            SimpleError::from("no account with this email"),
        ))?;

    require_b2b_role(&user_role.name)?;

    if !user.is_first_login {
        return Err((
            StatusCode::BAD_REQUEST,
            SimpleError::from("password already set, use the login endpoint"),
        ));
    }

    let user = state
        .auth_service
        .set_first_password(user, &payload.new_password)
        .await
        .or(Err(internal_error_res()))?;

    let company = state
        .auth_service
        .get_company_for_user(user.id)
        .await
        .or(Err(internal_error_res()))?
        .ok_or((
            StatusCode::FORBIDDEN,
            SimpleError::from("no company account linked to this user"),
        ))?;

    state.auth_service.update_last_login(user.id).await.ok();

    let token = state
        .auth_service
        .sign_token(user.id, &user_role.name)
        .or(Err(internal_error_res()))?;

    Ok(ApiResponse::new(
        "password set successfully",
        B2bSignInResponse {
            requires_password_setup: false,
            token: Some(token),
            user: Some(UserDto::from_model_and_role(user, user_role.name)),
            company: Some(company),
        },
    ))
}

/// Requests a password reset token
///
/// a reset token is generated and stored for the account, the response is
/// the same whether or not a account exists with the email so addresses
/// cannot be probed
#[utoipa::path(
    post,
    path = "/auth/request-password-reset",
    tag = "auth",
    request_body = RequestPasswordReset,
    responses(
        (
            status = OK,
            description = "success message",
        ),
    ),
)]
pub async fn request_password_reset(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<dto::RequestPasswordReset>,
) -> Result<ApiResponse<()>, (StatusCode, SimpleError)> {
    use entity::user;
    use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

    let maybe_user = user::Entity::find()
        .filter(user::Column::Email.eq(&payload.email))
        .one(&state.db)
        .await
        .or(Err(internal_error_res()))?;

    if let Some(usr) = maybe_user {
        let token = state
            .auth_service
            .gen_and_set_user_reset_password_token(usr.id)
            .await
            .or(Err(internal_error_res()))?;

        // delivery channel (email) is out of band, log for operators
        tracing::info!("[AUTH] reset token generated for user {}: {}", usr.id, token);
    }

    Ok(ApiResponse::msg(
        "if a account exists with this email a reset token was generated",
    ))
}

/// Resets the account password by a reset token
#[utoipa::path(
    post,
    path = "/auth/reset-password",
    tag = "auth",
    request_body = ResetPassword,
    responses(
        (
            status = OK,
            description = "password changed",
        ),
        (
            status = UNAUTHORIZED,
            description = "expired or invalid token",
            body = SimpleError,
        ),
    ),
)]
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<dto::ResetPassword>,
) -> Result<ApiResponse<()>, (StatusCode, SimpleError)> {
    super::jwt::decode(&payload.password_reset_token).or(Err((
        StatusCode::UNAUTHORIZED,
        SimpleError::from("invalid token"),
    )))?;

    let changed = state
        .auth_service
        .reset_password_by_token(&payload.password_reset_token, &payload.new_password)
        .await
        .or(Err(internal_error_res()))?;

    if !changed {
        return Err((
            StatusCode::NOT_FOUND,
            SimpleError::from("no account holds this reset token"),
        ));
    }

    Ok(ApiResponse::msg("password changed successfully"))
}

/// Gets the profile of the request user
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("access_token" = [])),
    responses(
        (
            status = OK,
            body = ProfileDto,
        ),
        (
            status = UNAUTHORIZED,
            description = "invalid or missing token",
            body = SimpleError,
        ),
    ),
)]
pub async fn me(
    Extension(req_user): Extension<RequestUser>,
    State(state): State<AppState>,
) -> Result<ApiResponse<ProfileDto>, (StatusCode, SimpleError)> {
    let company = if req_user.role == role::B2B_USER {
        state
            .auth_service
            .get_company_for_user(req_user.user.id)
            .await
            .or(Err(internal_error_res()))?
    } else {
        None
    };

    let user = UserDto::from_model_and_role(req_user.user, req_user.role);

    Ok(ApiResponse::data(ProfileDto { user, company }))
}

/// Updates the profile of the request user
///
/// only the name and phone can be changed, a changed phone drops the
/// verified flag until it is confirmed again
#[utoipa::path(
    patch,
    path = "/auth/me",
    tag = "auth",
    security(("access_token" = [])),
    request_body = UpdateProfile,
    responses(
        (
            status = OK,
            body = UserDto,
        ),
        (
            status = BAD_REQUEST,
            description = "invalid dto error message",
            body = SimpleError,
        ),
    ),
)]
pub async fn update_me(
    Extension(req_user): Extension<RequestUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<dto::UpdateProfile>,
) -> Result<ApiResponse<UserDto>, (StatusCode, SimpleError)> {
    use sea_orm::{ActiveModelTrait, Set};

    let phone_changed = payload.phone.is_some() && payload.phone != req_user.user.phone;

    let mut user: entity::user::ActiveModel = req_user.user.into();

    if let Some(name) = payload.name {
        user.name = Set(Some(name));
    }
    if let Some(phone) = payload.phone {
        user.phone = Set(Some(phone));
    }
    if phone_changed {
        user.is_verified = Set(false);
    }

    let updated = user
        .update(&state.db)
        .await
        .or(Err(internal_error_res()))?;

    Ok(ApiResponse::new(
        "profile updated successfully",
        UserDto::from_model_and_role(updated, req_user.role),
    ))
}

/// Requests a phone verification OTP for the request user
#[utoipa::path(
    post,
    path = "/auth/request-phone-otp",
    tag = "auth",
    security(("access_token" = [])),
    responses(
        (
            status = OK,
            description = "otp generated",
        ),
        (
            status = BAD_REQUEST,
            description = "account has no phone number",
            body = SimpleError,
        ),
        (
            status = TOO_MANY_REQUESTS,
            description = "too many otp requests for this client ip",
            body = SimpleError,
        ),
    ),
)]
pub async fn request_phone_otp(
    client_ip: SecureClientIp,
    Extension(req_user): Extension<RequestUser>,
    State(state): State<AppState>,
) -> Result<ApiResponse<()>, (StatusCode, SimpleError)> {
    check_rate_limit(state.otp_limiter.as_ref(), &client_ip)?;

    if req_user.user.phone.is_none() {
        return Err((
            StatusCode::BAD_REQUEST,
            SimpleError::from("account has no phone number"),
        ));
    }

    let otp = state
        .auth_service
        .gen_and_set_phone_otp(req_user.user.id)
        .await
        .or(Err(internal_error_res()))?;

    // SMS delivery is out of band, log for operators
    tracing::info!("[AUTH] phone otp generated for user {}: {}", req_user.user.id, otp);

    Ok(ApiResponse::msg("verification code sent"))
}

/// Confirms the phone verification OTP, marking the account verified
#[utoipa::path(
    post,
    path = "/auth/confirm-phone-otp",
    tag = "auth",
    security(("access_token" = [])),
    request_body = ConfirmPhoneOtp,
    responses(
        (
            status = OK,
            description = "phone verified",
        ),
        (
            status = BAD_REQUEST,
            description = "wrong or expired code",
            body = SimpleError,
        ),
    ),
)]
pub async fn confirm_phone_otp(
    Extension(req_user): Extension<RequestUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<dto::ConfirmPhoneOtp>,
) -> Result<ApiResponse<()>, (StatusCode, SimpleError)> {
    let verified = state
        .auth_service
        .confirm_phone_otp(req_user.user.id, &payload.otp)
        .await
        .or(Err(internal_error_res()))?;

    if !verified {
        return Err((
            StatusCode::BAD_REQUEST,
            SimpleError::from("wrong or expired verification code"),
        ));
    }

    Ok(ApiResponse::msg("phone verified successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn b2b_endpoints_refuse_other_roles_with_forbidden() {
        for role_name in [role::ADMIN, role::CUSTOMER, "anything_else"] {
            let (status, _) = require_b2b_role(role_name).unwrap_err();
            assert_eq!(status, StatusCode::FORBIDDEN);
        }
    }

    #[test]
    fn b2b_endpoints_accept_the_b2b_role() {
        assert!(require_b2b_role(role::B2B_USER).is_ok());
    }
}
