use crate::modules::common::validators::REGEX_PHONE_NUMBER;
use entity::b2b_company;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, Validate, ToSchema)]
pub struct RegisterUser {
    #[validate(length(min = 2, max = 128, message = "name must have 2 to 128 characters"))]
    pub name: Option<String>,

    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    #[validate(regex(path = "REGEX_PHONE_NUMBER", message = "must be a valid phone number"))]
    pub phone: Option<String>,

    #[validate(length(min = 6, message = "password must have at least 6 characters"))]
    pub password: String,
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct SignIn {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "password cannot be empty"))]
    pub password: String,
}

/// First login password setup for B2B accounts created by a request approval
#[derive(Deserialize, Validate, ToSchema)]
pub struct SetFirstPassword {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 6, message = "password must have at least 6 characters"))]
    pub new_password: String,
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct RequestPasswordReset {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct ResetPassword {
    #[validate(length(min = 1, message = "token cannot be empty"))]
    pub password_reset_token: String,

    #[validate(length(min = 6, message = "password must have at least 6 characters"))]
    pub new_password: String,
}

/// Partial profile update, absent fields keep their current value
#[derive(Deserialize, Validate, ToSchema)]
pub struct UpdateProfile {
    #[validate(length(min = 2, max = 128, message = "name must have 2 to 128 characters"))]
    pub name: Option<String>,

    #[validate(regex(path = "REGEX_PHONE_NUMBER", message = "must be a valid phone number"))]
    pub phone: Option<String>,
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct ConfirmPhoneOtp {
    #[validate(length(equal = 6, message = "otp must have 6 digits"))]
    pub otp: String,
}

/// Public representation of a user account, never exposes credential columns
#[derive(Serialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub role: String,
    pub is_verified: bool,
}

impl UserDto {
    pub fn from_model_and_role(user: entity::user::Model, role: String) -> UserDto {
        UserDto {
            id: user.id,
            email: user.email,
            name: user.name,
            phone: user.phone,
            role,
            is_verified: user.is_verified,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub token: String,
    pub user: UserDto,
}

/// B2B login either yields a token or flags that the account still
/// has its system assigned password and must set one first
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct B2bSignInResponse {
    pub requires_password_setup: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserDto>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<b2b_company::Model>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDto {
    #[serde(flatten)]
    pub user: UserDto,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<b2b_company::Model>,
}
