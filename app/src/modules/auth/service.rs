use super::dto::UserDto;
use super::jwt::{self, access_token_duration, Claims};
use anyhow::{Context, Result};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use entity::{b2b_company, b2b_user, role, user};
use rand_chacha::ChaCha8Rng;
use rand_core::RngCore;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TryIntoModel,
};
use std::sync::{Arc, Mutex};

pub enum UserFromCredentialsError {
    NotFound,
    InternalError,
    InvalidPassword,
    PasswordNotSet,
}

#[derive(Clone)]
pub struct AuthService {
    rng: Arc<Mutex<ChaCha8Rng>>,
    db: DatabaseConnection,
}

impl AuthService {
    pub fn new(db: DatabaseConnection, rng: ChaCha8Rng) -> Self {
        AuthService {
            db,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// signs a access token for the user, carrying its id and role name
    pub fn sign_token(&self, user_id: i32, role: &str) -> Result<String> {
        let mut claims = Claims::for_user(user_id, role);
        claims.set_expiration_in(access_token_duration());

        Ok(jwt::encode(&claims)?)
    }

    /// finds a user from email and plain text password, verifying the password
    pub async fn get_user_from_credentials(
        &self,
        user_email: &str,
        user_password: &str,
    ) -> Result<(user::Model, role::Model), UserFromCredentialsError> {
        use UserFromCredentialsError as Err;

        let result = user::Entity::find()
            .filter(user::Column::Email.eq(user_email))
            .find_also_related(role::Entity)
            .one(&self.db)
            .await
            .or(Err(Err::InternalError))?;

        match result {
            Some((user, maybe_role)) => {
                let role = maybe_role.ok_or(Err::InternalError)?;

                let hash = user.password_hash.as_ref().ok_or(Err::PasswordNotSet)?;

                let pass_is_valid = verify(user_password, hash).or(Err(Err::InternalError))?;

                if !pass_is_valid {
                    return Err(Err::InvalidPassword);
                }

                Ok((user, role))
            }
            None => Err(Err::NotFound),
        }
    }

    pub async fn check_email_in_use(&self, email: &str) -> Result<bool> {
        let user = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(user.is_some())
    }

    /// finds the role row by name, creating it when missing
    pub async fn get_or_create_role(&self, name: &str) -> Result<role::Model> {
        let existing = role::Entity::find()
            .filter(role::Column::Name.eq(name))
            .one(&self.db)
            .await?;

        if let Some(r) = existing {
            return Ok(r);
        }

        let created = role::ActiveModel {
            name: Set(String::from(name)),
            ..Default::default()
        }
        .save(&self.db)
        .await?
        .try_into_model()?;

        Ok(created)
    }

    /// creates a new customer account with a verified-pending phone
    pub async fn register_customer(&self, dto: super::dto::RegisterUser) -> Result<UserDto> {
        let password_hash = hash(dto.password, DEFAULT_COST)?;

        let customer_role = self.get_or_create_role(role::CUSTOMER).await?;

        let created = user::ActiveModel {
            email: Set(dto.email),
            password_hash: Set(Some(password_hash)),
            name: Set(dto.name),
            phone: Set(dto.phone),
            role_id: Set(customer_role.id),
            is_first_login: Set(false),
            is_verified: Set(false),
            ..Default::default()
        }
        .save(&self.db)
        .await?
        .try_into_model()?;

        Ok(UserDto::from_model_and_role(created, customer_role.name))
    }

    pub async fn update_last_login(&self, user_id: i32) -> Result<()> {
        let user = user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .context("user not found")?;

        let mut user: user::ActiveModel = user.into();
        user.last_login_at = Set(Some(Utc::now().into()));
        user.update(&self.db).await?;

        Ok(())
    }

    /// finds a user and its role by email, without verifying credentials
    pub async fn find_user_with_role(
        &self,
        user_email: &str,
    ) -> Result<Option<(user::Model, role::Model)>> {
        let result = user::Entity::find()
            .filter(user::Column::Email.eq(user_email))
            .find_also_related(role::Entity)
            .one(&self.db)
            .await?;

        match result {
            Some((user, maybe_role)) => {
                let role = maybe_role.context("user has no role")?;
                Ok(Some((user, role)))
            }
            None => Ok(None),
        }
    }

    /// sets the definitive password for a account still on its system
    /// assigned one, clearing the first login flag
    pub async fn set_first_password(
        &self,
        found: user::Model,
        new_password: &str,
    ) -> Result<user::Model> {
        let password_hash = hash(new_password, DEFAULT_COST)?;

        let mut user: user::ActiveModel = found.into();
        user.password_hash = Set(Some(password_hash));
        user.is_first_login = Set(false);

        Ok(user.update(&self.db).await?)
    }

    pub async fn gen_and_set_user_reset_password_token(&self, user_id: i32) -> Result<String> {
        let mut claims = Claims::for_user(user_id, "");

        claims.set_expiration_in(Duration::minutes(15));
        claims.aud = format!("user:{}", user_id);
        claims.sub = String::from("restore password token");

        let token = jwt::encode(&claims)?;

        let user = user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .context("user not found")?;

        let mut user: user::ActiveModel = user.into();
        user.reset_password_token = Set(Some(token.clone()));
        user.update(&self.db).await?;

        Ok(token)
    }

    /// changes the password of the account holding the reset token, clearing
    /// the token so it cannot be replayed
    ///
    /// returns `false` if no account holds the token
    pub async fn reset_password_by_token(&self, token: &str, new_password: &str) -> Result<bool> {
        let maybe_user = user::Entity::find()
            .filter(user::Column::ResetPasswordToken.eq(token))
            .one(&self.db)
            .await?;

        let Some(found) = maybe_user else {
            return Ok(false);
        };

        let password_hash = hash(new_password, DEFAULT_COST)?;

        let mut user: user::ActiveModel = found.into();
        user.password_hash = Set(Some(password_hash));
        user.reset_password_token = Set(None);
        user.update(&self.db).await?;

        Ok(true)
    }

    /// generates a 6 digit OTP for the user phone, valid for 10 minutes
    pub async fn gen_and_set_phone_otp(&self, user_id: i32) -> Result<String> {
        let otp = {
            let mut rng = self.rng.lock().unwrap();
            format!("{:06}", rng.next_u32() % 1_000_000)
        };

        let user = user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .context("user not found")?;

        let mut user: user::ActiveModel = user.into();
        user.phone_otp = Set(Some(otp.clone()));
        user.phone_otp_expires_at = Set(Some((Utc::now() + Duration::minutes(10)).into()));
        user.update(&self.db).await?;

        Ok(otp)
    }

    /// verifies the phone OTP, marking the account verified on a match
    ///
    /// returns `false` on a mismatch or a expired code
    pub async fn confirm_phone_otp(&self, user_id: i32, otp: &str) -> Result<bool> {
        let user = user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .context("user not found")?;

        let stored = user.phone_otp.clone();
        let expires_at = user.phone_otp_expires_at;

        let otp_is_valid = match (stored, expires_at) {
            (Some(stored), Some(expires_at)) => {
                stored == otp && expires_at > Utc::now().fixed_offset()
            }
            _ => false,
        };

        if !otp_is_valid {
            return Ok(false);
        }

        let mut user: user::ActiveModel = user.into();
        user.is_verified = Set(true);
        user.phone_otp = Set(None);
        user.phone_otp_expires_at = Set(None);
        user.update(&self.db).await?;

        Ok(true)
    }

    /// gets the B2B company a user is linked to, if any
    pub async fn get_company_for_user(
        &self,
        user_id: i32,
    ) -> Result<Option<b2b_company::Model>> {
        let result = b2b_user::Entity::find()
            .filter(b2b_user::Column::UserId.eq(user_id))
            .find_also_related(b2b_company::Entity)
            .one(&self.db)
            .await?;

        Ok(result.and_then(|(_, company)| company))
    }
}
