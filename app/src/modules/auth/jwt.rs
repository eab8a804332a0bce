use crate::config::app_config;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, TokenData, Validation};
use serde::{Deserialize, Serialize};

/// access tokens are valid for 7 days after being issued
pub fn access_token_duration() -> Duration {
    Duration::days(7)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    // Audience
    pub aud: String,
    // Issued at (as UTC timestamp)
    pub iat: usize,
    // Issuer
    pub iss: String,
    // Subject (whom token refers to)
    pub sub: String,
    // Expiration time (as UTC timestamp, validate_exp defaults to true in validation).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>,

    // id of the user the token authenticates
    pub uid: i32,
    // role name of the user at the time the token was issued
    pub role: String,
}

impl Claims {
    pub fn for_user(user_id: i32, role: &str) -> Claims {
        let now = Utc::now();

        Claims {
            aud: String::from("urbancabz users"),
            iat: now.timestamp() as usize,
            iss: String::from("urbancabz API"),
            sub: user_id.to_string(),
            exp: None,
            uid: user_id,
            role: String::from(role),
        }
    }

    /// sets the claims `iat` (issued at) to the current time, and the `exp` to now + duration
    pub fn set_expiration_in(&mut self, duration: Duration) -> &Self {
        let now = Utc::now();

        self.exp = Some((now + duration).timestamp() as usize);
        self.iat = now.timestamp() as usize;

        self
    }
}

pub fn encode(claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(app_config().jwt_secret.as_ref()),
    )
}

pub fn decode(jwt: &str) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;

    jsonwebtoken::decode::<Claims>(
        jwt,
        &DecodingKey::from_secret(app_config().jwt_secret.as_ref()),
        &validation,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_carry_the_user_id_and_role() {
        let mut claims = Claims::for_user(42, "customer");
        claims.set_expiration_in(access_token_duration());

        let token = encode(&claims).unwrap();
        let decoded = decode(&token).unwrap().claims;

        assert_eq!(decoded.uid, 42);
        assert_eq!(decoded.role, "customer");
        assert!(decoded.exp.unwrap() > decoded.iat);
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let mut claims = Claims::for_user(1, "admin");
        claims.set_expiration_in(Duration::seconds(-3600));

        let token = encode(&claims).unwrap();
        assert!(decode(&token).is_err());
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        assert!(decode("not.a.jwt").is_err());
    }
}
