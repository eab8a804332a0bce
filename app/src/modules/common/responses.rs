use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// A struct for simple API error responses, contains a `success: false` marker,
/// a human readable message and optionally a list of field level errors
///
/// its meant to be sent as JSON so its `IntoResponse` implementation will set the
/// response body to JSON
#[derive(Serialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimpleError {
    success: bool,
    message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<String>>,
}

impl SimpleError {
    /// Creates a simple error with a generic 'internal server error' message
    /// ideally this should be used whenever something that should almost never
    /// fail on the request lifecycle does fail.
    pub fn internal() -> SimpleError {
        SimpleError::from("internal server error")
    }
}

impl From<String> for SimpleError {
    fn from(v: String) -> Self {
        SimpleError {
            success: false,
            message: v,
            errors: None,
        }
    }
}

impl From<&str> for SimpleError {
    fn from(v: &str) -> Self {
        SimpleError::from(String::from(v))
    }
}

impl From<ValidationErrors> for SimpleError {
    fn from(v: ValidationErrors) -> Self {
        let errors: Vec<String> = v
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{}: {}", field, msg),
                    None => format!("{}: invalid value", field),
                })
            })
            .collect();

        SimpleError {
            success: false,
            message: String::from("validation failed"),
            errors: Some(errors),
        }
    }
}

impl From<anyhow::Error> for SimpleError {
    /// since anyhow errors might contain private error messages such as DB errors
    /// or a stack description, always convert to a generic internal error
    fn from(_: anyhow::Error) -> Self {
        SimpleError::internal()
    }
}

impl IntoResponse for SimpleError {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Success envelope for mutating operations, `{ success: true, message, data }`
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(message: &str, data: T) -> ApiResponse<T> {
        ApiResponse {
            success: true,
            message: Some(String::from(message)),
            data: Some(data),
        }
    }

    pub fn data(data: T) -> ApiResponse<T> {
        ApiResponse {
            success: true,
            message: None,
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn msg(message: &str) -> ApiResponse<()> {
        ApiResponse {
            success: true,
            message: Some(String::from(message)),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

pub fn internal_error_res() -> (StatusCode, SimpleError) {
    (StatusCode::INTERNAL_SERVER_ERROR, SimpleError::internal())
}

pub fn internal_error_msg(msg: &str) -> (StatusCode, SimpleError) {
    (StatusCode::INTERNAL_SERVER_ERROR, SimpleError::from(msg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct TestInput {
        #[validate(length(min = 1, message = "cannot be empty"))]
        name: String,
    }

    #[test]
    fn validation_errors_are_flattened_into_field_messages() {
        let input = TestInput {
            name: String::new(),
        };

        let err = input.validate().unwrap_err();
        let simple = SimpleError::from(err);

        let errors = simple.errors.unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("name:"));
        assert!(!simple.success);
    }

    #[test]
    fn anyhow_errors_never_leak_their_message() {
        let err = anyhow::anyhow!("connection to db at 10.0.0.1 refused");
        let simple = SimpleError::from(err);

        assert_eq!(simple.message, "internal server error");
    }
}
