use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::errors::ValidationError;
use crate::domain::authentication::models::Credentials;

pub mod hello;
pub mod login;
pub mod me;
pub mod register;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(message)))
    }

    pub fn with_data(mut self, data: T) -> Self {
        self.1 .0.data = Some(data);
        self
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Errors surfaced to HTTP callers.
///
/// `Forbidden` and `InternalServerError` never put detail in the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "forbidden".to_string()),
        };

        (status, Json(ApiResponseBody::<()>::new_error(message))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(_) | AuthError::Conflict => ApiError::BadRequest(err.to_string()),
            AuthError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AuthError::Store(_)
            | AuthError::Hashing(_)
            | AuthError::Token(_)
            | AuthError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::from(ValidationError::Body(rejection.body_text())).into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    error: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: false,
            message: message.into(),
            data: None,
        }
    }

    pub fn new_error(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            data: None,
        }
    }
}

/// HTTP request body shared by register and login (raw JSON)
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialsRequest {
    email: String,
    password: String,
}

impl From<CredentialsRequest> for Credentials {
    fn from(request: CredentialsRequest) -> Self {
        Credentials::new(request.email, request.password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_status_mapping() {
        let cases = [
            (
                AuthError::Validation(ValidationError::Body("eof".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (AuthError::Conflict, StatusCode::BAD_REQUEST),
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (
                AuthError::Store("io".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AuthError::Hashing("bad".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), status);
        }
    }

    #[test]
    fn test_conflict_message() {
        assert_eq!(
            ApiError::from(AuthError::Conflict),
            ApiError::BadRequest("user already exists".to_string())
        );
    }

    #[test]
    fn test_internal_detail_is_not_exposed() {
        let body = serde_json::to_value(ApiResponseBody::<()>::new_error("internal server error"))
            .unwrap();
        assert_eq!(body["error"], true);
        assert!(body.get("data").is_none());

        assert_eq!(
            ApiError::from(AuthError::Store("users table missing".to_string())),
            ApiError::InternalServerError("Storage failure: users table missing".to_string())
        );
    }

    #[test]
    fn test_success_body_shape() {
        let body = serde_json::to_value(
            ApiResponseBody::<String>::new("user authenticated"),
        )
        .unwrap();

        assert_eq!(body["error"], false);
        assert_eq!(body["message"], "user authenticated");
        assert!(body.get("data").is_none());
    }
}
