use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::ApiError;
use super::ApiSuccess;
use super::CredentialsRequest;
use crate::domain::authentication::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Exchange credentials for a bearer token.
///
/// Unknown email and wrong password share one 401 response.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<ApiSuccess<String>, ApiError> {
    let Json(body) = body?;

    state
        .auth_service
        .authenticate(body.into())
        .await
        .map_err(ApiError::from)
        .map(|token| {
            ApiSuccess::new(StatusCode::OK, "user authenticated").with_data(token.into_inner())
        })
}
