use axum::http::StatusCode;
use axum::Extension;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

pub async fn me(Extension(user): Extension<AuthenticatedUser>) -> ApiSuccess<String> {
    ApiSuccess::new(StatusCode::OK, "authenticated").with_data(user.email)
}
