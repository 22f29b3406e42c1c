use axum::extract::Request;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::headers::HeaderMapExt;

use super::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated email in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub email: String,
}

/// Middleware that validates JWT tokens and adds user info to request extensions.
///
/// Any failure ends in the same 403 response; the reason is only logged.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = presented_token(req.headers(), &state.cookie_name).ok_or_else(|| {
        tracing::warn!(uri = %req.uri(), "Request without access token");
        ApiError::Forbidden
    })?;

    let claims: auth::Claims = state.authenticator.validate_token(&token).map_err(|e| {
        tracing::warn!(error = %e, "JWT validation failed");
        ApiError::Forbidden
    })?;

    let email = claims.require_email().map_err(|e| {
        tracing::warn!(error = %e, "JWT validation failed");
        ApiError::Forbidden
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        email: email.to_string(),
    });

    Ok(next.run(req).await)
}

/// Find the token a client presented: the named cookie first, then an
/// `Authorization: Bearer` header.
pub fn presented_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    let cookie = jar.get(cookie_name).map(|cookie| cookie.value());
    let bearer = headers.typed_get::<Authorization<Bearer>>();

    select_token(cookie, bearer.as_ref().map(|header| header.token())).map(str::to_string)
}

/// First non-empty candidate wins; a present cookie is never overridden by the header.
pub fn select_token<'a>(cookie: Option<&'a str>, header: Option<&'a str>) -> Option<&'a str> {
    cookie
        .filter(|token| !token.is_empty())
        .or_else(|| header.filter(|token| !token.is_empty()))
}
