//! Authentication guard.
//!
//! Every page handler extracts an [`AuthGuard`] and then states explicitly
//! what happens when the request carries no valid session.

use super::app_state::AppState;
use super::error::{PageError, Unauthenticated};
use crate::models::SessionUser;
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, StatusCode, header, request::Parts};
use axum_extra::extract::cookie::CookieJar;
use std::convert::Infallible;

/// Outcome of checking the request's session against the session store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthGuard {
    Authorized(SessionUser),
    Unauthenticated,
}

impl AuthGuard {
    /// Continue with the session user, or redirect to `location`.
    pub fn require_or_redirect(
        self,
        status: StatusCode,
        location: &str,
    ) -> Result<SessionUser, PageError> {
        match self {
            AuthGuard::Authorized(user) => Ok(user),
            AuthGuard::Unauthenticated => {
                Err(PageError::Unauthenticated(Unauthenticated::Redirect {
                    status,
                    location: location.to_string(),
                }))
            }
        }
    }

    /// Continue with the session user, or answer with a bare status.
    pub fn require_or_status(self, status: StatusCode) -> Result<SessionUser, PageError> {
        match self {
            AuthGuard::Authorized(user) => Ok(user),
            AuthGuard::Unauthenticated => {
                Err(PageError::Unauthenticated(Unauthenticated::Status(status)))
            }
        }
    }
}

/// Extract the bearer token from an `Authorization` header value.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Find the session token: the session cookie first, then a bearer token.
pub fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(cookie_name) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token)
        .map(str::to_string)
}

impl FromRequestParts<AppState> for AuthGuard {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = extract_session_token(&parts.headers, &state.config.session_cookie_name)
        else {
            tracing::debug!("No session token on request to {}", parts.uri.path());
            return Ok(AuthGuard::Unauthenticated);
        };

        match state.sessions.validate_session(&token).await {
            Ok(Some(session)) => Ok(AuthGuard::Authorized(SessionUser::from(&session))),
            Ok(None) => {
                tracing::debug!("Session not found or expired");
                Ok(AuthGuard::Unauthenticated)
            }
            Err(e) => {
                tracing::warn!("Session lookup failed, treating request as anonymous: {}", e);
                Ok(AuthGuard::Unauthenticated)
            }
        }
    }
}
