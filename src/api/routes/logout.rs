//! Logout action.

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Response,
    routing::post,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tracing::info;

use super::app_state::AppState;
use super::auth_context::AuthGuard;
use super::error::{PageError, redirect};

/// Create the logout router
pub fn logout_router() -> Router<AppState> {
    Router::new().route("/logout", post(logout))
}

/// POST /logout - Invalidate the current session and send the user to the login page.
///
/// Without a valid session this answers 401 rather than redirecting: the
/// action is only reachable from an authenticated page.
pub async fn logout(
    State(state): State<AppState>,
    guard: AuthGuard,
    jar: CookieJar,
) -> Result<(CookieJar, Response), PageError> {
    let user = guard.require_or_status(StatusCode::UNAUTHORIZED)?;

    state.sessions.invalidate_session(&user.session_id).await?;
    info!("Logged out user {}", user.user_id);

    let removal = Cookie::build((state.config.session_cookie_name.clone(), ""))
        .path("/")
        .build();
    let jar = jar.remove(removal);

    Ok((
        jar,
        redirect(StatusCode::TEMPORARY_REDIRECT, &state.config.login_path),
    ))
}
