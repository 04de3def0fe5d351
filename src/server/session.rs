//! Login, logout, and the session-cookie guard.
//!
//! Authentication is a static credential check against the two configured
//! secrets. A successful login sets an http-only cookie carrying the
//! per-process session token; gated handlers require it via the [`Session`]
//! extractor. There is no lockout or backoff.

use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::state::AppState;
use crate::error::{AppError, Result};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

/// Session lifetime.
const SESSION_MAX_AGE: time::Duration = time::Duration::hours(1);

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Simple `{message}` response body.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

/// POST /api/login
///
/// Checks the submitted credentials against the configured pair and sets the
/// session cookie on success. Failures answer 401 with a generic message.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<Message>)> {
    let expected = &state.config().credentials;
    if request.username != expected.username || request.password != expected.password {
        return Err(AppError::Unauthorized);
    }

    info!(username = %request.username, "user logged in");

    let cookie = Cookie::build((SESSION_COOKIE, state.session_token().to_string()))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(SESSION_MAX_AGE)
        .build();

    Ok((jar.add(cookie), Json(Message { message: "Logged in" })))
}

/// POST /api/logout
///
/// Clears the session cookie immediately. Always succeeds, even without a
/// session.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Message>) {
    info!("user logged out");
    let removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    (
        jar.remove(removal),
        Json(Message {
            message: "Logged out successfully",
        }),
    )
}

/// Extractor guarding authenticated routes.
///
/// Rejects with 401 unless the request carries the session cookie with the
/// current process token.
pub struct Session;

impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        match jar.get(SESSION_COOKIE) {
            Some(cookie) if cookie.value() == state.session_token() => Ok(Session),
            _ => Err(AppError::Unauthorized),
        }
    }
}
