use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};

use crate::error::StockroomError;
use crate::router::AppState;

pub const SESSION_COOKIE: &str = "stockroom_session";

/// Session id from the request's private cookie jar, if it decrypts.
pub fn session_id(jar: &PrivateCookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_owned())
}

/// Resolve the logged-in user for the inbound request.
pub fn ensure_session(parts: &Parts, state: &AppState) -> Result<String, StockroomError> {
    let jar = PrivateCookieJar::from_headers(&parts.headers, state.cookie_key.clone());
    state.auth.require_session(session_id(&jar).as_deref())
}

pub fn session_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE, ""))
        .path("/")
        .build()
}

/// Session gate for JSON routes. Rejects with 401.
#[derive(Debug, Clone)]
pub struct ApiSession(pub String);

impl FromRequestParts<AppState> for ApiSession {
    type Rejection = StockroomError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        ensure_session(parts, state).map(Self)
    }
}

/// Session gate for browser pages. Rejects with a redirect to `/login`.
#[derive(Debug, Clone)]
pub struct PageSession(pub String);

impl FromRequestParts<AppState> for PageSession {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        ensure_session(parts, state)
            .map(Self)
            .map_err(|_| Redirect::to("/login").into_response())
    }
}
