use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Deserialize;
use tracing::debug;

use crate::error::StockroomError;
use crate::middleware::auth::{clear_session_cookie, session_cookie, session_id};
use crate::router::AppState;

const LOGIN_TEMPLATE: &str = include_str!("login.html");
const ERROR_SLOT: &str = "<!-- error -->";
const INVALID_CREDENTIALS: &str = "Invalid username or password";
const MISSING_FIELDS: &str = "Username and password are required";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

fn render_login(error: Option<&'static str>) -> Html<String> {
    let slot = error
        .map(|msg| format!(r#"<p class="error">{msg}</p>"#))
        .unwrap_or_default();
    Html(LOGIN_TEMPLATE.replace(ERROR_SLOT, &slot))
}

/// GET /login
pub async fn login_page() -> Html<String> {
    render_login(None)
}

/// POST /login -> opens a session and sends the browser to `/`.
///
/// A form that cannot be decoded gets the login view back with a 400.
pub async fn login_submit(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            debug!(error = %rejection, "unreadable login form");
            return (StatusCode::BAD_REQUEST, render_login(Some(MISSING_FIELDS))).into_response();
        }
    };
    match state.auth.login(&form.username, &form.password) {
        Ok(id) => {
            // a browser that logs in again drops its previous session
            state.auth.logout(session_id(&jar).as_deref());
            let jar = jar.add(session_cookie(id, state.secure_cookie));
            (jar, Redirect::to("/")).into_response()
        }
        Err(StockroomError::InvalidCredentials) => {
            render_login(Some(INVALID_CREDENTIALS)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// GET /logout
pub async fn logout(State(state): State<AppState>, jar: PrivateCookieJar) -> impl IntoResponse {
    state.auth.logout(session_id(&jar).as_deref());
    let jar = jar.remove(clear_session_cookie());
    (jar, Redirect::to("/login"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_view_shows_error_only_when_given() {
        let Html(plain) = render_login(None);
        assert!(!plain.contains("class=\"error\""));
        assert!(plain.contains(r#"name="username""#));
        assert!(plain.contains(r#"name="password""#));

        let Html(failed) = render_login(Some(INVALID_CREDENTIALS));
        assert!(failed.contains("Invalid username or password"));

        let Html(incomplete) = render_login(Some(MISSING_FIELDS));
        assert!(incomplete.contains("Username and password are required"));
    }
}
