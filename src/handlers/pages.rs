use axum::{
    extract::{FromRequestParts, Request, State},
    response::{IntoResponse, Response},
};
use percent_encoding::percent_decode_str;
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::middleware::PageSession;
use crate::router::AppState;

pub const ENTRY_PAGE: &str = "index.html";

/// GET / -> the front-end entry page, for logged-in users only.
pub async fn index(
    State(state): State<AppState>,
    PageSession(_user): PageSession,
    req: Request,
) -> Response {
    serve_entry(&state, req).await
}

/// Everything outside the routed paths: public assets from the static
/// directory. Any spelling of a path that lands on the entry page goes
/// through the session gate first.
pub async fn static_asset(State(state): State<AppState>, req: Request) -> Response {
    if !targets_entry_page(req.uri().path()) {
        return match state.assets.clone().oneshot(req).await {
            Ok(res) => res.into_response(),
            Err(never) => match never {},
        };
    }

    let (mut parts, body) = req.into_parts();
    match PageSession::from_request_parts(&mut parts, &state).await {
        Ok(_) => serve_entry(&state, Request::from_parts(parts, body)).await,
        Err(redirect) => redirect,
    }
}

async fn serve_entry(state: &AppState, req: Request) -> Response {
    let entry = state.static_dir.join(ENTRY_PAGE);
    match ServeFile::new(entry).oneshot(req).await {
        Ok(res) => res.into_response(),
        Err(never) => match never {},
    }
}

/// True for the static root itself and for `index.html` directly under it,
/// however spelled: percent-encoded, with empty or `.` segments, trailing
/// slash, or in another case for case-folding filesystems.
fn targets_entry_page(path: &str) -> bool {
    let decoded = percent_decode_str(path).decode_utf8_lossy();
    let mut segments = decoded
        .split(['/', '\\'])
        .filter(|seg| !seg.is_empty() && *seg != ".");
    match (segments.next(), segments.next()) {
        (None, _) => true,
        (Some(only), None) => only.eq_ignore_ascii_case(ENTRY_PAGE),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_page_spellings_are_recognised() {
        for path in [
            "/",
            "//",
            "/./",
            "/index.html",
            "//index.html",
            "/./index.html",
            "/index.html/",
            "/%69ndex.html",
            "/index%2Ehtml",
            "/INDEX.HTML",
        ] {
            assert!(targets_entry_page(path), "{path}");
        }
    }

    #[test]
    fn other_assets_are_not_gated() {
        for path in [
            "/script.js",
            "/css/site.css",
            "/index.html.bak",
            "/docs/index.html",
        ] {
            assert!(!targets_entry_page(path), "{path}");
        }
    }
}
