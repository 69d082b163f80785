use axum::{
    Router,
    body::Bytes,
    extract::{DefaultBodyLimit, FromRef, State},
    routing::get,
};
use axum_extra::extract::cookie::Key;
use chrono::Duration;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

use crate::auth::{Authenticator, CredentialVerifier, SessionStore, StaticCredentials};
use crate::config::Config;
use crate::error::StockroomError;
use crate::handlers::{collections, login, pages};
use crate::middleware::ApiSession;
use crate::store::{Collection, DocumentStore};

const MIN_COOKIE_SECRET_LEN: usize = 32;

#[derive(Clone)]
pub struct AppState {
    pub store: DocumentStore,
    pub auth: Authenticator,
    pub cookie_key: Key,
    pub secure_cookie: bool,
    pub static_dir: Arc<PathBuf>,
    /// Public assets. Directory requests are never expanded to `index.html`.
    pub assets: ServeDir,
    pub body_limit: usize,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

impl AppState {
    pub fn new(
        store: DocumentStore,
        verifier: Arc<dyn CredentialVerifier>,
        sessions: SessionStore,
        cookie_key: Key,
        cfg: &Config,
    ) -> Self {
        Self {
            store,
            auth: Authenticator::new(verifier, sessions),
            cookie_key,
            secure_cookie: cfg.secure_cookie,
            static_dir: Arc::new(cfg.static_dir.clone()),
            assets: ServeDir::new(&cfg.static_dir).append_index_html_on_directories(false),
            body_limit: cfg.body_limit_bytes(),
        }
    }

    /// Wire the default components: file store, static allow-list, in-memory sessions.
    pub fn from_config(cfg: &Config) -> Result<Self, StockroomError> {
        let ttl = cfg
            .session_ttl_secs
            .map(|secs| {
                i64::try_from(secs)
                    .ok()
                    .and_then(Duration::try_seconds)
                    .ok_or_else(|| StockroomError::Config("session_ttl_secs out of range".into()))
            })
            .transpose()?;
        let verifier = Arc::new(StaticCredentials::new(cfg.users.clone()));
        if verifier.is_empty() {
            warn!("credential table is empty; nobody can log in");
        } else {
            info!(users = verifier.len(), "credential table loaded");
        }
        Ok(Self::new(
            DocumentStore::new(cfg.data_dir.clone()),
            verifier,
            SessionStore::new(ttl),
            cookie_key(cfg.cookie_secret.as_deref())?,
            cfg,
        ))
    }
}

fn cookie_key(secret: Option<&str>) -> Result<Key, StockroomError> {
    match secret {
        Some(secret) if secret.len() >= MIN_COOKIE_SECRET_LEN => {
            Ok(Key::derive_from(secret.as_bytes()))
        }
        Some(_) => Err(StockroomError::Config(format!(
            "cookie_secret must be at least {MIN_COOKIE_SECRET_LEN} bytes"
        ))),
        None => {
            warn!("no cookie_secret configured; sessions will not survive a restart");
            Ok(Key::generate())
        }
    }
}

fn collection_routes() -> Router<AppState> {
    Collection::ALL
        .into_iter()
        .fold(Router::new(), |router, collection| {
            router.route(
                &format!("/{}", collection.slug()),
                get(
                    move |state: State<AppState>, user: ApiSession| {
                        collections::get_collection(state, user, collection)
                    },
                )
                .put(
                    move |state: State<AppState>, user: ApiSession, body: Bytes| {
                        collections::put_collection(state, user, collection, body)
                    },
                ),
            )
        })
}

pub fn stockroom_router(state: AppState) -> Router {
    let body_limit = state.body_limit;

    Router::new()
        .route("/", get(pages::index))
        .route("/index.html", get(pages::index))
        .route("/login", get(login::login_page).post(login::login_submit))
        .route("/logout", get(login::logout))
        .nest("/api", collection_routes())
        .fallback(pages::static_asset)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
