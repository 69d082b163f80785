use axum::{Json, body::Bytes, extract::State};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::error::StockroomError;
use crate::middleware::ApiSession;
use crate::router::AppState;
use crate::store::{Collection, RecordCount};

#[derive(Debug, Serialize)]
pub struct PutResponse {
    pub status: &'static str,
    pub length: RecordCount,
}

/// GET /api/{collection}
pub async fn get_collection(
    State(state): State<AppState>,
    ApiSession(_user): ApiSession,
    collection: Collection,
) -> Result<Json<Value>, StockroomError> {
    Ok(Json(state.store.get(collection).await?))
}

/// PUT /api/{collection} -> replaces the whole document.
///
/// The body is parsed as JSON whatever its content type says; a body that
/// does not parse never reaches the store.
pub async fn put_collection(
    State(state): State<AppState>,
    ApiSession(user): ApiSession,
    collection: Collection,
    body: Bytes,
) -> Result<Json<PutResponse>, StockroomError> {
    let value: Value =
        serde_json::from_slice(&body).map_err(StockroomError::MalformedRequestBody)?;
    let length = state.store.put(collection, &value).await?;
    info!(%collection, user = %user, ?length, "collection replaced");
    Ok(Json(PutResponse {
        status: "ok",
        length,
    }))
}
