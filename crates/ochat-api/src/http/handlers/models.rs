//! Model listing handler.
//!
//! Endpoints:
//! - GET /api/models - Models offered by the inference backend

use axum::Json;
use axum::extract::State;

use ochat_types::inference::ModelDescriptor;

use crate::http::error::AppError;
use crate::state::AppState;

/// GET /api/models - Proxy the backend's model list.
pub async fn list_models(
    State(state): State<AppState>,
) -> Result<Json<Vec<ModelDescriptor>>, AppError> {
    let models = state.chat.list_models().await?;
    Ok(Json(models))
}
