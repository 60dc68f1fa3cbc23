use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::{info, instrument};

use crate::auth::jwt::AuthUser;
use crate::error::ApiError;
use crate::pagination::RawPageQuery;
use crate::snacks::dto::{
    GenerateSnackRequest, SnackDetailsResponse, SnackListItem, SnackListResponse,
};
use crate::snacks::{repo, service};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/snacks/generate", post(generate_snack))
        .route("/snacks", get(list_snacks))
}

#[instrument(skip(state, body))]
pub async fn generate_snack(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<SnackDetailsResponse>, ApiError> {
    let req: GenerateSnackRequest = serde_json::from_value(body)
        .map_err(|e| ApiError::validation_with("Invalid request data", json!(e.to_string())))?;
    req.validate().map_err(ApiError::validation)?;

    let response = service::generate_and_store(&state, &req).await?;
    info!(user_id = %user_id, snack_id = response.id, "snack recommendation generated");
    Ok(Json(response))
}

#[instrument(skip(state))]
pub async fn list_snacks(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(raw): Query<RawPageQuery>,
) -> Result<Json<SnackListResponse>, ApiError> {
    let params = raw
        .parse()
        .map_err(|e| ApiError::validation_with("Invalid query parameters", json!(e)))?;

    let rows = repo::list_page(&state.db, params.limit, params.offset()).await?;
    let total = repo::count(&state.db).await?;

    let data = rows
        .into_iter()
        .map(|s| SnackListItem {
            id: s.id,
            title: s.title,
            description: s.description,
            kcal: s.kcal,
            created_at: s.created_at,
        })
        .collect();

    Ok(Json(SnackListResponse {
        data,
        meta: params.meta(total),
    }))
}
