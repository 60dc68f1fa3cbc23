use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;
use tracing::{info, instrument};

use crate::auth::jwt::AuthUser;
use crate::error::ApiError;
use crate::favorites::composite::composite_id;
use crate::favorites::dto::{
    AddFavoriteRequest, AddFavoriteResponse, FavoriteDetailsResponse, FavoriteListItem,
    FavoriteListResponse, RemoveFavoriteResponse,
};
use crate::favorites::repo::{self, Favorite};
use crate::pagination::RawPageQuery;
use crate::snacks;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/favorites", get(list_favorites).post(add_favorite))
        .route(
            "/favorites/:id",
            get(get_favorite).delete(remove_favorite),
        )
}

#[instrument(skip(state))]
pub async fn list_favorites(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(raw): Query<RawPageQuery>,
) -> Result<Json<FavoriteListResponse>, ApiError> {
    let params = raw
        .parse()
        .map_err(|e| ApiError::validation_with("Invalid query parameters", json!(e)))?;

    let rows = repo::list_page(&state.db, user_id, params.limit, params.offset()).await?;
    let total = repo::count_for_user(&state.db, user_id).await?;

    let data = rows
        .into_iter()
        .map(|row| FavoriteListItem {
            id: composite_id(&row.user_id, row.snack_id),
            snack_id: row.snack_id,
            title: row.title,
            description: row.description,
            kcal: row.kcal,
            added_at: row.added_at,
        })
        .collect();

    Ok(Json(FavoriteListResponse {
        data,
        meta: params.meta(total),
    }))
}

#[instrument(skip(state, body))]
pub async fn add_favorite(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<AddFavoriteResponse>), ApiError> {
    let req: AddFavoriteRequest = serde_json::from_value(body)
        .map_err(|e| ApiError::validation_with("Invalid request data", json!(e.to_string())))?;
    if req.snack_id < 1 {
        return Err(ApiError::validation("snack_id must be a positive integer"));
    }

    if snacks::repo::find_by_id(&state.db, req.snack_id).await?.is_none() {
        return Err(ApiError::NotFound("Snack not found".into()));
    }

    // Read-then-act: duplicates must fail, never silently upsert.
    if repo::exists(&state.db, user_id, req.snack_id).await? {
        return Err(ApiError::Conflict("Snack is already in favorites".into()));
    }

    let favorite = repo::insert(&state.db, user_id, req.snack_id).await?;
    info!(user_id = %user_id, snack_id = req.snack_id, "favorite added");

    Ok((
        StatusCode::CREATED,
        Json(AddFavoriteResponse {
            id: composite_id(&favorite.user_id, favorite.snack_id),
            user_id: favorite.user_id,
            snack_id: favorite.snack_id,
            added_at: favorite.added_at,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn get_favorite(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FavoriteDetailsResponse>, ApiError> {
    let favorite_id = parse_favorite_id(&id)?;

    let favorite = find_by_composite_id(&state, user_id, favorite_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Favorite not found".into()))?;

    let snack = snacks::repo::find_by_id(&state.db, favorite.snack_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Favorite not found".into()))?;

    Ok(Json(FavoriteDetailsResponse {
        id: favorite_id,
        snack_id: favorite.snack_id,
        user_id: favorite.user_id,
        added_at: favorite.added_at,
        snack: snack.into(),
    }))
}

#[instrument(skip(state))]
pub async fn remove_favorite(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<RemoveFavoriteResponse>, ApiError> {
    let favorite_id = parse_favorite_id(&id)?;

    let favorite = find_by_composite_id(&state, user_id, favorite_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Favorite not found".into()))?;

    let removed = repo::delete(&state.db, user_id, favorite.snack_id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Favorite not found".into()));
    }

    info!(user_id = %user_id, snack_id = favorite.snack_id, "favorite removed");
    Ok(Json(RemoveFavoriteResponse { success: true }))
}

fn parse_favorite_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::validation("Favorite id must be a positive integer"))
}

/// The composite id is not a database key, so resolving one is a linear scan
/// over the user's favorites.
async fn find_by_composite_id(
    state: &AppState,
    user_id: uuid::Uuid,
    favorite_id: i64,
) -> Result<Option<Favorite>, ApiError> {
    let favorites = repo::list_all(&state.db, user_id).await?;
    Ok(favorites
        .into_iter()
        .find(|f| composite_id(&f.user_id, f.snack_id) == favorite_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn favorite_id_must_be_a_positive_integer() {
        assert!(parse_favorite_id("17").is_ok());
        assert!(parse_favorite_id("0").is_err());
        assert!(parse_favorite_id("-3").is_err());
        assert!(parse_favorite_id("abc").is_err());
    }
}
