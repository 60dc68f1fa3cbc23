use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::pagination::ListMeta;
use crate::snacks::dto::SnackDetailsResponse;

#[derive(Debug, Deserialize)]
pub struct AddFavoriteRequest {
    pub snack_id: i64,
}

#[derive(Debug, Serialize)]
pub struct AddFavoriteResponse {
    pub id: i64,
    pub user_id: Uuid,
    pub snack_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub added_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct FavoriteListItem {
    pub id: i64,
    pub snack_id: i64,
    pub title: String,
    pub description: String,
    pub kcal: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub added_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct FavoriteListResponse {
    pub data: Vec<FavoriteListItem>,
    pub meta: ListMeta,
}

#[derive(Debug, Serialize)]
pub struct FavoriteDetailsResponse {
    pub id: i64,
    pub snack_id: i64,
    pub user_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub added_at: OffsetDateTime,
    pub snack: SnackDetailsResponse,
}

#[derive(Debug, Serialize)]
pub struct RemoveFavoriteResponse {
    pub success: bool,
}
