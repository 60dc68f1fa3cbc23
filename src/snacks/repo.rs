use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::ai::AiSnack;
use crate::snacks::dto::GenerateSnackRequest;

/// A persisted recommendation. Rows are immutable once inserted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Snack {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub ingredients: String,
    pub instructions: String,
    pub snack_type: String,
    pub location: String,
    pub goal: String,
    pub preferred_diet: String,
    pub kcal: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbohydrates: f64,
    pub fibre: f64,
    pub created_at: OffsetDateTime,
}

pub async fn insert(
    db: &PgPool,
    prefs: &GenerateSnackRequest,
    ai: &AiSnack,
) -> anyhow::Result<Snack> {
    let snack = sqlx::query_as::<_, Snack>(
        r#"
        INSERT INTO snacks
            (title, description, ingredients, instructions,
             snack_type, location, goal, preferred_diet,
             kcal, protein, fat, carbohydrates, fibre)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING id, title, description, ingredients, instructions,
                  snack_type, location, goal, preferred_diet,
                  kcal, protein, fat, carbohydrates, fibre, created_at
        "#,
    )
    .bind(&ai.title)
    .bind(&ai.description)
    .bind(&ai.ingredients)
    .bind(&ai.instructions)
    .bind(prefs.snack_type.as_str())
    .bind(prefs.location.as_str())
    .bind(prefs.goal.as_str())
    .bind(prefs.preferred_diet.as_str())
    .bind(ai.kcal)
    .bind(ai.protein)
    .bind(ai.fat)
    .bind(ai.carbohydrates)
    .bind(ai.fibre)
    .fetch_one(db)
    .await?;
    Ok(snack)
}

pub async fn find_by_id(db: &PgPool, id: i64) -> anyhow::Result<Option<Snack>> {
    let snack = sqlx::query_as::<_, Snack>(
        r#"
        SELECT id, title, description, ingredients, instructions,
               snack_type, location, goal, preferred_diet,
               kcal, protein, fat, carbohydrates, fibre, created_at
        FROM snacks
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(snack)
}

pub async fn list_page(db: &PgPool, limit: i64, offset: i64) -> anyhow::Result<Vec<Snack>> {
    let rows = sqlx::query_as::<_, Snack>(
        r#"
        SELECT id, title, description, ingredients, instructions,
               snack_type, location, goal, preferred_diet,
               kcal, protein, fat, carbohydrates, fibre, created_at
        FROM snacks
        ORDER BY created_at DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn count(db: &PgPool) -> anyhow::Result<i64> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM snacks")
        .fetch_one(db)
        .await?;
    Ok(total)
}
