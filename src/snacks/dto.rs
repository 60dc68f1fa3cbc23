use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::pagination::ListMeta;
use crate::snacks::repo::Snack;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnackType {
    Sweet,
    Salty,
    Light,
    Filling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Work,
    Home,
    Store,
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Maintain,
    Cut,
    Bulk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredDiet {
    Standard,
    Vegetarian,
    Vegan,
    GlutenFree,
}

impl SnackType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnackType::Sweet => "sweet",
            SnackType::Salty => "salty",
            SnackType::Light => "light",
            SnackType::Filling => "filling",
        }
    }
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Work => "work",
            Location::Home => "home",
            Location::Store => "store",
            Location::Away => "away",
        }
    }
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Maintain => "maintain",
            Goal::Cut => "cut",
            Goal::Bulk => "bulk",
        }
    }
}

impl PreferredDiet {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferredDiet::Standard => "standard",
            PreferredDiet::Vegetarian => "vegetarian",
            PreferredDiet::Vegan => "vegan",
            PreferredDiet::GlutenFree => "gluten_free",
        }
    }
}

/// Validated body of `POST /api/snacks/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateSnackRequest {
    pub meals_eaten: String,
    pub snack_type: SnackType,
    pub location: Location,
    pub goal: Goal,
    pub preferred_diet: PreferredDiet,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub caloric_limit: Option<i32>,
}

pub const CALORIC_LIMIT_MIN: i32 = 50;
pub const CALORIC_LIMIT_MAX: i32 = 500;

impl GenerateSnackRequest {
    /// Field-level validation beyond what deserialization enforces.
    pub fn validate(&self) -> Result<(), String> {
        if self.meals_eaten.trim().is_empty() {
            return Err("meals_eaten is required".into());
        }
        if let Some(limit) = self.caloric_limit {
            if !(CALORIC_LIMIT_MIN..=CALORIC_LIMIT_MAX).contains(&limit) {
                return Err(format!(
                    "caloric_limit must be between {CALORIC_LIMIT_MIN} and {CALORIC_LIMIT_MAX}"
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SnackDetailsResponse {
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
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Snack> for SnackDetailsResponse {
    fn from(s: Snack) -> Self {
        Self {
            id: s.id,
            title: s.title,
            description: s.description,
            ingredients: s.ingredients,
            instructions: s.instructions,
            snack_type: s.snack_type,
            location: s.location,
            goal: s.goal,
            preferred_diet: s.preferred_diet,
            kcal: s.kcal,
            protein: s.protein,
            fat: s.fat,
            carbohydrates: s.carbohydrates,
            fibre: s.fibre,
            created_at: s.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SnackListItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub kcal: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct SnackListResponse {
    pub data: Vec<SnackListItem>,
    pub meta: ListMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_deserialize_from_snake_case() {
        let req: GenerateSnackRequest = serde_json::from_value(serde_json::json!({
            "meals_eaten": "oatmeal and a coffee",
            "snack_type": "sweet",
            "location": "work",
            "goal": "maintain",
            "preferred_diet": "gluten_free",
        }))
        .expect("request should deserialize");
        assert_eq!(req.snack_type, SnackType::Sweet);
        assert_eq!(req.preferred_diet, PreferredDiet::GlutenFree);
        assert!(req.dietary_restrictions.is_empty());
        assert!(req.caloric_limit.is_none());
    }

    #[test]
    fn unknown_enum_value_is_rejected() {
        let result = serde_json::from_value::<GenerateSnackRequest>(serde_json::json!({
            "meals_eaten": "toast",
            "snack_type": "spicy",
            "location": "work",
            "goal": "maintain",
            "preferred_diet": "standard",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn validate_checks_meals_and_caloric_range() {
        let mut req: GenerateSnackRequest = serde_json::from_value(serde_json::json!({
            "meals_eaten": "  ",
            "snack_type": "salty",
            "location": "home",
            "goal": "cut",
            "preferred_diet": "standard",
        }))
        .expect("request should deserialize");
        assert!(req.validate().is_err());

        req.meals_eaten = "salad for lunch".into();
        assert!(req.validate().is_ok());

        req.caloric_limit = Some(30);
        assert!(req.validate().is_err());
        req.caloric_limit = Some(500);
        assert!(req.validate().is_ok());
    }
}
