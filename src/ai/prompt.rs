use serde_json::json;

use crate::ai::client::ResponseFormat;
use crate::snacks::dto::GenerateSnackRequest;

pub fn build_prompt(prefs: &GenerateSnackRequest) -> String {
    let restrictions = if prefs.dietary_restrictions.is_empty() {
        "None".to_string()
    } else {
        prefs.dietary_restrictions.join(", ")
    };
    let caloric_line = prefs
        .caloric_limit
        .map(|limit| format!("- Caloric limit: {limit} kcal\n"))
        .unwrap_or_default();

    format!(
        "Generate a snack recommendation based on the following preferences:\n\
         - Meals eaten today: {meals}\n\
         - Snack type: {snack_type}\n\
         - Location: {location}\n\
         - Dietary goal: {goal}\n\
         - Preferred diet: {diet}\n\
         - Dietary restrictions: {restrictions}\n\
         {caloric_line}\n\
         Respond with a JSON object that includes:\n\
         - title: The name of the snack\n\
         - description: A brief description\n\
         - ingredients: List of ingredients\n\
         - instructions: How to prepare the snack\n\
         - kcal: Calories (number)\n\
         - protein: Protein in grams (number)\n\
         - fat: Fat in grams (number)\n\
         - carbohydrates: Carbohydrates in grams (number)\n\
         - fibre: Fibre in grams (number)\n",
        meals = prefs.meals_eaten,
        snack_type = prefs.snack_type.as_str(),
        location = prefs.location.as_str(),
        goal = prefs.goal.as_str(),
        diet = prefs.preferred_diet.as_str(),
    )
}

/// Schema passed as `response_format` to backends that support structured
/// output; others rely on the prompt instructions alone.
pub fn snack_response_format() -> ResponseFormat {
    ResponseFormat::json_schema(
        "snack_recommendation",
        json!({
            "type": "object",
            "properties": {
                "title": { "type": "string" },
                "description": { "type": "string" },
                "ingredients": { "type": "string" },
                "instructions": { "type": "string" },
                "kcal": { "type": "number" },
                "protein": { "type": "number" },
                "fat": { "type": "number" },
                "carbohydrates": { "type": "number" },
                "fibre": { "type": "number" }
            },
            "required": [
                "title", "description", "ingredients", "instructions",
                "kcal", "protein", "fat", "carbohydrates", "fibre"
            ],
            "additionalProperties": false
        }),
    )
}
