use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::ai::AiSnack;

/// Pulls a JSON value out of a model response that may or may not be pure
/// JSON. Tries, in order: the whole text, a fenced code block, then any
/// brace-delimited substring.
pub fn extract_json_from_text(text: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Some(value);
    }

    lazy_static! {
        static ref CODE_BLOCK: Regex =
            Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("static regex");
        static ref BRACES: Regex = Regex::new(r"(?s)\{.*?\}").expect("static regex");
    }

    if let Some(captures) = CODE_BLOCK.captures(text) {
        if let Some(block) = captures.get(1) {
            if let Ok(value) = serde_json::from_str::<Value>(block.as_str()) {
                return Some(value);
            }
        }
    }

    for candidate in BRACES.find_iter(text) {
        if let Ok(value) = serde_json::from_str::<Value>(candidate.as_str()) {
            return Some(value);
        }
    }

    None
}

/// Maps a raw response to the fixed nutrition schema. Numbers use a
/// number-or-zero policy; list-shaped fields accept an array (newline-joined)
/// or a plain string. Partial data is preferred over discarding the response.
pub fn parse_snack(text: &str) -> Option<AiSnack> {
    let value = extract_json_from_text(text)?;
    Some(coerce_snack(&value))
}

fn coerce_snack(value: &Value) -> AiSnack {
    AiSnack {
        title: string_or_empty(&value["title"]),
        description: string_or_empty(&value["description"]),
        ingredients: list_or_string(&value["ingredients"]),
        instructions: list_or_string(&value["instructions"]),
        kcal: number_or_zero(&value["kcal"]),
        protein: number_or_zero(&value["protein"]),
        fat: number_or_zero(&value["fat"]),
        carbohydrates: number_or_zero(&value["carbohydrates"]),
        fibre: number_or_zero(&value["fibre"]),
    }
}

fn string_or_empty(value: &Value) -> String {
    value.as_str().unwrap_or_default().to_string()
}

fn number_or_zero(value: &Value) -> f64 {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        .unwrap_or(0.0)
}

fn list_or_string(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| item.to_string())
            })
            .collect::<Vec<_>>()
            .join("\n"),
        other => string_or_empty(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_whole_text_json() {
        let value = extract_json_from_text(r#"{"title":"Apple slices"}"#).expect("should parse");
        assert_eq!(value["title"], "Apple slices");
    }

    #[test]
    fn extracts_from_fenced_code_block() {
        let text = "Here is it: ```json\n{\"title\":\"X\",\"kcal\":120}\n``` Thanks";
        let value = extract_json_from_text(text).expect("should extract");
        assert_eq!(value["title"], "X");
        assert_eq!(value["kcal"], 120);
    }

    #[test]
    fn extracts_brace_substring_from_prose() {
        let text = "Sure! The recommendation is {\"title\":\"Rice cakes\"} — enjoy.";
        let value = extract_json_from_text(text).expect("should extract");
        assert_eq!(value["title"], "Rice cakes");
    }

    #[test]
    fn plain_prose_yields_none() {
        assert!(extract_json_from_text("I cannot help with that request.").is_none());
        assert!(parse_snack("no json here { not valid either }").is_none());
    }

    #[test]
    fn numeric_coercion_is_number_or_zero() {
        let snack = parse_snack(
            r#"{"title":"Trail mix","kcal":"210","protein":"n/a","fat":7.5}"#,
        )
        .expect("should parse");
        assert_eq!(snack.kcal, 210.0);
        assert_eq!(snack.protein, 0.0);
        assert_eq!(snack.fat, 7.5);
        assert_eq!(snack.carbohydrates, 0.0);
    }

    #[test]
    fn list_fields_join_arrays_with_newlines() {
        let snack = parse_snack(
            r#"{"title":"Toast","ingredients":["bread","butter"],"instructions":"Toast the bread."}"#,
        )
        .expect("should parse");
        assert_eq!(snack.ingredients, "bread\nbutter");
        assert_eq!(snack.instructions, "Toast the bread.");
    }
}
