use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumString};

/// Recipe difficulty tag as produced by the analysis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

// Model output is not always well-cased; unknown tags and non-string values
// fall back to the default.
impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(raw
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .and_then(|tag| Difficulty::from_str(tag.trim()).ok())
            .unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default)]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "deserialize_confidence",
        skip_serializing_if = "Option::is_none"
    )]
    pub confidence: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub used_ingredients: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default, deserialize_with = "deserialize_minutes")]
    pub time_minutes: u32,
}

/// Body of a successful `POST /api/analyze/` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    #[serde(deserialize_with = "null_as_empty")]
    pub ingredients: Vec<Ingredient>,
    #[serde(deserialize_with = "null_as_empty")]
    pub recipes: Vec<Recipe>,
}

/// Body of a failed `POST /api/analyze/` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    fn value(self) -> Option<f64> {
        match self {
            Numeric::Number(value) => Some(value),
            Numeric::Text(text) => text.trim().parse().ok(),
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_confidence<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f32>, D::Error> {
    let raw = Option::<Numeric>::deserialize(deserializer)?;
    Ok(raw.and_then(Numeric::value).map(|value| value as f32))
}

fn deserialize_minutes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let raw = Option::<Numeric>::deserialize(deserializer)?;
    Ok(raw
        .and_then(Numeric::value)
        .filter(|value| value.is_finite() && *value > 0.0)
        .map(|value| value.round().min(u32::MAX as f64) as u32)
        .unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_body() {
        let body = r#"{
            "ingredients": [{"name": "fresh tomatoes", "confidence": 0.92}, {"name": "basil"}],
            "recipes": [{
                "title": "Caprese",
                "usedIngredients": ["fresh tomatoes", "basil"],
                "instructions": ["Slice", "Layer"],
                "difficulty": "easy",
                "timeMinutes": 10
            }]
        }"#;

        let result: AnalysisResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.ingredients.len(), 2);
        assert_eq!(result.ingredients[0].confidence, Some(0.92));
        assert_eq!(result.ingredients[1].confidence, None);
        assert_eq!(result.recipes[0].used_ingredients, vec!["fresh tomatoes", "basil"]);
        assert_eq!(result.recipes[0].difficulty, Difficulty::Easy);
        assert_eq!(result.recipes[0].time_minutes, 10);
    }

    #[test]
    fn coerces_loose_fields() {
        let body = r#"{
            "ingredients": [{"name": "egg", "confidence": "0.5"}],
            "recipes": [{"title": "Omelette", "difficulty": "Medium", "timeMinutes": "12.6"}]
        }"#;

        let result: AnalysisResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.ingredients[0].confidence, Some(0.5));
        let recipe = &result.recipes[0];
        assert_eq!(recipe.difficulty, Difficulty::Medium);
        assert_eq!(recipe.time_minutes, 13);
        assert!(recipe.instructions.is_empty());
    }

    #[test]
    fn missing_or_unknown_fields_use_defaults() {
        let body = r#"{"recipes": [{"title": "Toast", "difficulty": "extreme", "timeMinutes": null}]}"#;

        let result: AnalysisResult = serde_json::from_str(body).unwrap();
        assert!(result.ingredients.is_empty());
        assert_eq!(result.recipes[0].difficulty, Difficulty::Easy);
        assert_eq!(result.recipes[0].time_minutes, 0);
    }

    #[test]
    fn null_lists_and_non_string_difficulty_are_tolerated() {
        let body = r#"{
            "ingredients": null,
            "recipes": [
                {"title": "Stew", "usedIngredients": null, "instructions": null, "difficulty": 2},
                {"title": "Salad", "difficulty": {"level": "hard"}, "timeMinutes": 5}
            ]
        }"#;

        let result: AnalysisResult = serde_json::from_str(body).unwrap();
        assert!(result.ingredients.is_empty());
        assert_eq!(result.recipes.len(), 2);
        assert!(result.recipes[0].used_ingredients.is_empty());
        assert!(result.recipes[0].instructions.is_empty());
        assert_eq!(result.recipes[0].difficulty, Difficulty::Easy);
        assert_eq!(result.recipes[1].difficulty, Difficulty::Easy);
        assert_eq!(result.recipes[1].time_minutes, 5);

        let result: AnalysisResult = serde_json::from_str(r#"{"recipes": null}"#).unwrap();
        assert!(result.recipes.is_empty());
    }

    #[test]
    fn serializes_camel_case() {
        let recipe = Recipe {
            title: "Soup".into(),
            used_ingredients: vec!["leek".into()],
            instructions: vec!["Boil".into()],
            difficulty: Difficulty::Hard,
            time_minutes: 40,
        };

        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["usedIngredients"][0], "leek");
        assert_eq!(json["difficulty"], "hard");
        assert_eq!(json["timeMinutes"], 40);
    }
}
