use crate::models::{AnalysisResult, Difficulty, Ingredient, Recipe};

pub const NO_INGREDIENTS: &str = "No ingredients detected";
pub const NO_RECIPES: &str = "No recipes generated";

/// A result collection, or the placeholder shown instead of an empty list.
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Placeholder(&'static str),
    Items(Vec<T>),
}

impl<T> Section<T> {
    fn from_items(items: Vec<T>, placeholder: &'static str) -> Self {
        if items.is_empty() {
            Section::Placeholder(placeholder)
        } else {
            Section::Items(items)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngredientView {
    pub name: String,
    pub confidence: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeView {
    pub title: String,
    pub difficulty: Difficulty,
    pub time: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub ingredients: Section<IngredientView>,
    pub recipes: Section<RecipeView>,
}

impl From<&AnalysisResult> for ResultView {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            ingredients: Section::from_items(
                result.ingredients.iter().map(IngredientView::from).collect(),
                NO_INGREDIENTS,
            ),
            recipes: Section::from_items(
                result.recipes.iter().map(RecipeView::from).collect(),
                NO_RECIPES,
            ),
        }
    }
}

impl From<&Ingredient> for IngredientView {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            name: ingredient.name.clone(),
            confidence: confidence_label(ingredient.confidence),
        }
    }
}

impl From<&Recipe> for RecipeView {
    fn from(recipe: &Recipe) -> Self {
        Self {
            title: recipe.title.clone(),
            difficulty: recipe.difficulty,
            time: minutes_label(recipe.time_minutes),
            ingredients: recipe.used_ingredients.clone(),
            steps: recipe.instructions.clone(),
        }
    }
}

/// `Some(0.873)` renders as `"87% confidence"`; no score, no badge.
pub fn confidence_label(confidence: Option<f32>) -> Option<String> {
    confidence
        .filter(|value| value.is_finite())
        .map(|value| format!("{}% confidence", (value * 100.0).round() as i64))
}

pub fn minutes_label(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m} min"),
        (h, 0) => format!("{h} h"),
        (h, m) => format!("{h} h {m} min"),
    }
}
