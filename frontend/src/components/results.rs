use super::super::{Model, Msg};
use super::utils::debounce;
use shared::render::{IngredientView, RecipeView, ResultView, Section};
use yew::prelude::*;

pub fn render_results(model: &Model, ctx: &Context<Model>) -> Html {
    let Some(result) = model.workflow.result() else {
        return html! {};
    };

    let view = ResultView::from(result);
    let link = ctx.link().clone();

    html! {
        <div class="results-container">
            <div class="result-section">
                <h2><i class="fa-solid fa-carrot"></i>{" Detected Ingredients"}</h2>
                { render_ingredients(&view.ingredients) }
            </div>
            <div class="result-section">
                <h2><i class="fa-solid fa-utensils"></i>{" Suggested Recipes"}</h2>
                { render_recipes(&view.recipes) }
            </div>
            <div class="button-container">
                <button
                    class="analyze-btn"
                    onclick={debounce(300, move || link.send_message(Msg::Reset))}
                >
                    <i class="fa-solid fa-camera"></i>{" Analyze New Photos"}
                </button>
            </div>
        </div>
    }
}

fn render_ingredients(section: &Section<IngredientView>) -> Html {
    match section {
        Section::Placeholder(text) => html! { <p class="no-results-message">{ *text }</p> },
        Section::Items(items) => html! {
            <ul class="ingredient-list">
                { for items.iter().map(|item| html! {
                    <li class="ingredient-item">
                        <span class="ingredient-name">{ &item.name }</span>
                        if let Some(confidence) = &item.confidence {
                            <span class="confidence-badge">{ confidence }</span>
                        }
                    </li>
                }) }
            </ul>
        },
    }
}

fn render_recipes(section: &Section<RecipeView>) -> Html {
    match section {
        Section::Placeholder(text) => html! { <p class="no-results-message">{ *text }</p> },
        Section::Items(recipes) => html! {
            <div class="recipe-list">
                { for recipes.iter().map(render_recipe) }
            </div>
        },
    }
}

fn render_recipe(recipe: &RecipeView) -> Html {
    let difficulty = recipe.difficulty.to_string();

    html! {
        <div class="recipe-card">
            <div class="recipe-header">
                <h3>{ &recipe.title }</h3>
                <span class={classes!("difficulty-tag", difficulty.clone())}>{ difficulty }</span>
                <span class="recipe-time"><i class="fa-regular fa-clock"></i>{ format!(" {}", recipe.time) }</span>
            </div>
            if !recipe.ingredients.is_empty() {
                <p class="recipe-ingredients">
                    <strong>{"Uses: "}</strong>{ recipe.ingredients.join(", ") }
                </p>
            }
            <ol class="recipe-steps">
                { for recipe.steps.iter().map(|step| html! { <li>{ step }</li> }) }
            </ol>
        </div>
    }
}
