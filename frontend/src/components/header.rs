use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-kitchen-set"></i> {" Fridge Snap"}</h1>
            <p class="subtitle">{"Photograph your ingredients, get recipe ideas"}</p>
        </header>
    }
}
