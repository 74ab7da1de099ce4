use super::super::{Model, Msg, UploadFile};
use super::utils::debounce;
use shared::{WorkflowState, MAX_FILES};
use yew::prelude::*;

pub fn render_preview_area(model: &Model, ctx: &Context<Model>) -> Html {
    let state = model.workflow.state();
    if matches!(state, WorkflowState::Idle | WorkflowState::Succeeded(_)) {
        return html! {};
    }

    let link = ctx.link().clone();
    let files = model.workflow.files();
    let submitting = model.workflow.is_submitting();

    html! {
        <div id="preview-container">
            <h2>{ format!("Photos: {} / {}", files.len(), MAX_FILES) }</h2>
            <div id="image-previews">
                { for files.iter().enumerate().map(|(index, file)| render_preview_item(ctx, file, index, submitting)) }
            </div>
            <div class="button-container">
                <button
                    id="clear-all-btn"
                    class="analyze-btn"
                    style="background-color: var(--clear-color);"
                    disabled={submitting}
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Reset)
                    })}
                >
                    <i class="fa-solid fa-trash"></i>{" Clear All"}
                </button>
                <button
                    class="analyze-btn"
                    style="background-color: var(--primary-color);"
                    disabled={submitting}
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Submit)
                    })}
                >
                    { render_analyze_button_content(state) }
                </button>
            </div>
        </div>
    }
}

fn render_preview_item(ctx: &Context<Model>, file: &UploadFile, index: usize, submitting: bool) -> Html {
    let link = ctx.link();

    html! {
        <div class="preview-item" key={file.id.to_string()} title={file.name.clone()}>
            <img src={file.payload.preview_url.to_string()} alt={file.name.clone()} />
            if !submitting {
                <button
                    class="remove-btn"
                    title="Remove this photo"
                    onclick={link.callback(move |e: MouseEvent| {
                        e.stop_propagation();
                        Msg::RemoveFile(index)
                    })}
                >
                    <i class="fa-solid fa-times" style="font-size: 10px;"></i>
                </button>
            }
        </div>
    }
}

fn render_analyze_button_content<P>(state: &WorkflowState<P>) -> Html {
    match state {
        WorkflowState::Submitting { .. } => {
            html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Analyzing..."}</> }
        }
        WorkflowState::Failed { error, .. } if error.is_retryable() => {
            html! { <><i class="fa-solid fa-rotate-right"></i>{" Retry"}</> }
        }
        _ => html! { <><i class="fa-solid fa-magnifying-glass"></i>{" Find Recipes"}</> },
    }
}
