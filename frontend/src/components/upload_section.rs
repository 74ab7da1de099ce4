use super::super::Model;
use super::super::Msg;
use super::utils::{collect_uploads, debounce};
use shared::{ImageType, MAX_FILES};
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    if !model.workflow.accepts_selection() {
        return html! {};
    }

    let limit_reached = model.workflow.files().len() >= MAX_FILES;
    html! {
        <div class="upload-section">
            { render_file_input_area(model, ctx, limit_reached) }
        </div>
    }
}

fn render_file_input_area(model: &Model, ctx: &Context<Model>, limit_reached: bool) -> Html {
    if limit_reached {
        return html! {
            <p class="limit-reached">{format!("You have reached the maximum of {} images.", MAX_FILES)}</p>
        };
    }

    let link = ctx.link();
    let handle_change = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let files = input.files().map(|list| collect_uploads(&list)).unwrap_or_default();

        input.set_value("");

        (!files.is_empty()).then_some(Msg::FilesAdded(files))
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);
    let trigger_file_input = Callback::from(|_: ()| {
        let input = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id("file-input"));
        if let Some(input) = input {
            if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
                html_input.click();
            }
        }
    });

    let supported = ImageType::labels().join(", ");

    html! {
        <>
            <input
                type="file"
                id="file-input"
                multiple=true
                accept={ImageType::accept_list()}
                style="display: none;"
                onchange={handle_change}
            />

            <button
                id="upload-button"
                class="analyze-btn"
                onclick={debounce(300, {
                    let trigger_file_input = trigger_file_input.clone();
                    move || trigger_file_input.emit(())
                })}
            >
                <i class="fa-solid fa-upload"></i> {" Select Photos"}
            </button>

            <div
                id="drop-zone"
                class={classes!("upload-area", model.is_dragging.then_some("drag-over"))}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={debounce(300, {
                    let trigger_file_input = trigger_file_input.clone();
                    move || trigger_file_input.emit(())
                })}
            >
                <div class="upload-placeholder">
                    <i class="fa-solid fa-cloud-arrow-up"></i>
                    <p>{"Drag & drop ingredient photos here, paste, or click"}</p>
                    <p class="file-types">{format!("Supported formats: {} (max 10 MB each, up to {} photos)", supported, MAX_FILES)}</p>
                </div>
            </div>
        </>
    }
}
