mod api;
mod components;
mod config;

use components::handlers;
use components::header::render_header;
use components::preview_area::render_preview_area;
use components::results::render_results;
use components::upload_section::render_upload_section;
use components::utils::render_error_message;
use gloo_events::EventListener;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::{AnalysisError, AnalysisResult, AnalysisWorkflow, SelectedFile};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

// Models
#[derive(Clone)]
pub struct Upload {
    pub file: GlooFile,
    pub preview_url: ObjectUrl,
}

impl Upload {
    pub fn selected(file: GlooFile) -> UploadFile {
        let name = file.name();
        let size = file.size();
        let media_type = file.raw_mime_type();
        let preview_url = ObjectUrl::from(file.clone());
        SelectedFile::new(name, size, media_type, Upload { file, preview_url })
    }
}

pub type UploadFile = SelectedFile<Upload>;

// Yew msg components
pub enum Msg {
    // File operations
    FilesAdded(Vec<UploadFile>),
    RemoveFile(usize),
    Reset,

    // Analysis operations
    Submit,
    AnalysisFinished(Result<AnalysisResult, AnalysisError>),

    // UI states
    SetDragging(bool),

    // Input events
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
}

// Main component
pub struct Model {
    workflow: AnalysisWorkflow<Upload>,
    is_dragging: bool,
    paste_listener: Option<EventListener>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut model = Self {
            workflow: AnalysisWorkflow::new(),
            is_dragging: false,
            paste_listener: None,
        };

        let link = ctx.link().clone();
        if let Some(window) = web_sys::window() {
            let listener = EventListener::new(&window, "paste", move |event| {
                if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                    link.send_message(Msg::HandlePaste(clipboard_event.clone()));
                }
            });
            model.paste_listener = Some(listener);
        } else {
            log::warn!("No window available, paste support disabled");
        }

        model
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            // File operations
            Msg::FilesAdded(files) => handlers::handle_files_added(self, files),
            Msg::RemoveFile(index) => handlers::handle_remove_file(self, index),
            Msg::Reset => handlers::handle_reset(self),

            // Analysis operations
            Msg::Submit => handlers::handle_submit(self, ctx),
            Msg::AnalysisFinished(outcome) => handlers::handle_analysis_finished(self, outcome),

            // UI states
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }

            // Input events
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(self, ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { render_header() }

                <main class="main-content">
                { render_upload_section(self, ctx) }
                { render_preview_area(self, ctx) }
                { render_error_message(self) }
                { render_results(self, ctx) }
                </main>

                <footer class="app-footer">
                    <p>{"Fridge Snap | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting, API at {}", config::api_base_url());
    yew::Renderer::<Model>::new().render();
}
