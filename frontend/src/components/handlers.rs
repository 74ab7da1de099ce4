use super::super::Msg;
use super::super::{Model, UploadFile};
use crate::api;
use crate::components::utils::collect_uploads;
use shared::{AnalysisError, AnalysisResult};
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent, FileList};
use yew::prelude::*;

pub fn handle_files_added(model: &mut Model, files: Vec<UploadFile>) -> bool {
    let attempted = files.len();
    match model.workflow.add_files(files) {
        Ok(added) => {
            log::info!("Staged {} of {} files", added, attempted);
        }
        Err(err) => {
            log::warn!("Rejected batch of {} files: {}", attempted, err);
        }
    }
    true
}

pub fn handle_remove_file(model: &mut Model, index: usize) -> bool {
    model.workflow.remove_file(index)
}

pub fn handle_reset(model: &mut Model) -> bool {
    model.workflow.reset()
}

pub fn handle_submit(model: &mut Model, ctx: &Context<Model>) -> bool {
    match model.workflow.submit() {
        Some(files) => {
            log::info!("Submitting {} files for analysis", files.len());
            send_analysis_request(ctx, files);
        }
        None => {
            log::debug!("Submit ignored");
        }
    }
    true
}

pub fn handle_analysis_finished(
    model: &mut Model,
    outcome: Result<AnalysisResult, AnalysisError>,
) -> bool {
    match &outcome {
        Ok(result) => log::info!(
            "Analysis returned {} ingredients and {} recipes",
            result.ingredients.len(),
            result.recipes.len()
        ),
        Err(err) => log::error!("Analysis failed: {}", err),
    }
    model.workflow.finish(outcome)
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(data_transfer) = event.data_transfer() {
        if let Some(file_list) = data_transfer.files() {
            process_file_list(ctx, file_list);
        }
    }

    true
}

pub fn handle_paste(model: &mut Model, ctx: &Context<Model>, event: ClipboardEvent) -> bool {
    if !model.workflow.accepts_selection() {
        return false;
    }
    if let Some(data_transfer) = event.clipboard_data() {
        if let Some(file_list) = data_transfer.files() {
            if file_list.length() > 0 {
                event.prevent_default();
                process_file_list(ctx, file_list);
                return true;
            }
        }
    }
    false
}

pub fn process_file_list(ctx: &Context<Model>, file_list: FileList) {
    let files = collect_uploads(&file_list);
    if !files.is_empty() {
        ctx.link().send_message(Msg::FilesAdded(files));
    }
}

pub fn send_analysis_request(ctx: &Context<Model>, files: Vec<UploadFile>) {
    spawn_local({
        let link = ctx.link().clone();

        async move {
            let outcome = api::analyze(&files).await;
            link.send_message(Msg::AnalysisFinished(outcome));
        }
    });
}
