use crate::UploadFile;
use crate::config::api_base_url;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use shared::client::{self, REQUEST_TIMEOUT};
use shared::{AnalysisError, AnalysisResult};
use web_sys::FormData;

/// Uploads the accepted files in one multipart request and waits for the
/// analysis, giving up after [`REQUEST_TIMEOUT`]. Never retries.
pub async fn analyze(files: &[UploadFile]) -> Result<AnalysisResult, AnalysisError> {
    let form_data = build_form(files)?;
    let url = client::analyze_url(api_base_url());

    let request = Request::post(&url).body(form_data).map_err(|e| {
        gloo_console::error!(format!("Failed to build request: {:?}", e));
        AnalysisError::Service(client::GENERIC_FAILURE.to_string())
    })?;

    let exchange = async move {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok::<_, gloo_net::Error>((status, body))
    };
    let timeout = TimeoutFuture::new(REQUEST_TIMEOUT.as_millis() as u32);

    client::race_with_timeout(exchange, timeout).await
}

fn build_form(files: &[UploadFile]) -> Result<FormData, AnalysisError> {
    let form_data = FormData::new().map_err(|e| {
        gloo_console::error!(format!("Failed to create form data: {:?}", e));
        AnalysisError::Service(client::GENERIC_FAILURE.to_string())
    })?;

    for (index, file) in files.iter().enumerate() {
        form_data
            .append_with_blob_and_filename(
                &client::field_name(index),
                file.payload.file.as_ref(),
                &file.name,
            )
            .map_err(|e| {
                gloo_console::error!(format!("Failed to attach {}: {:?}", file.name, e));
                AnalysisError::Service(client::GENERIC_FAILURE.to_string())
            })?;
    }

    Ok(form_data)
}
