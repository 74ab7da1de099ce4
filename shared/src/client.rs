//! Request client pieces that do not touch the network.
//!
//! The frontend owns the actual `fetch`; this module decides what the request
//! looks like and how any answer maps onto an [`AnalysisResult`] or an
//! [`AnalysisError`].

use crate::error::AnalysisError;
use crate::models::{AnalysisResult, ErrorDetail};
use futures::future::{Either, select};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

pub const ANALYZE_PATH: &str = "/api/analyze/";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const GENERIC_FAILURE: &str =
    "Something went wrong while analyzing your photos. Please try again.";

pub fn analyze_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), ANALYZE_PATH)
}

/// Multipart field name for the file at `index`.
pub fn field_name(index: usize) -> String {
    format!("image_{index}")
}

/// Maps a completed HTTP exchange onto the analysis outcome.
pub fn parse_response(status: u16, body: &str) -> Result<AnalysisResult, AnalysisError> {
    if (200..300).contains(&status) {
        return serde_json::from_str::<AnalysisResult>(body)
            .map_err(|e| AnalysisError::Service(format!("Failed to parse response: {e}")));
    }

    match serde_json::from_str::<ErrorDetail>(body) {
        Ok(error) if !error.detail.trim().is_empty() => Err(AnalysisError::Service(error.detail)),
        _ => Err(AnalysisError::Service(GENERIC_FAILURE.to_string())),
    }
}

pub fn transport_error(err: impl Display) -> AnalysisError {
    AnalysisError::Transport(format!("Network error: {err}"))
}

pub fn timeout_error() -> AnalysisError {
    AnalysisError::Transport(format!(
        "The analysis timed out after {} seconds. Please try again.",
        REQUEST_TIMEOUT.as_secs()
    ))
}

/// Runs the HTTP exchange against `timer`. If the timer fires first the
/// exchange is dropped and the outcome is [`timeout_error`].
///
/// `exchange` resolves to the response status and body text.
pub async fn race_with_timeout<X, E, T>(exchange: X, timer: T) -> Result<AnalysisResult, AnalysisError>
where
    X: Future<Output = Result<(u16, String), E>>,
    E: Display,
    T: Future<Output = ()>,
{
    match select(Box::pin(exchange), Box::pin(timer)).await {
        Either::Left((Ok((status, body)), _)) => parse_response(status, &body),
        Either::Left((Err(err), _)) => Err(transport_error(err)),
        Either::Right(_) => Err(timeout_error()),
    }
}
