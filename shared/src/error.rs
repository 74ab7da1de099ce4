use crate::intake::IntakeError;
use derive_more::Display;

/// Why an analysis attempt did not produce a result.
///
/// Every variant is terminal for the current attempt only. The message is
/// what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum AnalysisError {
    /// Input rejected before any request was made.
    #[display(fmt = "{}", _0)]
    Validation(String),
    /// The request never got a response: network failure or timeout.
    #[display(fmt = "{}", _0)]
    Transport(String),
    /// The service answered with an error.
    #[display(fmt = "{}", _0)]
    Service(String),
}

impl std::error::Error for AnalysisError {}

impl AnalysisError {
    pub fn message(&self) -> &str {
        match self {
            AnalysisError::Validation(message)
            | AnalysisError::Transport(message)
            | AnalysisError::Service(message) => message,
        }
    }

    /// Whether resubmitting the same files unchanged may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AnalysisError::Transport(_))
    }
}

impl From<IntakeError> for AnalysisError {
    fn from(err: IntakeError) -> Self {
        AnalysisError::Validation(err.to_string())
    }
}
