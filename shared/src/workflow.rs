//! The analysis lifecycle as an explicit state machine.
//!
//! ```text
//! Idle ──select──▶ Selecting ──submit──▶ Submitting ──ok──▶ Succeeded ──reset──▶ Idle
//!                     ▲                      │
//!                     └──select/remove─── Failed ◀──err──┘
//! ```

use crate::error::AnalysisError;
use crate::intake::{FileIntake, IntakeError, SelectedFile};
use crate::models::AnalysisResult;
use std::mem;

pub const NO_FILES_MESSAGE: &str = "Please select at least one image.";

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState<P> {
    Idle,
    Selecting {
        files: FileIntake<P>,
        error: Option<AnalysisError>,
    },
    Submitting {
        files: FileIntake<P>,
    },
    Succeeded(AnalysisResult),
    Failed {
        files: FileIntake<P>,
        error: AnalysisError,
    },
}

impl<P> Default for WorkflowState<P> {
    fn default() -> Self {
        WorkflowState::Idle
    }
}

/// Owns the [`WorkflowState`]; everything else only reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisWorkflow<P> {
    state: WorkflowState<P>,
}

impl<P> Default for AnalysisWorkflow<P> {
    fn default() -> Self {
        Self {
            state: WorkflowState::Idle,
        }
    }
}

impl<P> AnalysisWorkflow<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WorkflowState<P> {
        &self.state
    }

    /// Files currently staged, empty when nothing is staged.
    pub fn files(&self) -> &[SelectedFile<P>] {
        match &self.state {
            WorkflowState::Selecting { files, .. }
            | WorkflowState::Submitting { files }
            | WorkflowState::Failed { files, .. } => files.files(),
            WorkflowState::Idle | WorkflowState::Succeeded(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        match &self.state {
            WorkflowState::Selecting { error, .. } => error.as_ref(),
            WorkflowState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            WorkflowState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, WorkflowState::Submitting { .. })
    }

    /// Whether the user can currently stage or remove files.
    pub fn accepts_selection(&self) -> bool {
        matches!(
            self.state,
            WorkflowState::Idle | WorkflowState::Selecting { .. } | WorkflowState::Failed { .. }
        )
    }

    /// Stages a batch. A rejected batch leaves the staged files untouched and
    /// records the reasons as the current error. Ignored while a request is in
    /// flight or a result is shown.
    pub fn add_files(&mut self, batch: Vec<SelectedFile<P>>) -> Result<usize, IntakeError> {
        let mut files = match mem::take(&mut self.state) {
            WorkflowState::Idle => FileIntake::new(),
            WorkflowState::Selecting { files, .. } | WorkflowState::Failed { files, .. } => files,
            other => {
                self.state = other;
                return Ok(0);
            }
        };

        let outcome = files.accept(batch);
        let error = outcome.as_ref().err().cloned().map(AnalysisError::from);
        self.state = WorkflowState::Selecting { files, error };
        outcome
    }

    /// Drops the staged file at `index` and clears any error shown.
    pub fn remove_file(&mut self, index: usize) -> bool {
        match mem::take(&mut self.state) {
            WorkflowState::Selecting { mut files, error } => {
                let removed = files.remove(index).is_some();
                let error = if removed { None } else { error };
                self.state = WorkflowState::Selecting { files, error };
                removed
            }
            WorkflowState::Failed { mut files, error } => {
                if files.remove(index).is_some() {
                    self.state = WorkflowState::Selecting { files, error: None };
                    true
                } else {
                    self.state = WorkflowState::Failed { files, error };
                    false
                }
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Starts an analysis call.
    ///
    /// Returns the files to upload only when the workflow moved into
    /// `Submitting`; the caller must send exactly those and report back via
    /// [`finish`](Self::finish). A retry from `Failed` goes back through
    /// `Selecting` first.
    pub fn submit(&mut self) -> Option<Vec<SelectedFile<P>>>
    where
        P: Clone,
    {
        let files = match mem::take(&mut self.state) {
            WorkflowState::Selecting { files, .. } | WorkflowState::Failed { files, .. } => files,
            other => {
                self.state = other;
                return None;
            }
        };

        if files.is_empty() {
            self.state = WorkflowState::Selecting {
                files,
                error: Some(AnalysisError::Validation(NO_FILES_MESSAGE.to_string())),
            };
            return None;
        }

        let outgoing = files.files().to_vec();
        self.state = WorkflowState::Submitting { files };
        Some(outgoing)
    }

    /// Records the outcome of the call started by [`submit`](Self::submit).
    pub fn finish(&mut self, outcome: Result<AnalysisResult, AnalysisError>) -> bool {
        match mem::take(&mut self.state) {
            WorkflowState::Submitting { files } => {
                self.state = match outcome {
                    Ok(result) => WorkflowState::Succeeded(result),
                    Err(error) => WorkflowState::Failed { files, error },
                };
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Back to `Idle`, discarding staged files and any result.
    pub fn reset(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.state = WorkflowState::Idle;
        true
    }
}
