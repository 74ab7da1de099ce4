//! Types and state shared by the Fridge Snap frontend and backend.
//!
//! Everything here is free of I/O so it builds for both `wasm32` and native
//! targets and can be exercised with plain unit tests.

pub mod client;
pub mod error;
pub mod intake;
pub mod models;
pub mod render;
pub mod workflow;

pub use error::AnalysisError;
pub use intake::{FileIntake, ImageType, IntakeError, Rejection, SelectedFile, MAX_FILES, MAX_FILE_BYTES};
pub use models::{AnalysisResult, Difficulty, ErrorDetail, Ingredient, Recipe};
pub use workflow::{AnalysisWorkflow, WorkflowState};
