//! SkinEval Common Library
//!
//! CLIとWeb(WASM)で共有される型・レスポンスパーサー・ワークフロー状態機械

pub mod types;
pub mod error;
pub mod parser;
pub mod preview;
pub mod endpoint;
pub mod workflow;
pub mod content;

pub use types::{Alternative, AnalysisResult, PreviewHandle, SelectedImage};
pub use error::{Error, Result};
pub use parser::{interpret_response, parse_analysis_response, parse_error_message};
pub use preview::{derive_preview, guess_media_type};
pub use endpoint::{analyze_url, ANALYZE_PATH, DEFAULT_API_URL, IMAGE_PART};
pub use workflow::{
    Generation, HeldImage, Outcome, PreviewTicket, SubmitTicket, WorkflowMachine, WorkflowMode,
    WorkflowState, WorkflowView,
};
