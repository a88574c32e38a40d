//! Viewer error types

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Shown in place of the page when the renderer cannot load the document
pub const DOCUMENT_LOAD_FAILED: &str = "Failed to load the PDF";

/// Shown when the user picks something other than a PDF
pub const INVALID_FILE_NOTICE: &str = "Please select a valid PDF file";

#[derive(Debug, Error)]
pub enum ViewerError {
    /// Local file with a MIME type other than `application/pdf`
    #[error("Invalid local file {name:?}: expected application/pdf, got {mime:?}")]
    InvalidLocalFile { name: String, mime: String },

    /// Configuration object from JS could not be decoded
    #[error("Invalid viewer configuration: {0}")]
    InvalidConfig(String),

    /// Browser API missing or failing
    #[error("DOM error: {0}")]
    Dom(String),
}

impl ViewerError {
    /// Text for the user-facing notice
    pub fn notice(&self) -> &'static str {
        match self {
            ViewerError::InvalidLocalFile { .. } => INVALID_FILE_NOTICE,
            _ => DOCUMENT_LOAD_FAILED,
        }
    }
}

impl From<ViewerError> for JsValue {
    fn from(err: ViewerError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Result type alias for viewer operations
pub type Result<T> = std::result::Result<T, ViewerError>;
