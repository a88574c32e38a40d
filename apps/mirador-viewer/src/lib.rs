//! Mirador Viewer
//!
//! A WASM PDF viewer for the Mirador Los Volcanes brochure:
//! - Page navigation, zoom and fullscreen over PDF.js
//! - Swipe navigation on touch screens
//! - Device-dependent default zoom
//!
//! Parsing and drawing are left to PDF.js; this crate owns the view state
//! and the browser wiring around it.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod device;
pub mod error;
pub mod fullscreen;
pub mod load;
pub mod render;
pub mod shell;
pub mod source;
pub mod state;
pub mod toolbar;
pub mod touch;
pub mod viewer;
pub mod worker;

mod app;
mod bindings;
mod dom;
mod page;

// Re-export common types
pub use app::{PdfViewer, Snapshot};
pub use error::ViewerError;
pub use source::{DocumentSource, LocalFile, RuntimeMode};
pub use state::ViewState;
pub use viewer::{RescalePolicy, Viewer};

/// Initialize the WASM module
/// Runs once when the module is instantiated
#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in debug mode
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    wasm_logger::init(wasm_logger::Config::new(if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    }));
}
