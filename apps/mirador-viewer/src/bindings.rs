//! JavaScript bindings for PDF.js
//!
//! Parsing and drawing stay in PDF.js; these calls go through a small bridge
//! module that keeps the loaded document per container element.

use js_sys::{Function, Promise};
use wasm_bindgen::prelude::*;
use web_sys::Element;

#[wasm_bindgen(module = "/pdfjs_bridge.js")]
extern "C" {
    /// Point `GlobalWorkerOptions.workerSrc` at the worker script
    #[wasm_bindgen(js_name = setWorkerSrc)]
    pub fn set_worker_src(src: &str);

    /// Version string of the bundled PDF.js
    #[wasm_bindgen(js_name = pdfjsVersion)]
    pub fn pdfjs_version() -> String;

    /// Start loading `source` (URL string or Uint8Array) into `container`
    ///
    /// Callbacks receive the generation first:
    /// `on_progress(gen, loaded, total)`, `on_loaded(gen, numPages)`,
    /// `on_error(gen, reason)`.
    #[wasm_bindgen(js_name = loadDocument)]
    pub fn load_document(
        container: &Element,
        source: &JsValue,
        generation: u32,
        on_progress: &Function,
        on_loaded: &Function,
        on_error: &Function,
    );

    /// Draw one page of the container's document
    ///
    /// A draw whose `generation` is no longer the newest for the container
    /// stops at its next await and leaves the container alone. The promise
    /// rejects only on real failures, not on cancellation.
    #[wasm_bindgen(js_name = renderPage)]
    pub fn render_page(
        container: &Element,
        generation: u32,
        page: u32,
        scale: f64,
        text_layer: bool,
        annotation_layer: bool,
    ) -> Promise;

    /// Replace the container's content with a message
    #[wasm_bindgen(js_name = showError)]
    pub fn show_error(container: &Element, message: &str);

    /// Forget the container's document and clear it
    #[wasm_bindgen(js_name = releaseDocument)]
    pub fn release_document(container: &Element);
}
