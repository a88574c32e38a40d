//! Viewer configuration passed in from JavaScript

use serde::Deserialize;
use wasm_bindgen::JsValue;

use crate::error::{Result, ViewerError};
use crate::source::{DocumentSource, RuntimeMode};
use crate::viewer::RescalePolicy;
use crate::worker;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerConfig {
    /// Defaults to the build profile
    pub mode: Option<RuntimeMode>,
    /// Overrides the mode's default document
    pub source_url: Option<String>,
    /// Overrides the mode's worker location
    pub worker_src: Option<String>,
    pub rescale_policy: RescalePolicy,
}

impl ViewerConfig {
    /// Decode from a JS object; `undefined`/`null` give the defaults
    pub fn from_js(value: JsValue) -> Result<Self> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value).map_err(|e| ViewerError::InvalidConfig(e.to_string()))
    }

    pub fn mode(&self) -> RuntimeMode {
        self.mode.unwrap_or_default()
    }

    pub fn initial_source(&self) -> DocumentSource {
        match &self.source_url {
            Some(url) => DocumentSource::Url(url.clone()),
            None => DocumentSource::for_mode(self.mode()),
        }
    }

    pub fn worker_src(&self, pdfjs_version: &str) -> String {
        self.worker_src
            .clone()
            .unwrap_or_else(|| worker::worker_src(self.mode(), pdfjs_version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::DIRECT_PDF_URL;

    #[test]
    fn test_decodes_camel_case() {
        let config: ViewerConfig = serde_json::from_str(
            r#"{"mode":"production","rescalePolicy":"initialOnly"}"#,
        )
        .unwrap();
        assert_eq!(config.mode(), RuntimeMode::Production);
        assert_eq!(config.rescale_policy, RescalePolicy::InitialOnly);
        assert_eq!(config.initial_source(), DocumentSource::Url(DIRECT_PDF_URL.to_string()));
        assert!(config.worker_src("4.0.379").contains("pdfjs-dist@4.0.379"));
    }

    #[test]
    fn test_overrides_win() {
        let config: ViewerConfig = serde_json::from_str(
            r#"{"sourceUrl":"/local.pdf","workerSrc":"/w.js"}"#,
        )
        .unwrap();
        assert_eq!(config.rescale_policy, RescalePolicy::Always);
        assert_eq!(config.initial_source(), DocumentSource::Url("/local.pdf".to_string()));
        assert_eq!(config.worker_src("1.0"), "/w.js");
    }
}
