//! Document sources and runtime mode
//!
//! The viewer renders either a URL or a file the user picked. In development
//! the URL goes through the local proxy; in production it points straight at
//! the published brochure.

use serde::Deserialize;

use crate::error::{Result, ViewerError};

/// MIME type accepted from the file picker
pub const PDF_MIME: &str = "application/pdf";

/// Same-origin path served by the proxy during development
pub const PROXIED_PDF_PATH: &str = "/api/pdf/mirador-los-volcanes-panguipulli.pdf";

/// Published location of the brochure
pub const DIRECT_PDF_URL: &str =
    "https://www.lanube360.com/pdf/mirador-los-volcanes-panguipulli.pdf";

/// Build/runtime flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    Development,
    Production,
}

impl RuntimeMode {
    /// Debug builds behave like the dev server
    pub fn from_build() -> Self {
        if cfg!(debug_assertions) {
            RuntimeMode::Development
        } else {
            RuntimeMode::Production
        }
    }
}

impl Default for RuntimeMode {
    fn default() -> Self {
        Self::from_build()
    }
}

/// A PDF the user picked locally
#[derive(Debug, Clone, PartialEq)]
pub struct LocalFile {
    name: String,
    bytes: Vec<u8>,
}

impl LocalFile {
    /// Accepts only `application/pdf`
    pub fn new(name: impl Into<String>, mime: &str, bytes: Vec<u8>) -> Result<Self> {
        let name = name.into();
        if mime != PDF_MIME {
            return Err(ViewerError::InvalidLocalFile {
                name,
                mime: mime.to_string(),
            });
        }
        Ok(Self { name, bytes })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// What the viewer is showing
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentSource {
    Url(String),
    File(LocalFile),
}

impl DocumentSource {
    /// Default source for `mode`
    pub fn for_mode(mode: RuntimeMode) -> Self {
        let url = match mode {
            RuntimeMode::Development => PROXIED_PDF_PATH,
            RuntimeMode::Production => DIRECT_PDF_URL,
        };
        DocumentSource::Url(url.to_string())
    }

    /// Short description for logs
    pub fn describe(&self) -> String {
        match self {
            DocumentSource::Url(url) => url.clone(),
            DocumentSource::File(file) => format!("file:{} ({} bytes)", file.name(), file.bytes().len()),
        }
    }
}
