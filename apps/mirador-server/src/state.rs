//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::upstream::{HttpPdfSource, PdfSource, UpstreamError};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    pdf_source: Arc<dyn PdfSource>,
}

impl AppState {
    /// Create state backed by the HTTP upstream from `config`
    pub fn new(config: Config) -> Result<Self, UpstreamError> {
        let source = HttpPdfSource::new(&config.upstream)?;
        Ok(Self::with_source(config, Arc::new(source)))
    }

    /// Create state around an arbitrary PDF source
    pub fn with_source(config: Config, pdf_source: Arc<dyn PdfSource>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, pdf_source }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the upstream PDF source
    pub fn pdf_source(&self) -> &dyn PdfSource {
        self.inner.pdf_source.as_ref()
    }
}
