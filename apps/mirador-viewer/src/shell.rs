//! App shell
//!
//! Chooses the initial document, shows a short splash before the viewer
//! mounts, and screens files coming from the picker.

use crate::error::Result;
use crate::source::{DocumentSource, LocalFile};

/// How long the splash stays up before the viewer mounts
pub const SPLASH_DURATION_MS: i32 = 1000;

/// Splash heading
pub const SPLASH_TITLE: &str = "Loading Mirador Los Volcanes...";

#[derive(Debug)]
pub struct Shell {
    source: DocumentSource,
    splash_visible: bool,
}

impl Shell {
    pub fn with_source(source: DocumentSource) -> Self {
        Self {
            source,
            splash_visible: true,
        }
    }

    pub fn source(&self) -> &DocumentSource {
        &self.source
    }

    pub fn splash_visible(&self) -> bool {
        self.splash_visible
    }

    /// Hide the splash. Returns true the first time only.
    pub fn finish_splash(&mut self) -> bool {
        std::mem::replace(&mut self.splash_visible, false)
    }

    /// Swap in a file from the picker
    ///
    /// Non-PDF files are rejected and the current source is kept.
    pub fn select_file(&mut self, name: &str, mime: &str, bytes: Vec<u8>) -> Result<&DocumentSource> {
        let file = LocalFile::new(name, mime, bytes)?;
        self.source = DocumentSource::File(file);
        Ok(&self.source)
    }
}
