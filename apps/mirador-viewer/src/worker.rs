//! pdf.js worker setup
//!
//! The renderer needs its background worker script configured once per page
//! load, before any viewer mounts.

use std::sync::OnceLock;

use crate::source::RuntimeMode;

/// Worker script served alongside the app during development
pub const BUNDLED_WORKER_PATH: &str = "/pdf.worker.min.js";

/// Worker script location for `mode`
pub fn worker_src(mode: RuntimeMode, pdfjs_version: &str) -> String {
    match mode {
        RuntimeMode::Development => BUNDLED_WORKER_PATH.to_string(),
        RuntimeMode::Production => format!(
            "https://unpkg.com/pdfjs-dist@{}/build/pdf.worker.min.js",
            pdfjs_version
        ),
    }
}

/// One-shot holder for the configured worker location
#[derive(Debug)]
pub struct WorkerSetup {
    src: OnceLock<String>,
}

impl WorkerSetup {
    pub const fn new() -> Self {
        Self { src: OnceLock::new() }
    }

    /// Run `apply` with `src` the first time only. Returns whether it ran.
    pub fn configure<F>(&self, src: &str, apply: F) -> bool
    where
        F: FnOnce(&str),
    {
        let mut applied = false;
        self.src.get_or_init(|| {
            apply(src);
            applied = true;
            src.to_string()
        });
        applied
    }

    /// The location chosen by the first successful call
    pub fn configured(&self) -> Option<&str> {
        self.src.get().map(String::as_str)
    }
}

impl Default for WorkerSetup {
    fn default() -> Self {
        Self::new()
    }
}

static WORKER: WorkerSetup = WorkerSetup::new();

/// Process-wide worker configuration
pub fn configure_worker<F>(src: &str, apply: F) -> bool
where
    F: FnOnce(&str),
{
    WORKER.configure(src, apply)
}

/// Worker location configured for this page, if any
pub fn configured_worker() -> Option<&'static str> {
    WORKER.configured()
}
