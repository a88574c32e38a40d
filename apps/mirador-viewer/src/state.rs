//! View state for the PDF viewer
//!
//! Page, zoom, fullscreen and loading fields, plus the clamped transitions
//! between them. Zoom is kept in whole percent so that stepping in and back
//! out lands exactly where it started.

use serde::Serialize;

use crate::device;

/// Smallest zoom, in percent
pub const MIN_SCALE_PERCENT: u16 = 50;

/// Largest zoom, in percent
pub const MAX_SCALE_PERCENT: u16 = 300;

/// Zoom step for the +/- buttons, in percent
pub const SCALE_STEP_PERCENT: u16 = 20;

/// Transient UI state owned by one viewer instance
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    current_page: u32,
    /// 0 until the renderer reports a page count
    total_pages: u32,
    scale_percent: u16,
    is_fullscreen: bool,
    is_loading: bool,
    load_progress: u8,
    load_failed: bool,
}

impl ViewState {
    /// Fresh state for a viewer mounted at `viewport_width`
    pub fn new(viewport_width: f64) -> Self {
        Self {
            current_page: 1,
            total_pages: 0,
            scale_percent: device::scale_percent_for_width(viewport_width),
            is_fullscreen: false,
            is_loading: true,
            load_progress: 0,
            load_failed: false,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Render scale (1.0 = 100%)
    pub fn scale(&self) -> f64 {
        f64::from(self.scale_percent) / 100.0
    }

    pub fn scale_percent(&self) -> u16 {
        self.scale_percent
    }

    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn load_progress(&self) -> u8 {
        self.load_progress
    }

    /// The renderer gave up on the current source
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// A page count is known and pages can be shown
    pub fn is_ready(&self) -> bool {
        !self.is_loading && !self.load_failed && self.total_pages > 0
    }

    pub fn go_to_prev_page(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    /// No-op until the page count is known
    pub fn go_to_next_page(&mut self) {
        if self.total_pages == 0 {
            return;
        }
        self.current_page = (self.current_page + 1).min(self.total_pages);
    }

    pub fn zoom_in(&mut self) {
        self.scale_percent = (self.scale_percent + SCALE_STEP_PERCENT).min(MAX_SCALE_PERCENT);
    }

    pub fn zoom_out(&mut self) {
        self.scale_percent = self
            .scale_percent
            .saturating_sub(SCALE_STEP_PERCENT)
            .max(MIN_SCALE_PERCENT);
    }

    /// Back to the device default for `viewport_width`
    pub fn reset_zoom(&mut self, viewport_width: f64) {
        self.scale_percent = device::scale_percent_for_width(viewport_width);
    }

    /// Set the zoom directly, clamped to the allowed range. Non-finite values are ignored.
    pub fn set_scale(&mut self, scale: f64) {
        if !scale.is_finite() {
            return;
        }
        let percent = (scale * 100.0).round();
        self.scale_percent =
            percent.clamp(f64::from(MIN_SCALE_PERCENT), f64::from(MAX_SCALE_PERCENT)) as u16;
    }

    pub fn set_fullscreen(&mut self, active: bool) {
        self.is_fullscreen = active;
    }

    /// Enter the loading state for a new document source
    pub fn begin_load(&mut self) {
        self.is_loading = true;
        self.load_progress = 0;
        self.load_failed = false;
        self.current_page = 1;
        self.total_pages = 0;
    }

    /// Record download progress; ignored while the total size is unknown
    pub fn apply_progress(&mut self, loaded: f64, total: f64) {
        if !self.is_loading || total.is_nan() || total <= 0.0 || loaded.is_nan() {
            return;
        }
        let percent = (loaded / total * 100.0).round().clamp(0.0, 100.0);
        self.load_progress = percent as u8;
    }

    /// The renderer decoded the document
    pub fn finish_load(&mut self, num_pages: u32) {
        self.total_pages = num_pages;
        self.is_loading = false;
        self.load_progress = 100;
        self.load_failed = false;
        self.current_page = self.current_page.clamp(1, num_pages.max(1));
    }

    /// The renderer could not fetch or parse the document
    pub fn fail_load(&mut self) {
        self.is_loading = false;
        self.load_failed = true;
    }
}
