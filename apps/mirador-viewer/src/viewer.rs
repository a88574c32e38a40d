//! Viewer component
//!
//! Drives the view state from UI events and renderer callbacks, and asks the
//! renderer to redraw whenever something visible changed.

use serde::Deserialize;

use crate::error::DOCUMENT_LOAD_FAILED;
use crate::fullscreen::{self, FullscreenApi, FullscreenHost, FullscreenSync};
use crate::load::{LoadTicket, LoadTracker};
use crate::render::{DocumentRenderer, RenderRequest, RenderSequence, RenderTicket};
use crate::source::DocumentSource;
use crate::state::ViewState;
use crate::toolbar::Toolbar;
use crate::touch::{SwipeDirection, SwipeTracker};

/// What a window resize does to the zoom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RescalePolicy {
    /// Every resize resets zoom to the device default, discarding manual zoom
    #[default]
    Always,
    /// The device default is applied on mount only
    InitialOnly,
}

pub struct Viewer<R: DocumentRenderer> {
    state: ViewState,
    source: Option<DocumentSource>,
    loads: LoadTracker,
    renders: RenderSequence,
    swipe: SwipeTracker,
    fullscreen: FullscreenSync,
    rescale: RescalePolicy,
    renderer: R,
}

impl<R: DocumentRenderer> Viewer<R> {
    pub fn new(renderer: R, viewport_width: f64, rescale: RescalePolicy) -> Self {
        Self {
            state: ViewState::new(viewport_width),
            source: None,
            loads: LoadTracker::new(),
            renders: RenderSequence::new(),
            swipe: SwipeTracker::new(),
            fullscreen: FullscreenSync::new(),
            rescale,
            renderer,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn source(&self) -> Option<&DocumentSource> {
        self.source.as_ref()
    }

    pub fn toolbar(&self) -> Toolbar {
        Toolbar::from_state(&self.state)
    }

    #[cfg(test)]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Replace the document; anything still loading for the old one goes stale
    pub fn set_source(&mut self, source: DocumentSource) -> LoadTicket {
        let ticket = self.loads.begin();
        self.state.begin_load();
        log::info!("Loading {} (generation {})", source.describe(), ticket.generation());
        self.renderer.load(&source, ticket);
        self.source = Some(source);
        ticket
    }

    /// Download progress from the renderer. Returns false for stale tickets.
    pub fn on_load_progress(&mut self, ticket: LoadTicket, loaded: f64, total: f64) -> bool {
        if !self.loads.is_current(ticket) {
            return false;
        }
        self.state.apply_progress(loaded, total);
        true
    }

    /// The renderer decoded the document. Returns false for stale tickets.
    pub fn on_load_success(&mut self, ticket: LoadTicket, num_pages: u32) -> bool {
        if !self.loads.is_current(ticket) {
            log::debug!("Ignoring stale load completion (generation {})", ticket.generation());
            return false;
        }
        log::info!("Document loaded with {} pages", num_pages);
        self.state.finish_load(num_pages);
        self.rerender();
        true
    }

    /// The renderer could not load the document. Returns false for stale tickets.
    pub fn on_load_error(&mut self, ticket: LoadTicket) -> bool {
        if !self.loads.is_current(ticket) {
            return false;
        }
        log::warn!("Document failed to load (generation {})", ticket.generation());
        self.state.fail_load();
        self.renderer.show_error(DOCUMENT_LOAD_FAILED);
        true
    }

    pub fn go_to_prev_page(&mut self) {
        self.state.go_to_prev_page();
        self.rerender();
    }

    pub fn go_to_next_page(&mut self) {
        self.state.go_to_next_page();
        self.rerender();
    }

    pub fn zoom_in(&mut self) {
        self.state.zoom_in();
        self.rerender();
    }

    pub fn zoom_out(&mut self) {
        self.state.zoom_out();
        self.rerender();
    }

    pub fn reset_zoom(&mut self, viewport_width: f64) {
        self.state.reset_zoom(viewport_width);
        self.rerender();
    }

    pub fn on_resize(&mut self, viewport_width: f64) {
        match self.rescale {
            RescalePolicy::Always => self.reset_zoom(viewport_width),
            RescalePolicy::InitialOnly => {}
        }
    }

    /// Ask the browser to enter or leave fullscreen
    ///
    /// The flag itself only changes when [`Viewer::on_fullscreen_change`] sees
    /// the resulting event.
    pub fn toggle_fullscreen(&self, host: &dyn FullscreenHost) -> Option<FullscreenApi> {
        let api = if self.state.is_fullscreen() {
            fullscreen::exit(host)
        } else {
            fullscreen::request(host)
        };
        if api.is_none() {
            log::warn!("Fullscreen API not available");
        }
        api
    }

    /// Handle any of the fullscreen change events. Returns true if the flag flipped.
    pub fn on_fullscreen_change(&mut self, host: &dyn FullscreenHost) -> bool {
        match self.fullscreen.observe(host.has_fullscreen_element()) {
            Some(active) => {
                self.state.set_fullscreen(active);
                true
            }
            None => false,
        }
    }

    pub fn on_touch_start(&mut self, x: f64) {
        self.swipe.touch_start(x);
    }

    pub fn on_touch_end(&mut self, x: f64) -> Option<SwipeDirection> {
        let direction = self.swipe.touch_end(x)?;
        match direction {
            SwipeDirection::Next => self.go_to_next_page(),
            SwipeDirection::Previous => self.go_to_prev_page(),
        }
        Some(direction)
    }

    /// Drop interest in any load still in flight
    pub fn unmount(&mut self) {
        self.loads.cancel();
    }

    fn rerender(&mut self) {
        if self.state.is_ready() {
            let request = RenderRequest::new(self.state.current_page(), self.state.scale());
            let ticket = self.renders.next_ticket();
            self.renderer.render(&request, ticket);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::fullscreen::Probe;

    #[derive(Default)]
    struct RecordingRenderer {
        loads: Vec<(DocumentSource, LoadTicket)>,
        renders: Vec<RenderRequest>,
        tickets: Vec<RenderTicket>,
        errors: Vec<String>,
    }

    impl DocumentRenderer for RecordingRenderer {
        fn load(&mut self, source: &DocumentSource, ticket: LoadTicket) {
            self.loads.push((source.clone(), ticket));
        }

        fn render(&mut self, request: &RenderRequest, ticket: RenderTicket) {
            self.renders.push(request.clone());
            self.tickets.push(ticket);
        }

        fn show_error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }
    }

    /// Browser stand-in: requests succeed and flip the fullscreen element
    #[derive(Default)]
    struct FakeScreen {
        element: Cell<bool>,
        requests: Cell<u32>,
    }

    impl FullscreenHost for FakeScreen {
        fn try_request(&self, _api: FullscreenApi) -> Probe {
            self.requests.set(self.requests.get() + 1);
            self.element.set(true);
            Probe::Invoked
        }

        fn try_exit(&self, _api: FullscreenApi) -> Probe {
            self.element.set(false);
            Probe::Invoked
        }

        fn has_fullscreen_element(&self) -> bool {
            self.element.get()
        }
    }

    fn url() -> DocumentSource {
        DocumentSource::Url("/api/pdf".to_string())
    }

    fn loaded_viewer(pages: u32) -> Viewer<RecordingRenderer> {
        let mut viewer = Viewer::new(RecordingRenderer::default(), 1024.0, RescalePolicy::Always);
        let ticket = viewer.set_source(url());
        assert!(viewer.on_load_success(ticket, pages));
        viewer
    }

    #[test]
    fn test_load_lifecycle() {
        let mut viewer = Viewer::new(RecordingRenderer::default(), 1024.0, RescalePolicy::Always);
        let ticket = viewer.set_source(url());
        assert!(viewer.state().is_loading());
        assert_eq!(viewer.renderer().loads.len(), 1);

        viewer.on_load_progress(ticket, 250.0, 1000.0);
        assert_eq!(viewer.state().load_progress(), 25);
        assert!(viewer.renderer().renders.is_empty());

        viewer.on_load_success(ticket, 8);
        assert!(!viewer.state().is_loading());
        assert_eq!(viewer.state().total_pages(), 8);
        assert_eq!(viewer.renderer().renders, vec![RenderRequest::new(1, 1.2)]);
    }

    #[test]
    fn test_stale_callbacks_are_ignored() {
        let mut viewer = Viewer::new(RecordingRenderer::default(), 1024.0, RescalePolicy::Always);
        let old = viewer.set_source(url());
        let new = viewer.set_source(DocumentSource::Url("/other.pdf".to_string()));

        assert!(!viewer.on_load_progress(old, 1.0, 2.0));
        assert!(!viewer.on_load_success(old, 99));
        assert!(!viewer.on_load_error(old));
        assert_eq!(viewer.state().total_pages(), 0);
        assert!(viewer.state().is_loading());

        assert!(viewer.on_load_success(new, 3));
        assert_eq!(viewer.state().total_pages(), 3);
    }

    #[test]
    fn test_unmount_mid_load_ignores_completion() {
        let mut viewer = Viewer::new(RecordingRenderer::default(), 1024.0, RescalePolicy::Always);
        let ticket = viewer.set_source(url());
        viewer.unmount();
        assert!(!viewer.on_load_success(ticket, 4));
        assert!(viewer.renderer().renders.is_empty());
    }

    #[test]
    fn test_load_error_shows_static_message() {
        let mut viewer = Viewer::new(RecordingRenderer::default(), 1024.0, RescalePolicy::Always);
        let ticket = viewer.set_source(url());
        assert!(viewer.on_load_error(ticket));
        assert!(viewer.state().load_failed());
        assert_eq!(viewer.renderer().errors, vec![DOCUMENT_LOAD_FAILED.to_string()]);

        viewer.go_to_next_page();
        viewer.zoom_in();
        assert!(viewer.renderer().renders.is_empty());
    }

    #[test]
    fn test_zoom_while_loading_applies_after_load() {
        let mut viewer = Viewer::new(RecordingRenderer::default(), 1024.0, RescalePolicy::Always);
        let ticket = viewer.set_source(url());
        viewer.zoom_in();
        assert!(viewer.renderer().renders.is_empty());

        viewer.on_load_success(ticket, 2);
        assert_eq!(viewer.renderer().renders, vec![RenderRequest::new(1, 1.4)]);
    }

    #[test]
    fn test_navigation_rerenders_current_page() {
        let mut viewer = loaded_viewer(2);
        viewer.go_to_next_page();
        viewer.go_to_next_page();
        viewer.go_to_prev_page();

        let pages: Vec<u32> = viewer.renderer().renders.iter().map(|r| r.page).collect();
        assert_eq!(pages, vec![1, 2, 2, 1]);
        assert!(viewer.renderer().renders.iter().all(|r| r.text_layer && r.annotation_layer));
    }

    #[test]
    fn test_quick_page_flips_are_ordered() {
        let mut viewer = loaded_viewer(3);
        viewer.go_to_next_page();
        viewer.go_to_prev_page();

        // the last draw issued is for the page the state shows, and it is the newest
        let renderer = viewer.renderer();
        let (last_request, last_ticket) = (renderer.renders.last(), renderer.tickets.last());
        assert_eq!(last_request.map(|r| r.page), Some(viewer.state().current_page()));
        assert!(renderer.tickets.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(last_ticket, renderer.tickets.iter().max());
    }

    #[test]
    fn test_render_tickets_keep_increasing_across_loads() {
        let mut viewer = loaded_viewer(2);
        viewer.go_to_next_page();
        let ticket = viewer.set_source(DocumentSource::Url("/other.pdf".to_string()));
        viewer.on_load_success(ticket, 2);

        let tickets = &viewer.renderer().tickets;
        assert_eq!(tickets.len(), 3);
        assert!(tickets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_resize_overwrites_manual_zoom_by_default() {
        let mut viewer = loaded_viewer(1);
        viewer.zoom_in();
        assert_eq!(viewer.state().scale(), 1.4);

        viewer.on_resize(1000.0);
        assert_eq!(viewer.state().scale(), 1.2);

        viewer.on_resize(400.0);
        assert_eq!(viewer.state().scale(), 0.9);
    }

    #[test]
    fn test_initial_only_policy_keeps_manual_zoom() {
        let mut viewer = Viewer::new(RecordingRenderer::default(), 1024.0, RescalePolicy::InitialOnly);
        viewer.zoom_in();
        viewer.on_resize(400.0);
        assert_eq!(viewer.state().scale(), 1.4);
    }

    #[test]
    fn test_swipes_turn_pages() {
        let mut viewer = loaded_viewer(3);

        viewer.on_touch_start(300.0);
        assert_eq!(viewer.on_touch_end(240.0), Some(SwipeDirection::Next));
        assert_eq!(viewer.state().current_page(), 2);

        viewer.on_touch_start(300.0);
        assert_eq!(viewer.on_touch_end(260.0), None);
        assert_eq!(viewer.state().current_page(), 2);

        viewer.on_touch_start(100.0);
        assert_eq!(viewer.on_touch_end(200.0), Some(SwipeDirection::Previous));
        assert_eq!(viewer.state().current_page(), 1);
    }

    #[test]
    fn test_fullscreen_follows_change_events() {
        let mut viewer = loaded_viewer(1);
        let screen = FakeScreen::default();

        assert_eq!(viewer.toggle_fullscreen(&screen), Some(FullscreenApi::Standard));
        assert!(!viewer.state().is_fullscreen());

        // standard and prefixed events for the same transition
        assert!(viewer.on_fullscreen_change(&screen));
        assert!(!viewer.on_fullscreen_change(&screen));
        assert!(viewer.state().is_fullscreen());

        // Escape pressed: browser drops fullscreen without a toggle
        screen.element.set(false);
        assert!(viewer.on_fullscreen_change(&screen));
        assert!(!viewer.state().is_fullscreen());
        assert_eq!(screen.requests.get(), 1);
    }

    #[test]
    fn test_toggle_exits_when_fullscreen() {
        let mut viewer = loaded_viewer(1);
        let screen = FakeScreen::default();

        viewer.toggle_fullscreen(&screen);
        viewer.on_fullscreen_change(&screen);
        viewer.toggle_fullscreen(&screen);
        assert!(!screen.has_fullscreen_element());
        viewer.on_fullscreen_change(&screen);
        assert!(!viewer.state().is_fullscreen());
    }
}
