//! Fullscreen capability probing
//!
//! Browsers expose fullscreen under the standard name or a vendor prefix.
//! Candidates are tried in a fixed order and the first one present wins.
//! The viewer never sets its fullscreen flag from a toggle; it follows the
//! change events instead, so exits via Escape stay in sync.

/// One flavor of the fullscreen API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenApi {
    Standard,
    Webkit,
    Ms,
}

impl FullscreenApi {
    /// Probe order
    pub const ALL: [FullscreenApi; 3] = [Self::Standard, Self::Webkit, Self::Ms];

    /// Method on the element that enters fullscreen
    pub fn request_method(self) -> &'static str {
        match self {
            Self::Standard => "requestFullscreen",
            Self::Webkit => "webkitRequestFullscreen",
            Self::Ms => "msRequestFullscreen",
        }
    }

    /// Method on the document that leaves fullscreen
    pub fn exit_method(self) -> &'static str {
        match self {
            Self::Standard => "exitFullscreen",
            Self::Webkit => "webkitExitFullscreen",
            Self::Ms => "msExitFullscreen",
        }
    }

    /// Event fired on the document when fullscreen changes
    pub fn change_event(self) -> &'static str {
        match self {
            Self::Standard => "fullscreenchange",
            Self::Webkit => "webkitfullscreenchange",
            Self::Ms => "msfullscreenchange",
        }
    }

    /// Document property holding the current fullscreen element
    pub fn element_property(self) -> &'static str {
        match self {
            Self::Standard => "fullscreenElement",
            Self::Webkit => "webkitFullscreenElement",
            Self::Ms => "msFullscreenElement",
        }
    }
}

/// Result of trying one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// The method existed and was invoked
    Invoked,
    /// The method is not available here
    Missing,
}

/// Something that can enter and leave fullscreen
pub trait FullscreenHost {
    fn try_request(&self, api: FullscreenApi) -> Probe;

    fn try_exit(&self, api: FullscreenApi) -> Probe;

    /// Whether any element is fullscreen right now
    fn has_fullscreen_element(&self) -> bool;
}

/// Enter fullscreen with the first available API
pub fn request(host: &dyn FullscreenHost) -> Option<FullscreenApi> {
    FullscreenApi::ALL
        .into_iter()
        .find(|api| host.try_request(*api) == Probe::Invoked)
}

/// Leave fullscreen with the first available API
pub fn exit(host: &dyn FullscreenHost) -> Option<FullscreenApi> {
    FullscreenApi::ALL
        .into_iter()
        .find(|api| host.try_exit(*api) == Probe::Invoked)
}

/// Collapses the three change events into one boolean update
///
/// A single transition can fire several prefixed events; only the first one
/// that changes the value is reported.
#[derive(Debug, Default)]
pub struct FullscreenSync {
    active: bool,
}

impl FullscreenSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `Some(new_value)` only when the value changed
    pub fn observe(&mut self, active: bool) -> Option<bool> {
        if self.active == active {
            None
        } else {
            self.active = active;
            Some(active)
        }
    }
}
