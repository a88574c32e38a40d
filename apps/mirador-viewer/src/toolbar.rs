//! Toolbar view model
//!
//! Labels and enabled flags derived from the view state. Disabled buttons are
//! only an affordance; the state clamps regardless.

use serde::Serialize;

use crate::state::ViewState;

/// Loading indicator text
pub const LOADING_LABEL: &str = "Loading PDF...";

/// Reset zoom button text
pub const RESET_ZOOM_LABEL: &str = "Reset";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toolbar {
    pub prev_disabled: bool,
    pub next_disabled: bool,
    pub page_label: String,
    pub zoom_label: String,
    pub root_class: String,
    pub loading_label: Option<String>,
}

impl Toolbar {
    pub fn from_state(state: &ViewState) -> Self {
        let root_class = if state.is_fullscreen() {
            "pdf-viewer fullscreen"
        } else {
            "pdf-viewer"
        };

        let loading_label = state.is_loading().then(|| {
            if state.load_progress() > 0 {
                format!("{} {}%", LOADING_LABEL, state.load_progress())
            } else {
                LOADING_LABEL.to_string()
            }
        });

        Self {
            prev_disabled: state.current_page() <= 1,
            next_disabled: state.current_page() >= state.total_pages(),
            page_label: format!("{} / {}", state.current_page(), state.total_pages()),
            zoom_label: format!("{}%", state.scale_percent()),
            root_class: root_class.to_string(),
            loading_label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_disable_buttons() {
        let mut state = ViewState::new(1024.0);
        state.finish_load(2);

        let toolbar = Toolbar::from_state(&state);
        assert!(toolbar.prev_disabled);
        assert!(!toolbar.next_disabled);
        assert_eq!(toolbar.page_label, "1 / 2");
        assert_eq!(toolbar.zoom_label, "120%");
        assert_eq!(toolbar.loading_label, None);

        state.go_to_next_page();
        let toolbar = Toolbar::from_state(&state);
        assert!(!toolbar.prev_disabled);
        assert!(toolbar.next_disabled);
    }

    #[test]
    fn test_loading_and_fullscreen() {
        let mut state = ViewState::new(400.0);
        let toolbar = Toolbar::from_state(&state);
        assert_eq!(toolbar.loading_label.as_deref(), Some(LOADING_LABEL));
        assert_eq!(toolbar.page_label, "1 / 0");

        state.apply_progress(50.0, 100.0);
        state.set_fullscreen(true);
        let toolbar = Toolbar::from_state(&state);
        assert_eq!(toolbar.loading_label.as_deref(), Some("Loading PDF... 50%"));
        assert_eq!(toolbar.root_class, "pdf-viewer fullscreen");
    }
}
