//! Swipe-to-page touch handling

/// Horizontal travel, in CSS pixels, a swipe must exceed to turn the page
pub const SWIPE_THRESHOLD: f64 = 50.0;

/// Page turn requested by a swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved left
    Next,
    /// Finger moved right
    Previous,
}

/// Remembers where the current touch started
///
/// Only horizontal travel is measured; a diagonal drag with enough sideways
/// movement still turns the page.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    start_x: Option<f64>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch_start(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    /// Finish the gesture. The start point is always cleared.
    pub fn touch_end(&mut self, x: f64) -> Option<SwipeDirection> {
        let start = self.start_x.take()?;
        classify(x - start)
    }

    #[cfg(test)]
    fn is_tracking(&self) -> bool {
        self.start_x.is_some()
    }
}

/// Map a horizontal delta (end - start) to a page turn
pub fn classify(delta_x: f64) -> Option<SwipeDirection> {
    if delta_x < -SWIPE_THRESHOLD {
        Some(SwipeDirection::Next)
    } else if delta_x > SWIPE_THRESHOLD {
        Some(SwipeDirection::Previous)
    } else {
        None
    }
}
