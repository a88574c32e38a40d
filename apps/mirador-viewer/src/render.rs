//! Renderer seam
//!
//! Decoding and rasterizing happen in pdf.js. The viewer only tells it what
//! to load and which page to draw at which scale.

use crate::load::LoadTicket;
use crate::source::DocumentSource;

/// Draw one page of the active document
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    /// 1-based
    pub page: u32,
    pub scale: f64,
    pub text_layer: bool,
    pub annotation_layer: bool,
}

impl RenderRequest {
    pub fn new(page: u32, scale: f64) -> Self {
        Self {
            page,
            scale,
            text_layer: true,
            annotation_layer: true,
        }
    }
}

/// Position of a draw request in issue order
///
/// Draws finish asynchronously and out of order. A renderer must discard a
/// draw whose ticket is older than the newest one it was handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RenderTicket(u32);

impl RenderTicket {
    pub fn generation(self) -> u32 {
        self.0
    }
}

/// Issues strictly increasing render tickets
#[derive(Debug, Default)]
pub struct RenderSequence {
    last: u32,
}

impl RenderSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_ticket(&mut self) -> RenderTicket {
        self.last += 1;
        RenderTicket(self.last)
    }
}

/// External document renderer
///
/// `load` must eventually report back through the viewer with the same
/// ticket: progress, success with a page count, or failure.
pub trait DocumentRenderer {
    fn load(&mut self, source: &DocumentSource, ticket: LoadTicket);

    fn render(&mut self, request: &RenderRequest, ticket: RenderTicket);

    /// Replace the page with the static failure message
    fn show_error(&mut self, message: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickets_increase() {
        let mut sequence = RenderSequence::new();
        let first = sequence.next_ticket();
        let second = sequence.next_ticket();
        assert!(second > first);
        assert_eq!(second.generation(), first.generation() + 1);
    }
}
