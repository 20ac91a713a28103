//! Viewport capability.
//!
//! The carousel reads the current width on demand and never owns the display
//! surface. The host keeps the width current and then delivers the resize
//! notification by calling [`crate::carousel::Carousel::on_resize`].

use std::cell::Cell;
use std::rc::Rc;

/// Read access to the width of whatever the carousel is drawn into.
pub trait Viewport {
    /// Current width in CSS pixels.
    fn width(&self) -> u32;
}

/// A viewport whose width never changes (static rendering).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedViewport(pub u32);

impl Viewport for FixedViewport {
    fn width(&self) -> u32 {
        self.0
    }
}

/// A width shared between the host and a mounted carousel.
///
/// Clones observe the same value. Single-threaded by construction: every
/// event is handled to completion on one thread, so a `Cell` is enough.
#[derive(Debug, Clone, Default)]
pub struct SharedViewport(Rc<Cell<u32>>);

impl SharedViewport {
    pub fn new(width: u32) -> Self {
        Self(Rc::new(Cell::new(width)))
    }

    pub fn set(&self, width: u32) {
        self.0.set(width);
    }
}

impl Viewport for SharedViewport {
    fn width(&self) -> u32 {
        self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_viewport_clones_see_updates() {
        let host = SharedViewport::new(1024);
        let seen_by_carousel = host.clone();
        host.set(500);
        assert_eq!(seen_by_carousel.width(), 500);
    }

    #[test]
    fn fixed_viewport_reports_its_width() {
        assert_eq!(FixedViewport(768).width(), 768);
    }
}
