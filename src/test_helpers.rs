//! Shared test utilities for the shopfloor test suite.
//!
//! Mounts carousels on a virtual clock and a fixed-width viewport, and
//! replays virtual time into them.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let (mut carousel, sched) = mount_at(1024);
//! run_for(&mut carousel, &sched, Duration::from_secs(5));
//! assert_eq!(carousel.position(), 1);
//! ```

use std::time::Duration;

use crate::carousel::{Carousel, CarouselSettings};
use crate::timer::ManualScheduler;
use crate::types::default_cards;
use crate::viewport::{FixedViewport, Viewport};

pub type TestCarousel = Carousel<FixedViewport, ManualScheduler>;

/// Mount the default four cards at `width` with default settings.
///
/// Returns a clone of the scheduler so tests can move time forward.
pub fn mount_at(width: u32) -> (TestCarousel, ManualScheduler) {
    let sched = ManualScheduler::new();
    let carousel = Carousel::mount(
        default_cards(),
        CarouselSettings::default(),
        FixedViewport(width),
        sched.clone(),
    );
    (carousel, sched)
}

/// Advance virtual time and deliver every due tick to the carousel.
///
/// Returns how many ticks the carousel accepted.
pub fn run_for<V: Viewport>(
    carousel: &mut Carousel<V, ManualScheduler>,
    sched: &ManualScheduler,
    by: Duration,
) -> usize {
    sched
        .advance(by)
        .into_iter()
        .filter(|&id| carousel.on_tick(id))
        .count()
}
