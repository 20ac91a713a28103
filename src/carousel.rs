//! Home-page capabilities carousel.
//!
//! The carousel shows a sliding window of `visible` cards out of a fixed
//! list. `position` is the index of the leftmost visible card and always lies
//! in `0..=max_position()`, where `max_position = cards - visible`
//! (saturating at zero).
//!
//! ## Lifecycle
//!
//! ```text
//! mount ──► update_slides_to_show ──► start_auto_play
//!   │
//!   ├── on_resize     → recompute visible count, reset position if stranded
//!   ├── on_tick(id)   → next_slide (only for the armed timer)
//!   ├── next / prev   → circular step
//!   ├── go_to_slide   → clamp, then re-arm autoplay
//!   │
//! unmount / drop ──► stop_auto_play
//! ```
//!
//! Host coupling goes through two injected capabilities: a [`Viewport`] for
//! the current width and a [`Scheduler`] for the autoplay timer. Both have
//! fakes ([`crate::viewport::SharedViewport`], [`crate::timer::ManualScheduler`])
//! so the whole lifecycle runs without a display or a real clock.
//!
//! Every operation is total. There is no error type.

use crate::timer::{Scheduler, Timer, TimerId};
use crate::types::Card;
use crate::viewport::Viewport;
use std::time::Duration;

/// Autoplay cadence used when nothing else is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5000);

/// Width → visible-card-count policy.
///
/// `width ≥ desktop_min_width` shows `desktop` cards, `width ≥
/// tablet_min_width` shows `tablet`, anything narrower shows `mobile`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlidePolicy {
    pub desktop_min_width: u32,
    pub tablet_min_width: u32,
    pub desktop: usize,
    pub tablet: usize,
    pub mobile: usize,
}

impl Default for SlidePolicy {
    fn default() -> Self {
        Self {
            desktop_min_width: 1200,
            tablet_min_width: 768,
            desktop: 2,
            tablet: 2,
            mobile: 1,
        }
    }
}

impl SlidePolicy {
    /// Number of cards visible at `width`. Never less than one.
    pub fn slides_for(&self, width: u32) -> usize {
        let slides = if width >= self.desktop_min_width {
            self.desktop
        } else if width >= self.tablet_min_width {
            self.tablet
        } else {
            self.mobile
        };
        slides.max(1)
    }
}

/// Tunables applied when a carousel is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselSettings {
    pub policy: SlidePolicy,
    pub interval: Duration,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            policy: SlidePolicy::default(),
            interval: DEFAULT_INTERVAL,
        }
    }
}

/// Read-only snapshot of everything a renderer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselView {
    pub position: usize,
    pub visible: usize,
    pub max_position: usize,
    pub card_width: String,
    pub transform: String,
    pub dots: Vec<usize>,
    pub auto_playing: bool,
}

/// A mounted carousel.
///
/// Owns at most one autoplay timer. The timer is cancelled on
/// [`Carousel::unmount`] and again, harmlessly, on drop.
pub struct Carousel<V: Viewport, S: Scheduler> {
    cards: Vec<Card>,
    settings: CarouselSettings,
    viewport: V,
    scheduler: S,
    visible: usize,
    position: usize,
    timer: Option<S::Timer>,
}

impl<V: Viewport, S: Scheduler> Carousel<V, S> {
    /// Mount the carousel: size it for the current viewport, then start autoplay.
    pub fn mount(cards: Vec<Card>, settings: CarouselSettings, viewport: V, scheduler: S) -> Self {
        let mut carousel = Self {
            cards,
            settings,
            viewport,
            scheduler,
            visible: 1,
            position: 0,
            timer: None,
        };
        carousel.update_slides_to_show();
        carousel.start_auto_play();
        carousel
    }

    /// Tear down: cancel autoplay. Dropping the carousel does the same.
    pub fn unmount(mut self) {
        self.stop_auto_play();
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn visible_count(&self) -> usize {
        self.visible
    }

    pub fn is_auto_playing(&self) -> bool {
        self.timer.is_some()
    }

    /// Highest reachable position. Recomputed on every call.
    pub fn max_position(&self) -> usize {
        self.cards.len().saturating_sub(self.visible)
    }

    /// Resize notification from the host.
    pub fn on_resize(&mut self) {
        self.update_slides_to_show();
    }

    /// Recompute the visible count from the current viewport width.
    ///
    /// A position stranded past the new maximum snaps back to the first card.
    pub fn update_slides_to_show(&mut self) {
        let width = self.viewport.width();
        self.visible = self.settings.policy.slides_for(width);
        if self.position > self.max_position() {
            tracing::debug!(
                width,
                visible = self.visible,
                stranded = self.position,
                "carousel position reset after resize"
            );
            self.position = 0;
        }
    }

    /// Arm the autoplay timer, cancelling any timer already armed.
    pub fn start_auto_play(&mut self) {
        self.stop_auto_play();
        let timer = self.scheduler.start_repeating(self.settings.interval);
        tracing::debug!(timer = timer.id().0, interval = ?self.settings.interval, "autoplay armed");
        self.timer = Some(timer);
    }

    /// Cancel the autoplay timer. Safe to call with nothing armed.
    pub fn stop_auto_play(&mut self) {
        if let Some(timer) = self.timer.take() {
            tracing::debug!(timer = timer.id().0, "autoplay cancelled");
            timer.cancel();
        }
    }

    /// Deliver a timer tick. Only the armed timer advances the carousel;
    /// returns whether the tick was accepted.
    pub fn on_tick(&mut self, id: TimerId) -> bool {
        match &self.timer {
            Some(timer) if timer.id() == id => {
                self.next_slide();
                true
            }
            _ => {
                tracing::trace!(timer = id.0, "stale autoplay tick ignored");
                false
            }
        }
    }

    /// Step forward, wrapping to the first position after the last.
    pub fn next_slide(&mut self) {
        if self.position < self.max_position() {
            self.position += 1;
        } else {
            self.position = 0;
        }
    }

    /// Step back, wrapping to the last position before the first.
    pub fn prev_slide(&mut self) {
        if self.position > 0 {
            self.position -= 1;
        } else {
            self.position = self.max_position();
        }
    }

    /// Jump to `index` (clamped to the last position) and restart the
    /// autoplay countdown from now.
    pub fn go_to_slide(&mut self, index: usize) {
        self.position = index.min(self.max_position());
        self.stop_auto_play();
        self.start_auto_play();
    }

    /// Width of one card as a percentage of the track.
    pub fn card_width_percent(&self) -> f64 {
        100.0 / self.visible as f64
    }

    /// CSS width of one card, e.g. `50%`.
    pub fn card_width(&self) -> String {
        format!("{}%", self.card_width_percent())
    }

    /// CSS transform shifting the track left by `position` card widths.
    pub fn transform(&self) -> String {
        format!(
            "translateX(-{}%)",
            self.position as f64 * self.card_width_percent()
        )
    }

    /// One indicator per reachable position: `0..=max_position`.
    pub fn dots(&self) -> Vec<usize> {
        (0..=self.max_position()).collect()
    }

    pub fn view(&self) -> CarouselView {
        CarouselView {
            position: self.position,
            visible: self.visible,
            max_position: self.max_position(),
            card_width: self.card_width(),
            transform: self.transform(),
            dots: self.dots(),
            auto_playing: self.is_auto_playing(),
        }
    }
}

impl<V: Viewport, S: Scheduler> Drop for Carousel<V, S> {
    fn drop(&mut self) {
        self.stop_auto_play();
    }
}

impl<V: Viewport, S: Scheduler> std::fmt::Debug for Carousel<V, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("cards", &self.cards.len())
            .field("visible", &self.visible)
            .field("position", &self.position)
            .field("auto_playing", &self.is_auto_playing())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::timer::ManualScheduler;
    use crate::types::default_cards;
    use crate::viewport::{FixedViewport, SharedViewport};

    // =========================================================================
    // Responsive policy
    // =========================================================================

    #[test]
    fn policy_breakpoints() {
        let policy = SlidePolicy::default();
        assert_eq!(policy.slides_for(1920), 2);
        assert_eq!(policy.slides_for(1200), 2);
        assert_eq!(policy.slides_for(1199), 2);
        assert_eq!(policy.slides_for(768), 2);
        assert_eq!(policy.slides_for(767), 1);
        assert_eq!(policy.slides_for(0), 1);
    }

    #[test]
    fn policy_never_shows_zero_cards() {
        let policy = SlidePolicy {
            mobile: 0,
            ..SlidePolicy::default()
        };
        assert_eq!(policy.slides_for(320), 1);
    }

    #[test]
    fn custom_policy_applies() {
        let policy = SlidePolicy {
            desktop: 3,
            ..SlidePolicy::default()
        };
        assert_eq!(policy.slides_for(1400), 3);
        assert_eq!(policy.slides_for(900), 2);
    }

    // =========================================================================
    // Mount / unmount
    // =========================================================================

    #[test]
    fn mount_sizes_and_starts_autoplay() {
        let (carousel, sched) = mount_at(1024);
        assert_eq!(carousel.visible_count(), 2);
        assert_eq!(carousel.position(), 0);
        assert!(carousel.is_auto_playing());
        assert_eq!(sched.active_timers(), 1);
    }

    #[test]
    fn mount_on_mobile_shows_one() {
        let (carousel, _sched) = mount_at(375);
        assert_eq!(carousel.visible_count(), 1);
        assert_eq!(carousel.max_position(), 3);
    }

    #[test]
    fn unmount_cancels_timer() {
        let (carousel, sched) = mount_at(1024);
        carousel.unmount();
        assert_eq!(sched.active_timers(), 0);
        assert!(sched.advance(Duration::from_secs(30)).is_empty());
    }

    #[test]
    fn drop_cancels_timer() {
        let (carousel, sched) = mount_at(1024);
        drop(carousel);
        assert_eq!(sched.active_timers(), 0);
    }

    #[test]
    fn unmount_after_stop_is_safe() {
        let (mut carousel, sched) = mount_at(1024);
        carousel.stop_auto_play();
        carousel.unmount();
        assert_eq!(sched.active_timers(), 0);
    }

    // =========================================================================
    // Autoplay timer ownership
    // =========================================================================

    #[test]
    fn stop_auto_play_is_idempotent() {
        let (mut carousel, sched) = mount_at(1024);
        carousel.stop_auto_play();
        carousel.stop_auto_play();
        assert!(!carousel.is_auto_playing());
        assert_eq!(sched.active_timers(), 0);
    }

    #[test]
    fn start_auto_play_twice_keeps_one_timer() {
        let (mut carousel, sched) = mount_at(1024);
        carousel.start_auto_play();
        carousel.start_auto_play();
        assert_eq!(sched.active_timers(), 1);
    }

    #[test]
    fn stale_tick_is_ignored() {
        let (mut carousel, sched) = mount_at(1024);
        let stale = sched.advance(DEFAULT_INTERVAL);
        assert_eq!(stale.len(), 1);

        // Re-arm before the queued tick is delivered.
        carousel.go_to_slide(0);
        assert!(!carousel.on_tick(stale[0]));
        assert_eq!(carousel.position(), 0);
    }

    #[test]
    fn tick_after_stop_is_ignored() {
        let (mut carousel, sched) = mount_at(1024);
        let ticks = sched.advance(DEFAULT_INTERVAL);
        carousel.stop_auto_play();
        assert!(!carousel.on_tick(ticks[0]));
        assert_eq!(carousel.position(), 0);
    }

    #[test]
    fn custom_interval_is_used() {
        let settings = CarouselSettings {
            interval: Duration::from_secs(2),
            ..CarouselSettings::default()
        };
        let sched = ManualScheduler::new();
        let mut carousel = Carousel::mount(
            default_cards(),
            settings,
            FixedViewport(1024),
            sched.clone(),
        );
        assert_eq!(run_for(&mut carousel, &sched, Duration::from_secs(4)), 2);
        assert_eq!(carousel.position(), 2);
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    #[test]
    fn max_position_tracks_visible_count() {
        let (carousel, _) = mount_at(1024);
        assert_eq!(carousel.max_position(), 4 - 2);
        let (carousel, _) = mount_at(500);
        assert_eq!(carousel.max_position(), 4 - 1);
    }

    #[test]
    fn next_wraps_at_max() {
        let (mut carousel, _) = mount_at(1024);
        carousel.go_to_slide(2);
        carousel.next_slide();
        assert_eq!(carousel.position(), 0);
    }

    #[test]
    fn prev_wraps_at_zero() {
        let (mut carousel, _) = mount_at(1024);
        carousel.prev_slide();
        assert_eq!(carousel.position(), carousel.max_position());
        carousel.prev_slide();
        assert_eq!(carousel.position(), 1);
    }

    #[test]
    fn position_stays_in_range_under_any_sequence() {
        for width in [375, 1024] {
            let (mut carousel, _) = mount_at(width);
            for step in 0..40 {
                match step % 5 {
                    0 | 1 => carousel.next_slide(),
                    2 => carousel.prev_slide(),
                    3 => carousel.go_to_slide(step),
                    _ => carousel.go_to_slide(step % 3),
                }
                assert!(carousel.position() <= carousel.max_position());
            }
        }
    }

    #[test]
    fn go_to_slide_in_range_is_exact() {
        let (mut carousel, _) = mount_at(1024);
        carousel.go_to_slide(1);
        assert_eq!(carousel.position(), 1);
    }

    #[test]
    fn go_to_slide_clamps_to_max() {
        let (mut carousel, _) = mount_at(1024);
        carousel.go_to_slide(2);
        assert_eq!(carousel.position(), 2);
        carousel.go_to_slide(99);
        assert_eq!(carousel.position(), 2);
        carousel.go_to_slide(usize::MAX);
        assert_eq!(carousel.position(), 2);
    }

    #[test]
    fn go_to_slide_rearms_timer() {
        let (mut carousel, sched) = mount_at(1024);
        sched.advance(Duration::from_secs(3));
        carousel.go_to_slide(1);
        assert_eq!(sched.active_timers(), 1);

        // The old deadline (t=5s) passes without a tick.
        assert_eq!(run_for(&mut carousel, &sched, Duration::from_secs(4)), 0);
        assert_eq!(carousel.position(), 1);
        // The new one (t=8s) fires.
        assert_eq!(run_for(&mut carousel, &sched, Duration::from_secs(1)), 1);
        assert_eq!(carousel.position(), 2);
    }

    #[test]
    fn go_to_slide_restarts_stopped_autoplay() {
        let (mut carousel, sched) = mount_at(1024);
        carousel.stop_auto_play();
        carousel.go_to_slide(1);
        assert!(carousel.is_auto_playing());
        assert_eq!(sched.active_timers(), 1);
    }

    #[test]
    fn prev_and_next_do_not_touch_timer() {
        let (mut carousel, sched) = mount_at(1024);
        sched.advance(Duration::from_secs(4));
        carousel.next_slide();
        carousel.prev_slide();
        assert_eq!(run_for(&mut carousel, &sched, Duration::from_secs(1)), 1);
    }

    // =========================================================================
    // Resize
    // =========================================================================

    #[test]
    fn resize_resets_stranded_position() {
        let viewport = SharedViewport::new(500);
        let sched = ManualScheduler::new();
        let mut carousel = Carousel::mount(
            default_cards(),
            CarouselSettings::default(),
            viewport.clone(),
            sched,
        );
        carousel.go_to_slide(3);
        assert_eq!(carousel.position(), 3);
        assert_eq!(carousel.max_position(), 3);

        viewport.set(1300);
        carousel.on_resize();
        assert_eq!(carousel.visible_count(), 2);
        assert_eq!(carousel.max_position(), 2);
        assert_eq!(carousel.position(), 0);
    }

    #[test]
    fn resize_keeps_valid_position() {
        let viewport = SharedViewport::new(1300);
        let mut carousel = Carousel::mount(
            default_cards(),
            CarouselSettings::default(),
            viewport.clone(),
            ManualScheduler::new(),
        );
        carousel.go_to_slide(2);
        viewport.set(400);
        carousel.on_resize();
        assert_eq!(carousel.visible_count(), 1);
        assert_eq!(carousel.position(), 2);
    }

    #[test]
    fn resize_does_not_touch_timer() {
        let viewport = SharedViewport::new(1300);
        let sched = ManualScheduler::new();
        let mut carousel = Carousel::mount(
            default_cards(),
            CarouselSettings::default(),
            viewport.clone(),
            sched.clone(),
        );
        sched.advance(Duration::from_secs(4));
        viewport.set(400);
        carousel.on_resize();
        assert_eq!(run_for(&mut carousel, &sched, Duration::from_secs(1)), 1);
    }

    #[test]
    fn fewer_cards_than_visible() {
        let sched = ManualScheduler::new();
        let mut carousel = Carousel::mount(
            default_cards().into_iter().take(1).collect(),
            CarouselSettings::default(),
            FixedViewport(1300),
            sched,
        );
        assert_eq!(carousel.max_position(), 0);
        assert_eq!(carousel.dots(), vec![0]);
        carousel.next_slide();
        assert_eq!(carousel.position(), 0);
        carousel.prev_slide();
        assert_eq!(carousel.position(), 0);
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    #[test]
    fn card_width_for_two_visible() {
        let (carousel, _) = mount_at(1024);
        assert_eq!(carousel.card_width_percent(), 50.0);
        assert_eq!(carousel.card_width(), "50%");
    }

    #[test]
    fn card_width_for_one_visible() {
        let (carousel, _) = mount_at(600);
        assert_eq!(carousel.card_width(), "100%");
    }

    #[test]
    fn transform_shifts_by_card_widths() {
        let (mut carousel, _) = mount_at(1024);
        assert_eq!(carousel.transform(), "translateX(-0%)");
        carousel.go_to_slide(1);
        assert_eq!(carousel.transform(), "translateX(-50%)");
        carousel.go_to_slide(2);
        assert_eq!(carousel.transform(), "translateX(-100%)");
    }

    #[test]
    fn dots_cover_every_position() {
        let (carousel, _) = mount_at(1024);
        assert_eq!(carousel.dots(), vec![0, 1, 2]);
        let (carousel, _) = mount_at(375);
        assert_eq!(carousel.dots(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn view_matches_queries() {
        let (mut carousel, _) = mount_at(1024);
        carousel.go_to_slide(1);
        let view = carousel.view();
        assert_eq!(view.position, 1);
        assert_eq!(view.visible, 2);
        assert_eq!(view.max_position, 2);
        assert_eq!(view.card_width, "50%");
        assert_eq!(view.transform, "translateX(-50%)");
        assert_eq!(view.dots, vec![0, 1, 2]);
        assert!(view.auto_playing);
    }

    // =========================================================================
    // End to end
    // =========================================================================

    #[test]
    fn autoplay_cycles_and_manual_jump_resets_countdown() {
        let (mut carousel, sched) = mount_at(1024);
        assert_eq!(carousel.visible_count(), 2);

        let mut seen = vec![carousel.position()];
        for _ in 0..3 {
            run_for(&mut carousel, &sched, DEFAULT_INTERVAL);
            seen.push(carousel.position());
        }
        assert_eq!(seen, vec![0, 1, 2, 0]);

        // Halfway to the next tick, jump manually.
        sched.advance(Duration::from_millis(2500));
        carousel.go_to_slide(1);
        assert_eq!(carousel.position(), 1);

        // 2.5s later the old deadline has passed silently...
        assert_eq!(run_for(&mut carousel, &sched, Duration::from_millis(2500)), 0);
        assert_eq!(carousel.position(), 1);
        // ...and a full 5s after the jump the carousel advances.
        assert_eq!(run_for(&mut carousel, &sched, Duration::from_millis(2500)), 1);
        assert_eq!(carousel.position(), 2);
    }
}
