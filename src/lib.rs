//! # Shopfloor
//!
//! Static site generator for a precision-manufacturing company's marketing
//! site: ten informational pages, a customer portal login placeholder, and a
//! home-page capabilities carousel.
//!
//! # Architecture
//!
//! The only component with behavior over time is the carousel. Everything
//! else is a pure function from configuration and translations to HTML.
//!
//! ```text
//! config.toml ─┐
//!              ├─► generate ─► dist/*.html
//! i18n/*.json ─┘        │
//!                       └─ Carousel (mounted at render width, virtual clock)
//!
//! stdin ──┐
//!         ├─► mpsc ─► preview::run ─► Carousel ─► status lines
//! timer ──┘
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`carousel`] | The carousel controller: position, visible count, autoplay, geometry |
//! | [`timer`] | Repeating-timer capability: wall-clock and virtual-clock schedulers |
//! | [`viewport`] | Viewport-width capability |
//! | [`routes`] | Route table and wildcard redirect |
//! | [`i18n`] | Translation catalog with English fallback |
//! | [`portal`] | Login form placeholder |
//! | [`generate`] | Renders every page to HTML with Maud |
//! | [`preview`] | Interactive and simulated drivers for a mounted carousel |
//! | [`config`] | `config.toml` loading, validation, merging |
//! | [`types`] | Shared types (`Card`, `Page`) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Capabilities, Not Globals
//!
//! The carousel never reads a window size or starts a timer on its own. It
//! is handed a [`viewport::Viewport`] and a [`timer::Scheduler`] at mount
//! time. In production those are a shared width cell and a thread-backed
//! scheduler; in tests and during static rendering they are a fixed width
//! and a virtual clock, so every autoplay scenario runs deterministically
//! and instantly.
//!
//! ## One Timer, Owned
//!
//! The autoplay timer is an owned handle inside the carousel
//! (`Option<S::Timer>`). Arming always cancels first, cancelling consumes the
//! handle, and dropping the carousel cancels whatever is left. Ticks carry
//! the id of the timer that produced them and only the armed timer's ticks
//! are honored, so a tick already queued when a manual jump re-armed the
//! timer cannot double-advance the carousel.
//!
//! ## Keys, Not Text
//!
//! Cards and pages store translation keys. Text is resolved at render time,
//! so switching language never touches carousel state.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): malformed markup
//! is a compile error and all interpolation is auto-escaped, which matters
//! when translations come from user-supplied JSON.

pub mod carousel;
pub mod config;
pub mod generate;
pub mod i18n;
pub mod output;
pub mod portal;
pub mod preview;
pub mod routes;
pub mod timer;
pub mod types;
pub mod viewport;

#[cfg(test)]
pub(crate) mod test_helpers;
