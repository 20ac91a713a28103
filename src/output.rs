//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output leads with what a thing *is* (page title, carousel position) and
//! shows files and paths as secondary context. Every entity line starts with
//! a 3-digit positional index so listings from different commands line up.
//!
//! # Output Format
//!
//! ## Routes
//!
//! ```text
//! 001 /                 Home
//! 002 /about            About
//! ...
//!     /**               → redirect to /
//! ```
//!
//! ## Build
//!
//! ```text
//! 001 Home → index.html
//! 002 About → about/index.html
//! ...
//!     Not found → 404.html (redirects to /)
//!
//! Generated 10 pages
//! ```
//!
//! ## Carousel
//!
//! ```text
//!   0.0s  mount   ●○○  position 0/2  showing 2 × 50%  translateX(-0%)
//!   5.0s  auto    ○●○  position 1/2  showing 2 × 50%  translateX(-50%)
//! ```
//!
//! # Architecture
//!
//! Each listing has a `format_*` function (returns `Vec<String>` or `String`)
//! for testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure and do no I/O.

use crate::carousel::CarouselView;
use crate::generate::{GeneratedKind, GeneratedPage};
use crate::i18n::Catalog;
use crate::preview::{SimulationStep, StepCause};
use crate::routes::{FALLBACK_PATH, Route};
use crate::types::Card;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Render the dot indicators with the current one filled in.
fn dot_strip(view: &CarouselView) -> String {
    view.dots
        .iter()
        .map(|&dot| if dot == view.position { '●' } else { '○' })
        .collect()
}

// ============================================================================
// Routes
// ============================================================================

pub fn format_routes(routes: &[Route], catalog: &Catalog) -> Vec<String> {
    let mut lines: Vec<String> = routes
        .iter()
        .enumerate()
        .map(|(i, route)| {
            let path = format!("/{}", route.path);
            format!(
                "{} {:<17} {}",
                format_index(i + 1),
                path,
                catalog.translate(&route.page.nav_key())
            )
        })
        .collect();
    lines.push(format!(
        "{}{:<17} → redirect to /{}",
        indent(1),
        "/**",
        FALLBACK_PATH
    ));
    lines
}

pub fn print_routes(routes: &[Route], catalog: &Catalog) {
    for line in format_routes(routes, catalog) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_generate_output(pages: &[GeneratedPage], catalog: &Catalog) -> Vec<String> {
    let mut lines = Vec::new();
    let mut position = 0;
    for generated in pages {
        match generated.kind {
            GeneratedKind::Page(page) => {
                position += 1;
                lines.push(format!(
                    "{} {} → {}",
                    format_index(position),
                    catalog.translate(&page.nav_key()),
                    generated.path
                ));
            }
            GeneratedKind::Fallback => {
                lines.push(format!(
                    "{}{} → {} (redirects to /)",
                    indent(1),
                    catalog.translate("NOT_FOUND.TITLE"),
                    generated.path
                ));
            }
        }
    }
    lines.push(String::new());
    lines.push(format!(
        "Generated {} page{}",
        position,
        if position == 1 { "" } else { "s" }
    ));
    lines
}

pub fn print_generate_output(pages: &[GeneratedPage], catalog: &Catalog) {
    for line in format_generate_output(pages, catalog) {
        println!("{}", line);
    }
}

// ============================================================================
// Carousel
// ============================================================================

/// One-line carousel status, prefixed by what caused it.
pub fn format_carousel_line(label: &str, view: &CarouselView) -> String {
    format!(
        "{:<7} {}  position {}/{}  showing {} × {}  {}",
        label,
        dot_strip(view),
        view.position,
        view.max_position,
        view.visible,
        view.card_width,
        view.transform
    )
}

/// Card list with resolved text, one entry per card.
pub fn format_cards(cards: &[Card], catalog: &Catalog) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, card) in cards.iter().enumerate() {
        lines.push(format!(
            "{} {}",
            format_index(i + 1),
            catalog.translate(&card.title)
        ));
        lines.push(format!("{}Key: {}", indent(1), card.title));
    }
    lines
}

fn cause_label(cause: StepCause) -> String {
    match cause {
        StepCause::Mount => "mount".to_string(),
        StepCause::Tick => "auto".to_string(),
        StepCause::Jump(index) => format!("go {}", index),
    }
}

pub fn format_simulation(steps: &[SimulationStep]) -> Vec<String> {
    steps
        .iter()
        .map(|step| {
            format!(
                "{:>6.1}s  {}",
                step.at.as_secs_f64(),
                format_carousel_line(&cause_label(step.cause), &step.view)
            )
        })
        .collect()
}

pub fn print_simulation(cards: &[Card], steps: &[SimulationStep], catalog: &Catalog) {
    println!("Cards");
    for line in format_cards(cards, catalog) {
        println!("{}", line);
    }
    println!();
    println!("Timeline");
    for line in format_simulation(steps) {
        println!("{}", line);
    }
}
