//! Shared types used across the carousel, router, and renderer.
//!
//! Text fields on these types are translation keys, never display strings.
//! Resolution happens at render time through [`crate::i18n::Catalog`], so a
//! language switch never touches carousel or routing state.

use serde::{Deserialize, Serialize};

/// A single carousel card.
///
/// Both fields are opaque lookup keys (e.g. `HOME.CNC_MACHINING`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Card {
    /// Key of the card heading.
    pub title: String,
    /// Key of the card body text.
    pub description: String,
}

impl Card {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// The capability cards shown on the home page out of the box.
pub fn default_cards() -> Vec<Card> {
    vec![
        Card::new("HOME.CNC_MACHINING", "HOME.CNC_MACHINING_DESC"),
        Card::new("HOME.INJECTION_MOLDING", "HOME.INJECTION_MOLDING_DESC"),
        Card::new("HOME.QUALITY_ASSURANCE", "HOME.QUALITY_ASSURANCE_DESC"),
        Card::new("HOME.CUSTOM_FABRICATION", "HOME.CUSTOM_FABRICATION_DESC"),
    ]
}

/// Every page view the site can show.
///
/// Declaration order is navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    About,
    Products,
    Industries,
    Capabilities,
    Sustainability,
    Careers,
    Blog,
    Contact,
    Portal,
}

impl Page {
    pub const ALL: [Page; 10] = [
        Page::Home,
        Page::About,
        Page::Products,
        Page::Industries,
        Page::Capabilities,
        Page::Sustainability,
        Page::Careers,
        Page::Blog,
        Page::Contact,
        Page::Portal,
    ];

    /// Route path without slashes. The home page is the empty path.
    pub fn slug(self) -> &'static str {
        match self {
            Page::Home => "",
            Page::About => "about",
            Page::Products => "products",
            Page::Industries => "industries",
            Page::Capabilities => "capabilities",
            Page::Sustainability => "sustainability",
            Page::Careers => "careers",
            Page::Blog => "blog",
            Page::Contact => "contact",
            Page::Portal => "portal",
        }
    }

    /// Upper-case key namespace for this page's strings (`ABOUT`, `HOME`, ...).
    pub fn key_namespace(self) -> &'static str {
        match self {
            Page::Home => "HOME",
            Page::About => "ABOUT",
            Page::Products => "PRODUCTS",
            Page::Industries => "INDUSTRIES",
            Page::Capabilities => "CAPABILITIES",
            Page::Sustainability => "SUSTAINABILITY",
            Page::Careers => "CAREERS",
            Page::Blog => "BLOG",
            Page::Contact => "CONTACT",
            Page::Portal => "PORTAL",
        }
    }

    /// Key of the navigation label, e.g. `NAV.ABOUT`.
    pub fn nav_key(self) -> String {
        format!("NAV.{}", self.key_namespace())
    }

    /// Key of the page heading, e.g. `ABOUT.TITLE`.
    pub fn title_key(self) -> String {
        format!("{}.TITLE", self.key_namespace())
    }

    /// Key of the long-form Markdown body, e.g. `ABOUT.BODY`.
    pub fn body_key(self) -> String {
        format!("{}.BODY", self.key_namespace())
    }

    /// URL of the page on the generated site (`/`, `/about/`, ...).
    pub fn href(self) -> String {
        match self.slug() {
            "" => "/".to_string(),
            slug => format!("/{slug}/"),
        }
    }

    /// File the page is written to, relative to the output root.
    pub fn output_path(self) -> String {
        match self.slug() {
            "" => "index.html".to_string(),
            slug => format!("{slug}/index.html"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cards_are_the_four_capabilities() {
        let cards = default_cards();
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].title, "HOME.CNC_MACHINING");
        assert_eq!(cards[3].description, "HOME.CUSTOM_FABRICATION_DESC");
    }

    #[test]
    fn home_lives_at_root() {
        assert_eq!(Page::Home.slug(), "");
        assert_eq!(Page::Home.href(), "/");
        assert_eq!(Page::Home.output_path(), "index.html");
    }

    #[test]
    fn other_pages_get_a_directory() {
        assert_eq!(Page::Sustainability.href(), "/sustainability/");
        assert_eq!(Page::Sustainability.output_path(), "sustainability/index.html");
    }

    #[test]
    fn keys_use_page_namespace() {
        assert_eq!(Page::Careers.nav_key(), "NAV.CAREERS");
        assert_eq!(Page::Careers.title_key(), "CAREERS.TITLE");
        assert_eq!(Page::Careers.body_key(), "CAREERS.BODY");
    }

    #[test]
    fn slugs_are_unique() {
        let mut slugs: Vec<_> = Page::ALL.iter().map(|p| p.slug()).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), Page::ALL.len());
    }
}
