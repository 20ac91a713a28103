//! Route table.
//!
//! Ten static paths map one-to-one onto [`Page`] views. Anything else falls
//! through to the wildcard, which redirects to the root path.
//!
//! Paths are matched after normalization: surrounding slashes, a `?query`,
//! and a `#fragment` are ignored, so `/about/`, `about`, and `/about?ref=x`
//! all resolve to [`Page::About`]. Matching is case-sensitive.

use crate::types::Page;

/// One entry of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub page: Page,
}

/// Outcome of resolving a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Page(Page),
    /// Wildcard fallback: go to this path instead.
    Redirect(&'static str),
}

/// Path the wildcard route redirects to.
pub const FALLBACK_PATH: &str = "";

/// The route table, in declaration order.
pub fn routes() -> Vec<Route> {
    Page::ALL
        .iter()
        .map(|&page| Route {
            path: page.slug(),
            page,
        })
        .collect()
}

fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].trim_matches('/')
}

/// Resolve a request path against the route table.
pub fn resolve(path: &str) -> Resolution {
    let wanted = normalize(path);
    match Page::ALL.iter().find(|page| page.slug() == wanted) {
        Some(&page) => Resolution::Page(page),
        None => {
            tracing::debug!(path, "no route matched, redirecting to root");
            Resolution::Redirect(FALLBACK_PATH)
        }
    }
}
