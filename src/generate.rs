//! HTML site generation.
//!
//! Renders every routed page of the site to static HTML.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): hero text plus the capabilities carousel
//! - **Content pages** (`/{slug}/index.html`): heading plus a Markdown body
//!   taken from the translation catalog
//! - **Portal** (`/portal/index.html`): the login form
//! - **Fallback** (`/404.html`): immediate redirect to `/`, the static
//!   equivalent of the router's wildcard route
//!
//! ## Carousel
//!
//! The home page carousel is laid out server-side. A carousel is mounted at
//! `carousel.render_width` on a virtual clock, its geometry (card width,
//! track transform, dot count) is baked into the markup, and it is unmounted
//! again. Autoplay settings are exposed as `data-*` attributes.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── 404.html
//! ├── about/index.html
//! ├── products/index.html
//! ├── ...
//! └── portal/index.html
//! ```
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Every translated string is auto-escaped; only Markdown bodies rendered by
//! pulldown-cmark are inserted pre-escaped.

use crate::carousel::{Carousel, CarouselView};
use crate::config::SiteConfig;
use crate::i18n::Catalog;
use crate::portal::Portal;
use crate::routes::{self, Route};
use crate::timer::ManualScheduler;
use crate::types::{Card, Page};
use crate::viewport::FixedViewport;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What a generated file represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratedKind {
    Page(Page),
    /// The catch-all redirect page.
    Fallback,
}

/// One file written by [`generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub kind: GeneratedKind,
    /// Path relative to the output root.
    pub path: String,
}

const CSS: &str = include_str!("../static/style.css");
const NOT_FOUND_PATH: &str = "404.html";

/// Everything page renderers share.
struct RenderContext<'a> {
    config: &'a SiteConfig,
    catalog: &'a Catalog,
}

impl RenderContext<'_> {
    fn t(&self, key: &str) -> String {
        self.catalog.translate(key).into_owned()
    }
}

/// Render the whole site into `output_dir`.
pub fn generate(
    config: &SiteConfig,
    catalog: &Catalog,
    output_dir: &Path,
) -> Result<Vec<GeneratedPage>, GenerateError> {
    let ctx = RenderContext { config, catalog };
    fs::create_dir_all(output_dir)?;

    let mut generated = Vec::new();
    for Route { page, .. } in routes::routes() {
        let markup = render_page(&ctx, page);
        let path = page.output_path();
        write_page(output_dir, &path, markup)?;
        tracing::info!(page = ?page, path = %path, "generated page");
        generated.push(GeneratedPage {
            kind: GeneratedKind::Page(page),
            path,
        });
    }

    write_page(output_dir, NOT_FOUND_PATH, render_not_found(&ctx))?;
    generated.push(GeneratedPage {
        kind: GeneratedKind::Fallback,
        path: NOT_FOUND_PATH.to_string(),
    });

    tracing::info!(output = %output_dir.display(), pages = generated.len(), "site generated");
    Ok(generated)
}

fn write_page(output_dir: &Path, relative: &str, markup: Markup) -> std::io::Result<()> {
    let target = output_dir.join(relative);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(target, markup.into_string())
}

/// Lay out the carousel exactly as a browser at `render_width` would see it
/// on first paint.
pub fn initial_carousel_view(config: &SiteConfig) -> CarouselView {
    let carousel = Carousel::mount(
        config.carousel.cards.clone(),
        config.carousel.settings(),
        FixedViewport(config.carousel.render_width),
        ManualScheduler::new(),
    );
    let view = carousel.view();
    carousel.unmount();
    view
}

/// Every translation key the renderer looks up for this config.
///
/// `check` uses this to report gaps in a catalog before anything is built.
pub fn required_keys(config: &SiteConfig) -> Vec<String> {
    let mut keys = Vec::new();
    for page in Page::ALL {
        keys.push(page.nav_key());
        keys.push(page.title_key());
        keys.push(page.body_key());
    }
    for card in &config.carousel.cards {
        keys.push(card.title.clone());
        keys.push(card.description.clone());
    }
    keys.extend(
        [
            "HOME.CAPABILITIES_HEADING",
            "HOME.PREVIOUS",
            "HOME.NEXT",
            "HOME.GO_TO_SLIDE",
            "PRODUCTS.CTA",
            "PORTAL.USERNAME",
            "PORTAL.PASSWORD",
            "PORTAL.LOGIN",
            "PORTAL.LOGOUT",
            "PORTAL.WELCOME",
            "NOT_FOUND.TITLE",
            "NOT_FOUND.REDIRECT",
            "FOOTER.RIGHTS",
        ]
        .map(String::from),
    );
    keys
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(
    title: &str,
    lang: &str,
    redirect_to: Option<&str>,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if let Some(url) = redirect_to {
                    meta http-equiv="refresh" content={ "0; url=" (url) };
                }
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the navigation list with the current page marked
fn render_nav(ctx: &RenderContext, current: Page) -> Markup {
    html! {
        nav.site-nav {
            ul {
                @for page in Page::ALL {
                    li class=[(page == current).then_some("current")] {
                        a href=(page.href()) { (ctx.t(&page.nav_key())) }
                    }
                }
            }
        }
    }
}

fn site_header(ctx: &RenderContext, current: Page) -> Markup {
    html! {
        header.site-header {
            a.site-name href="/" { (ctx.config.site.name) }
            (render_nav(ctx, current))
        }
    }
}

fn site_footer(ctx: &RenderContext) -> Markup {
    html! {
        footer.site-footer {
            "© " (ctx.config.site.name) ". " (ctx.t("FOOTER.RIGHTS"))
        }
    }
}

/// Convert a Markdown translation value to HTML.
fn render_markdown(text: &str) -> Markup {
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, Parser::new(text));
    PreEscaped(body_html)
}

fn page_title(ctx: &RenderContext, page: Page) -> String {
    format!("{} | {}", ctx.t(&page.title_key()), ctx.config.site.name)
}

fn page_shell(ctx: &RenderContext, page: Page, main: Markup) -> Markup {
    let content = html! {
        (site_header(ctx, page))
        (main)
        (site_footer(ctx))
    };
    base_document(
        &page_title(ctx, page),
        ctx.catalog.language(),
        None,
        content,
    )
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_page(ctx: &RenderContext, page: Page) -> Markup {
    match page {
        Page::Home => render_home(ctx, &initial_carousel_view(ctx.config)),
        Page::Portal => render_portal(ctx, &Portal::new()),
        Page::Products => render_products(ctx),
        other => render_content_page(ctx, other),
    }
}

/// Heading plus Markdown body; used by every page without extra widgets
fn render_content_page(ctx: &RenderContext, page: Page) -> Markup {
    let main = html! {
        main class={ (page.slug()) "-page" } {
            h1 { (ctx.t(&page.title_key())) }
            article { (render_markdown(&ctx.t(&page.body_key()))) }
        }
    };
    page_shell(ctx, page, main)
}

fn render_products(ctx: &RenderContext) -> Markup {
    let main = html! {
        main.products-page {
            h1 { (ctx.t("PRODUCTS.TITLE")) }
            article { (render_markdown(&ctx.t("PRODUCTS.BODY"))) }
            a.cta href=(Page::Contact.href()) { (ctx.t("PRODUCTS.CTA")) }
        }
    };
    page_shell(ctx, Page::Products, main)
}

/// Renders the carousel section from a laid-out view
fn render_carousel(ctx: &RenderContext, cards: &[Card], view: &CarouselView) -> Markup {
    let carousel = &ctx.config.carousel;
    let card_style = format!("flex: 0 0 {};", view.card_width);
    let go_to = ctx.t("HOME.GO_TO_SLIDE");

    html! {
        section.capabilities
            data-interval=(carousel.interval_ms)
            data-desktop-width=(carousel.breakpoints.desktop)
            data-tablet-width=(carousel.breakpoints.tablet)
            data-slides-desktop=(carousel.slides.desktop)
            data-slides-tablet=(carousel.slides.tablet)
            data-slides-mobile=(carousel.slides.mobile)
        {
            h2 { (ctx.t("HOME.CAPABILITIES_HEADING")) }
            div.carousel {
                button.carousel-prev type="button" aria-label=(ctx.t("HOME.PREVIOUS")) { "‹" }
                div.carousel-viewport {
                    div.carousel-track style={ "transform: " (view.transform) ";" } {
                        @for card in cards {
                            article.carousel-card style=(card_style) {
                                h3 { (ctx.t(&card.title)) }
                                p { (ctx.t(&card.description)) }
                            }
                        }
                    }
                }
                button.carousel-next type="button" aria-label=(ctx.t("HOME.NEXT")) { "›" }
            }
            div.carousel-dots {
                @for &dot in &view.dots {
                    button.dot.active[dot == view.position]
                        type="button"
                        data-slide=(dot)
                        aria-label={ (go_to) " " (dot + 1) } {}
                }
            }
        }
    }
}

fn render_home(ctx: &RenderContext, view: &CarouselView) -> Markup {
    let main = html! {
        main.home-page {
            section.hero {
                h1 { (ctx.t("HOME.TITLE")) }
                (render_markdown(&ctx.t("HOME.BODY")))
            }
            (render_carousel(ctx, &ctx.config.carousel.cards, view))
        }
    };
    page_shell(ctx, Page::Home, main)
}

/// Renders the portal in whatever state `portal` is in
fn render_portal(ctx: &RenderContext, portal: &Portal) -> Markup {
    let main = html! {
        main.portal-page {
            h1 { (ctx.t("PORTAL.TITLE")) }
            @if portal.is_logged_in() {
                p.welcome { (ctx.t("PORTAL.WELCOME")) ", " (portal.username) }
                button.logout type="button" { (ctx.t("PORTAL.LOGOUT")) }
            } @else {
                (render_markdown(&ctx.t("PORTAL.BODY")))
                form.login-form {
                    label {
                        (ctx.t("PORTAL.USERNAME"))
                        input type="text" name="username" value=(portal.username) autocomplete="username";
                    }
                    label {
                        (ctx.t("PORTAL.PASSWORD"))
                        input type="password" name="password" autocomplete="current-password";
                    }
                    button type="submit" { (ctx.t("PORTAL.LOGIN")) }
                }
            }
        }
    };
    page_shell(ctx, Page::Portal, main)
}

fn render_not_found(ctx: &RenderContext) -> Markup {
    let root = Page::Home.href();
    let content = html! {
        main.not-found-page {
            h1 { (ctx.t("NOT_FOUND.TITLE")) }
            p { a href=(root) { (ctx.t("NOT_FOUND.REDIRECT")) } }
        }
    };
    base_document(
        &ctx.t("NOT_FOUND.TITLE"),
        ctx.catalog.language(),
        Some(&root),
        content,
    )
}

// ============================================================================
// Tests
// ============================================================================
