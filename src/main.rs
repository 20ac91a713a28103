use clap::{Parser, Subcommand};
use shopfloor::carousel::Carousel;
use shopfloor::i18n::Catalog;
use shopfloor::preview::{self, Jump};
use shopfloor::timer::ThreadScheduler;
use shopfloor::viewport::SharedViewport;
use shopfloor::{config, generate, output, routes};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "shopfloor")]
#[command(about = "Static site generator for a manufacturing marketing site")]
#[command(long_about = "\
Static site generator for a manufacturing marketing site

Renders ten pages (home, about, products, industries, capabilities,
sustainability, careers, blog, contact, portal) plus a 404 redirect. Page text
comes from a translation catalog; the home page carries a capabilities
carousel laid out for the configured viewport width.

Source structure:

  site/
  ├── config.toml        # Site name, language, carousel (optional)
  └── i18n/
      └── es.json        # Translations layered over built-in English (optional)

Carousel commands:

  simulate   replay autoplay and manual jumps in virtual time
  preview    drive a live carousel from stdin with a real 5s autoplay timer

Run 'shopfloor gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site source directory (config.toml, i18n/)
    #[arg(long, default_value = "site", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Clone)]
struct SimulateArgs {
    /// Viewport width in pixels
    #[arg(long, default_value_t = 1024)]
    width: u32,

    /// Virtual seconds to run
    #[arg(long, default_value_t = 15.0)]
    seconds: f64,

    /// Manual jump at a point in time, e.g. `7.5:1` (repeatable)
    #[arg(long = "go-to", value_name = "SECONDS:INDEX")]
    go_to: Vec<Jump>,
}

#[derive(clap::Args, Clone)]
struct PreviewArgs {
    /// Initial viewport width in pixels
    #[arg(long, default_value_t = 1024)]
    width: u32,
}

#[derive(Subcommand)]
enum Command {
    /// Render the site to the output directory
    Build,
    /// Validate config and translations without building
    Check,
    /// Print the route table
    Routes,
    /// Run the home-page carousel in virtual time and print the timeline
    Simulate(SimulateArgs),
    /// Drive the home-page carousel interactively from stdin
    Preview(PreviewArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let (site_config, catalog) = load_site(&cli.source)?;
            println!("==> Generating HTML → {}", cli.output.display());
            let pages = generate::generate(&site_config, &catalog, &cli.output)?;
            output::print_generate_output(&pages, &catalog);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let (site_config, catalog) = load_site(&cli.source)?;
            let missing: Vec<String> = generate::required_keys(&site_config)
                .into_iter()
                .filter(|key| catalog.get(key).is_none())
                .collect();
            if missing.is_empty() {
                println!("==> Content is valid");
            } else {
                for key in &missing {
                    println!("    Missing translation: {}", key);
                }
                return Err(format!(
                    "{} translation key(s) missing for language '{}'",
                    missing.len(),
                    catalog.language()
                )
                .into());
            }
        }
        Command::Routes => {
            let (_, catalog) = load_site(&cli.source)?;
            output::print_routes(&routes::routes(), &catalog);
        }
        Command::Simulate(args) => {
            let (site_config, catalog) = load_site(&cli.source)?;
            let duration = Duration::try_from_secs_f64(args.seconds)?;
            let steps = preview::simulate(
                site_config.carousel.cards.clone(),
                site_config.carousel.settings(),
                args.width,
                duration,
                &args.go_to,
            )?;
            output::print_simulation(&site_config.carousel.cards, &steps, &catalog);
        }
        Command::Preview(args) => {
            let (site_config, _) = load_site(&cli.source)?;
            let (tx, rx) = mpsc::channel();
            let mut carousel = Carousel::mount(
                site_config.carousel.cards.clone(),
                site_config.carousel.settings(),
                SharedViewport::new(args.width),
                ThreadScheduler::new(tx.clone()),
            );
            // The reader thread blocks on stdin; it is not joined on quit.
            preview::forward_lines(BufReader::new(io::stdin()), tx);
            println!("Commands: next, prev, go N, width N, show, quit");
            preview::run(&mut carousel, &rx, &mut io::stdout().lock())?;
            carousel.unmount();
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load config and the configured language's catalog from the source directory.
fn load_site(source: &Path) -> Result<(config::SiteConfig, Catalog), Box<dyn std::error::Error>> {
    let site_config = config::load_config(source)?;
    let catalog = Catalog::load(source, &site_config.site.language)?;
    Ok((site_config, catalog))
}

/// Diagnostics go to stderr so stdout stays clean for command output.
/// `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(env_filter)
        .init();
}
