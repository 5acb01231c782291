//! plat - build and preview the new-homes site
//!
//! ## Usage
//!
//! ```bash
//! plat build                        # write dist/ from ./data
//! plat build --out public --no-map
//! plat render /cities/visalia/      # one page to stdout
//! plat check                        # report data problems
//! plat preview --addr 0.0.0.0:8080  # serve the built site
//! ```

use anyhow::{bail, Context, Result};
use axum::Router;
use clap::{Parser, Subcommand};
use plat_config::SiteConfig;
use plat_join::diagnose;
use plat_loader::{load_collections, source_for, DirSource};
use plat_map::{LeafletProvider, MapProvider};
use plat_pages::{build_site, render_target, PageContext};
use std::net::SocketAddr;
use std::path::PathBuf;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "plat=info,plat_pages=info,tower_http=info";

#[derive(Parser)]
#[command(name = "plat")]
#[command(about = "Static site builder for a new-homes marketing site")]
#[command(version)]
struct Cli {
    /// Config file (default: ./plat.yaml, then the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory the /data/*.json paths are resolved against
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Base URL to fetch the collections from instead of a directory
    #[arg(long, global = true)]
    data_url: Option<String>,

    /// Directory the header/footer partials are resolved against
    #[arg(long, global = true)]
    assets_dir: Option<PathBuf>,

    /// Log as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every page into the output directory
    Build {
        /// Output directory
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Show the map fallback instead of Leaflet
        #[arg(long)]
        no_map: bool,
    },

    /// Render one page to stdout
    Render {
        /// Site path, optionally with a query (`/city.html?slug=visalia`)
        path: String,

        #[arg(long)]
        no_map: bool,
    },

    /// Load the collections and report data problems
    Check,

    /// Serve the built site
    Preview {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,

        /// Directory to serve (default: configured output directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Flags win over the config file and the environment
fn apply_overrides(config: &mut SiteConfig, cli: &Cli) {
    if let Some(dir) = &cli.data_dir {
        config.data.dir = dir.clone();
        config.data.base_url = None;
    }
    if let Some(url) = &cli.data_url {
        config.data.base_url = Some(url.clone());
    }
    if let Some(dir) = &cli.assets_dir {
        config.assets.dir = dir.clone();
    }
}

fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let mut config =
        SiteConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    apply_overrides(&mut config, cli);
    Ok(config)
}

fn map_provider<'a>(
    config: &SiteConfig,
    leaflet: &'a LeafletProvider,
    no_map: bool,
) -> Option<&'a dyn MapProvider> {
    if config.map.enabled && !no_map {
        Some(leaflet)
    } else {
        None
    }
}

async fn cmd_build(config: &SiteConfig, out: Option<PathBuf>, no_map: bool) -> Result<()> {
    let out = out.unwrap_or_else(|| config.output_dir.clone());
    let leaflet = LeafletProvider::from_config(&config.map);
    let ctx = PageContext::new(config, map_provider(config, &leaflet, no_map));
    let data = source_for(&config.data).context("Invalid data location")?;
    let assets = DirSource::new(&config.assets.dir);

    let summary = build_site(&ctx, data.as_ref(), &assets, &out)
        .await
        .with_context(|| format!("Failed to build site into {}", out.display()))?;

    println!(
        "Built {} pages ({} cities) into {}",
        summary.pages.len(),
        summary.city_pages(),
        summary.out_dir.display()
    );
    for slug in &summary.skipped {
        println!("  skipped city '{}'", slug);
    }
    for failure in &summary.degraded {
        println!("  degraded: {}", failure);
    }
    for record in &summary.rejected {
        println!("  {}", record);
    }
    if summary.warnings > 0 {
        println!("  {} data warnings, run `plat check` for details", summary.warnings);
    }
    Ok(())
}

async fn cmd_render(config: &SiteConfig, path: &str, no_map: bool) -> Result<()> {
    let leaflet = LeafletProvider::from_config(&config.map);
    let ctx = PageContext::new(config, map_provider(config, &leaflet, no_map));
    let data = source_for(&config.data).context("Invalid data location")?;
    let assets = DirSource::new(&config.assets.dir);

    let html = render_target(&ctx, data.as_ref(), &assets, path)
        .await
        .with_context(|| format!("No page at {}", path))?;
    print!("{}", html);
    Ok(())
}

async fn cmd_check(config: &SiteConfig) -> Result<()> {
    let data = source_for(&config.data).context("Invalid data location")?;
    let report = load_collections(data.as_ref(), &config.data).await;
    let collections = &report.collections;

    println!(
        "{} cities, {} builders, {} communities from {}",
        collections.cities.len(),
        collections.builders.len(),
        collections.communities.len(),
        data.describe()
    );

    let mut errors = 0;
    for failure in report.failures.iter().chain(&report.rejected) {
        println!("error: {}", failure);
        errors += 1;
    }
    for diagnostic in diagnose(collections) {
        if diagnostic.is_error() {
            println!("error: {}", diagnostic);
            errors += 1;
        } else {
            println!("warn:  {}", diagnostic);
        }
    }

    if errors > 0 {
        bail!("{} problems found", errors);
    }
    println!("OK");
    Ok(())
}

async fn cmd_preview(config: &SiteConfig, addr: SocketAddr, out: Option<PathBuf>) -> Result<()> {
    let root = out.unwrap_or_else(|| config.output_dir.clone());
    if !root.is_dir() {
        tracing::warn!("{} does not exist yet, run `plat build` first", root.display());
    }

    let app = Router::new()
        .fallback_service(ServeDir::new(&root))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    tracing::info!("Serving {} on http://{}", root.display(), addr);
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json);
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Build { out, no_map } => cmd_build(&config, out, no_map).await,
        Commands::Render { path, no_map } => cmd_render(&config, &path, no_map).await,
        Commands::Check => cmd_check(&config).await,
        Commands::Preview { addr, out } => cmd_preview(&config, addr, out).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build() {
        let cli = Cli::try_parse_from(["plat", "build", "--out", "public", "--no-map"]).unwrap();
        match cli.command {
            Commands::Build { out, no_map } => {
                assert_eq!(out, Some(PathBuf::from("public")));
                assert!(no_map);
            }
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["plat", "render", "/cities/", "--data-dir", "site", "--json"])
            .unwrap();
        assert!(cli.json);
        assert_eq!(cli.data_dir, Some(PathBuf::from("site")));
    }

    #[test]
    fn test_overrides() {
        let mut config = SiteConfig::default();
        config.data.base_url = Some("https://example.com/".into());

        let cli = Cli::try_parse_from(["plat", "check", "--data-dir", "site", "--assets-dir", "www"])
            .unwrap();
        apply_overrides(&mut config, &cli);
        assert_eq!(config.data.dir, PathBuf::from("site"));
        assert_eq!(config.data.base_url, None);
        assert_eq!(config.assets.dir, PathBuf::from("www"));

        let cli = Cli::try_parse_from(["plat", "check", "--data-url", "https://cdn.example.com/"])
            .unwrap();
        apply_overrides(&mut config, &cli);
        assert_eq!(config.data.base_url.as_deref(), Some("https://cdn.example.com/"));
    }

    #[test]
    fn test_map_toggle() {
        let mut config = SiteConfig::default();
        let leaflet = LeafletProvider::from_config(&config.map);
        assert!(map_provider(&config, &leaflet, false).is_some());
        assert!(map_provider(&config, &leaflet, true).is_none());
        config.map.enabled = false;
        assert!(map_provider(&config, &leaflet, false).is_none());
    }
}
