//! `artesano-tui`: terminal UI for the Artesano feedstock and product catalog.
//!
//! Built on [ratatui](https://ratatui.rs) with reactive list state from
//! `artesano-core`'s [`ResourceStream`](artesano_core::ResourceStream).
//! Screens are reachable by number keys (1-3) or opened directly through a
//! route: `/`, `/materias-primas`, `/produtos`.
//!
//! Logs are written to a file (default `/tmp/artesano-tui.log`) to avoid
//! corrupting the terminal UI.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use artesano_config::{Config, DEFAULT_PROFILE};
use artesano_core::{Catalog, CatalogConfig};

use crate::app::{App, Launch};

/// Terminal UI for browsing and editing the Artesano catalog.
#[derive(Parser, Debug)]
#[command(name = "artesano-tui", version, about)]
struct Cli {
    /// Route to open: `/`, `/materias-primas` or `/produtos`
    #[arg(short, long, default_value = "/")]
    route: String,

    /// Config profile to use
    #[arg(short, long, env = "ARTESANO_PROFILE")]
    profile: Option<String>,

    /// Backend base URL, overriding the profile
    #[arg(short = 'u', long, env = "ARTESANO_API_URL")]
    api_url: Option<String>,

    /// Log file path (defaults to /tmp/artesano-tui.log)
    #[arg(long, default_value = "/tmp/artesano-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. Nothing may be logged to stdout/stderr while
/// the terminal is in raw mode. Hold the returned guard until exit.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "artesano_tui={log_level},artesano_core={log_level},artesano_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("artesano-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Resolve the catalog connection: `--api-url` > profile > built-in default.
fn build_catalog_config(cli: &Cli, cfg: &Config) -> Result<CatalogConfig> {
    let profile_name = cfg.active_profile_name(cli.profile.as_deref());
    let profile = match cfg.profile(&profile_name) {
        Ok(profile) => profile,
        // An explicit URL doesn't need the named profile to exist.
        Err(_) if cli.api_url.is_some() => cfg.profile(DEFAULT_PROFILE)?,
        Err(e) => return Err(e.into()),
    };

    let mut config = artesano_config::profile_to_catalog_config(&profile, &cfg.defaults)?;
    if let Some(raw) = &cli.api_url {
        config.base_url = url::Url::parse(raw)
            .map_err(|e| eyre!("invalid backend URL \"{raw}\": {e}"))?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let cfg = artesano_config::load_config_or_default();
    let catalog_config = build_catalog_config(&cli, &cfg)?;

    info!(
        url = %catalog_config.base_url,
        route = %cli.route,
        "starting artesano-tui"
    );

    let catalog = Catalog::new(catalog_config).wrap_err("could not build the catalog client")?;
    let launch = Launch {
        route: cli.route.clone(),
        feedstock_page_size: cfg.defaults.feedstock_page_size,
        product_page_size: cfg.defaults.product_page_size,
    };
    App::new(catalog, &launch).run().await
}
