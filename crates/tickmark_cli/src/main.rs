//! tickmark - a live clock icon
//!
//! Renders the clock into `icon.png` / `title.txt` in the output directory,
//! redrawing on every minute boundary and whenever the state changes.
//! Commands are read line by line from stdin until `quit` or end of input.

mod cli;
mod command;
mod host;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use command::Command;
use host::FileHost;
use std::path::PathBuf;
use std::sync::Arc;
use tickmark_app::{
    AnchoredClock, AppConfig, ClockApp, ClockContext, ClockServices, KeyValueStore, MemoryStore,
    SystemClock, TomlFileStore, WallClock,
};
use tickmark_render::IconRasterizer;
use tickmark_theme::{
    detect_system_color_scheme, ColorScheme, SystemSchemeSource, ThemeError, ThemeMonitor,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const DEFAULT_OUTPUT_DIR: &str = "tickmark-out";

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level.as_deref());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the tokio runtime")?;
    runtime.block_on(run(args))
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tickmark=info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<()> {
    let mut config =
        AppConfig::load_or_default(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(dir) = args.output_dir {
        config.output_dir = Some(dir);
    }
    if let Some(path) = args.preferences {
        config.preferences_path = Some(path);
    }
    if args.scheme.is_some() {
        config.theme_poll_ms = 0;
    }

    let output_dir = config
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
    let host = Arc::new(
        FileHost::create(&output_dir)
            .with_context(|| format!("Cannot write to {}", output_dir.display()))?,
    );

    let preferences = open_preferences(&config, args.ephemeral)?;
    let monitor = match args.scheme {
        Some(scheme) => ThemeMonitor::with_initial(
            move || -> Result<ColorScheme, ThemeError> { Ok(scheme) },
            scheme,
        ),
        None => {
            let initial = tokio::task::spawn_blocking(detect_system_color_scheme)
                .await
                .context("Scheme detection failed")?;
            ThemeMonitor::with_initial(SystemSchemeSource, initial)
        }
    };
    let rasterizer = tokio::task::spawn_blocking(IconRasterizer::system)
        .await
        .context("Font loading failed")?;
    let clock: Arc<dyn WallClock> = match args.start_at {
        Some(at) => Arc::new(AnchoredClock::new(at)),
        None => Arc::new(SystemClock),
    };

    let services = ClockServices {
        preferences,
        monitor,
        clock,
        host,
        rasterizer: Arc::new(rasterizer),
    };
    let context =
        Arc::new(ClockContext::build(&config, services).context("Invalid configuration")?);
    tracing::info!("writing icon to {}", output_dir.display());
    let app = ClockApp::start(Arc::clone(&context));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        match command::parse(&line) {
            Ok(Some(Command::Input(event))) => {
                app.handle_input(&event);
            }
            Ok(Some(Command::Scheme(scheme))) => {
                if !context.monitor.notify(scheme) {
                    tracing::info!("scheme is already {scheme}");
                }
            }
            Ok(Some(Command::Status)) => {
                let state = context.state();
                println!(
                    "color={} hour12={} scheme={}",
                    context.palette.wrapped(state.color_index).name,
                    state.hour12,
                    state.scheme
                );
            }
            Ok(Some(Command::Quit)) => break,
            Ok(None) => {}
            Err(err) => tracing::warn!("{err:#}"),
        }
    }

    app.shutdown().await;
    Ok(())
}

fn open_preferences(config: &AppConfig, ephemeral: bool) -> Result<Arc<dyn KeyValueStore>> {
    if ephemeral {
        return Ok(Arc::new(MemoryStore::new()));
    }
    match config.preferences_path() {
        Some(path) => {
            let store = TomlFileStore::open(&path)
                .with_context(|| format!("Failed to open preferences at {}", path.display()))?;
            tracing::debug!("preferences at {}", store.path().display());
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("no config directory found, preferences will not be saved");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
