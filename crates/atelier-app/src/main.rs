mod app_state;
mod cli;
mod commands;

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use atelier_common::{AtelierError, Result};
use atelier_config::schema::AtelierConfig;
use atelier_net::{AssetSource, HttpAssetSource};

use cli::Command;

const DEFAULT_LOG_DIRECTIVE: &str = "atelier=info";

fn log_directive(raw: &str) -> Directive {
    raw.parse().unwrap_or_else(|_| {
        eprintln!("invalid log filter {raw:?}, using info");
        Directive::from(LevelFilter::INFO)
    })
}

fn main() -> ExitCode {
    let args = cli::parse();

    // Config is read before logging so its level can apply; errors are
    // reported once the subscriber is up.
    let loaded = atelier_config::load_config(args.config.as_deref());
    let config_directive = loaded
        .as_ref()
        .ok()
        .map(|c| format!("atelier={}", c.logging.level.as_str()));
    let raw_directive = args
        .log_level
        .clone()
        .or(config_directive)
        .unwrap_or_else(|| DEFAULT_LOG_DIRECTIVE.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_directive(&raw_directive)))
        .init();

    tracing::info!("Atelier v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        AtelierConfig::default()
    });

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(args.command, &config, &runtime) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &AtelierConfig, runtime: &tokio::runtime::Runtime) -> Result<()> {
    match command {
        Command::View {
            url,
            selected,
            plain,
        } => run_viewer(config, url, selected, plain, runtime),

        Command::Availability {
            bookings,
            start,
            end,
        } => {
            let bookings = commands::load_bookings(&bookings)?;
            print!("{}", commands::rental::availability(&bookings, start.zip(end)));
            Ok(())
        }

        Command::Quote {
            bookings,
            rate,
            start,
            end,
            today,
        } => {
            let bookings = commands::load_bookings(&bookings)?;
            let request = commands::rental::QuoteRequest {
                daily_rate: rate,
                start,
                end,
                today: today.unwrap_or_else(|| chrono::Local::now().date_naive()),
            };
            print!("{}", commands::rental::quote(&bookings, &request, &config.rental)?);
            Ok(())
        }

        Command::Fetch { url, range, output } => {
            let report = runtime.block_on(commands::fetch::run(
                &config.network,
                &url,
                range.as_deref(),
                output.as_deref(),
            ))?;
            print!("{report}");
            Ok(())
        }

        Command::Convert { video_name } => {
            let json = runtime.block_on(commands::convert::run(&config.conversion, &video_name))?;
            println!("{json}");
            Ok(())
        }

        Command::Config => {
            println!("{}", atelier_config::config_to_json(config));
            Ok(())
        }
    }
}

fn run_viewer(
    config: &AtelierConfig,
    url: String,
    selected: bool,
    plain: bool,
    runtime: &tokio::runtime::Runtime,
) -> Result<()> {
    let source: Arc<dyn AssetSource> = Arc::new(
        HttpAssetSource::new(&config.network).map_err(|e| AtelierError::Network(e.to_string()))?,
    );

    let event_loop = EventLoop::new()
        .map_err(|e| AtelierError::Other(format!("failed to create event loop: {e}")))?;
    let mut app = app_state::AtelierApp::new(
        config.viewer.clone(),
        url,
        selected,
        plain,
        runtime.handle().clone(),
        source,
    );

    tracing::info!("Entering event loop");
    event_loop
        .run_app(&mut app)
        .map_err(|e| AtelierError::Other(format!("event loop error: {e}")))?;
    tracing::info!("Shutdown complete");
    Ok(())
}
