//! Key demo binary.
//!
//! Opens a window and logs every key press, release and typed character,
//! along with the held modifier combination. `--check` runs the health
//! checks instead.

use anyhow::Context;
use clap::Parser;
use sketch_keys::app::App;
use sketch_keys::config::AppConfig;
use sketch_keys::{build_info, health};
use tracing::{info, warn};
use winit::event_loop::{ControlFlow, EventLoop};

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "sketch-keys")]
#[command(about = "Keyboard state tracking demo", version)]
struct Args {
    /// Configuration profile (overrides APP_PROFILE)
    #[arg(short, long, value_name = "PROFILE")]
    profile: Option<String>,

    /// Run health checks and exit
    #[arg(long)]
    check: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.profile {
        Some(profile) => AppConfig::load(profile),
        None => AppConfig::load_from_env(),
    };
    let (config, load_error) = match config {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::builtin("release"), Some(e)),
    };

    setup_tracing(&config.log.filter, args.verbose);
    if let Some(e) = load_error {
        warn!(error = %e, "Failed to load config, using default configuration");
    }

    if args.check {
        let report = health::run_all_checks();
        health::print_report(&report);
        std::process::exit(report.exit_code());
    }

    build_info::print_library_info();
    info!(build = %build_info::version_string(), "Build");

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop
        .run_app(&mut app)
        .context("failed to run event loop")?;

    Ok(())
}

fn setup_tracing(filter: &str, verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("sketch_keys=trace,debug")
        } else {
            EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"))
        }
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
