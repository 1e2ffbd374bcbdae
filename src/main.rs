//! Head movement media control application.

use anyhow::Result;
use clap::Parser;
use head_media_control::{
    app::MediaControlApp,
    config::Config,
    dispatch::{LoggingDispatcher, MediaDispatcher},
    media_keys::X11MediaDispatcher,
    replay::{LandmarkTrace, TraceLandmarkProvider},
};
use log::{info, warn};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Landmark trace file to replay (YAML)
    #[arg(short, long)]
    trace: PathBuf,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Log media commands instead of injecting keys
    #[arg(long)]
    dry_run: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Head Movement Media Control");

    // Load configuration if provided
    let config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path.display());
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };
    config.validate()?;

    // Pick a dispatcher: real media keys, or a logger for dry runs and
    // headless sessions
    let dispatcher: Box<dyn MediaDispatcher> = if args.dry_run {
        info!("Dry run: media commands will be logged only");
        Box::new(LoggingDispatcher::new())
    } else {
        match X11MediaDispatcher::new() {
            Ok(d) => Box::new(d.with_initial_volume(config.volume.initial_level)),
            Err(e) => {
                warn!("Media key injection unavailable ({e}), falling back to logging");
                Box::new(LoggingDispatcher::new())
            }
        }
    };

    // Load the landmark trace
    info!("Replaying landmark trace: {}", args.trace.display());
    let trace = LandmarkTrace::from_file(&args.trace)?;
    info!("Loaded {} frames", trace.frames.len());

    let mut app = MediaControlApp::new(TraceLandmarkProvider, dispatcher, &config);

    for frame in &trace.frames {
        app.process_frame(frame, frame.width, frame.height, frame.timestamp())?;
    }

    info!(
        "Processed {} frames, dispatched {} commands",
        app.frames_processed(),
        app.commands_dispatched()
    );

    Ok(())
}
