//! peeklog - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use peeklog::model::AppError;
use peeklog::output::stdout_sink;
use peeklog::style::StyleName;
use peeklog::tracker::{ScopeTracker, TrackerOptions};

/// peeklog - hierarchical console output with verbosity-gated scopes
#[derive(Parser, Debug)]
#[command(name = "peeklog")]
#[command(version)]
#[command(about = "Run a scripted pipeline through the scope tracker")]
pub struct Args {
    /// Verbosity threshold; scopes deeper than this are collapsed or hidden
    #[arg(short, long, allow_negative_numbers = true)]
    pub verbosity: Option<i32>,

    /// Decoration style
    #[arg(long, value_enum)]
    pub style: Option<StyleName>,

    /// Deepest tracked nesting level (1 to 1024)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..=1024))]
    pub max_depth: Option<u16>,

    /// Print a timing report after the run
    #[arg(long)]
    pub history: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = peeklog::config::load_config_with_precedence(args.config.clone())?;
        let merged = peeklog::config::merge_config(config_file);
        let with_env = peeklog::config::apply_env_overrides(merged);

        // Flags only override when given
        let history_override = args.history.then_some(true);
        peeklog::config::apply_cli_overrides(
            with_env,
            args.verbosity,
            args.style,
            args.max_depth.map(usize::from),
            history_override,
        )
    };

    peeklog::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let mut tracker = ScopeTracker::with_options(stdout_sink(), TrackerOptions::from(&config));
    peeklog::demo::run(&mut tracker)?;

    if config.history {
        tracker.scoped_verbosity(0, ScopeTracker::history_report)?;
    }
    tracker.end_line()?;

    Ok(())
}
