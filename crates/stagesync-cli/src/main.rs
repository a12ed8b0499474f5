//! stagesync - configuration-driven release staging synchronizer
//!
//! Copies the most recently modified, version-tagged build artifact out of
//! every project subdirectory into one or more target directories, mirroring
//! the subdirectory structure. Targets may individually opt into cleaning
//! stale artifacts and may prompt before overwriting.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use stagesync_config::{Config, ConfigLoader, TargetSpec};
use stagesync_engine::{SyncDriver, SyncOptions, SyncRequest};
use stagesync_types::SyncStats;
use std::path::PathBuf;
use tracing::{info, warn};

mod display;
mod prompt;

/// stagesync - release staging synchronizer
#[derive(Parser)]
#[command(
    name = "stagesync",
    version = env!("CARGO_PKG_VERSION"),
    about = "Copy the latest versioned build artifacts into staging directories",
    long_about = "stagesync scans every project subdirectory of a source tree, picks the\n\
                  file(s) with the newest modification timestamp (optionally restricted\n\
                  to version-tagged filenames) and mirrors them into each configured\n\
                  target directory."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Quiet mode - minimal output
    #[arg(short, long)]
    quiet: bool,

    /// Verbose mode - detailed output
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Synchronize the latest artifacts into every configured target
    Sync(SyncArgs),
    /// Show or generate configuration
    Config {
        /// Show the built-in defaults instead of the resolved configuration
        #[arg(long)]
        default: bool,
        /// Write a starter configuration file and exit
        #[arg(long, value_name = "PATH")]
        init: Option<PathBuf>,
    },
}

#[derive(Args, Default)]
struct SyncArgs {
    /// Show what would be done without touching the filesystem
    #[arg(long)]
    dry_run: bool,

    /// Overwrite existing files without prompting
    #[arg(short = 'y', long)]
    yes: bool,

    /// Source directory, bypassing the configuration file (requires --target)
    #[arg(long, requires = "target")]
    source: Option<PathBuf>,

    /// Target directory, bypassing the configuration file (requires --source)
    #[arg(long, requires = "source")]
    target: Option<PathBuf>,

    /// Delete stale files in every target, regardless of per-target options
    #[arg(long)]
    clean_old: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.debug, cli.quiet, cli.verbose)?;

    info!("stagesync v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(Commands::Config { default, init }) => config_command(cli.config, default, init),
        Some(Commands::Sync(args)) => sync_command(cli.config, args, cli.quiet).await,
        None => sync_command(cli.config, SyncArgs::default(), cli.quiet).await,
    }
}

fn init_logging(debug: bool, quiet: bool, verbose: bool) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .context("invalid log filter")?;

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    Ok(())
}

/// Resolve the run configuration from flags, an explicit file or the
/// default search locations
fn load_config(config_path: Option<&PathBuf>, args: &SyncArgs) -> Result<Config> {
    if let (Some(source), Some(target)) = (&args.source, &args.target) {
        let mut config = Config::default();
        config.source = source.clone();
        config.targets = vec![TargetSpec::new(target.clone()).with_clean_old(args.clean_old)];
        return Ok(config);
    }

    let config = match config_path {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("cannot load configuration from '{}'", path.display()))?,
        None => ConfigLoader::load_default()
            .context("no usable configuration found; run 'stagesync config --init stagesync.yaml'")?,
    };

    Ok(config)
}

async fn sync_command(config_path: Option<PathBuf>, args: SyncArgs, quiet: bool) -> Result<()> {
    let config = load_config(config_path.as_ref(), &args)?;

    if config.console.banner && !quiet {
        display::print_banner(&config.source);
    }

    let mut decider = prompt::TermConfirm::new();
    let mut total = SyncStats::new();
    let mut failed_targets = 0usize;

    for target in &config.targets {
        let mut options = SyncOptions::from_target(target, &config.selection, &config.prompt);
        options.dry_run = args.dry_run;
        if args.clean_old {
            options.clean_old = true;
        }
        if args.yes {
            options.confirm_overwrite = false;
        }

        let request = SyncRequest::new(&config.source, &target.path).with_options(options);
        match SyncDriver::new(&mut decider).sync(request).await {
            Ok(result) => {
                if !quiet {
                    display::render_result(&target.path, &result);
                }
                total.merge(&result.stats);
            }
            Err(e) => {
                // One target's failure never aborts the remaining targets.
                failed_targets += 1;
                warn!("Target '{}' failed: {}", target.path.display(), e);
                if !quiet {
                    display::render_target_failure(&target.path, &e);
                }
            }
        }
    }

    if !quiet {
        display::render_summary(&total, config.targets.len(), failed_targets, args.dry_run);
    }

    if config.console.wait_on_exit {
        display::wait_for_key();
    }

    if failed_targets > 0 && failed_targets == config.targets.len() {
        anyhow::bail!("all {} configured targets failed", failed_targets);
    }

    Ok(())
}

fn config_command(
    config_path: Option<PathBuf>,
    default: bool,
    init: Option<PathBuf>,
) -> Result<()> {
    if let Some(path) = init {
        ConfigLoader::generate_starter_config(&path)
            .with_context(|| format!("cannot write '{}'", path.display()))?;
        println!("Wrote starter configuration to {}", path.display());
        return Ok(());
    }

    let config = if default {
        Config::default()
    } else {
        match config_path {
            Some(path) => ConfigLoader::load_from_file(&path)
                .with_context(|| format!("cannot load configuration from '{}'", path.display()))?,
            None => ConfigLoader::load_default().context("no usable configuration found")?,
        }
    };

    print!("{}", serde_yaml::to_string(&config)?);
    Ok(())
}
