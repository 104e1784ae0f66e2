//! Media Refresh - command line entry point
//!
//! Runs a refresh batch against a project manifest:
//! - Configuration loading (created with defaults on first run)
//! - Logging initialization
//! - Preset or scope/strategy selection
//! - Report printing and manifest write-back

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use refresh_core::batch::{BatchDriver, BatchReport};
use refresh_core::config::{ConfigManager, ConfigSection};
use refresh_core::host::{ManifestHost, StdMediaFs};
use refresh_core::logging::{init_tracing, init_tracing_with_file, LogLevel};
use refresh_core::models::{Preset, Scope, StrategyKind};

/// Default config path: .config/media-refresh.toml (relative to current working directory)
fn default_config_path() -> PathBuf {
    PathBuf::from(".config").join("media-refresh.toml")
}

/// Refresh clips whose media files were modified on disk
#[derive(Parser, Debug)]
#[command(name = "media-refresh", version)]
struct Cli {
    /// Project manifest (JSON)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Config file
    #[arg(short, long, global = true, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Print the report as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a named preset (see `presets`)
    Preset {
        /// Preset name, e.g. CopyReplaceSelectedClips
        name: Preset,
    },
    /// Run a scope/strategy pair, falling back to the configured defaults
    Run {
        /// Selected, CurrentContainer, CurrentContainerRecursive or EntireProject
        #[arg(short, long)]
        scope: Option<Scope>,
        /// Relink, CopyAndReplace or RevertToOriginal
        #[arg(short = 'm', long)]
        strategy: Option<StrategyKind>,
    },
    /// List preset names
    Presets,
    /// Edit the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Change the scope and strategy used by `run`
    SetDefaults {
        #[arg(short, long)]
        scope: Option<Scope>,
        #[arg(short = 'm', long)]
        strategy: Option<StrategyKind>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for log level and logs directory)
    let mut config_manager = ConfigManager::new(&cli.config);
    if let Err(e) = config_manager.load_or_create() {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
    }

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        config_manager.settings().logging.level
    };
    let _log_guard = if config_manager.settings().logging.log_to_file {
        config_manager
            .ensure_dirs_exist()
            .context("Failed to create logs folder")?;
        Some(init_tracing_with_file(level, &config_manager.logs_folder()))
    } else {
        init_tracing(level);
        None
    };

    tracing::debug!("Config: {}", config_manager.path().display());
    tracing::debug!("Core version: {}", refresh_core::version());

    match cli.command {
        Commands::Presets => {
            for preset in Preset::ALL {
                println!("{:<36} {} / {}", preset.name(), preset.scope(), preset.strategy());
            }
            Ok(())
        }
        Commands::Config {
            command: ConfigCommands::SetDefaults { scope, strategy },
        } => {
            let defaults = &mut config_manager.settings_mut().defaults;
            if let Some(scope) = scope {
                defaults.scope = scope;
            }
            if let Some(strategy) = strategy {
                defaults.strategy = strategy;
            }
            config_manager
                .update_section(ConfigSection::Defaults)
                .with_context(|| format!("Failed to write {}", config_manager.path().display()))?;
            let defaults = &config_manager.settings().defaults;
            println!("Defaults: {} / {}", defaults.scope, defaults.strategy);
            Ok(())
        }
        Commands::Preset { name } => {
            let project = require_project(cli.project)?;
            run_batch(&config_manager, project, cli.json, |driver| driver.run_preset(name))
        }
        Commands::Run { scope, strategy } => {
            let project = require_project(cli.project)?;
            let defaults = &config_manager.settings().defaults;
            let scope = scope.unwrap_or(defaults.scope);
            let strategy = strategy.unwrap_or(defaults.strategy);
            run_batch(&config_manager, project, cli.json, |driver| {
                driver.run(scope, strategy)
            })
        }
    }
}

fn require_project(project: Option<PathBuf>) -> Result<PathBuf> {
    match project {
        Some(path) => Ok(path),
        None => bail!("--project <FILE> is required for this command"),
    }
}

/// Load the manifest, run one batch, print the report and save the manifest
/// (bindings are already saved as they change; this also keeps clip names).
///
/// Per-clip failures are part of the report; only setup problems are errors.
fn run_batch<F>(config_manager: &ConfigManager, project: PathBuf, json: bool, run: F) -> Result<()>
where
    F: FnOnce(&BatchDriver<'_>) -> BatchReport,
{
    let host = ManifestHost::load(&project)
        .with_context(|| format!("Failed to load project {}", project.display()))?;
    tracing::info!("Project: {}", project.display());

    let driver = BatchDriver::with_host(&host, &StdMediaFs, config_manager.settings());
    let report = run(&driver);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.summary());
    }

    host.save()
        .with_context(|| format!("Failed to save project {}", project.display()))?;
    Ok(())
}
