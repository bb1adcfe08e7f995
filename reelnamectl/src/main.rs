use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use reelname_config::{ConfigLoad, ConfigSource, EngineConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use cli::{NumberingOverrides, PlanMode, input::collect_names};

#[derive(Parser)]
#[command(
    name = "reelnamectl",
    version,
    about = "Clip name pattern engine for conform and editorial renames"
)]
struct Cli {
    /// Config file (TOML or JSON). Without it $REELNAME_CONFIG_PATH,
    /// $REELNAME_CONFIG_JSON and ./reelname.toml are tried in turn.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract canonical reel/clip codes (A001C006) from clip names
    Reel {
        /// Names to convert; read from stdin when omitted
        names: Vec<String>,
    },
    /// Strip frame-range annotations and extensions
    Strip {
        names: Vec<String>,
    },
    /// Render a numbered name from a '#' template
    Render {
        #[arg(long, help = "Template such as sh#### (defaults to config)")]
        template: Option<String>,
        number: u64,
    },
    /// Render a stacked-layer suffix such as _L2
    Suffix {
        #[arg(long, help = "Suffix template such as _L# (defaults to config)")]
        template: Option<String>,
        /// Print the full stacked name for this base instead of the suffix
        #[arg(long)]
        base: Option<String>,
        layer: u64,
    },
    /// Convert HH:MM:SS:FF timecode to a frame count (0 when unparseable)
    Timecode {
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        fps: Option<u32>,
        #[arg(required = true)]
        timecodes: Vec<String>,
    },
    /// Convert frame counts back to HH:MM:SS:FF
    Frames {
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        fps: Option<u32>,
        #[arg(required = true)]
        frames: Vec<u64>,
    },
    /// Detect _v### version markers and shot tokens in asset paths
    Version {
        #[arg(long)]
        json: bool,
        paths: Vec<String>,
    },
    /// Build a rename plan for a list of clip names
    Plan {
        #[arg(long, value_enum, default_value = "reel")]
        mode: PlanModeArg,
        #[arg(long, help = "Numbered mode template (defaults to config)")]
        template: Option<String>,
        #[arg(long)]
        start: Option<u64>,
        #[arg(long)]
        step: Option<u64>,
        #[arg(long)]
        json: bool,
        names: Vec<String>,
    },
    /// Group `name<TAB>WxH` lines by resolution, largest first
    Resolutions {
        lines: Vec<String>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PlanModeArg {
    Reel,
    Strip,
    Numbered,
}

impl From<PlanModeArg> for PlanMode {
    fn from(val: PlanModeArg) -> Self {
        match val {
            PlanModeArg::Reel => PlanMode::Reel,
            PlanModeArg::Strip => PlanMode::Strip,
            PlanModeArg::Numbered => PlanMode::Numbered,
        }
    }
}

fn load_config(explicit: Option<PathBuf>) -> Result<ConfigLoad> {
    match explicit {
        Some(path) => {
            let config = EngineConfig::load_from_file(&path)?;
            Ok(ConfigLoad {
                config,
                source: ConfigSource::Explicit(path),
            })
        }
        None => Ok(EngineConfig::load_from_env()?),
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays pipeable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let load = load_config(cli.config).context("failed to load configuration")?;
    if load.source != ConfigSource::Default {
        info!("Using configuration from {:?}", load.source);
    }
    let config = load
        .config
        .validate()
        .context("invalid configuration")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let stdin = io::stdin();

    match cli.command {
        Command::Reel { names } => {
            let names = collect_names(names, stdin.lock())?;
            cli::run_reel(&mut out, &names)?;
        }
        Command::Strip { names } => {
            let names = collect_names(names, stdin.lock())?;
            cli::run_strip(&mut out, &names)?;
        }
        Command::Render { template, number } => {
            cli::run_render(&mut out, &config, template.as_deref(), number)?;
        }
        Command::Suffix {
            template,
            base,
            layer,
        } => {
            cli::run_suffix(
                &mut out,
                &config,
                template.as_deref(),
                base.as_deref(),
                layer,
            )?;
        }
        Command::Timecode { fps, timecodes } => {
            cli::run_timecode(&mut out, &config, &timecodes, fps)?;
        }
        Command::Frames { fps, frames } => {
            cli::run_frames(&mut out, &config, &frames, fps)?;
        }
        Command::Version { json, paths } => {
            let paths = collect_names(paths, stdin.lock())?;
            cli::run_version(&mut out, &config, &paths, json)?;
        }
        Command::Plan {
            mode,
            template,
            start,
            step,
            json,
            names,
        } => {
            let names = collect_names(names, stdin.lock())?;
            let numbering = NumberingOverrides {
                template,
                start,
                step,
            };
            cli::run_plan(
                &mut out,
                &config,
                mode.into(),
                &numbering,
                &names,
                json,
            )?;
        }
        Command::Resolutions { lines } => {
            let lines = collect_names(lines, stdin.lock())?;
            cli::run_resolutions(&mut out, &lines)?;
        }
    }

    out.flush()?;
    Ok(())
}
