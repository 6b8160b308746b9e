mod check;
mod generate;

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use sheetloc::{PlatformType, RunConfig};
use tracing_subscriber::EnvFilter;

use crate::{check::run_check, generate::run_generate};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
}

/// Settings that override the config file.
#[derive(clap::Args, Debug, Clone)]
struct Overrides {
    /// Run config (TOML)
    #[arg(short, long, default_value = "sheetloc.toml")]
    config: PathBuf,

    /// Spreadsheet export to read instead of the configured source
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Target platform (android, ios, properties)
    #[arg(short, long)]
    platform: Option<PlatformType>,

    /// Output resources directory
    #[arg(short, long)]
    res_dir: Option<PathBuf>,

    /// Fail on missing keys or translations instead of skipping them
    #[arg(long)]
    strict: bool,
}

impl Overrides {
    fn load(&self) -> Result<RunConfig, sheetloc::Error> {
        let mut config = RunConfig::from_file(&self.config)?;
        if let Some(input) = &self.input {
            config.source = input.to_string_lossy().into_owned();
        }
        if let Some(platform) = self.platform {
            config.platform = platform;
        }
        if let Some(res_dir) = &self.res_dir {
            config.res_dir = res_dir.clone();
        }
        config.strict |= self.strict;
        Ok(config)
    }
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate resource files for every language in the sheet.
    Generate {
        #[command(flatten)]
        overrides: Overrides,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse and validate the sheet without writing anything.
    Check {
        #[command(flatten)]
        overrides: Overrides,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    let result = match args.commands {
        Commands::Generate { overrides, json } => {
            overrides.load().and_then(|config| run_generate(&config, json))
        }
        Commands::Check { overrides } => overrides.load().and_then(|config| run_check(&config)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
