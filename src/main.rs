//! tsvtable - inspect and combine tab-separated tables

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use tsvtable::config::{Config, OutputFormat};
use tsvtable::output::render_to_stdout;
use tsvtable::report::{concat_files, Inspection};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Text,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Text => OutputFormat::Text,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Inspect and combine tab-separated tables
#[derive(Parser, Debug)]
#[command(name = "tsvtable")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show a file's columns and row count, and check every row's width
    Inspect {
        /// File to inspect
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: CliOutputFormat,
    },

    /// Concatenate files with identical headers
    Concat {
        /// Input files, in order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// File to write
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(valid) => {
            if valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1) // Malformed rows found
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<bool> {
    let cli = Cli::parse();
    let config = Config::new().with_verbose(cli.verbose);

    match cli.command {
        Command::Inspect { file, format } => {
            let config = config.with_output_format(format.into());
            init_tracing(&config);

            let report = Inspection::from_file(&file)
                .with_context(|| format!("Failed to inspect file: {}", file.display()))?;
            render_to_stdout(&report, config.output_format)?;
            Ok(report.is_valid())
        }
        Command::Concat { inputs, output } => {
            init_tracing(&config);

            let rows = concat_files(&inputs, &output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("wrote {} rows to {}", rows, output.display());
            Ok(true)
        }
    }
}
