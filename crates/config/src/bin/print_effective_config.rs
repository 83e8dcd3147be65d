//! Print the effective base config (defaults + file + overrides + env).

use clap::{Parser, ValueEnum};
use fleen_base_config::{load_base_config_std_env, to_pretty_json, to_pretty_toml};
use std::io;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Toml,
}

/// Print the merged configuration; secrets are redacted.
#[derive(Debug, Parser)]
#[command(name = "print_effective_config", version)]
struct Args {
    /// Config file (`.json` or `.toml`).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Partial config as inline JSON, applied over the file.
    #[arg(long)]
    overrides: Option<String>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

fn main() -> std::process::ExitCode {
    match run(Args::parse()) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            std::process::ExitCode::from(1)
        },
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_base_config_std_env(args.config.as_deref(), args.overrides.as_deref())?;

    let output = match args.format {
        OutputFormat::Json => to_pretty_json(config.as_ref())?,
        OutputFormat::Toml => to_pretty_toml(config.as_ref())?,
    };

    let mut stdout = io::stdout();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
