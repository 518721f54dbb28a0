//! Terminal front end for the synthcalc engine.
//!
//! Keys are whitespace-separated labels (`7`, `+`, `AC`, `+/-`, `⌫`, ...).
//! Flags may appear anywhere; arguments after `--` are always keys.
//! Keys given as arguments are applied once; otherwise keys are read from
//! stdin line by line and the display is printed after each line.

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use synthcalc::{AppConfig, Session, View};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Left-to-right accumulator calculator
#[derive(Parser, Debug)]
#[command(name = "synthcalc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the view as JSON
    #[arg(long)]
    json: bool,

    /// Keys to apply, e.g. `5 - 3 =`
    keys: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] synthcalc::config::ConfigError),

    #[error(transparent)]
    Token(#[from] synthcalc::core::TokenError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to render view: {0}")]
    Render(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "synthcalc failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let mut session = Session::with_limits(config.engine);
    info!(session = %session.id(), "calculator ready");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !cli.keys.is_empty() {
        for key in &cli.keys {
            session.press(key)?;
        }
        return print_view(&mut out, &session.view(), cli.json);
    }

    for line in io::stdin().lock().lines() {
        let line = line?;
        for key in line.split_whitespace() {
            // An unknown key should not end an interactive session.
            if let Err(e) = session.press(key) {
                eprintln!("{e}");
            }
        }
        print_view(&mut out, &session.view(), cli.json)?;
    }
    Ok(())
}

fn print_view(out: &mut impl Write, view: &View, json: bool) -> Result<(), CliError> {
    if json {
        writeln!(out, "{}", serde_json::to_string(view)?)?;
        return Ok(());
    }
    if !view.annotation.is_empty() {
        writeln!(out, "{:>24}", view.annotation)?;
    }
    writeln!(out, "{:>24}", view.display)?;
    for entry in &view.history {
        writeln!(out, "  {entry}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_and_flags_interleave() {
        let cli = Cli::try_parse_from(["synthcalc", "5", "-", "3", "=", "-v", "--json"]).unwrap();
        assert_eq!(cli.keys, vec!["5", "-", "3", "="]);
        assert_eq!(cli.verbose, 1);
        assert!(cli.json);
    }

    #[test]
    fn sign_toggle_label_is_a_key() {
        let cli = Cli::try_parse_from(["synthcalc", "-vv", "7", "+/-"]).unwrap();
        assert_eq!(cli.keys, vec!["7", "+/-"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn arguments_after_separator_are_keys() {
        let cli = Cli::try_parse_from(["synthcalc", "--", "-v"]).unwrap();
        assert_eq!(cli.keys, vec!["-v"]);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn view_prints_annotation_and_history() {
        let mut session = Session::new();
        for key in ["5", "+", "3", "=", "*"] {
            session.press(key).unwrap();
        }
        let mut out = Vec::new();
        print_view(&mut out, &session.view(), false).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().map(str::trim).collect();
        assert_eq!(lines, vec!["8 *", "8", "5 + 3 = 8"]);
    }
}
