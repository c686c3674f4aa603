use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;

use design_patterns::catalog;
use design_patterns::config::CatalogConfig;
use design_patterns::logging;

/// Run the design pattern examples.
#[derive(Parser, Debug)]
#[command(name = "patterns", version, about)]
struct Cli {
    /// TOML settings file (defaults to ./patterns.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show diagnostics on stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every example by category
    List,

    /// Run one example by name, or all of them
    Run {
        name: Option<String>,

        #[arg(long, conflicts_with = "name")]
        all: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CatalogConfig::load(cli.config.as_deref()).context("loading configuration")?;

    let level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    logging::init(level)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::List => write!(out, "{}", catalog::render_listing())?,
        Command::Run { all: true, .. } => catalog::run_all(&mut out, &config)?,
        Command::Run { name: Some(name), .. } => {
            let example = catalog::find(&name)?;
            catalog::run(example, &mut out, &config)?;
        }
        Command::Run { name: None, .. } => {
            eprintln!("{}", "Pick an example or pass --all:".yellow());
            eprint!("{}", catalog::render_listing());
            bail!("no example selected");
        }
    }
    Ok(())
}
