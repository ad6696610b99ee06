//! dragscroll CLI
//!
//! Replays scripted pointer, scroll and navigation input against a
//! synthetic surface and prints the bound notifications it produced.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dragscroll::DragScrollConfig;
use tracing::Level;
use tracing_subscriber::EnvFilter;

mod script;

use script::{Report, Script};

/// dragscroll - drag scroll engine tools
#[derive(Parser)]
#[command(name = "dragscroll")]
#[command(about = "Replay drag scroll interactions headlessly", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a replay script and print bound notifications
    Replay {
        /// Script file (TOML)
        file: PathBuf,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a configuration file and print the effective values
    Config {
        /// Configuration file (TOML)
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Replay { file, json } => {
            let report = Script::load(&file)?.run()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Config { file } => {
            let content = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let config = DragScrollConfig::from_toml_str(&content)
                .with_context(|| format!("Failed to parse {}", file.display()))?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn print_report(report: &Report) {
    for note in &report.notifications {
        println!(
            "[{:>6}ms] step {:<3} {:<10} left={:<5} right={}",
            note.at_ms,
            note.step,
            report
                .steps
                .get(note.step)
                .map_or("", |record| record.action),
            note.left,
            note.right,
        );
    }

    let state = &report.final_state;
    println!();
    println!("index:     {}", state.current_index);
    println!("offset:    ({}, {})", state.scroll_x, state.scroll_y);
    println!(
        "bounds:    left={} right={}",
        state.boundary.left, state.boundary.right
    );
    println!("animating: {}", state.is_animating);
    println!("time:      {}ms", state.now_ms);
}
