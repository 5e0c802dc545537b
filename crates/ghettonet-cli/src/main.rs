//! GhettoNet CLI
//!
//! Combines GhettoNet records from the local hosts file, named files,
//! URLs and stdin, merges them into one conflict-free set, and writes
//! the result to stdout or back into the hosts file.

mod cli;
mod error;
mod inputs;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use ghettonet_core::{MergeOptions, merge, write_document};

use cli::Cli;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let entries = inputs::read_all(&cli)?;
    let merged = merge(entries, MergeOptions { strict: cli.strict })?;

    if cli.write {
        let hosts = ghettonet_hosts::resolve(cli.path.as_deref())?;
        ghettonet_hosts::update(&hosts, &merged)?;
    } else if cli.json {
        serde_json::to_writer_pretty(std::io::stdout().lock(), &merged)?;
        println!();
    } else {
        let mut stdout = std::io::stdout().lock();
        write_document(&mut stdout, &merged)?;
    }
    Ok(())
}
