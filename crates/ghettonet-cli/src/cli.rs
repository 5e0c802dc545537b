//! CLI argument parsing using clap derive

use clap::Parser;
use std::path::PathBuf;

/// GhettoNet manages IPv4/DNS data in a format compatible with hosts files.
///
/// The format can be easily embedded in files, emails and web pages:
///
///   ### BEGIN GHETTONET
///   213.251.145.96    www.wikileaks.org wikileaks.org
///   ### END GHETTONET
///
/// By default, all inputs are combined and written to stdout. Inputs are
/// taken from the local hosts file, any files given with -i, and any URLs
/// given with -u. With -w the hosts file is rewritten instead.
#[derive(Parser, Debug)]
#[command(name = "ghettonet")]
#[command(author, version, verbatim_doc_comment)]
pub struct Cli {
    /// Read input from FILE (repeatable)
    #[arg(short, long, value_name = "FILE")]
    pub input: Vec<PathBuf>,

    /// Read input from URL (repeatable)
    #[arg(short, long, value_name = "URL")]
    pub url: Vec<String>,

    /// Path to the hosts file
    #[arg(short, long, value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Read input from stdin
    #[arg(short, long)]
    pub stdin: bool,

    /// Write the merged result to the hosts file
    #[arg(short, long)]
    pub write: bool,

    /// Exclude the hosts file from input
    #[arg(short = 'x', long)]
    pub exclude: bool,

    /// Abort on malformed input and on merge conflicts instead of
    /// recovering and narrating them into comments
    #[arg(long)]
    pub strict: bool,

    /// Print merged entries as JSON instead of the GhettoNet format
    #[arg(long, conflicts_with = "write")]
    pub json: bool,

    /// Suppress warnings
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
