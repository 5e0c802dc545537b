//! Input gathering: hosts file, named files, URLs and stdin.

use std::io::Read;
use std::path::Path;

use ghettonet_core::{Entry, ParseOptions, parse_entries};

use crate::cli::Cli;
use crate::error::{Error, Result};

/// Reads one named input file.
fn read_file(path: &Path) -> Result<String> {
    tracing::info!("Reading from {}", path.display());
    std::fs::read_to_string(path).map_err(|e| Error::Input {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Fetches one URL body as text.
fn fetch_url(url: &str) -> Result<String> {
    tracing::info!("Reading from {url}");
    let fetch_failed = |source: ureq::Error| Error::Fetch {
        url: url.to_string(),
        source: Box::new(source),
    };
    let mut response = ureq::get(url).call().map_err(fetch_failed)?;
    response
        .body_mut()
        .read_to_string()
        .map_err(fetch_failed)
}

/// Reads everything from stdin.
fn read_stdin() -> Result<String> {
    tracing::info!("Reading from stdin");
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

/// Collects entries from every configured input, in option order: the
/// hosts file (unless excluded, always parsed strictly), each input
/// file, each URL, then stdin.
pub fn read_all(cli: &Cli) -> Result<Vec<Entry>> {
    let options = ParseOptions { strict: cli.strict };
    let mut entries = Vec::new();

    if !cli.exclude {
        let hosts = ghettonet_hosts::resolve(cli.path.as_deref())?;
        let contents = ghettonet_hosts::read(&hosts)?;
        // a hosts file we manage must always parse cleanly
        entries.extend(parse_entries(&contents, ParseOptions::strict())?);
    }
    for path in &cli.input {
        entries.extend(parse_entries(&read_file(path)?, options)?);
    }
    for url in &cli.url {
        entries.extend(parse_entries(&fetch_url(url)?, options)?);
    }
    if cli.stdin {
        entries.extend(parse_entries(&read_stdin()?, options)?);
    }
    Ok(entries)
}
