//! Local hosts-file access for GhettoNet.
//!
//! Locates the platform hosts file, reads it, and rewrites it in place:
//! everything outside GhettoNet markers is preserved verbatim, the
//! existing file is renamed to a numbered backup, and the merged entry
//! set is appended as one fresh block.

pub mod error;

pub use error::{Error, Result};

use std::fs;
use std::path::{Path, PathBuf};

use ghettonet_core::{Entry, ParseOptions, ScanUnit, parse_text, write_document};

/// Default hosts-file location for the build platform, if one is known.
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        let root = std::env::var("SystemRoot").unwrap_or_else(|_| "C:".to_string());
        Some(PathBuf::from(root).join(r"system32\drivers\etc\hosts"))
    }
    #[cfg(target_os = "macos")]
    {
        Some(PathBuf::from("/private/etc/hosts"))
    }
    #[cfg(target_os = "linux")]
    {
        Some(PathBuf::from("/etc/hosts"))
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        None
    }
}

/// Resolves the hosts path: an explicit override, or the platform
/// default. The path must point at an existing regular file.
///
/// # Errors
///
/// Returns [`Error::LocationUnknown`] when no override is given and the
/// platform has no known default, or [`Error::NotAFile`] when the
/// resolved path is missing or not a regular file.
pub fn resolve(path: Option<&Path>) -> Result<PathBuf> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_path().ok_or(Error::LocationUnknown)?,
    };
    if !path.is_file() {
        return Err(Error::NotAFile { path });
    }
    Ok(path)
}

/// Reads the whole hosts file eagerly.
///
/// # Errors
///
/// Returns [`Error::Io`] on read failure.
pub fn read(path: &Path) -> Result<String> {
    tracing::info!("Reading from {}", path.display());
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// First free numbered backup path: `<path>.0`, `<path>.1`, ...
fn next_backup_path(path: &Path) -> PathBuf {
    let mut count = 0;
    loop {
        let candidate = PathBuf::from(format!("{}.{count}", path.display()));
        if !candidate.exists() {
            return candidate;
        }
        count += 1;
    }
}

/// Renames the hosts file to the next free numbered backup and returns
/// the backup path.
///
/// # Errors
///
/// Returns [`Error::BackupFailed`] when the rename is refused, which
/// usually means the caller lacks system rights.
pub fn backup(path: &Path) -> Result<PathBuf> {
    let target = next_backup_path(path);
    tracing::info!("Copying {} to {}", path.display(), target.display());
    fs::rename(path, &target).map_err(|e| Error::BackupFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(target)
}

/// Every pass-through line of the existing file, with GhettoNet entries
/// dropped. The hosts file is always scanned strictly: a hosts file we
/// are about to rewrite must parse cleanly.
fn passthrough_lines(contents: &str) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for unit in parse_text(contents, ParseOptions::strict()) {
        if let ScanUnit::Text(text) = unit? {
            lines.extend(text);
        }
    }
    Ok(lines)
}

/// Rewrites the hosts file: non-GhettoNet text is kept, the old file is
/// renamed to a numbered backup, and `entries` are written as one fresh
/// block after the preserved text.
///
/// # Errors
///
/// Fails when the existing file cannot be read or parsed strictly, when
/// the backup rename is refused, or on write failure.
pub fn update(path: &Path, entries: &[Entry]) -> Result<()> {
    let existing = passthrough_lines(&read(path)?)?;
    backup(path)?;
    tracing::info!("Writing to {}", path.display());

    let mut output = String::new();
    for line in &existing {
        output.push_str(line);
        output.push('\n');
    }
    output.push('\n');
    let mut buffer = output.into_bytes();
    write_document(&mut buffer, entries).map_err(|e| Error::io(path, e))?;
    fs::write(path, buffer).map_err(|e| Error::io(path, e))
}
