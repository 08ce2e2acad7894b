//! File-backed sample sources.
//!
//! Two layouts are supported:
//! - a JSON-lines file, one sample per non-blank line
//! - a directory of `*.json` files, one sample per file, read in name order

use super::BlobResult;
use crate::utils::error::SourceError;
use log::{debug, info};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

/// Reads one sample per line from a file
pub struct JsonLinesSource {
    lines: Lines<BufReader<File>>,
    remaining: usize,
}

impl JsonLinesSource {
    /// Open a JSON-lines file, yielding at most `limit` samples
    pub fn open(path: impl AsRef<Path>, limit: usize) -> Result<Self, SourceError> {
        let path = path.as_ref();
        info!("Reading samples from: {}", path.display());

        let file = File::open(path)?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            remaining: limit,
        })
    }
}

impl Iterator for JsonLinesSource {
    type Item = BlobResult;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        loop {
            match self.lines.next()? {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => {
                    self.remaining -= 1;
                    return Some(Ok(line.into_bytes()));
                }
                Err(e) => {
                    self.remaining -= 1;
                    return Some(Err(SourceError::Io(e)));
                }
            }
        }
    }
}

/// Reads one sample per `*.json` file in a directory
pub struct DirectorySource {
    files: std::vec::IntoIter<PathBuf>,
}

impl DirectorySource {
    /// Open a directory, yielding at most `limit` samples
    pub fn open(dir: impl AsRef<Path>, limit: usize) -> Result<Self, SourceError> {
        let dir = dir.as_ref();
        info!("Reading samples from directory: {}", dir.display());

        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();
        files.truncate(limit);

        debug!("Found {} sample files", files.len());

        Ok(Self {
            files: files.into_iter(),
        })
    }
}

impl Iterator for DirectorySource {
    type Item = BlobResult;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.files.next()?;
        Some(fs::read(&path).map_err(SourceError::Io))
    }
}

/// Open the source matching the layout at `path`
///
/// Directories are read as one file per sample, anything else as JSON lines.
///
/// # Errors
/// * `SourceError::InvalidPath` - Path does not exist
/// * `SourceError::Io` - Path cannot be opened
pub fn open_source(
    path: impl AsRef<Path>,
    limit: usize,
) -> Result<Box<dyn Iterator<Item = BlobResult>>, SourceError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SourceError::InvalidPath(format!(
            "{} does not exist",
            path.display()
        )));
    }

    if path.is_dir() {
        Ok(Box::new(DirectorySource::open(path, limit)?))
    } else {
        Ok(Box::new(JsonLinesSource::open(path, limit)?))
    }
}
