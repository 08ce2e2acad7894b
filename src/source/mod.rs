//! Sample sources.
//!
//! A source yields raw sample blobs one at a time. Blobs are opaque here;
//! decoding happens in [`crate::parser::sample`].

pub mod file;

pub use file::{open_source, DirectorySource, JsonLinesSource};

use crate::utils::error::SourceError;

/// One raw blob, or the error that prevented reading it
pub type BlobResult = Result<Vec<u8>, SourceError>;
