// SPDX-License-Identifier: MPL-2.0
//! Filesystem-backed [`SourceReader`].

use crate::application::port::SourceReader;
use crate::domain::media::ContentRef;
use crate::error::{Error, Result};
use std::fs;
use std::path::PathBuf;

/// Reads `file://` references and bare paths from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSourceReader;

impl FsSourceReader {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SourceReader for FsSourceReader {
    fn read(&self, source: &ContentRef) -> Result<Vec<u8>> {
        let path = source.to_path()?;
        fs::read(&path).map_err(|e| Error::Io(format!("{}: {e}", path.display())))
    }

    fn local_path(&self, source: &ContentRef) -> Result<PathBuf> {
        source.to_path()
    }
}
