// SPDX-License-Identifier: MPL-2.0
//! Opaque content references.
//!
//! A reference is resolvable two ways: by the media index, which only needs
//! the numeric row id in its last path segment, and by the decode pipeline,
//! which reads `file://` URIs and plain filesystem paths.

use crate::error::{Error, Result};
use std::fmt;
use std::path::PathBuf;

const FILE_SCHEME: &str = "file://";

/// Reference to a media item, e.g. `content://media/external/images/media/42`
/// or `file:///home/user/Pictures/cat.jpg`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentRef(String);

impl ContentRef {
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the scheme (`content`, `file`, ...) or `None` for bare paths.
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.0.split_once("://").map(|(scheme, _)| scheme)
    }

    /// Path component without query or fragment.
    fn path_part(&self) -> &str {
        let rest = match self.0.split_once("://") {
            Some((_, rest)) => rest,
            None => self.0.as_str(),
        };
        rest.split(['?', '#']).next().unwrap_or_default()
    }

    /// Parses the numeric row id carried by the last path segment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedReference`] when the last segment is
    /// missing or not a number.
    pub fn numeric_id(&self) -> Result<u64> {
        let segment = self
            .path_part()
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .ok_or_else(|| Error::UnsupportedReference(format!("no path in {}", self.0)))?;
        segment.parse::<u64>().map_err(|_| {
            Error::UnsupportedReference(format!("no numeric id in {}", self.0))
        })
    }

    /// Resolves the reference to a local filesystem path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedReference`] for schemes other than `file`.
    pub fn to_path(&self) -> Result<PathBuf> {
        if let Some(rest) = self.0.strip_prefix(FILE_SCHEME) {
            let path = rest.strip_prefix("localhost").unwrap_or(rest);
            return Ok(PathBuf::from(path));
        }
        match self.scheme() {
            None if !self.0.is_empty() => Ok(PathBuf::from(&self.0)),
            None => Err(Error::UnsupportedReference("empty reference".to_string())),
            Some(scheme) => Err(Error::UnsupportedReference(format!(
                "cannot read {scheme} references from the filesystem: {}",
                self.0
            ))),
        }
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentRef {
    fn from(reference: &str) -> Self {
        Self::new(reference)
    }
}

impl From<String> for ContentRef {
    fn from(reference: String) -> Self {
        Self(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_id_reads_last_segment() {
        let reference = ContentRef::new("content://media/external/images/media/42");
        assert_eq!(reference.numeric_id().unwrap(), 42);

        let with_query = ContentRef::new("content://media/external/video/media/7?limit=1");
        assert_eq!(with_query.numeric_id().unwrap(), 7);
    }

    #[test]
    fn numeric_id_rejects_non_numeric_segment() {
        let reference = ContentRef::new("file:///tmp/cat.jpg");
        assert!(matches!(
            reference.numeric_id(),
            Err(Error::UnsupportedReference(_))
        ));
    }

    #[test]
    fn to_path_accepts_file_uris_and_bare_paths() {
        assert_eq!(
            ContentRef::new("file:///tmp/cat.jpg").to_path().unwrap(),
            PathBuf::from("/tmp/cat.jpg")
        );
        assert_eq!(
            ContentRef::new("file://localhost/tmp/cat.jpg").to_path().unwrap(),
            PathBuf::from("/tmp/cat.jpg")
        );
        assert_eq!(
            ContentRef::new("/tmp/cat.jpg").to_path().unwrap(),
            PathBuf::from("/tmp/cat.jpg")
        );
    }

    #[test]
    fn to_path_rejects_other_schemes() {
        let reference = ContentRef::new("content://media/external/images/media/42");
        assert_eq!(reference.scheme(), Some("content"));
        assert!(reference.to_path().is_err());
        assert!(ContentRef::new("").to_path().is_err());
    }
}
