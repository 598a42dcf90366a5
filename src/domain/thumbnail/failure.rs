// SPDX-License-Identifier: MPL-2.0
//! Terminal failure of a thumbnail resolution.

use crate::domain::media::ContentRef;
use std::fmt;

/// Reported when neither the fast path nor the general path produced a bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailFailure {
    source: ContentRef,
    detail: Option<String>,
}

impl ThumbnailFailure {
    /// Builds a failure from the most recent attempt error message.
    ///
    /// Only the first line of the message is kept; an empty message yields no
    /// detail at all.
    #[must_use]
    pub fn new(source: ContentRef, last_error: Option<&str>) -> Self {
        Self {
            source,
            detail: last_error.and_then(first_line),
        }
    }

    #[must_use]
    pub fn source(&self) -> &ContentRef {
        &self.source
    }

    /// Message reported to callers, without the detail.
    #[must_use]
    pub fn message(&self) -> String {
        format!("failed to get thumbnail for uri={}", self.source)
    }

    /// First line of the last underlying error, if there was one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

impl fmt::Display for ThumbnailFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())?;
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ThumbnailFailure {}

/// Returns the text before the first line break, or `None` for an empty message.
#[must_use]
pub fn first_line(message: &str) -> Option<String> {
    if message.is_empty() {
        return None;
    }
    Some(
        message
            .split(['\n', '\r'])
            .next()
            .unwrap_or_default()
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_drops_the_rest() {
        assert_eq!(first_line("not found\n\tat Loader.load"), Some("not found".to_string()));
        assert_eq!(first_line("windows\r\nstyle"), Some("windows".to_string()));
        assert_eq!(first_line("single"), Some("single".to_string()));
        assert_eq!(first_line(""), None);
    }

    #[test]
    fn failure_keeps_first_line_only() {
        let failure = ThumbnailFailure::new(ContentRef::new("/a.jpg"), Some("B\nstack"));
        assert_eq!(failure.detail(), Some("B"));
        assert_eq!(failure.to_string(), "failed to get thumbnail for uri=/a.jpg (B)");
    }

    #[test]
    fn failure_without_error_has_no_detail() {
        let failure = ThumbnailFailure::new(ContentRef::new("/a.jpg"), None);
        assert!(failure.detail().is_none());
        assert_eq!(failure.to_string(), "failed to get thumbnail for uri=/a.jpg");
    }
}
