// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Decode(String),
    Config(String),
    UnsupportedReference(String),
    Video(VideoError),
    /// A collaborator panicked while serving a request.
    Panicked(String),
}

/// Failures of video frame extraction.
#[derive(Debug, Clone)]
pub enum VideoError {
    /// The container could not be opened
    Open(String),

    /// No decoder is available for the video stream
    UnsupportedCodec(String),

    /// File exists but contains no video stream
    NoVideoStream,

    /// Stream parameters are unusable (zero-sized frames, ...)
    CorruptedFile,

    /// Decoding failed before a frame could be produced
    DecodingFailed(String),

    /// Generic error with raw message
    Other(String),
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::Open(msg) => write!(f, "Failed to open video: {}", msg),
            VideoError::UnsupportedCodec(msg) => write!(f, "Unsupported video codec: {}", msg),
            VideoError::NoVideoStream => write!(f, "No video stream found"),
            VideoError::CorruptedFile => write!(f, "Video file is corrupted"),
            VideoError::DecodingFailed(msg) => write!(f, "Decoding failed: {}", msg),
            VideoError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl Error {
    /// Returns the bare message carried by this error, without the category
    /// prefix used by `Display`.
    ///
    /// This is what ends up in the details of a failed thumbnail fetch.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Error::Io(msg)
            | Error::Decode(msg)
            | Error::Config(msg)
            | Error::UnsupportedReference(msg)
            | Error::Panicked(msg) => msg.clone(),
            Error::Video(e) => e.to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Decode(e) => write!(f, "Decode Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::UnsupportedReference(e) => write!(f, "Unsupported reference: {}", e),
            Error::Video(e) => write!(f, "Video Error: {}", e),
            Error::Panicked(e) => write!(f, "Panicked: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<VideoError> for Error {
    fn from(err: VideoError) -> Self {
        Error::Video(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<exif::Error> for Error {
    fn from(err: exif::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
