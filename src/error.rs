//! Error types for the resume downloader

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the resume downloader
#[derive(Error, Debug)]
pub enum Error {
    /// Connection failure, timeout or broken body while talking to the service
    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP client could not be constructed
    #[error("Cannot build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Endpoint base plus identifier did not form a valid URL
    #[error("Invalid request URL {0}")]
    InvalidUrl(String),

    /// The service answered with something other than 200 OK
    #[error("Request to {url} returned HTTP {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Metadata body did not match the expected shape
    #[error("Malformed resume metadata: {0}")]
    Decode(#[from] serde_json::Error),

    /// Metadata decoded fine but lists no pages
    #[error("Resume {0} has no pages")]
    NoPages(String),

    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// PDF parsed but lacks an expected structure
    #[error("Malformed PDF: {0}")]
    MalformedPdf(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Page image could not be decoded
    #[error("Cannot read page image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Resume identifier is neither a token nor a resume page URL
    #[error("Invalid resume identifier: {0}")]
    InvalidResumeId(String),

    /// Metadata and image list disagree on the number of pages
    #[error("Page count mismatch: metadata has {pages} pages, got {images} images")]
    PageCountMismatch { pages: usize, images: usize },

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
}

/// Coarse failure classes, one per stage of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Decode,
    Io,
    Validation,
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Client(_) | Error::Http { .. } | Error::HttpStatus { .. } => ErrorKind::Network,
            Error::InvalidUrl(_) => ErrorKind::Validation,
            Error::Decode(_) | Error::NoPages(_) => ErrorKind::Decode,
            Error::Pdf(_)
            | Error::MalformedPdf(_)
            | Error::Io(_)
            | Error::Image { .. }
            | Error::FileNotFound(_) => ErrorKind::Io,
            Error::InvalidResumeId(_) | Error::PageCountMismatch { .. } => ErrorKind::Validation,
        }
    }
}
