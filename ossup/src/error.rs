use thiserror::Error as ThisError;

/// Result type for upload client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while presigning or uploading.
///
/// The first two variants are the domain failures of the upload flow. Everything
/// below them is passed through from the transport, the filesystem or the JSON
/// decoder without being rewrapped.
#[derive(ThisError, Debug)]
pub enum Error {
    /// The presign backend did not return a usable URL
    #[error("Failed to obtain upload URL")]
    PresignRequestFailed,

    /// The storage write returned a non-2xx status
    #[error("Error occurred during upload")]
    UploadFailed { status: u16 },

    /// The presign backend answered with a non-2xx status
    #[error("Presign endpoint returned HTTP {status}")]
    PresignStatus { status: u16 },

    /// The presign backend returned something that is not an absolute URL
    #[error("Invalid signed URL '{url}': {source}")]
    InvalidSignedUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Invalid local input or configuration
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// HTTP status carried by the error, if the remote side answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::UploadFailed { status } | Error::PresignStatus { status } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
