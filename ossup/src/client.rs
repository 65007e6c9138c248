//! Presign-then-PUT upload client.
//!
//! [`OssClient`] performs the two steps of a direct-to-storage upload:
//!
//! 1. [`OssClient::request_signed_url`] asks the presign backend for a signed URL for an
//!    object name.
//! 2. [`OssClient::upload_file`] sends the whole file as a single `PUT` to that URL.
//!
//! [`OssClient::upload`] runs both in sequence. Nothing is retried, cached or coordinated
//! across calls: every call is one request/response exchange and failures are returned to the
//! caller as-is.
//!
//! # Example
//! ```no_run
//! use ossup::{InMemoryFile, OssClient, PresignConfig};
//!
//! # async fn run() -> ossup::Result<()> {
//! let client = OssClient::from_config(PresignConfig::default());
//! let file = InMemoryFile::new("report.pdf", &b"%PDF-1.4"[..]);
//!
//! let signed_url = client.request_signed_url_for(&file).await?;
//! client.upload_file(&file, &signed_url).await?;
//! # Ok(())
//! # }
//! ```

use crate::config::PresignConfig;
use crate::error::{Error, Result};
use crate::file::FileSource;
use crate::http::{HttpClient, ReqwestHttpClient, redact};
use crate::signed_url::SignedUrl;

/// Client for one presign backend.
///
/// Cloning is cheap and clones share the underlying transport.
#[derive(Clone)]
pub struct OssClient<H: HttpClient = ReqwestHttpClient> {
    http: H,
    presign: PresignConfig,
}

impl OssClient<ReqwestHttpClient> {
    /// Client using the production reqwest transport.
    pub fn from_config(presign: PresignConfig) -> Self {
        Self::new(ReqwestHttpClient::new(), presign)
    }
}

impl<H: HttpClient> OssClient<H> {
    pub fn new(http: H, presign: PresignConfig) -> Self {
        Self { http, presign }
    }

    pub fn presign_config(&self) -> &PresignConfig {
        &self.presign
    }

    /// Ask the presign backend for a signed upload URL for `object_name`.
    ///
    /// The name is passed through verbatim; the backend is responsible for validating it.
    ///
    /// # Errors
    /// - [`Error::PresignRequestFailed`] if the response has no usable URL field
    /// - [`Error::InvalidSignedUrl`] if the URL field is not an absolute URL
    /// - [`Error::PresignStatus`] if the backend answers with a non-2xx status
    /// - transport and JSON errors are passed through
    #[tracing::instrument(skip(self), fields(endpoint = %self.presign.endpoint))]
    pub async fn request_signed_url(&self, object_name: &str) -> Result<SignedUrl> {
        let response = self
            .http
            .get(
                self.presign.endpoint.as_str(),
                &[(self.presign.object_name_param.as_str(), object_name)],
            )
            .await?;

        if !response.is_success() {
            tracing::warn!(status = response.status, "Presign endpoint returned an error status");
            return Err(Error::PresignStatus {
                status: response.status,
            });
        }

        let body: serde_json::Value = serde_json::from_str(&response.body)?;

        let Some(raw) = extract_url(&body, &self.presign.url_field) else {
            tracing::warn!(field = %self.presign.url_field, "Presign response carried no URL");
            return Err(Error::PresignRequestFailed);
        };

        let signed_url = SignedUrl::parse(raw)?;
        tracing::info!(target_url = %redact(signed_url.as_str()), "Obtained signed URL");

        Ok(signed_url)
    }

    /// Request a signed URL using the file's name as the object name.
    pub async fn request_signed_url_for<F: FileSource + ?Sized>(&self, file: &F) -> Result<SignedUrl> {
        self.request_signed_url(file.name()).await
    }

    /// Upload the whole content of `file` to `signed_url` with a single `PUT`.
    ///
    /// The body is exactly the file's bytes; no content type is set.
    ///
    /// # Errors
    /// - [`Error::UploadFailed`] if the storage endpoint answers with a non-2xx status
    /// - file read and transport errors are passed through
    #[tracing::instrument(skip_all, fields(file = %file.name(), target_url = %redact(signed_url.as_str())))]
    pub async fn upload_file<F: FileSource + ?Sized>(&self, file: &F, signed_url: &SignedUrl) -> Result<()> {
        let content = file.read_all().await?;
        let len = content.len();

        let response = self.http.put(signed_url.as_str(), content).await?;

        if !response.is_success() {
            tracing::warn!(status = response.status, "Upload rejected by storage endpoint");
            return Err(Error::UploadFailed {
                status: response.status,
            });
        }

        tracing::info!(status = response.status, bytes = len, "Upload completed");
        Ok(())
    }

    /// Presign and upload `file` in one go, returning the URL the bytes were written to.
    ///
    /// The upload is only attempted once a signed URL has been obtained.
    pub async fn upload<F: FileSource + ?Sized>(&self, file: &F) -> Result<SignedUrl> {
        let signed_url = self.request_signed_url_for(file).await?;
        self.upload_file(file, &signed_url).await?;
        Ok(signed_url)
    }
}

/// Pull a non-empty string out of `body[field]`.
///
/// Missing fields, `null`, `false`, numbers and empty strings all count as "no URL".
fn extract_url(body: &serde_json::Value, field: &str) -> Option<String> {
    body.get(field)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
