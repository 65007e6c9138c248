//! Client for direct-to-storage uploads through presigned URLs.
//!
//! The flow has two steps, each a single HTTP exchange:
//! - ask a presign backend for a signed URL for an object name (`GET ?objectName=...`)
//! - `PUT` the file's bytes to that URL
//!
//! Failures are returned as [`Error`]; nothing is retried.
//!
//! # Example
//! ```no_run
//! use ossup::{LocalFile, OssClient, PresignConfig};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = OssClient::from_config(PresignConfig::default());
//! let file = LocalFile::new("report.pdf")?;
//!
//! let signed_url = client.upload(&file).await?;
//! println!("uploaded to {signed_url}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod file;
pub mod http;
pub mod signed_url;
pub mod telemetry;

#[cfg(test)]
mod test;

// Re-export commonly used types
pub use client::OssClient;
pub use config::{Config, PresignConfig};
pub use error::{Error, Result};
pub use file::{FileSource, InMemoryFile, LocalFile};
pub use http::{HttpClient, HttpResponse, MockHttpClient, ReqwestHttpClient};
pub use signed_url::SignedUrl;
