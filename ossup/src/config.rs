//! Configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable overrides. The file path
//! defaults to `config.yaml` and can be set with `-f` or the `OSSUP_CONFIG` environment variable.
//! A missing file is not an error: every field has a default.
//!
//! ## Loading Priority
//!
//! 1. **Defaults** - the built-in presign target
//! 2. **YAML config file**
//! 3. **Environment variables** prefixed with `OSSUP_`, using `__` for nesting
//!
//! ```bash
//! # Point at a different deployment target
//! OSSUP_PRESIGN__ENDPOINT=https://staging-backend.example/get-presign
//! ```
//!
//! Each deployment target is a separate config file (or set of env vars); the client code is
//! the same for all of them.

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use crate::error::Error;

/// Presign endpoint used when nothing else is configured.
pub const DEFAULT_PRESIGN_ENDPOINT: &str = "https://ocr-backend.sanbei101.tech/get-presign";

/// Upload files to object storage through presigned URLs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "OSSUP_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without uploading anything.
    #[arg(long)]
    pub validate: bool,

    /// Only request signed URLs and print them; do not upload.
    #[arg(long)]
    pub presign_only: bool,

    /// Files to upload, in order
    #[arg(required_unless_present = "validate")]
    pub files: Vec<PathBuf>,
}

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Presign backend the client talks to
    pub presign: PresignConfig,
}

/// Where and how to request signed URLs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PresignConfig {
    /// Full URL of the presign endpoint
    pub endpoint: Url,
    /// Query parameter carrying the object name
    pub object_name_param: String,
    /// Field of the JSON response holding the signed URL
    pub url_field: String,
}

impl Default for PresignConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_PRESIGN_ENDPOINT).expect("default presign endpoint is a valid URL"),
            object_name_param: "objectName".to_string(),
            url_field: "url".to_string(),
        }
    }
}

impl PresignConfig {
    pub fn with_endpoint(endpoint: Url) -> Self {
        Self {
            endpoint,
            ..Default::default()
        }
    }
}

impl Config {
    /// Load configuration from defaults, the YAML file and the environment.
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        Self::figment(args).extract()
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::file(&args.config))
            .merge(Env::prefixed("OSSUP_").split("__").ignore(&["CONFIG"]))
    }

    /// Reject configurations the client could never work with.
    pub fn validate(&self) -> Result<(), Error> {
        let presign = &self.presign;
        if !matches!(presign.endpoint.scheme(), "http" | "https") {
            return Err(Error::InvalidInput(format!(
                "presign.endpoint must be an http(s) URL, got scheme '{}'",
                presign.endpoint.scheme()
            )));
        }
        if presign.object_name_param.trim().is_empty() {
            return Err(Error::InvalidInput("presign.object_name_param must not be empty".to_string()));
        }
        if presign.url_field.trim().is_empty() {
            return Err(Error::InvalidInput("presign.url_field must not be empty".to_string()));
        }
        Ok(())
    }
}
