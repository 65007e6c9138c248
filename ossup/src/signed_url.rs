use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A pre-signed URL authorising a single write to one storage location.
///
/// The text is kept exactly as the backend returned it: signature parameters are often
/// sensitive to re-encoding, so the value is validated with [`url::Url`] but never normalised.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignedUrl(String);

impl SignedUrl {
    /// Validate `raw` as an absolute URL and wrap it.
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if let Err(source) = url::Url::parse(&raw) {
            return Err(Error::InvalidSignedUrl { url: raw, source });
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromStr for SignedUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for SignedUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SignedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
