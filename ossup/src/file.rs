//! File references handed to the upload client.
//!
//! A file is anything with a name and a full byte content. The name becomes the object name
//! sent to the presign backend; the content is sent as one `PUT` body.

use crate::error::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};

/// Read-only handle to a named blob of bytes.
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Name used as the object name when presigning.
    fn name(&self) -> &str;

    /// Materialise the whole content in memory.
    async fn read_all(&self) -> Result<Bytes>;
}

/// File whose content is already in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryFile {
    name: String,
    content: Bytes,
}

impl InMemoryFile {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

#[async_trait]
impl FileSource for InMemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_all(&self) -> Result<Bytes> {
        Ok(self.content.clone())
    }
}

/// File on the local filesystem, read when the upload happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
}

impl LocalFile {
    /// The object name is the last path component. Paths without one (`/`, `..`) are rejected.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::InvalidInput(format!("path '{}' has no file name", path.display())))?;
        Ok(Self { path, name })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FileSource for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_all(&self) -> Result<Bytes> {
        let content = tokio::fs::read(&self.path).await?;
        tracing::trace!(path = %self.path.display(), len = content.len(), "Read file into memory");
        Ok(Bytes::from(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_in_memory_file() {
        let file = InMemoryFile::new("report.pdf", &b"%PDF-1.4"[..]);
        assert_eq!(file.name(), "report.pdf");
        assert_eq!(file.read_all().await.unwrap().as_ref(), b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_local_file_reads_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        let mut handle = std::fs::File::create(&path).unwrap();
        handle.write_all(&[0x89, b'P', b'N', b'G', 0x00, 0xff]).unwrap();

        let file = LocalFile::new(&path).unwrap();
        assert_eq!(file.name(), "scan.png");
        assert_eq!(file.path(), path.as_path());
        assert_eq!(file.read_all().await.unwrap().as_ref(), &[0x89, b'P', b'N', b'G', 0x00, 0xff]);
    }

    #[tokio::test]
    async fn test_local_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = LocalFile::new(dir.path().join("missing.txt")).unwrap();
        assert!(matches!(file.read_all().await, Err(Error::Io(_))));
    }

    #[test]
    fn test_local_file_without_name() {
        assert!(matches!(LocalFile::new("/"), Err(Error::InvalidInput(_))));
        assert!(matches!(LocalFile::new("foo/.."), Err(Error::InvalidInput(_))));
    }
}
