//! File naming rules and the async file access used by the command line.
//!
//! The engine itself works on byte buffers; everything that touches the
//! filesystem lives here.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};

use crate::config::FILE_EXTENSION;
use crate::encoding::format_bytes;

/// Returns the suffix from the last `.` (inclusive), or `""`.
#[must_use]
pub fn extension(filename: &str) -> &str {
    filename.rfind('.').map_or("", |i| &filename[i..])
}

/// Maps an extension such as `.pdf` to a MIME type, case-insensitively.
#[must_use]
pub fn mime_type(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        ".pdf" => "application/pdf",
        ".doc" => "application/msword",
        ".docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ".xls" => "application/vnd.ms-excel",
        ".xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ".ppt" => "application/vnd.ms-powerpoint",
        ".pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        ".txt" => "text/plain",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".png" => "image/png",
        ".gif" => "image/gif",
        ".mp4" => "video/mp4",
        ".mp3" => "audio/mpeg",
        ".zip" => "application/zip",
        _ => "application/octet-stream",
    }
}

/// Suggested container name: the final extension replaced by `.ufenc`.
///
/// A leading dot is not treated as an extension, so `.env` becomes
/// `.env.ufenc`. The browser tool strips the whole name there and produces
/// a bare `.ufenc`; this crate keeps the name so the container stays
/// recognizable. Only the suggested name differs, the header's
/// `originalFileName` is the same in both.
#[must_use]
pub fn encrypted_file_name(filename: &str) -> String {
    let stem = match filename.rfind('.') {
        Some(i) if i > 0 => &filename[..i],
        _ => filename,
    };
    format!("{stem}{FILE_EXTENSION}")
}

/// A file on disk that is read or written as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    path: PathBuf,
}

impl File {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path component, or `"unknown"`.
    pub fn name(&self) -> String {
        self.path.file_name().map_or_else(|| "unknown".to_owned(), |name| name.to_string_lossy().into_owned())
    }

    #[inline]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Sibling path with `name` as the file name.
    pub fn sibling(&self, name: &str) -> PathBuf {
        // Header-supplied names must not escape the directory.
        let name = Path::new(name).file_name().map_or_else(|| "decrypted".to_owned(), |n| n.to_string_lossy().into_owned());
        self.path.with_file_name(name)
    }

    /// Reads the whole file, refusing anything above `limit` bytes before
    /// allocating for it.
    pub async fn read(&self, limit: u64) -> Result<Vec<u8>> {
        let metadata = tokio::fs::metadata(&self.path).await.with_context(|| format!("failed to get metadata: {}", self.path.display()))?;
        ensure!(metadata.is_file(), "not a regular file: {}", self.path.display());
        ensure!(metadata.len() <= limit, "file too large: {} is {}, maximum is {}", self.path.display(), format_bytes(metadata.len()), format_bytes(limit));

        tokio::fs::read(&self.path).await.with_context(|| format!("failed to read file: {}", self.path.display()))
    }

    pub async fn write(&self, data: &[u8]) -> Result<()> {
        tokio::fs::write(&self.path, data).await.with_context(|| format!("failed to write file: {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension() {
        assert_eq!(extension("report.pdf"), ".pdf");
        assert_eq!(extension("archive.tar.gz"), ".gz");
        assert_eq!(extension("README"), "");
    }

    #[test]
    fn test_mime_type() {
        assert_eq!(mime_type(".PDF"), "application/pdf");
        assert_eq!(mime_type(".jpeg"), "image/jpeg");
        assert_eq!(mime_type(".xyz"), "application/octet-stream");
        assert_eq!(mime_type(""), "application/octet-stream");
    }

    #[test]
    fn test_encrypted_file_name() {
        assert_eq!(encrypted_file_name("report.pdf"), "report.ufenc");
        assert_eq!(encrypted_file_name("archive.tar.gz"), "archive.tar.ufenc");
        assert_eq!(encrypted_file_name("README"), "README.ufenc");
        assert_eq!(encrypted_file_name(".env"), ".env.ufenc");
        assert_eq!(encrypted_file_name(".config.json"), ".config.ufenc");
        assert_ne!(encrypted_file_name(".env"), ".ufenc");
    }

    #[test]
    fn test_sibling_strips_directories() {
        let file = File::new("/tmp/in/report.ufenc");
        assert_eq!(file.sibling("../../etc/passwd"), PathBuf::from("/tmp/in/passwd"));
        assert_eq!(file.sibling("report.pdf"), PathBuf::from("/tmp/in/report.pdf"));
    }

    #[tokio::test]
    async fn test_write_read() {
        let dir = tempfile::tempdir().unwrap();
        let file = File::new(dir.path().join("data.bin"));

        file.write(b"payload").await.unwrap();
        assert!(file.exists());
        assert_eq!(file.read(1024).await.unwrap(), b"payload");

        assert!(file.read(3).await.is_err());
    }

    #[tokio::test]
    async fn test_read_rejects_directory_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(File::new(dir.path()).read(1024).await.is_err());

        let missing = File::new(dir.path().join("missing.ufenc"));
        assert!(!missing.exists());
        assert!(missing.read(1024).await.is_err());
    }
}
