use crate::file::{extension, mime_type};

/// Provenance of the plaintext, carried in the header so the decrypting
/// side can restore the original name and content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub name: String,
    pub extension: String,
    pub mime_type: String,
    pub size: u64,
}

impl Metadata {
    /// Derives extension and MIME type from the file name.
    pub fn from_file(filename: impl Into<String>, size: u64) -> Self {
        let name = filename.into();
        let extension = extension(&name).to_owned();
        let mime_type = mime_type(&extension).to_owned();

        Self { name, extension, mime_type, size }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file() {
        let metadata = Metadata::from_file("Quarterly.Report.DOCX", 42);
        assert_eq!(metadata.extension, ".DOCX");
        assert_eq!(metadata.mime_type, "application/vnd.openxmlformats-officedocument.wordprocessingml.document");
        assert_eq!(metadata.size, 42);
    }

    #[test]
    fn test_from_file_without_extension() {
        let metadata = Metadata::from_file("README", 1);
        assert_eq!(metadata.extension, "");
        assert_eq!(metadata.mime_type, "application/octet-stream");
    }
}
