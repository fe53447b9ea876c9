use pinvault_core::UploadFile;
use std::io;
use std::path::Path;

/// Read a local file for upload, guessing its MIME type from the extension.
pub async fn read_upload_file(path: &Path) -> io::Result<UploadFile> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Not a file path: {}", path.display()),
            )
        })?
        .to_string();

    let bytes = tokio::fs::read(path).await?;
    let file_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    tracing::debug!(
        path = %path.display(),
        file_type = %file_type,
        size_bytes = bytes.len(),
        "Read upload file"
    );

    Ok(UploadFile::new(file_name, file_type, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_bytes_name_and_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        tokio::fs::write(&path, b"hello").await.unwrap();

        let file = read_upload_file(&path).await.unwrap();
        assert_eq!(file.file_name, "notes.txt");
        assert_eq!(file.file_type, "text/plain");
        assert_eq!(file.size(), 5);
    }

    #[tokio::test]
    async fn unknown_extension_is_octet_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.zzzunknown");
        tokio::fs::write(&path, b"x").await.unwrap();

        let file = read_upload_file(&path).await.unwrap();
        assert_eq!(file.file_type, "application/octet-stream");
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_upload_file(&dir.path().join("gone.png")).await.is_err());
    }
}
