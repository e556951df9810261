use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use csr_core::model::program::ReportFile;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::error::AdminError;

/// Writes downloaded reports to a folder, never overwriting an older copy.
#[derive(Debug, Clone)]
pub struct ReportDownloads {
    dir: PathBuf,
}

impl ReportDownloads {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The user's download folder, or the working directory if there is none.
    #[must_use]
    pub fn user_default() -> Self {
        Self::new(dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// # Errors
    ///
    /// Returns `AdminError::Io` if the folder cannot be created or written.
    pub async fn save(&self, file: &ReportFile) -> Result<PathBuf, AdminError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let (path, mut out) = self.create_fresh(&file.file_name).await?;
        out.write_all(&file.bytes).await?;
        out.flush().await?;
        info!(path = %path.display(), "report saved");
        Ok(path)
    }

    /// Creates the first name in `name`, `name (1)`, `name (2)`, ... that
    /// does not exist yet. Creation is exclusive, so an existing file is
    /// never opened for writing.
    async fn create_fresh(&self, file_name: &str) -> Result<(PathBuf, File), AdminError> {
        let (stem, ext) = match file_name.rsplit_once('.') {
            Some((stem, ext)) => (stem, Some(ext)),
            None => (file_name, None),
        };
        let mut n = 0u32;
        loop {
            let name = match (n, ext) {
                (0, _) => file_name.to_string(),
                (_, Some(ext)) => format!("{stem} ({n}).{ext}"),
                (_, None) => format!("{stem} ({n})"),
            };
            let path = self.dir.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path).await {
                Ok(out) => return Ok((path, out)),
                Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                    n = n.checked_add(1).ok_or(err)?;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csr_core::model::program::ReportFormat;

    fn pdf(bytes: &[u8]) -> ReportFile {
        ReportFile {
            file_name: "q1-progress-report.pdf".into(),
            format: ReportFormat::Pdf,
            bytes: bytes.to_vec(),
        }
    }

    #[tokio::test]
    async fn second_save_gets_a_numbered_name() {
        let dir = tempfile::tempdir().unwrap();
        let downloads = ReportDownloads::new(dir.path());

        let first = downloads.save(&pdf(b"%PDF-1.4")).await.unwrap();
        let second = downloads.save(&pdf(b"%PDF-1.4")).await.unwrap();
        assert_eq!(first.file_name().unwrap(), "q1-progress-report.pdf");
        assert_eq!(second.file_name().unwrap(), "q1-progress-report (1).pdf");
        assert_eq!(std::fs::read(&second).unwrap(), b"%PDF-1.4");
    }

    #[tokio::test]
    async fn existing_files_are_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("q1-progress-report.pdf"), b"mine").unwrap();
        std::fs::write(dir.path().join("q1-progress-report (1).pdf"), b"also mine").unwrap();
        let downloads = ReportDownloads::new(dir.path());

        let saved = downloads.save(&pdf(b"%PDF-1.4")).await.unwrap();
        assert_eq!(saved.file_name().unwrap(), "q1-progress-report (2).pdf");
        assert_eq!(std::fs::read(dir.path().join("q1-progress-report.pdf")).unwrap(), b"mine");
        assert_eq!(
            std::fs::read(dir.path().join("q1-progress-report (1).pdf")).unwrap(),
            b"also mine"
        );
    }

    #[tokio::test]
    async fn unusable_folder_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-folder");
        std::fs::write(&blocker, b"").unwrap();
        let downloads = ReportDownloads::new(blocker.join("reports"));

        let err = downloads.save(&pdf(b"%PDF-1.4")).await.unwrap_err();
        assert!(matches!(err, AdminError::Io(_)));
    }
}
