//! File exports: the training report (CSV) and printable certificates (HTML)

mod certificate;
mod report;

pub use certificate::{write_certificate, CertificateDocument};
pub use report::{report_file_name, training_report_csv, write_training_report, REPORT_HEADERS};

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while exporting
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV encoding failed
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Certificate template failed to render
    #[error("Failed to render certificate: {0}")]
    Template(#[from] askama::Error),

    /// Writing the output file failed
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        /// Output path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// Create `dir` if needed and write `contents` to `dir/file_name`
fn write_file(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(file_name);
    std::fs::write(&path, contents).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    crate::info!("Wrote {}", path.display());
    Ok(path)
}
