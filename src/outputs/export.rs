use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::kernel::report::ReportArtifact;

#[derive(Debug, Error)]
pub enum ExportError {
    /// The artifact name would land outside the export directory or is not a
    /// plain file name. It is refused as-is, never rewritten.
    #[error("refusing to write report with unsafe file name '{0}'")]
    UnsafeFilename(String),

    #[error("failed to write report to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single normal path component with no NUL byte.
pub fn is_plain_filename(name: &str) -> bool {
    if name.is_empty() || name.contains('\0') {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(c)), None) if c == name
    )
}

/// Writes the artifact into `dir`, creating the directory if needed.
pub async fn write_artifact(dir: &Path, artifact: &ReportArtifact) -> Result<PathBuf, ExportError> {
    if !is_plain_filename(&artifact.filename) {
        warn!("Export refused: unsafe file name");
        return Err(ExportError::UnsafeFilename(artifact.filename.clone()));
    }

    tokio::fs::create_dir_all(dir).await.map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(&artifact.filename);
    tokio::fs::write(&path, &artifact.bytes)
        .await
        .map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

    info!(bytes = artifact.bytes.len(), "Report exported");
    Ok(path)
}
