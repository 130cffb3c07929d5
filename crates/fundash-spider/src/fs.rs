use crate::section::{Section, Symbol};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::trace;

/// Deterministic location of the cached spreadsheet for `symbol` and `section`:
/// `{data_dir}/{symbol}_financials_{suffix}.xlsx`.
pub fn cache_path(data_dir: &Path, symbol: &Symbol, section: Section) -> PathBuf {
    data_dir.join(format!(
        "{symbol}_financials_{suffix}.xlsx",
        suffix = section.file_suffix()
    ))
}

/// Whether a file is already present at `path`. Any error reading the metadata counts as absent.
pub async fn exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

/// Write `bytes` to `path`, creating the parent directory as necessary.
///
/// Each call writes into its own temporary sibling, which is renamed into place once complete;
/// concurrent writers never share a file and `path` only ever holds one whole body. The
/// temporary file is removed when any step fails.
pub async fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir_path = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };

    // ensure the directory exists
    trace!("checking directory path: {:?}", dir_path);
    tokio::fs::create_dir_all(&dir_path).await?;

    let (file, part) = tempfile::Builder::new()
        .prefix(".fundash-")
        .suffix(".part")
        .tempfile_in(&dir_path)?
        .into_parts();

    trace!("writing {} bytes to {:?}", bytes.len(), part);
    let mut file = tokio::fs::File::from_std(file);
    file.write_all(bytes).await?;
    file.sync_all().await?;
    drop(file);

    trace!("renaming {:?} to {:?}", part, path);
    part.persist(path)?;

    Ok(())
}
