use crate::types::Result;
use std::path::Path;
use tracing::info;

/// Write a rendered artifact, creating parent directories as needed.
pub async fn write_artifact(dest: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(dest, contents).await?;
    info!("Wrote {} ({} bytes)", dest.display(), contents.len());
    Ok(())
}
