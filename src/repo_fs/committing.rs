use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use tokio::fs::{create_dir, OpenOptions, remove_dir, rename};
use tokio::io::AsyncWriteExt;
use tracing::{info, trace};

use crate::error::SyncError;
use crate::repo_fs::RepoFs;

/// Applies all changes to the file system
pub struct CommittingRepoFs {
}
impl CommittingRepoFs {
    pub fn new() -> CommittingRepoFs {
        CommittingRepoFs {}
    }
}

#[async_trait]
impl RepoFs for CommittingRepoFs {
    fn is_dry_run(&self) -> bool {
        false
    }

    async fn create_dir(&self, path: &Path) -> anyhow::Result<()> {
        trace!("creating directory {}", path.display());
        create_dir(path).await
            .with_context(|| format!("failed to create directory {}", path.display()))
    }

    async fn rename(&self, from: &Path, to: &Path) -> anyhow::Result<()> {
        trace!("renaming {} to {}", from.display(), to.display());
        match rename(from, to).await {
            Ok(()) => Ok(()),
            Err(source) => Err(SyncError::RenameFailure {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
                source,
            }.into()),
        }
    }

    async fn remove_dir(&self, path: &Path) -> anyhow::Result<()> {
        trace!("removing directory {}", path.display());
        remove_dir(path).await
            .with_context(|| format!("failed to remove directory {}", path.display()))
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> anyhow::Result<()> {
        trace!("writing {} bytes to {}", data.len(), path.display());

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .await
            .with_context(|| format!("failed to open {} for writing", path.display()))?;
        file.write_all(data).await?;
        file.flush().await?;
        Ok(())
    }

    async fn publish_document(&self, path: &Path, data: &[u8]) -> anyhow::Result<()> {
        self.write_file(path, data).await?;
        info!("wrote {}", path.display());
        Ok(())
    }
}
