pub mod committing;
pub mod dry_run;

use std::path::Path;

use async_trait::async_trait;

/// All modifications the sync performs on a repository go through this trait, so that a dry run can
///  compute exactly the same plan as a committing run without touching the file system.
///
/// Reading (scanning, listing version directories) is done directly and is not part of this trait.
#[async_trait]
pub trait RepoFs: Send + Sync {
    /// true if nothing is actually modified
    fn is_dry_run(&self) -> bool;

    /// Creates a single directory. Fails if the directory exists already.
    async fn create_dir(&self, path: &Path) -> anyhow::Result<()>;

    /// Fails with a `SyncError::RenameFailure`
    async fn rename(&self, from: &Path, to: &Path) -> anyhow::Result<()>;

    /// Removes an empty directory
    async fn remove_dir(&self, path: &Path) -> anyhow::Result<()>;

    async fn write_file(&self, path: &Path, data: &[u8]) -> anyhow::Result<()>;

    /// Writes a metadata document. Separate from `write_file` because a dry run shows documents
    ///  to the user rather than just reporting that they would be written.
    async fn publish_document(&self, path: &Path, data: &[u8]) -> anyhow::Result<()>;
}
