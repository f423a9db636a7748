use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::anyhow;
use async_trait::async_trait;
use tracing::info;

use crate::repo_fs::RepoFs;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PlannedOperation {
    CreateDir(PathBuf),
    Rename { from: PathBuf, to: PathBuf },
    RemoveDir(PathBuf),
    WriteFile { path: PathBuf, data: Vec<u8> },
}

/// Leaves the file system alone: every modification is reported and recorded instead, and published
///  documents are written to `output` (stdout when running the binary).
pub struct DryRunRepoFs {
    output: Mutex<Box<dyn Write + Send>>,
    journal: Mutex<Vec<PlannedOperation>>,
}
impl DryRunRepoFs {
    pub fn new(output: impl Write + Send + 'static) -> DryRunRepoFs {
        DryRunRepoFs {
            output: Mutex::new(Box::new(output)),
            journal: Default::default(),
        }
    }

    /// all operations so far, in the order they were requested
    pub fn planned_operations(&self) -> Vec<PlannedOperation> {
        match self.journal.lock() {
            Ok(journal) => journal.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn record(&self, operation: PlannedOperation) -> anyhow::Result<()> {
        self.journal.lock()
            .map_err(|_| anyhow!("dry run journal is poisoned"))?
            .push(operation);
        Ok(())
    }
}

#[async_trait]
impl RepoFs for DryRunRepoFs {
    fn is_dry_run(&self) -> bool {
        true
    }

    async fn create_dir(&self, path: &Path) -> anyhow::Result<()> {
        info!("dry run: would create directory {}", path.display());
        self.record(PlannedOperation::CreateDir(path.to_path_buf()))
    }

    async fn rename(&self, from: &Path, to: &Path) -> anyhow::Result<()> {
        info!("dry run: would rename {} to {}", from.display(), to.display());
        self.record(PlannedOperation::Rename { from: from.to_path_buf(), to: to.to_path_buf() })
    }

    async fn remove_dir(&self, path: &Path) -> anyhow::Result<()> {
        info!("dry run: would remove directory {}", path.display());
        self.record(PlannedOperation::RemoveDir(path.to_path_buf()))
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> anyhow::Result<()> {
        info!("dry run: would write {} ({} bytes)", path.display(), data.len());
        self.record(PlannedOperation::WriteFile { path: path.to_path_buf(), data: data.to_vec() })
    }

    async fn publish_document(&self, path: &Path, data: &[u8]) -> anyhow::Result<()> {
        self.write_file(path, data).await?;

        let mut output = self.output.lock()
            .map_err(|_| anyhow!("dry run output is poisoned"))?;
        output.write_all(data)?;
        output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;
    use super::*;

    /// collects output so tests can look at it after the repo fs took ownership
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);
    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_records_without_touching_file_system() {
        let dir = tempfile::tempdir().unwrap();
        let fs = DryRunRepoFs::new(std::io::sink());

        let temp = dir.path().join("tmp");
        let file = dir.path().join("a.jar");
        fs.create_dir(&temp).await.unwrap();
        fs.rename(&file, &temp.join("b.jar")).await.unwrap();
        fs.remove_dir(&temp).await.unwrap();
        fs.write_file(&file, b"x").await.unwrap();

        assert!(fs.is_dry_run());
        assert!(!temp.exists());
        assert!(!file.exists());
        assert_eq!(fs.planned_operations(), vec![
            PlannedOperation::CreateDir(temp.clone()),
            PlannedOperation::Rename { from: file.clone(), to: temp.join("b.jar") },
            PlannedOperation::RemoveDir(temp.clone()),
            PlannedOperation::WriteFile { path: file.clone(), data: b"x".to_vec() },
        ]);
    }

    #[tokio::test]
    async fn test_published_documents_go_to_output() {
        let buffer = SharedBuffer::default();
        let fs = DryRunRepoFs::new(buffer.clone());

        fs.publish_document(Path::new("/repo/maven-metadata.xml"), b"<metadata/>\n").await.unwrap();
        fs.write_file(Path::new("/repo/maven-metadata.xml.md5"), b"abc").await.unwrap();

        assert_eq!(buffer.0.lock().unwrap().as_slice(), b"<metadata/>\n");
        assert_eq!(fs.planned_operations().len(), 2);
    }
}
