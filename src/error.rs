use std::path::PathBuf;

use thiserror::Error;

use crate::maven::coordinates::{MavenArtifactId, MavenGroupId, MavenVersion};

/// Process exit status for runs that could not determine a version to describe
pub const EXIT_NO_VERSION_FOUND: u8 = 2;

/// Failures that callers need to tell apart. Everything else travels as a plain `anyhow::Error`.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("no version found for {group_id}:{artifact_id}")]
    NoVersionFound {
        group_id: MavenGroupId,
        artifact_id: MavenArtifactId,
    },

    #[error("no timestamped snapshot file found for {group_id}:{artifact_id}:{version}")]
    NoSnapshotTimestamp {
        group_id: MavenGroupId,
        artifact_id: MavenArtifactId,
        version: MavenVersion,
    },

    #[error("failed to rename {} to {}", .from.display(), .to.display())]
    RenameFailure {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("conflicting renames for {file_name} in {}", .directory.display())]
    RenameConflict {
        directory: PathBuf,
        file_name: String,
    },
}
impl SyncError {
    /// true for the errors that mean "there is no version to build a document from"
    pub fn is_no_version_found(&self) -> bool {
        matches!(self, SyncError::NoVersionFound { .. } | SyncError::NoSnapshotTimestamp { .. })
    }
}

/// Maps the outcome of a run to the process exit status.
pub fn exit_status(error: &anyhow::Error) -> u8 {
    match error.downcast_ref::<SyncError>() {
        Some(e) if e.is_no_version_found() => EXIT_NO_VERSION_FOUND,
        _ => 1,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_exit_status_no_version_found() {
        let error: anyhow::Error = SyncError::NoVersionFound {
            group_id: MavenGroupId("com.example".to_string()),
            artifact_id: MavenArtifactId("mylib".to_string()),
        }.into();
        assert_eq!(exit_status(&error), EXIT_NO_VERSION_FOUND);
        assert_eq!(error.to_string(), "no version found for com.example:mylib");
    }

    #[test]
    fn test_exit_status_no_snapshot_timestamp() {
        let error: anyhow::Error = SyncError::NoSnapshotTimestamp {
            group_id: MavenGroupId("com.example".to_string()),
            artifact_id: MavenArtifactId("mylib".to_string()),
            version: MavenVersion("1.0-SNAPSHOT".to_string()),
        }.into();
        assert_eq!(exit_status(&error), EXIT_NO_VERSION_FOUND);
    }

    #[test]
    fn test_exit_status_other() {
        let error: anyhow::Error = SyncError::RenameFailure {
            from: PathBuf::from("a"),
            to: PathBuf::from("b"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        }.into();
        assert_eq!(exit_status(&error), 1);

        let error: anyhow::Error = SyncError::RenameConflict {
            directory: PathBuf::from("repo/a/1.0-SNAPSHOT"),
            file_name: "a-1.0-20230101.000000-1.pom".to_string(),
        }.into();
        assert_eq!(exit_status(&error), 1);

        assert_eq!(exit_status(&anyhow::anyhow!("anything")), 1);
    }
}
