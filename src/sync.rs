use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::maven::emitter::DocumentEmitter;
use crate::maven::metadata_builder::MetadataBuilder;
use crate::maven::scanner::ArtifactScanner;
use crate::maven::snapshot::SnapshotRenamer;
use crate::repo_fs::RepoFs;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SyncPolicy {
    pub write_checksums: bool,
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SyncReport {
    pub release_documents: usize,
    pub snapshot_documents: usize,
    pub renamed_files: usize,
}

/// Brings the maven-metadata.xml files below `root` in line with the artifacts that are actually
///  there, renumbering snapshot files on the way.
///
/// The repository is scanned once. Artifact level documents are written first, then every
///  snapshot version is renumbered and gets its version level document. The first failure aborts
///  the whole run, possibly leaving a snapshot version partially renamed.
///
/// Whether anything is actually modified is up to `fs`.
///
/// Must not run concurrently with another sync on the same directory tree.
pub async fn sync_repository(root: &Path, fs: &dyn RepoFs, policy: &SyncPolicy, now: DateTime<Utc>) -> anyhow::Result<SyncReport> {
    info!("synchronizing metadata in {} ({})", root.display(), if fs.is_dry_run() { "dry run" } else { "committing" });

    let scan = ArtifactScanner::new(root).scan().await?;

    let builder = MetadataBuilder::new(now);
    let emitter = DocumentEmitter::new(fs, policy.write_checksums);
    let renamer = SnapshotRenamer::new(fs);

    let mut report = SyncReport::default();

    for (group_id, artifact_id, artifact) in scan.artifacts() {
        let metadata = builder.release_metadata(group_id, artifact_id, artifact)?;
        emitter.emit(&artifact.directory, &metadata).await?;
        report.release_documents += 1;
    }

    for (group_id, artifact_id, artifact) in scan.artifacts() {
        for entry in artifact.versions.values().filter(|v| v.version.is_snapshot()) {
            let renaming = renamer.rename(group_id, artifact_id, entry).await?;
            let metadata = builder.snapshot_metadata(group_id, artifact_id, entry, &renaming);
            emitter.emit(&entry.directory, &metadata).await?;

            report.snapshot_documents += 1;
            report.renamed_files += renaming.renamed_file_count();
        }
    }

    info!("wrote {} artifact and {} snapshot metadata documents, renamed {} files",
        report.release_documents, report.snapshot_documents, report.renamed_files);
    Ok(report)
}
