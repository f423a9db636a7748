use std::collections::BTreeSet;
use std::path::Path;

use tokio::fs::read_dir;
use tracing::{error, info, trace};
use uuid::Uuid;

use crate::error::SyncError;
use crate::maven::coordinates::*;
use crate::maven::metadata_xml::{Snapshot, SnapshotVersion};
use crate::maven::paths::{file_stem, is_checksum_file, snapshot_timestamp};
use crate::maven::scanner::ArtifactVersionEntry;
use crate::repo_fs::RepoFs;

/// Name prefix of the temporary directories that renaming creates inside a version directory
pub const TEMP_DIRECTORY_PREFIX: &str = ".snapshot-renaming-";

/// New name for one artifact file of a snapshot version, together with all files that belong to it
///  (pom, signatures, checksums, ...)
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RenamePlan {
    pub old_stem: String,
    pub new_stem: String,
    /// empty if the original file name did not contain a timestamp
    pub timestamp: String,
    pub build_number: u32,
    /// names of all files in the version directory that start with `<old_stem>.`, sorted
    pub related_files: Vec<String>,
}
impl RenamePlan {
    /// the new name of one of the related files: the stem is replaced, the extension chain is kept
    pub fn renamed(&self, file_name: &str) -> String {
        format!("{}{}", self.new_stem, &file_name[self.old_stem.len()..])
    }
}

/// The outcome of renumbering one snapshot version: what gets renamed, and what goes into the
///  version level maven-metadata.xml
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SnapshotRenaming {
    pub plans: Vec<RenamePlan>,
    pub snapshot: Snapshot,
    pub snapshot_versions: Vec<SnapshotVersion>,
}
impl SnapshotRenaming {
    pub fn renamed_file_count(&self) -> usize {
        self.plans.iter()
            .map(|p| p.related_files.len())
            .sum()
    }
}

/// Computes the renaming of a snapshot version without touching the file system.
///
/// Build numbers are assigned 1..N in the lexicographic order of the artifact file names, i.e. they
///  do not reflect the actual upload order. `directory_files` are the names of all regular files in
///  the version directory. Renaming must never replace a file that is not renamed itself, so a
///  target name that is taken by such a file fails the whole version before anything is moved.
pub fn plan_snapshot_renaming(
    group_id: &MavenGroupId,
    artifact_id: &MavenArtifactId,
    entry: &ArtifactVersionEntry,
    directory_files: &[String],
) -> anyhow::Result<SnapshotRenaming> {
    let plain_version = match entry.version.plain_version() {
        Some(v) => v,
        None => return Err(anyhow::Error::msg(format!("not a snapshot version: {}", entry.version))),
    };

    let mut files = entry.files.clone();
    files.sort();

    let mut directory_files = directory_files.to_vec();
    directory_files.sort();

    let mut plans = Vec::with_capacity(files.len());
    let mut build_number = 0u32;
    for file_name in &files {
        build_number += 1;

        let timestamp = snapshot_timestamp(file_name, artifact_id, plain_version)
            .unwrap_or_default()
            .to_string();
        if timestamp.is_empty() {
            trace!("no timestamp in {}", file_name);
        }

        let old_stem = file_stem(file_name).to_string();
        let prefix = format!("{}.", old_stem);
        let related_files = directory_files.iter()
            .filter(|f| f.starts_with(&prefix))
            .cloned()
            .collect();

        let new_stem = format!("{}-{}-{}-{}", artifact_id, plain_version, timestamp, build_number);
        trace!("{} -> {} (build number {})", old_stem, new_stem, build_number);

        plans.push(RenamePlan {
            new_stem,
            old_stem,
            timestamp,
            build_number,
            related_files,
        });
    }

    if plans.iter().all(|p| p.timestamp.is_empty()) {
        return Err(SyncError::NoSnapshotTimestamp {
            group_id: group_id.clone(),
            artifact_id: artifact_id.clone(),
            version: entry.version.clone(),
        }.into());
    }

    check_rename_targets(entry, &directory_files, &plans)?;

    let value_prefix = format!("{}-", artifact_id);
    let mut snapshot_versions = Vec::new();
    for plan in &plans {
        let value = plan.new_stem.strip_prefix(value_prefix.as_str()).unwrap_or(plan.new_stem.as_str());
        let updated = plan.timestamp.replace('.', "");

        for file_name in plan.related_files.iter().filter(|f| !is_checksum_file(f)) {
            snapshot_versions.push(SnapshotVersion {
                extension: file_name[plan.old_stem.len()+1..].to_string(),
                value: value.to_string(),
                updated: updated.clone(),
            });
        }
    }

    let snapshot = Snapshot {
        timestamp: plans.last().map(|p| p.timestamp.clone()).unwrap_or_default(),
        buildNumber: build_number,
    };

    Ok(SnapshotRenaming {
        plans,
        snapshot,
        snapshot_versions,
    })
}

/// every file is moved at most once, and onto a name that no file outside the renaming has
fn check_rename_targets(entry: &ArtifactVersionEntry, directory_files: &[String], plans: &[RenamePlan]) -> Result<(), SyncError> {
    let conflict = |file_name: &str| SyncError::RenameConflict {
        directory: entry.directory.clone(),
        file_name: file_name.to_string(),
    };

    let mut sources = BTreeSet::new();
    for file_name in plans.iter().flat_map(|p| p.related_files.iter()) {
        if !sources.insert(file_name.as_str()) {
            return Err(conflict(file_name));
        }
    }

    let mut targets = BTreeSet::new();
    for plan in plans {
        for file_name in &plan.related_files {
            let target = plan.renamed(file_name);
            let overwrites_untouched = directory_files.contains(&target) && !sources.contains(target.as_str());
            if overwrites_untouched || !targets.insert(target.clone()) {
                return Err(conflict(&target));
            }
        }
    }
    Ok(())
}

/// Renames the files of snapshot versions so that they carry consecutive build numbers.
///
/// Renaming is done in two phases via a fresh temporary directory inside the version directory,
///  because old and new names can overlap (a file may need to take over the name of a file that has
///  not been renamed yet). This is not transactional: if a rename fails, the version directory is
///  left partially renamed and the temporary directory keeps whatever was moved there.
pub struct SnapshotRenamer<'a> {
    fs: &'a dyn RepoFs,
}
impl <'a> SnapshotRenamer<'a> {
    pub fn new(fs: &'a dyn RepoFs) -> SnapshotRenamer<'a> {
        SnapshotRenamer {
            fs,
        }
    }

    pub async fn rename(&self, group_id: &MavenGroupId, artifact_id: &MavenArtifactId, entry: &ArtifactVersionEntry) -> anyhow::Result<SnapshotRenaming> {
        let directory_files = list_files(&entry.directory).await?;
        let renaming = plan_snapshot_renaming(group_id, artifact_id, entry, &directory_files)?;

        info!("renumbering {} files of {}:{}:{} in {}",
            renaming.renamed_file_count(), group_id, artifact_id, entry.version, entry.directory.display());
        self.apply(&entry.directory, &renaming.plans).await?;
        Ok(renaming)
    }

    async fn apply(&self, directory: &Path, plans: &[RenamePlan]) -> anyhow::Result<()> {
        let temp_directory = directory.join(format!("{}{}", TEMP_DIRECTORY_PREFIX, Uuid::new_v4().as_hyphenated()));

        // fails if the directory exists, so there can be no leftovers from somewhere else in it
        self.fs.create_dir(&temp_directory).await?;

        let result = self.move_via(directory, &temp_directory, plans).await;

        // NB: this fails if files remain in the temporary directory after a failed rename. They are
        //  left there for manual recovery.
        let cleanup = self.fs.remove_dir(&temp_directory).await;

        match (result, cleanup) {
            (Ok(()), cleanup) => cleanup,
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(cleanup_error)) => {
                error!("error removing temporary directory {} after failed renaming: {}", temp_directory.display(), cleanup_error);
                Err(e)
            }
        }
    }

    async fn move_via(&self, directory: &Path, temp_directory: &Path, plans: &[RenamePlan]) -> anyhow::Result<()> {
        let moves: Vec<(&str, String)> = plans.iter()
            .flat_map(|plan| plan.related_files.iter()
                .map(move |f| (f.as_str(), plan.renamed(f)))
            )
            .collect();

        for (old_name, new_name) in &moves {
            self.fs.rename(&directory.join(old_name), &temp_directory.join(new_name)).await?;
        }
        for (_, new_name) in &moves {
            self.fs.rename(&temp_directory.join(new_name), &directory.join(new_name)).await?;
        }
        Ok(())
    }
}

/// names of the regular files directly inside a directory
async fn list_files(directory: &Path) -> anyhow::Result<Vec<String>> {
    let mut result = Vec::new();
    let mut entries = read_dir(directory).await?;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            result.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(result)
}
