use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_recursion::async_recursion;
use tokio::fs::read_dir;
use tracing::{debug, trace};

use crate::maven::coordinates::*;
use crate::maven::paths::{ids, relative_artifact_path};
use crate::maven::snapshot::TEMP_DIRECTORY_PREFIX;

const ARTIFACT_EXTENSION: &str = ".jar";
const VCS_DIRECTORY: &str = ".git";

/// Everything that was found below one version directory
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ArtifactVersionEntry {
    pub version: MavenVersion,
    /// file names of the artifact files in traversal order - never empty
    pub files: Vec<String>,
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ArtifactEntry {
    /// the artifact directory, i.e. the parent of all version directories
    pub directory: PathBuf,
    pub versions: BTreeMap<MavenVersion, ArtifactVersionEntry>,
}

/// groupId -> artifactId -> version, built by a single full scan and read-only afterwards
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ScanResult {
    pub groups: BTreeMap<MavenGroupId, BTreeMap<MavenArtifactId, ArtifactEntry>>,
}
impl ScanResult {
    pub fn artifacts(&self) -> impl Iterator<Item=(&MavenGroupId, &MavenArtifactId, &ArtifactEntry)> {
        self.groups.iter()
            .flat_map(|(group_id, artifacts)| artifacts.iter()
                .map(move |(artifact_id, entry)| (group_id, artifact_id, entry))
            )
    }

    pub fn version_count(&self) -> usize {
        self.artifacts()
            .map(|(_, _, artifact)| artifact.versions.len())
            .sum()
    }

    fn insert(&mut self, group_id: MavenGroupId, artifact_id: MavenArtifactId, artifact_dir: &Path, version_dir: &Path, version: MavenVersion, file_name: String) {
        let artifact = self.groups
            .entry(group_id)
            .or_default()
            .entry(artifact_id)
            .or_insert_with(|| ArtifactEntry {
                directory: artifact_dir.to_path_buf(),
                versions: BTreeMap::new(),
            });

        artifact.versions
            .entry(version.clone())
            .or_insert_with(|| ArtifactVersionEntry {
                version,
                files: Vec::new(),
                directory: version_dir.to_path_buf(),
            })
            .files
            .push(file_name);
    }
}

/// Walks a local repository directory and classifies all artifact files by their position in the
///  `<group path>/<artifactId>/<version>/<file>` layout.
///
/// The scan only reads from the file system. Symbolic links are ignored. The `.git` directory and
///  temporary directories left behind by an interrupted snapshot renaming are skipped entirely.
pub struct ArtifactScanner {
    root: PathBuf,
}
impl ArtifactScanner {
    pub fn new(root: impl Into<PathBuf>) -> ArtifactScanner {
        ArtifactScanner {
            root: root.into(),
        }
    }

    pub async fn scan(&self) -> anyhow::Result<ScanResult> {
        let mut result = ScanResult::default();
        self.scan_dir(&self.root, &mut result).await?;

        debug!("scanned {}: {} artifacts, {} versions", self.root.display(), result.artifacts().count(), result.version_count());
        Ok(result)
    }

    #[async_recursion]
    async fn scan_dir(&self, dir: &Path, result: &mut ScanResult) -> anyhow::Result<()> {
        let mut entries = Vec::new();
        let mut read = read_dir(dir).await?;
        while let Some(entry) = read.next_entry().await? {
            entries.push(entry);
        }
        // read_dir order is platform dependent - sorting makes the traversal order reproducible
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let file_type = entry.file_type().await?;
            let file_name = entry.file_name().to_string_lossy().into_owned();

            if file_type.is_dir() {
                if file_name == VCS_DIRECTORY || file_name.starts_with(TEMP_DIRECTORY_PREFIX) {
                    trace!("skipping {}", entry.path().display());
                    continue;
                }
                self.scan_dir(&entry.path(), result).await?;
            }
            else if file_type.is_file() && file_name.ends_with(ARTIFACT_EXTENSION) {
                self.classify(dir, file_name, result);
            }
        }
        Ok(())
    }

    fn classify(&self, version_dir: &Path, file_name: String, result: &mut ScanResult) {
        let (artifact_dir, version) = match (version_dir.parent(), version_dir.file_name()) {
            (Some(parent), Some(version)) => (parent, version.to_string_lossy().into_owned()),
            _ => {
                debug!("ignoring {} in {}: not inside a version directory", file_name, version_dir.display());
                return;
            }
        };

        let relative = match relative_artifact_path(&self.root, artifact_dir) {
            Some(relative) => relative,
            None => {
                debug!("ignoring {} in {}: no artifact directory below the repository root", file_name, version_dir.display());
                return;
            }
        };

        let (group_id, artifact_id) = ids(&relative);
        trace!("found {} for {}:{}:{}", file_name, group_id, artifact_id, version);
        result.insert(group_id, artifact_id, artifact_dir, version_dir, MavenVersion(version), file_name);
    }
}
