use chrono::{DateTime, Utc};

use crate::error::SyncError;
use crate::maven::coordinates::*;
use crate::maven::metadata_xml::*;
use crate::maven::scanner::{ArtifactEntry, ArtifactVersionEntry};
use crate::maven::snapshot::SnapshotRenaming;

/// format of the `lastUpdated` element
const LAST_UPDATED_FORMAT: &str = "%Y%m%d%H%M%S";

/// Builds maven-metadata.xml documents from scan results.
///
/// The time stamp is fixed when the builder is created, so all documents of a run carry the same
///  `lastUpdated`.
pub struct MetadataBuilder {
    last_updated: String,
}
impl MetadataBuilder {
    pub fn new(now: DateTime<Utc>) -> MetadataBuilder {
        MetadataBuilder {
            last_updated: now.format(LAST_UPDATED_FORMAT).to_string(),
        }
    }

    /// The artifact level document, listing all versions in scan order
    pub fn release_metadata(&self, group_id: &MavenGroupId, artifact_id: &MavenArtifactId, artifact: &ArtifactEntry) -> Result<Metadata, SyncError> {
        if artifact.versions.is_empty() {
            return Err(SyncError::NoVersionFound {
                group_id: group_id.clone(),
                artifact_id: artifact_id.clone(),
            });
        }

        let versions: Vec<String> = artifact.versions.keys()
            .map(|v| v.0.clone())
            .collect();
        let release = artifact.versions.keys()
            .filter(|v| !v.is_snapshot())
            .last()
            .map(|v| v.0.clone());

        Ok(Metadata {
            modelVersion: None,
            groupId: group_id.0.clone(),
            artifactId: artifact_id.0.clone(),
            version: None,
            versioning: Versioning {
                latest: versions.last().cloned(),
                release,
                versions: Some(Versions { version: versions }),
                lastUpdated: Some(self.last_updated.clone()),
                ..Default::default()
            },
        })
    }

    /// The version level document of a snapshot version, describing its renamed files
    pub fn snapshot_metadata(&self, group_id: &MavenGroupId, artifact_id: &MavenArtifactId, entry: &ArtifactVersionEntry, renaming: &SnapshotRenaming) -> Metadata {
        Metadata {
            modelVersion: Some(MODEL_VERSION.to_string()),
            groupId: group_id.0.clone(),
            artifactId: artifact_id.0.clone(),
            version: Some(entry.version.0.clone()),
            versioning: Versioning {
                snapshot: Some(renaming.snapshot.clone()),
                lastUpdated: Some(self.last_updated.clone()),
                snapshotVersions: Some(SnapshotVersions {
                    snapshotVersion: renaming.snapshot_versions.clone(),
                }),
                ..Default::default()
            },
        }
    }
}
