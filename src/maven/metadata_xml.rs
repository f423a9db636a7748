#![allow(non_snake_case)]

//! In-memory model of the maven-metadata.xml format, see
//!  https://maven.apache.org/ref/3.9.5/maven-repository-metadata/repository-metadata.html
//!
//! Only the parts that are written by this tool are modelled. The same structure is used for the
//!  artifact level document (listing versions) and the version level document of a snapshot
//!  (listing timestamped files); the respective other parts are `None`.

use std::io::Write;

use serde::Deserialize;
use xml::writer::{EmitterConfig, EventWriter, XmlEvent};

pub const MODEL_VERSION: &str = "1.1.0";

#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
pub struct Metadata {
    #[serde(skip)]
    pub modelVersion: Option<String>,
    pub groupId: String,
    pub artifactId: String,
    pub version: Option<String>,
    pub versioning: Versioning,
}

#[derive(Debug, Clone, Eq, PartialEq, Default, Deserialize)]
pub struct Versioning {
    pub latest: Option<String>,
    pub release: Option<String>,
    pub versions: Option<Versions>,
    pub lastUpdated: Option<String>,
    pub snapshot: Option<Snapshot>,
    pub snapshotVersions: Option<SnapshotVersions>,
}

#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
pub struct Versions {
    pub version: Vec<String>,
}

#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
pub struct Snapshot {
    pub timestamp: String,
    pub buildNumber: u32,
}

#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
pub struct SnapshotVersions {
    pub snapshotVersion: Vec<SnapshotVersion>,
}

#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
pub struct SnapshotVersion {
    pub extension: String,
    pub value: String,
    pub updated: String,
}

impl Metadata {
    /// Renders the document as indented XML with a declaration and a trailing newline. These are
    ///  the exact bytes that are written and checksummed.
    pub fn to_xml(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        {
            let mut writer = EmitterConfig::new()
                .perform_indent(true)
                .create_writer(&mut buffer);
            self.write_to(&mut writer)?;
        }
        buffer.push(b'\n');
        Ok(String::from_utf8(buffer)?)
    }

    fn write_to<W: Write>(&self, w: &mut EventWriter<W>) -> xml::writer::Result<()> {
        match &self.modelVersion {
            Some(model_version) => w.write(XmlEvent::start_element("metadata").attr("modelVersion", model_version))?,
            None => w.write(XmlEvent::start_element("metadata"))?,
        }
        text_element(w, "groupId", &self.groupId)?;
        text_element(w, "artifactId", &self.artifactId)?;
        if let Some(version) = &self.version {
            text_element(w, "version", version)?;
        }
        self.versioning.write_to(w)?;
        w.write(XmlEvent::end_element())
    }
}

impl Versioning {
    fn write_to<W: Write>(&self, w: &mut EventWriter<W>) -> xml::writer::Result<()> {
        w.write(XmlEvent::start_element("versioning"))?;

        if let Some(latest) = &self.latest {
            text_element(w, "latest", latest)?;
        }
        if let Some(release) = &self.release {
            text_element(w, "release", release)?;
        }
        if let Some(versions) = &self.versions {
            w.write(XmlEvent::start_element("versions"))?;
            for version in &versions.version {
                text_element(w, "version", version)?;
            }
            w.write(XmlEvent::end_element())?;
        }
        if let Some(snapshot) = &self.snapshot {
            w.write(XmlEvent::start_element("snapshot"))?;
            text_element(w, "timestamp", &snapshot.timestamp)?;
            text_element(w, "buildNumber", &snapshot.buildNumber.to_string())?;
            w.write(XmlEvent::end_element())?;
        }
        if let Some(last_updated) = &self.lastUpdated {
            text_element(w, "lastUpdated", last_updated)?;
        }
        if let Some(snapshot_versions) = &self.snapshotVersions {
            w.write(XmlEvent::start_element("snapshotVersions"))?;
            for snapshot_version in &snapshot_versions.snapshotVersion {
                w.write(XmlEvent::start_element("snapshotVersion"))?;
                text_element(w, "extension", &snapshot_version.extension)?;
                text_element(w, "value", &snapshot_version.value)?;
                text_element(w, "updated", &snapshot_version.updated)?;
                w.write(XmlEvent::end_element())?;
            }
            w.write(XmlEvent::end_element())?;
        }

        w.write(XmlEvent::end_element())
    }
}

fn text_element<W: Write>(w: &mut EventWriter<W>, name: &str, text: &str) -> xml::writer::Result<()> {
    w.write(XmlEvent::start_element(name))?;
    w.write(XmlEvent::characters(text))?;
    w.write(XmlEvent::end_element())
}
