use std::path::{Path, PathBuf};

use crate::maven::metadata_xml::Metadata;
use crate::repo_fs::RepoFs;
use crate::util::checksums::{md5_hex, sha1_hex};

pub const METADATA_FILE_NAME: &str = "maven-metadata.xml";

/// Serializes metadata documents and writes them (plus optional checksum files) to a directory
pub struct DocumentEmitter<'a> {
    fs: &'a dyn RepoFs,
    write_checksums: bool,
}
impl <'a> DocumentEmitter<'a> {
    pub fn new(fs: &'a dyn RepoFs, write_checksums: bool) -> DocumentEmitter<'a> {
        DocumentEmitter {
            fs,
            write_checksums,
        }
    }

    /// Writes `<directory>/maven-metadata.xml` and returns its path
    pub async fn emit(&self, directory: &Path, metadata: &Metadata) -> anyhow::Result<PathBuf> {
        let path = directory.join(METADATA_FILE_NAME);
        let xml = metadata.to_xml()?;
        let data = xml.as_bytes();

        self.fs.publish_document(&path, data).await?;

        if self.write_checksums {
            self.fs.write_file(&checksum_path(&path, "md5"), md5_hex(data).as_bytes()).await?;
            self.fs.write_file(&checksum_path(&path, "sha1"), sha1_hex(data).as_bytes()).await?;
        }
        Ok(path)
    }
}

fn checksum_path(path: &Path, extension: &str) -> PathBuf {
    let mut result = path.as_os_str().to_owned();
    result.push(".");
    result.push(extension);
    PathBuf::from(result)
}
