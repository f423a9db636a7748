use std::path::PathBuf;

use clap::Parser;

use crate::sync::SyncPolicy;

/// Updates the maven-metadata.xml files of a local Maven repository according to its contents,
///  renumbering snapshot files so that they carry consecutive build numbers.
///
/// Without --commit nothing is changed: planned modifications are logged and the documents are
///  printed to stdout. This is a simple tool - keep a backup when committing.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about)]
pub struct Args {
    /// Root directory of the repository
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Actually write documents and rename files
    #[arg(long)]
    pub commit: bool,

    /// Do not write .md5 / .sha1 files next to the documents
    #[arg(long)]
    pub skip_checksums: bool,
}
impl Args {
    pub fn policy(&self) -> SyncPolicy {
        SyncPolicy {
            write_checksums: !self.skip_checksums,
        }
    }
}
