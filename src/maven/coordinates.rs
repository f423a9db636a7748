use std::fmt::{Display, Formatter};

const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Debug)]
pub struct MavenGroupId(pub String);

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Debug)]
pub struct MavenArtifactId(pub String);

/// A version as it appears in the repository layout, i.e. the name of a version directory. Snapshot
///  versions are unqualified here ("1.0-SNAPSHOT"), the timestamp / build number qualification is
///  only part of the file names inside the version directory.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Debug)]
pub struct MavenVersion(pub String);
impl MavenVersion {
    pub fn is_snapshot(&self) -> bool {
        self.0.ends_with(SNAPSHOT_SUFFIX)
    }

    /// "1.0-SNAPSHOT" -> "1.0", `None` for release versions
    pub fn plain_version(&self) -> Option<&str> {
        self.0.strip_suffix(SNAPSHOT_SUFFIX)
    }
}

impl Display for MavenGroupId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Display for MavenArtifactId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Display for MavenVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
