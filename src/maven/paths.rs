use std::path::{Component, Path};

use lazy_static::lazy_static;
use regex::Regex;

use crate::maven::coordinates::*;

lazy_static! {
    static ref TIMESTAMP_REGEX: Regex = Regex::new(r"^(\d+\.\d+)-").unwrap();
}

const CHECKSUM_EXTENSIONS: [&str; 2] = ["md5", "sha1"];


/// Extracts group id and artifact id from the (repository relative) path of an artifact directory,
///  e.g. "com/example/mylib" -> ("com.example", "mylib").
///
/// There is no validation: whatever the path segments contain ends up in the ids.
pub fn ids(path: &str) -> (MavenGroupId, MavenArtifactId) {
    let (group_path, artifact_id) = match path.rfind('/') {
        Some(last_slash) => (&path[..last_slash], &path[last_slash+1..]),
        None => ("", path),
    };
    let group_path = group_path.strip_prefix("./").unwrap_or(group_path);

    (
        MavenGroupId(group_path.replace('/', ".")),
        MavenArtifactId(artifact_id.to_string()),
    )
}

/// The '/' separated path of an artifact directory relative to the repository root, or `None` if the
///  directory is not strictly below the root.
pub fn relative_artifact_path(root: &Path, artifact_dir: &Path) -> Option<String> {
    let relative = artifact_dir.strip_prefix(root).ok()?;

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => return None,
        }
    }

    if segments.is_empty() {
        None
    }
    else {
        Some(segments.join("/"))
    }
}

/// Extracts the timestamp from a snapshot file name of the form
///  `<artifactId>-<plainVersion>-<digits>.<digits>-...`, e.g. "20230615.093000" for
///  "mylib-1.0-20230615.093000-1.jar".
///
/// A file name that does not follow this pattern has no timestamp. That is a regular outcome, not a
///  failure.
pub fn snapshot_timestamp<'a>(file_name: &'a str, artifact_id: &MavenArtifactId, plain_version: &str) -> Option<&'a str> {
    let rest = file_name
        .strip_prefix(artifact_id.0.as_str())?
        .strip_prefix('-')?
        .strip_prefix(plain_version)?
        .strip_prefix('-')?;

    TIMESTAMP_REGEX.captures(rest)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// File name without its final extension: "a-1.0.jar" -> "a-1.0"
pub fn file_stem(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(last_dot) => &file_name[..last_dot],
        None => file_name,
    }
}

/// true for checksum sidecar files like "a-1.0.jar.sha1"
pub fn is_checksum_file(file_name: &str) -> bool {
    match file_name.rfind('.') {
        Some(last_dot) => CHECKSUM_EXTENSIONS.contains(&&file_name[last_dot+1..]),
        None => false,
    }
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;
    use rstest::*;
    use super::*;

    #[rstest]
    #[case::nested("com/example/mylib", "com.example", "mylib")]
    #[case::current_dir_prefix("./com/example/mylib", "com.example", "mylib")]
    #[case::single_segment_group("org/lib", "org", "lib")]
    #[case::no_group("mylib", "", "mylib")]
    #[case::deep("a/b/c/d/e", "a.b.c.d", "e")]
    #[case::dotted_segment("com/example.x/y", "com.example.x", "y")]
    fn test_ids(#[case] path: &str, #[case] group_id: &str, #[case] artifact_id: &str) {
        let (actual_group, actual_artifact) = ids(path);
        assert_eq!(actual_group, MavenGroupId(group_id.to_string()));
        assert_eq!(actual_artifact, MavenArtifactId(artifact_id.to_string()));
    }

    #[rstest]
    #[case("com/example/mylib")]
    #[case("a/b/c/d/e/f/g")]
    #[case("x/y")]
    #[case("single")]
    fn test_ids_group_has_no_separator(#[case] path: &str) {
        let (group_id, _) = ids(path);
        assert!(!group_id.0.contains('/'));
    }

    #[rstest]
    #[case::below_root("/repo", "/repo/com/example/mylib", Some("com/example/mylib"))]
    #[case::current_dir_root(".", "./com/example/mylib", Some("com/example/mylib"))]
    #[case::root_itself("/repo", "/repo", None)]
    #[case::outside_root("/repo", "/elsewhere/mylib", None)]
    fn test_relative_artifact_path(#[case] root: &str, #[case] dir: &str, #[case] expected: Option<&str>) {
        let actual = relative_artifact_path(&PathBuf::from(root), &PathBuf::from(dir));
        assert_eq!(actual.as_deref(), expected);
    }

    #[rstest]
    #[case::with_build_number("mylib-1.0-20230615.093000-1.jar", "mylib", "1.0", Some("20230615.093000"))]
    #[case::with_classifier("mylib-1.0-20230615.093000-1-sources.jar", "mylib", "1.0", Some("20230615.093000"))]
    #[case::dashed_artifact("my-lib-2.1.3-20240101.000000-17.pom", "my-lib", "2.1.3", Some("20240101.000000"))]
    #[case::short_digits("a-1-1.2-x.jar", "a", "1", Some("1.2"))]
    #[case::unqualified_snapshot("mylib-1.0-SNAPSHOT.jar", "mylib", "1.0", None)]
    #[case::no_dash_after_timestamp("mylib-1.0-20230615.093000.jar", "mylib", "1.0", None)]
    #[case::wrong_artifact("other-1.0-20230615.093000-1.jar", "mylib", "1.0", None)]
    #[case::wrong_version("mylib-1.1-20230615.093000-1.jar", "mylib", "1.0", None)]
    #[case::no_dot("mylib-1.0-20230615093000-1.jar", "mylib", "1.0", None)]
    #[case::empty("", "mylib", "1.0", None)]
    fn test_snapshot_timestamp(#[case] file_name: &str, #[case] artifact_id: &str, #[case] plain_version: &str, #[case] expected: Option<&str>) {
        let actual = snapshot_timestamp(file_name, &MavenArtifactId(artifact_id.to_string()), plain_version);
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case("a-1.0.jar", "a-1.0")]
    #[case("a-1.0.jar.sha1", "a-1.0.jar")]
    #[case("noext", "noext")]
    fn test_file_stem(#[case] file_name: &str, #[case] expected: &str) {
        assert_eq!(file_stem(file_name), expected);
    }

    #[rstest]
    #[case("a-1.0.jar.md5", true)]
    #[case("a-1.0.jar.sha1", true)]
    #[case("a-1.0.jar", false)]
    #[case("a-1.0.jar.asc", false)]
    #[case("a-1.0.sha1.jar", false)]
    #[case("sha1", false)]
    fn test_is_checksum_file(#[case] file_name: &str, #[case] expected: bool) {
        assert_eq!(is_checksum_file(file_name), expected);
    }
}
