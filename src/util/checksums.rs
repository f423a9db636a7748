use sha1::{Digest, Sha1};

/// Lowercase hex MD5 digest, the format of Maven's `.md5` sidecar files
pub fn md5_hex(data: &[u8]) -> String {
    hex::encode(md5::compute(data).0)
}

/// Lowercase hex SHA-1 digest, the format of Maven's `.sha1` sidecar files
pub fn sha1_hex(data: &[u8]) -> String {
    let mut hasher: Sha1 = Default::default();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
