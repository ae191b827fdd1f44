//! SHA-256 of the snapshot archive, reported alongside the extraction.

use crate::error::ExtractError;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// Lower-case hex SHA-256 of the file at `path`, streamed.
pub fn sha256_path(path: &Path) -> Result<String, ExtractError> {
    let file = File::open(path).map_err(|e| ExtractError::io("open", path, e))?;
    let mut reader = BufReader::with_capacity(64 * 1024, file);
    let mut hasher = Sha256::new();
    io::copy(&mut reader, &mut hasher).map_err(|e| ExtractError::io("read", path, e))?;
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_digest() {
        let f = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(
            sha256_path(f.path()).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn known_content_digest() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("snap.zip");
        std::fs::write(&p, b"hello\n").unwrap();
        assert_eq!(
            sha256_path(&p).unwrap(),
            "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03"
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = sha256_path(&dir.path().join("absent.zip")).unwrap_err();
        assert!(matches!(err, ExtractError::Io { action: "open", .. }));
    }
}
