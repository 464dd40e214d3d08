//! Status line icon loading.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::warn;

/// Read an image file and base64-encode it for the host's `image=` attribute
pub fn encode_file(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(STANDARD.encode(bytes))
}

/// Like [`encode_file`], but a missing or unreadable icon only costs the image
pub fn load_icon(path: Option<&Path>) -> Option<String> {
    let path = path?;
    match encode_file(path) {
        Ok(encoded) => Some(encoded),
        Err(e) => {
            warn!("Failed to load icon {:?}: {}", path, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_encode_file() {
        let mut file = tempfile::NamedTempFile::new().expect("Should create temp file");
        file.write_all(b"\x89PNG").expect("Should write");

        let encoded = encode_file(file.path()).expect("Should encode");
        assert_eq!(encoded, "iVBORw==");
    }

    #[test]
    fn test_missing_icon_is_none() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        assert!(load_icon(Some(&dir.path().join("missing.png"))).is_none());
        assert!(load_icon(None).is_none());
    }
}
