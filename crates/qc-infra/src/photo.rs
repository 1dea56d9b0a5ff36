//! Photo attachments as data URLs

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::debug;
use qc_types::{Error, Result};

/// MIME type for a photo file, by extension
pub fn mime_type_for(path: &Path) -> Result<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "png" => Ok("image/png"),
        "gif" => Ok("image/gif"),
        "webp" => Ok("image/webp"),
        "bmp" => Ok("image/bmp"),
        _ => Err(Error::InvalidPhotoFormat(path.display().to_string())),
    }
}

/// Read an image file and encode it as `data:<mime>;base64,<payload>`
pub fn encode_photo(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let mime = mime_type_for(path)?;
    let bytes = fs::read(path)?;
    debug!("encoding {} ({} bytes) as {}", path.display(), bytes.len(), mime);
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(&bytes)))
}

/// Split a base64 data URL into its MIME type and decoded bytes
pub fn decode_photo(data_url: &str) -> Result<(String, Vec<u8>)> {
    let invalid = || Error::InvalidPhotoFormat("not a base64 data URL".to_string());
    let rest = data_url.strip_prefix("data:").ok_or_else(invalid)?;
    let (mime, payload) = rest.split_once(";base64,").ok_or_else(invalid)?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| Error::InvalidPhotoFormat(e.to_string()))?;
    Ok((mime.to_string(), bytes))
}

/// File extension matching a photo MIME type
pub fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/bmp" => "bmp",
        _ => "bin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_encode_and_decode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("evidencia.PNG");
        fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let url = encode_photo(&path).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));

        let (mime, bytes) = decode_photo(&url).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, vec![0x89, b'P', b'N', b'G']);
        assert_eq!(extension_for_mime(&mime), "png");
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "hello").unwrap();
        assert!(matches!(encode_photo(&path), Err(Error::InvalidPhotoFormat(_))));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.jpg");
        assert!(matches!(encode_photo(&path), Err(Error::FileNotFound(_))));
    }

    #[test]
    fn test_decode_rejects_plain_text() {
        assert!(decode_photo("https://example.com/a.jpg").is_err());
        assert!(decode_photo("data:image/png,raw").is_err());
    }
}
