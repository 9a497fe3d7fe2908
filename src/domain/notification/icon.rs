//! Icon value object

use std::path::Path;

use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::error::IconError;

/// Opaque image data handed to the daemon.
///
/// The shim never decodes the image; on the wire the bytes travel as a
/// standard base64 string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Icon {
    data: Vec<u8>,
}

impl Icon {
    /// Create an icon from raw image bytes
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Empty image, used when no application icon is configured
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read image bytes from a file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, IconError> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await.map_err(|e| IconError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { data })
    }

    /// Get the raw image bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Check if the icon carries no data
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Encode the image bytes as base64
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }

    /// Decode an icon from base64
    pub fn from_base64(encoded: &str) -> Result<Self, base64::DecodeError> {
        let data = base64::engine::general_purpose::STANDARD.decode(encoded)?;
        Ok(Self { data })
    }
}

impl Serialize for Icon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for Icon {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Self::from_base64(&encoded).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_icon() {
        let icon = Icon::empty();
        assert!(icon.is_empty());
        assert_eq!(icon.to_base64(), "");
    }

    #[test]
    fn serializes_as_base64_string() {
        let icon = Icon::new(vec![1, 2, 3, 4]);
        let json = serde_json::to_value(&icon).unwrap();
        assert_eq!(json, serde_json::json!("AQIDBA=="));
    }

    #[test]
    fn deserializes_from_base64_string() {
        let icon: Icon = serde_json::from_value(serde_json::json!("AQIDBA==")).unwrap();
        assert_eq!(icon.data(), &[1, 2, 3, 4]);
    }

    #[test]
    fn rejects_invalid_base64() {
        let result: Result<Icon, _> = serde_json::from_value(serde_json::json!("not base64!"));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn load_reads_file_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let icon = Icon::load(&path).await.unwrap();
        assert_eq!(icon.data(), &[0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn load_missing_file_fails() {
        let err = Icon::load("/nonexistent/icon.png").await.unwrap_err();
        assert!(err.path.contains("icon.png"));
    }
}
