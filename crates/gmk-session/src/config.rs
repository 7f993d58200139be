use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Session configuration.
///
/// Every field has a default so an empty `{}` file (or no file at all) is
/// a valid configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Remote database path holding the tracked target's position.
    #[serde(default = "default_remote_path")]
    pub remote_path: String,

    /// Marker title for the device position.
    #[serde(default = "default_origin_label")]
    pub origin_label: String,

    /// Marker title for the tracked target.
    #[serde(default = "default_destination_label")]
    pub destination_label: String,

    /// Realtime database root URL. When unset, embedders fall back to a
    /// simulated remote source.
    #[serde(default)]
    pub database_url: Option<String>,
}

fn default_remote_path() -> String {
    "Animal/GPS".to_string()
}

fn default_origin_label() -> String {
    "Your location".to_string()
}

fn default_destination_label() -> String {
    "Animal".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            remote_path: default_remote_path(),
            origin_label: default_origin_label(),
            destination_label: default_destination_label(),
            database_url: None,
        }
    }
}

impl SessionConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading session config {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing session config {}", path.display()))
    }

    /// SHA-256 over the canonical JSON form (sorted keys), hex-encoded.
    ///
    /// Stable across field declaration order and whitespace, so two
    /// equal configs always hash the same.
    pub fn digest(&self) -> String {
        // A plain struct of strings always serializes.
        let canonical = serde_json::to_value(self).unwrap_or(serde_json::Value::Null);
        let mut hasher = Sha256::new();
        hasher.update(canonical.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }
}
