//! Shared types for the filedrop upload widget.

use serde::{Deserialize, Serialize};

/// Number of bytes in one megabyte, as used by every size limit.
pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// A file that has been uploaded through the Upload Delegate.
///
/// Created once per successful upload and never modified afterwards.
/// Removing a record from the widget's list does not delete anything
/// on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFileInfo {
    /// Opaque identifier, unique per upload.
    pub id: String,
    /// Original file name.
    pub name: String,
    /// Locator from which the uploaded content can be retrieved.
    pub url: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type reported for the file.
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// Anything the validator and the Upload Delegate can inspect.
///
/// The browser crate implements this for Dioxus file handles; tests and
/// the CLI use [`SelectedFile`].
pub trait FileSource {
    /// File name including extension.
    fn name(&self) -> &str;

    /// Size in bytes.
    fn size(&self) -> u64;

    /// MIME type (empty when unknown).
    fn mime_type(&self) -> &str;
}

/// Plain-data description of a candidate file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl SelectedFile {
    /// Create a new candidate file description.
    #[must_use]
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
        }
    }
}

impl FileSource for SelectedFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

/// Errors raised when the settings page submits an invalid value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The size limit must be a finite number greater than zero.
    #[error("maximum size must be a positive number of megabytes, got {0}")]
    InvalidMaxSize(f64),

    /// A MIME type entry was empty or lacked a `/` separator.
    #[error("invalid MIME type: {0:?}")]
    InvalidMimeType(String),
}

/// Constraints applied to every candidate file.
///
/// Shared between the settings page and the upload widget; edits take
/// effect on the next validation and never re-check files already in
/// the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Largest accepted file size in megabytes.
    pub max_size_mb: f64,

    /// Accepted MIME types, lowercase. Empty means any type is accepted.
    pub allowed_types: Vec<String>,
}

impl UploadConfig {
    /// Default size limit in megabytes.
    pub const DEFAULT_MAX_SIZE_MB: f64 = 10.0;

    /// Default accepted MIME types.
    pub const DEFAULT_ALLOWED_TYPES: &'static [&'static str] = &[
        "image/png",
        "image/jpeg",
        "image/gif",
        "application/pdf",
        "text/plain",
    ];

    /// Size limit converted to bytes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn max_size_bytes(&self) -> f64 {
        self.max_size_mb * BYTES_PER_MB as f64
    }

    /// Change the size limit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMaxSize`] if `mb` is not finite or
    /// not strictly positive. The current value is kept in that case.
    pub fn set_max_size_mb(&mut self, mb: f64) -> Result<(), ConfigError> {
        if !mb.is_finite() || mb <= 0.0 {
            return Err(ConfigError::InvalidMaxSize(mb));
        }
        self.max_size_mb = mb;
        Ok(())
    }

    /// Whether `mime_type` is currently in the allow list.
    #[must_use]
    pub fn is_type_listed(&self, mime_type: &str) -> bool {
        self.allowed_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(mime_type.trim()))
    }

    /// Add a MIME type to the allow list.
    ///
    /// The type is trimmed and lowercased. Adding a type that is already
    /// listed is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMimeType`] if the entry is empty or
    /// is not of the form `type/subtype`.
    pub fn allow_type(&mut self, mime_type: &str) -> Result<(), ConfigError> {
        let normalized = mime_type.trim().to_ascii_lowercase();
        let well_formed = normalized
            .split_once('/')
            .is_some_and(|(top, sub)| !top.is_empty() && !sub.is_empty());
        if !well_formed {
            return Err(ConfigError::InvalidMimeType(mime_type.to_owned()));
        }
        if !self.is_type_listed(&normalized) {
            self.allowed_types.push(normalized);
        }
        Ok(())
    }

    /// Remove a MIME type from the allow list. Returns whether it was listed.
    pub fn disallow_type(&mut self, mime_type: &str) -> bool {
        let before = self.allowed_types.len();
        self.allowed_types
            .retain(|t| !t.eq_ignore_ascii_case(mime_type.trim()));
        self.allowed_types.len() != before
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_size_mb: Self::DEFAULT_MAX_SIZE_MB,
            allowed_types: Self::DEFAULT_ALLOWED_TYPES
                .iter()
                .map(|&t| t.to_owned())
                .collect(),
        }
    }
}

/// Guess a MIME type from a file name's extension.
///
/// Returns an empty string when the extension is unknown or missing.
#[must_use]
pub fn guess_mime_type(name: &str) -> String {
    mime_guess::from_path(name)
        .first()
        .map(|m| m.essence_str().to_owned())
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn guesses_common_types() {
        assert_eq!(guess_mime_type("photo.png"), "image/png");
        assert_eq!(guess_mime_type("photo.JPG"), "image/jpeg");
        assert_eq!(guess_mime_type("notes.txt"), "text/plain");
        assert_eq!(guess_mime_type("report.pdf"), "application/pdf");
        assert_eq!(guess_mime_type("data.json"), "application/json");
        assert_eq!(guess_mime_type("shots/big.png"), "image/png");
    }

    #[test]
    fn unknown_or_missing_extension_yields_empty_type() {
        assert_eq!(guess_mime_type("README"), "");
        assert_eq!(guess_mime_type("archive.zzzunknown"), "");
    }

    #[test]
    fn default_config_lists_common_types() {
        let config = UploadConfig::default();
        assert!((config.max_size_mb - 10.0).abs() < f64::EPSILON);
        assert!(config.is_type_listed("image/png"));
        assert!(config.is_type_listed("application/pdf"));
        assert!(!config.is_type_listed("video/mp4"));
    }

    #[test]
    fn set_max_size_rejects_non_positive_and_non_finite() {
        let mut config = UploadConfig::default();
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(config.set_max_size_mb(bad).is_err(), "{bad} accepted");
        }
        assert!((config.max_size_mb - 10.0).abs() < f64::EPSILON);

        config.set_max_size_mb(0.5).unwrap();
        assert!((config.max_size_bytes() - 524_288.0).abs() < f64::EPSILON);
    }

    #[test]
    fn allow_type_normalizes_and_deduplicates() {
        let mut config = UploadConfig {
            max_size_mb: 1.0,
            allowed_types: Vec::new(),
        };
        config.allow_type("  Application/JSON ").unwrap();
        config.allow_type("application/json").unwrap();
        assert_eq!(config.allowed_types, vec!["application/json"]);
    }

    #[test]
    fn allow_type_rejects_malformed_entries() {
        let mut config = UploadConfig::default();
        for bad in ["", "png", "image/", "/png"] {
            assert_eq!(
                config.allow_type(bad),
                Err(ConfigError::InvalidMimeType(bad.to_owned()))
            );
        }
    }

    #[test]
    fn disallow_type_reports_whether_listed() {
        let mut config = UploadConfig::default();
        assert!(config.disallow_type("IMAGE/PNG"));
        assert!(!config.is_type_listed("image/png"));
        assert!(!config.disallow_type("image/png"));
    }

    #[test]
    fn uploaded_file_info_serializes_type_field() {
        let info = UploadedFileInfo {
            id: "abc".into(),
            name: "a.png".into(),
            url: "blob:x".into(),
            size: 3,
            mime_type: "image/png".into(),
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["type"], "image/png");
        assert!(json.get("mime_type").is_none());
    }
}
