//! Client-side validation of candidate files.
//!
//! Two fatal rules (size, then MIME type) decide whether a file may be
//! handed to the Upload Delegate. Files that pass may still carry
//! advisory [`ValidationWarning`]s, which never block the upload.

use std::fmt;

use crate::types::{FileSource, UploadConfig};

/// Fraction of the size limit above which a near-limit warning fires.
pub const NEAR_LIMIT_RATIO: f64 = 0.8;

/// File names longer than this many characters get a warning.
pub const MAX_NAME_CHARS: usize = 50;

/// Fatal validation failure for the current attempt.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The size limit is not a positive number, so no file can pass.
    #[error("The maximum file size is not set to a valid value")]
    InvalidLimit {
        /// The offending limit.
        max_size_mb: f64,
    },

    /// The file is larger than the configured limit.
    #[error("File size exceeds the {} MB limit", format_mb(.max_size_mb))]
    TooLarge {
        /// Size of the rejected file in bytes.
        size: u64,
        /// Limit in effect when the file was checked.
        max_size_mb: f64,
    },

    /// The file's MIME type is not in a non-empty allow list.
    #[error(
        "File type {} is not allowed. Allowed types: {}",
        display_type(.mime_type),
        .allowed.join(", ")
    )]
    TypeNotAllowed {
        /// Type reported for the rejected file.
        mime_type: String,
        /// Allow list in effect when the file was checked.
        allowed: Vec<String>,
    },
}

/// Non-blocking advisory produced for an accepted file.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationWarning {
    /// Size is above [`NEAR_LIMIT_RATIO`] of the limit.
    NearSizeLimit { max_size_mb: f64 },
    /// Name has more than [`MAX_NAME_CHARS`] characters.
    LongFileName { chars: usize },
    /// Name contains no `.` extension separator.
    MissingExtension,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NearSizeLimit { max_size_mb } => write!(
                f,
                "File size is close to the {} MB limit",
                format_mb(max_size_mb)
            ),
            Self::LongFileName { chars } => write!(
                f,
                "File name is {chars} characters long (more than {MAX_NAME_CHARS})"
            ),
            Self::MissingExtension => f.write_str("File name has no extension"),
        }
    }
}

/// Check a candidate file against a size limit and MIME allow list.
///
/// Rules are applied in order:
///
/// 0. A `max_size_mb` that is NaN, zero or negative rejects every file
///    with [`ValidationError::InvalidLimit`].
/// 1. `size > max_size_mb * 1 MiB` is rejected with
///    [`ValidationError::TooLarge`].
/// 2. A non-empty `allowed_types` that does not contain the file's type
///    (ASCII case-insensitive) is rejected with
///    [`ValidationError::TypeNotAllowed`].
/// 3. Otherwise the file is accepted, together with any advisory
///    warnings: near the size limit (strictly above 80 %), a long name,
///    or a name without an extension.
///
/// # Errors
///
/// Returns the first fatal rule the file violates.
#[allow(clippy::cast_precision_loss)]
pub fn validate<F: FileSource + ?Sized>(
    file: &F,
    max_size_mb: f64,
    allowed_types: &[String],
) -> Result<Vec<ValidationWarning>, ValidationError> {
    if max_size_mb.is_nan() || max_size_mb <= 0.0 {
        tracing::debug!(name = file.name(), max_size_mb, "rejected: invalid limit");
        return Err(ValidationError::InvalidLimit { max_size_mb });
    }

    let limit = max_size_mb * crate::types::BYTES_PER_MB as f64;
    let size = file.size();

    if size as f64 > limit {
        tracing::debug!(name = file.name(), size, limit, "rejected: too large");
        return Err(ValidationError::TooLarge { size, max_size_mb });
    }

    let mime_type = file.mime_type().trim();
    if !allowed_types.is_empty()
        && !allowed_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(mime_type))
    {
        tracing::debug!(name = file.name(), mime_type, "rejected: type not allowed");
        return Err(ValidationError::TypeNotAllowed {
            mime_type: mime_type.to_owned(),
            allowed: allowed_types.to_vec(),
        });
    }

    let mut warnings = Vec::new();
    if size as f64 > limit * NEAR_LIMIT_RATIO {
        warnings.push(ValidationWarning::NearSizeLimit { max_size_mb });
    }
    let chars = file.name().chars().count();
    if chars > MAX_NAME_CHARS {
        warnings.push(ValidationWarning::LongFileName { chars });
    }
    if !file.name().contains('.') {
        warnings.push(ValidationWarning::MissingExtension);
    }

    tracing::debug!(
        name = file.name(),
        size,
        warnings = warnings.len(),
        "validation passed"
    );
    Ok(warnings)
}

impl UploadConfig {
    /// Validate `file` against this configuration. See [`validate`].
    ///
    /// # Errors
    ///
    /// Returns the first fatal rule the file violates.
    pub fn validate<F: FileSource + ?Sized>(
        &self,
        file: &F,
    ) -> Result<Vec<ValidationWarning>, ValidationError> {
        validate(file, self.max_size_mb, &self.allowed_types)
    }
}

/// Render a megabyte limit without a trailing `.0` for whole numbers.
#[allow(clippy::trivially_copy_pass_by_ref)]
fn format_mb(mb: &f64) -> String {
    let mb = *mb;
    if mb.fract() == 0.0 {
        format!("{mb:.0}")
    } else {
        format!("{mb}")
    }
}

fn display_type(mime_type: &str) -> &str {
    if mime_type.is_empty() {
        "(unknown)"
    } else {
        mime_type
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{BYTES_PER_MB, SelectedFile};

    fn types(list: &[&str]) -> Vec<String> {
        list.iter().map(|&t| t.to_owned()).collect()
    }

    #[test]
    fn accepts_file_within_limits() {
        let file = SelectedFile::new("photo.png", 1000, "image/png");
        let warnings = validate(&file, 1.0, &types(&["image/png"])).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn rejects_oversized_file_regardless_of_type() {
        let allowed = types(&["image/png"]);
        for mime in ["image/png", "video/mp4"] {
            let file = SelectedFile::new("big.bin", 2 * BYTES_PER_MB, mime);
            let err = validate(&file, 1.0, &allowed).unwrap_err();
            assert!(matches!(err, ValidationError::TooLarge { .. }), "{mime}");
            assert_eq!(err.to_string(), "File size exceeds the 1 MB limit");
        }
    }

    #[test]
    fn size_exactly_at_limit_is_accepted() {
        let file = SelectedFile::new("edge.png", BYTES_PER_MB, "image/png");
        assert!(validate(&file, 1.0, &[]).is_ok());

        let over = SelectedFile::new("edge.png", BYTES_PER_MB + 1, "image/png");
        assert!(validate(&over, 1.0, &[]).is_err());
    }

    #[test]
    fn rejects_type_outside_allow_list() {
        let file = SelectedFile::new("notes.txt", BYTES_PER_MB / 2, "text/plain");
        let err = validate(&file, 1.0, &types(&["image/png", "image/jpeg"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "File type text/plain is not allowed. Allowed types: image/png, image/jpeg"
        );
    }

    #[test]
    fn empty_allow_list_accepts_any_type() {
        let file = SelectedFile::new("clip.mp4", 10, "video/mp4");
        assert!(validate(&file, 1.0, &[]).is_ok());
    }

    #[test]
    fn unusable_limit_rejects_every_file() {
        let file = SelectedFile::new("tiny.png", 1, "image/png");
        for limit in [f64::NAN, 0.0, -1.0] {
            let err = validate(&file, limit, &[]).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidLimit { .. }), "{limit}");
        }
        assert!(validate(&file, f64::INFINITY, &[]).is_ok());
    }

    #[test]
    fn type_match_ignores_ascii_case() {
        let file = SelectedFile::new("a.PNG", 10, "IMAGE/PNG");
        assert!(validate(&file, 1.0, &types(&["image/png"])).is_ok());
    }

    #[test]
    fn unknown_type_is_named_in_error() {
        let file = SelectedFile::new("mystery", 10, "");
        let err = validate(&file, 1.0, &types(&["image/png"])).unwrap_err();
        assert!(err.to_string().starts_with("File type (unknown) is not allowed"));
    }

    #[test]
    fn near_limit_warning_uses_strict_threshold() {
        // 1 MB limit; 80 % is exactly 838_860.8 bytes.
        let below = SelectedFile::new("a.png", 838_860, "image/png");
        assert!(validate(&below, 1.0, &[]).unwrap().is_empty());

        let above = SelectedFile::new("a.png", 838_861, "image/png");
        assert_eq!(
            validate(&above, 1.0, &[]).unwrap(),
            vec![ValidationWarning::NearSizeLimit { max_size_mb: 1.0 }]
        );

        let at_limit = SelectedFile::new("a.png", BYTES_PER_MB, "image/png");
        assert_eq!(validate(&at_limit, 1.0, &[]).unwrap().len(), 1);
    }

    #[test]
    fn near_limit_boundary_at_exact_eighty_percent_does_not_warn() {
        // 5 MB limit; 80 % is exactly 4 MB.
        let file = SelectedFile::new("a.png", 4 * BYTES_PER_MB, "image/png");
        assert!(validate(&file, 5.0, &[]).unwrap().is_empty());
    }

    #[test]
    fn long_name_warning_counts_characters() {
        let exactly = format!("{}.png", "a".repeat(46));
        assert_eq!(exactly.chars().count(), 50);
        let file = SelectedFile::new(exactly, 1, "image/png");
        assert!(validate(&file, 1.0, &[]).unwrap().is_empty());

        let long = format!("{}.png", "é".repeat(47));
        let file = SelectedFile::new(long, 1, "image/png");
        assert_eq!(
            validate(&file, 1.0, &[]).unwrap(),
            vec![ValidationWarning::LongFileName { chars: 51 }]
        );
    }

    #[test]
    fn missing_extension_warning() {
        let file = SelectedFile::new("README", 1, "text/plain");
        let warnings = validate(&file, 1.0, &[]).unwrap();
        assert_eq!(warnings, vec![ValidationWarning::MissingExtension]);
        assert_eq!(warnings[0].to_string(), "File name has no extension");
    }

    #[test]
    fn warnings_accumulate_in_rule_order() {
        let name = "x".repeat(60);
        let file = SelectedFile::new(name, 900_000, "");
        let warnings = validate(&file, 1.0, &[]).unwrap();
        assert_eq!(
            warnings,
            vec![
                ValidationWarning::NearSizeLimit { max_size_mb: 1.0 },
                ValidationWarning::LongFileName { chars: 60 },
                ValidationWarning::MissingExtension,
            ]
        );
    }

    #[test]
    fn fractional_limit_in_messages() {
        let file = SelectedFile::new("a.png", BYTES_PER_MB, "image/png");
        let err = validate(&file, 0.5, &[]).unwrap_err();
        assert_eq!(err.to_string(), "File size exceeds the 0.5 MB limit");
    }

    #[test]
    fn config_validate_delegates_to_rules() {
        let config = UploadConfig {
            max_size_mb: 1.0,
            allowed_types: types(&["image/png"]),
        };
        let file = SelectedFile::new("a.gif", 10, "image/gif");
        assert!(matches!(
            config.validate(&file),
            Err(ValidationError::TypeNotAllowed { .. })
        ));
    }
}
