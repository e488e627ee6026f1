//! Capabilities the widget consumes but does not implement.
//!
//! The upload itself, toast delivery, save-as downloads and object URL
//! creation are all platform concerns. They are injected through these
//! traits so the validation and state logic never touches a browser API.
//!
//! Async traits are `?Send`: the widget runs on the single-threaded WASM
//! event loop and browser handles are not `Send`.

use async_trait::async_trait;

use crate::preview::PreviewError;
use crate::types::UploadedFileInfo;

/// Message shown when a delegate failure carries no text of its own.
pub const GENERIC_UPLOAD_FAILURE: &str = "Upload failed. Please try again.";

/// Failure reported by an [`UploadDelegate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    /// The backend refused the file (e.g. a server-side size policy).
    #[error("{0}")]
    Rejected(String),

    /// The transport failed before the backend answered.
    #[error("{0}")]
    Network(String),

    /// The failure carried no usable message.
    #[error("{}", GENERIC_UPLOAD_FAILURE)]
    Unknown,
}

impl UploadError {
    /// Text stored in the widget's error field for this failure.
    ///
    /// Falls back to [`GENERIC_UPLOAD_FAILURE`] when the message is blank.
    #[must_use]
    pub fn display_message(&self) -> String {
        let message = self.to_string();
        match self {
            Self::Rejected(m) | Self::Network(m) if m.trim().is_empty() => {
                GENERIC_UPLOAD_FAILURE.to_owned()
            }
            _ => message,
        }
    }
}

/// Failure of a platform capability (download, locator creation).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    /// A browser API call returned an error or an object was missing.
    #[error("browser API error: {0}")]
    Browser(String),
}

/// Performs the actual upload of an accepted file.
///
/// Implementations must fail with a human-readable message; the widget
/// shows it verbatim. Timeouts, if any, are the delegate's business.
#[async_trait(?Send)]
pub trait UploadDelegate<F: ?Sized> {
    /// Upload `file` and describe where it ended up.
    async fn upload_file(&self, file: &F) -> Result<UploadedFileInfo, UploadError>;
}

/// Visual weight of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastVariant {
    #[default]
    Normal,
    Destructive,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    /// A normal-weight toast.
    #[must_use]
    pub fn normal(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Normal,
        }
    }

    /// A destructive (error) toast.
    #[must_use]
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }
}

/// Fire-and-forget sink for user feedback.
pub trait NotificationSink {
    fn notify(&self, toast: Toast);
}

/// Triggers a native save-as for a retrievable resource.
pub trait DownloadTrigger {
    /// Start a download of `url`, suggesting `filename`.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the platform refuses the action.
    fn trigger_download(&self, url: &str, filename: &str) -> Result<(), PlatformError>;
}

/// Creates temporary in-memory locators for file content.
pub trait ResourceLocator {
    /// Create a locator serving `bytes` with the given MIME type.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the locator cannot be created.
    fn create_locator(&self, bytes: &[u8], mime_type: &str) -> Result<String, PlatformError>;

    /// Release a locator previously returned by [`create_locator`](Self::create_locator).
    fn revoke_locator(&self, url: &str);
}

/// Reads the textual content behind a locator.
#[async_trait(?Send)]
pub trait ContentReader {
    /// Fetch `url` and decode it as text.
    async fn read_text(&self, url: &str) -> Result<String, PreviewError>;
}

/// Download the content of an uploaded file under its original name.
///
/// # Errors
///
/// Propagates the [`DownloadTrigger`]'s error.
pub fn download_file<D: DownloadTrigger + ?Sized>(
    trigger: &D,
    file: &UploadedFileInfo,
) -> Result<(), PlatformError> {
    trigger.trigger_download(&file.url, &file.name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[test]
    fn blank_messages_fall_back_to_generic_text() {
        assert_eq!(
            UploadError::Rejected("  ".into()).display_message(),
            GENERIC_UPLOAD_FAILURE
        );
        assert_eq!(
            UploadError::Network(String::new()).display_message(),
            GENERIC_UPLOAD_FAILURE
        );
        assert_eq!(UploadError::Unknown.display_message(), GENERIC_UPLOAD_FAILURE);
    }

    #[test]
    fn messages_are_shown_verbatim() {
        assert_eq!(
            UploadError::Rejected("File exceeds the server limit of 50 MB".into())
                .display_message(),
            "File exceeds the server limit of 50 MB"
        );
        assert_eq!(
            UploadError::Network("connection reset".into()).display_message(),
            "connection reset"
        );
    }

    #[derive(Default)]
    struct RecordingTrigger(RefCell<Vec<(String, String)>>);

    impl DownloadTrigger for RecordingTrigger {
        fn trigger_download(&self, url: &str, filename: &str) -> Result<(), PlatformError> {
            self.0.borrow_mut().push((url.to_owned(), filename.to_owned()));
            Ok(())
        }
    }

    #[test]
    fn download_file_uses_locator_and_name() {
        let trigger = RecordingTrigger::default();
        let file = UploadedFileInfo {
            id: "1".into(),
            name: "report.pdf".into(),
            url: "blob:abc".into(),
            size: 10,
            mime_type: "application/pdf".into(),
        };
        download_file(&trigger, &file).unwrap();
        assert_eq!(
            trigger.0.into_inner(),
            vec![("blob:abc".to_owned(), "report.pdf".to_owned())]
        );
    }
}
