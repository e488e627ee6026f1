//! filedrop-core: Validation and state core for the filedrop upload
//! widget (sans-IO).
//!
//! A candidate file flows through:
//! validate -> register in flight -> Upload Delegate -> record + notify.
//!
//! This crate has **no browser dependencies** -- the upload itself,
//! toasts, downloads and object URLs are injected through the traits in
//! [`platform`]. All Dioxus and `web-sys` code lives in `filedrop-io`.

pub mod format;
pub mod platform;
pub mod preview;
pub mod state;
pub mod types;
pub mod upload;
pub mod validate;

pub use format::format_file_size;
pub use platform::{
    ContentReader, DownloadTrigger, NotificationSink, PlatformError, ResourceLocator, Toast,
    ToastVariant, UploadDelegate, UploadError, download_file,
};
pub use preview::{PreviewContent, PreviewError, PreviewKind, load_preview};
pub use state::{StateHandle, Ticket, UploadState};
pub use types::{
    ConfigError, FileSource, SelectedFile, UploadConfig, UploadedFileInfo, guess_mime_type,
};
pub use upload::{UploadOutcome, handle_upload};
pub use validate::{ValidationError, ValidationWarning, validate};
