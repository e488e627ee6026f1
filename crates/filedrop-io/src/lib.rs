//! filedrop-io: Browser I/O and Dioxus component library.
//!
//! Wraps picked and dropped files, creates and revokes object URLs,
//! triggers downloads, simulates an upload backend and provides the
//! reusable UI components of the filedrop web application.

pub mod browser;
pub mod components;
pub mod download;
pub mod file;
pub mod locator;
pub mod simulated;
pub mod toast;

pub use browser::{BrowserError, BrowserPlatform};
pub use components::{FileList, FilePreview, FileUpload, SettingsPanel, SharedDelegate, ToastStack};
pub use file::BrowserFile;
pub use simulated::SimulatedBackend;
pub use toast::{ToastQueue, use_toast_queue};
