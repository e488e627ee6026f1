//! Dioxus UI components for filedrop.
//!
//! Provides the drop zone with its file picker, the uploaded file list
//! with inline previews, the settings page and the toast stack.

mod file_list;
mod preview;
mod settings;
mod toast_stack;
mod upload;

pub use file_list::FileList;
pub use preview::FilePreview;
pub use settings::SettingsPanel;
pub use toast_stack::ToastStack;
pub use upload::{FileUpload, SharedDelegate};
