//! Dioxus file handles as validator input.

use dioxus::html::FileData;
use filedrop_core::{FileSource, guess_mime_type};

use crate::browser::BrowserError;

/// A file picked or dropped in the browser.
///
/// Name, size and MIME type are captured up front so validation never
/// touches the file's content. When the browser reports no MIME type the
/// type is guessed from the file extension.
#[derive(Clone)]
pub struct BrowserFile {
    name: String,
    size: u64,
    mime_type: String,
    data: FileData,
}

impl BrowserFile {
    /// Wrap a Dioxus file handle.
    #[must_use]
    pub fn new(data: FileData) -> Self {
        let name = data.name();
        let mime_type = data
            .content_type()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| guess_mime_type(&name));
        Self {
            size: data.size(),
            name,
            mime_type,
            data,
        }
    }

    /// Read the whole file into memory.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::Read`] if the browser fails to read the file.
    #[allow(clippy::future_not_send)] // WASM is single-threaded; FileData is !Send
    pub async fn read_bytes(&self) -> Result<Vec<u8>, BrowserError> {
        self.data
            .read_bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| BrowserError::Read {
                name: self.name.clone(),
                reason: e.to_string(),
            })
    }
}

impl FileSource for BrowserFile {
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
