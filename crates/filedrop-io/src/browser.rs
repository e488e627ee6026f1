//! Browser implementations of the widget's platform capabilities.

use async_trait::async_trait;
use filedrop_core::{
    ContentReader, DownloadTrigger, PlatformError, PreviewError, ResourceLocator,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::{download, locator};

/// Errors raised by browser API calls.
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    /// A browser API call returned an error or a required object was missing.
    #[error("browser API error: {0}")]
    JsError(String),

    /// The browser could not read a picked or dropped file.
    #[error("could not read {name}: {reason}")]
    Read { name: String, reason: String },
}

impl From<JsValue> for BrowserError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

impl From<BrowserError> for PlatformError {
    fn from(err: BrowserError) -> Self {
        match err {
            BrowserError::JsError(msg) => Self::Browser(msg),
            read @ BrowserError::Read { .. } => Self::Browser(read.to_string()),
        }
    }
}

/// The browser's download, object-URL and fetch capabilities.
///
/// Stateless; construct it wherever a capability is needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserPlatform;

impl DownloadTrigger for BrowserPlatform {
    fn trigger_download(&self, url: &str, filename: &str) -> Result<(), PlatformError> {
        download::trigger_download(url, filename).map_err(|e| {
            dioxus::logger::tracing::error!("download of {filename} failed: {e}");
            e.into()
        })
    }
}

impl ResourceLocator for BrowserPlatform {
    fn create_locator(&self, bytes: &[u8], mime_type: &str) -> Result<String, PlatformError> {
        Ok(locator::bytes_to_object_url(bytes, mime_type)?)
    }

    fn revoke_locator(&self, url: &str) {
        locator::revoke_object_url(url);
    }
}

#[async_trait(?Send)]
impl ContentReader for BrowserPlatform {
    /// Wraps [`fetch()`][mdn] followed by `Response.text()`.
    ///
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/Window/fetch
    async fn read_text(&self, url: &str) -> Result<String, PreviewError> {
        let window = web_sys::window().ok_or_else(|| read_error("no global window"))?;
        let response: web_sys::Response = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(|e| read_error(&format!("{e:?}")))?
            .dyn_into()
            .map_err(|_| read_error("fetch() did not return a Response"))?;

        if !response.ok() {
            return Err(read_error(&format!("HTTP status {}", response.status())));
        }

        let promise = response.text().map_err(|e| read_error(&format!("{e:?}")))?;
        let text = JsFuture::from(promise)
            .await
            .map_err(|e| read_error(&format!("{e:?}")))?;
        text.as_string().ok_or(PreviewError::NotText)
    }
}

fn read_error(msg: &str) -> PreviewError {
    PreviewError::Read(msg.to_owned())
}
