//! File download via temporary anchor elements.
//!
//! Dioxus has no built-in file download API.  This module triggers a
//! save-as by programmatically clicking a temporary `<a download>`
//! element pointing at the file's locator.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use wasm_bindgen::JsCast;

use crate::browser::BrowserError;

/// Trigger a download of `url` in the browser, suggesting `filename`.
///
/// Works for object URLs created by [`crate::locator`] as well as for
/// same-origin HTTP URLs.
///
/// # Errors
///
/// Returns [`BrowserError::JsError`] if any browser API call fails
/// (e.g., element creation or appending to the document body).
pub fn trigger_download(url: &str, filename: &str) -> Result<(), BrowserError> {
    let window =
        web_sys::window().ok_or_else(|| BrowserError::JsError("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| BrowserError::JsError("no document".into()))?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|e| BrowserError::JsError(format!("failed to cast element: {e:?}")))?;

    anchor.set_href(url);
    anchor.set_download(filename);

    let body = document
        .body()
        .ok_or_else(|| BrowserError::JsError("no document body".into()))?;
    body.append_child(&anchor)?;
    anchor.click();

    // The download is already initiated; a failed removal is not a failed download.
    let _ = body.remove_child(&anchor);

    Ok(())
}
