//! Object URL creation for in-memory file content.
//!
//! Wraps bytes in a `Blob` and hands out a `blob:` URL the browser can
//! render, embed or download.

use web_sys::BlobPropertyBag;

use crate::browser::BrowserError;

/// Create an object URL serving `bytes` as `mime_type`.
///
/// The returned URL must be revoked via [`revoke_object_url`] when no
/// longer needed to avoid memory leaks.
///
/// # Errors
///
/// Returns [`BrowserError::JsError`] if Blob or URL creation fails.
pub fn bytes_to_object_url(bytes: &[u8], mime_type: &str) -> Result<String, BrowserError> {
    let uint8_array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&uint8_array);

    let opts = BlobPropertyBag::new();
    if !mime_type.is_empty() {
        opts.set_type(mime_type);
    }
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)?;
    Ok(url)
}

/// Revoke an object URL previously returned by [`bytes_to_object_url`].
///
/// Best-effort: failures are ignored.
pub fn revoke_object_url(url: &str) {
    let _ = web_sys::Url::revoke_object_url(url);
}
