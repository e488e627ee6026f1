//! In-memory stand-in for an upload backend.
//!
//! [`SimulatedBackend`] waits for an artificial delay, enforces its own
//! server-side size policy, then serves the file's bytes from an object
//! URL. Nothing leaves the browser.

use std::time::Duration;

use async_trait::async_trait;
use dioxus::logger::tracing;
use filedrop_core::types::BYTES_PER_MB;
use filedrop_core::{FileSource, ResourceLocator, UploadDelegate, UploadError, UploadedFileInfo};

use crate::browser::BrowserPlatform;
use crate::file::BrowserFile;

/// Default artificial latency.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

/// Default server-side size limit.
pub const DEFAULT_SERVER_MAX_BYTES: u64 = 50 * BYTES_PER_MB;

/// A fake backend that fabricates an upload response.
#[derive(Debug, Clone)]
pub struct SimulatedBackend<L = BrowserPlatform> {
    /// Artificial latency before the response.
    pub delay: Duration,
    /// Files above this size are refused, independent of the client limit.
    pub server_max_bytes: u64,
    locator: L,
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::with_locator(BrowserPlatform)
    }
}

impl<L: ResourceLocator> SimulatedBackend<L> {
    /// Create a backend that serves uploads through `locator`.
    pub const fn with_locator(locator: L) -> Self {
        Self {
            delay: DEFAULT_DELAY,
            server_max_bytes: DEFAULT_SERVER_MAX_BYTES,
            locator,
        }
    }

    /// Apply the server-side size policy.
    fn check_server_policy(&self, size: u64) -> Result<(), UploadError> {
        if size > self.server_max_bytes {
            return Err(UploadError::Rejected(format!(
                "File exceeds the server limit of {} MB",
                self.server_max_bytes / BYTES_PER_MB
            )));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl<L: ResourceLocator> UploadDelegate<BrowserFile> for SimulatedBackend<L> {
    async fn upload_file(&self, file: &BrowserFile) -> Result<UploadedFileInfo, UploadError> {
        let delay_ms = u32::try_from(self.delay.as_millis()).unwrap_or(u32::MAX);
        gloo_timers::future::TimeoutFuture::new(delay_ms).await;

        self.check_server_policy(file.size())?;

        let bytes = file
            .read_bytes()
            .await
            .map_err(|e| UploadError::Network(e.to_string()))?;
        let url = self
            .locator
            .create_locator(&bytes, file.mime_type())
            .map_err(|e| UploadError::Network(e.to_string()))?;

        let id = random_id();
        tracing::debug!("simulated upload of {} stored as {id}", file.name());
        Ok(UploadedFileInfo {
            id,
            name: file.name().to_owned(),
            url,
            size: file.size(),
            mime_type: file.mime_type().to_owned(),
        })
    }
}

/// Random identifier from the JS PRNG and clock, in base 36.
fn random_id() -> String {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let (random, now) = (
        (js_sys::Math::random() * (1u64 << 52) as f64) as u64,
        js_sys::Date::now() as u64,
    );
    format!("{}{}", to_base36(now), to_base36(random))
}

/// Render `n` in lowercase base 36.
fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_owned();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use filedrop_core::PlatformError;

    use super::*;

    struct NoLocator;

    impl ResourceLocator for NoLocator {
        fn create_locator(&self, _bytes: &[u8], _mime: &str) -> Result<String, PlatformError> {
            Err(PlatformError::Browser("unavailable".into()))
        }

        fn revoke_locator(&self, _url: &str) {}
    }

    #[test]
    fn base36_encoding() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_295), "zz");
    }

    #[test]
    fn server_policy_rejects_oversized_payloads() {
        let backend = SimulatedBackend::with_locator(NoLocator);
        assert!(backend.check_server_policy(50 * BYTES_PER_MB).is_ok());
        assert_eq!(
            backend.check_server_policy(50 * BYTES_PER_MB + 1),
            Err(UploadError::Rejected(
                "File exceeds the server limit of 50 MB".into()
            ))
        );
    }
}
