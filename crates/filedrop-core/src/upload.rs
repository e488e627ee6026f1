//! Upload orchestration: validate, delegate, record, notify.

use web_time::Instant;

use crate::platform::{NotificationSink, Toast, UploadDelegate, UploadError};
use crate::state::StateHandle;
use crate::types::{FileSource, UploadConfig, UploadedFileInfo};
use crate::validate::ValidationError;

/// What happened to one upload attempt.
///
/// Informational only: by the time this is returned the outcome has
/// already been written to the widget state and, where applicable,
/// announced through the notification sink.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    /// The delegate accepted the file.
    Uploaded(UploadedFileInfo),
    /// Client-side validation refused the file; the delegate was not called.
    Rejected(ValidationError),
    /// The delegate failed.
    Failed(UploadError),
}

/// Validate `file` and, if accepted, upload it through `delegate`.
///
/// 1. A validation failure is stored as the widget error; nothing else
///    happens.
/// 2. Otherwise the file is registered as in flight and the delegate is
///    awaited. The state borrow is not held across the await, so other
///    uploads may proceed meanwhile.
/// 3. On success the record is appended; on failure the failure's
///    message is stored. The in-flight registration is released in both
///    cases, and only then is the success or destructive toast sent.
///
/// Errors never escape: every failure ends up in state as a display
/// string.
pub async fn handle_upload<F, D, N, S>(
    file: &F,
    config: &UploadConfig,
    delegate: &D,
    notifier: &N,
    state: &mut S,
) -> UploadOutcome
where
    F: FileSource + ?Sized,
    D: UploadDelegate<F> + ?Sized,
    N: NotificationSink + ?Sized,
    S: StateHandle,
{
    let ticket = match state.update(|s| s.begin_upload(file, config)) {
        Ok(ticket) => ticket,
        Err(err) => return UploadOutcome::Rejected(err),
    };

    tracing::info!(name = file.name(), size = file.size(), "upload started");
    let started = Instant::now();
    let result = delegate.upload_file(file).await;
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let (outcome, toast) = match &result {
        Ok(info) => {
            tracing::info!(name = file.name(), id = %info.id, elapsed_ms, "upload finished");
            let toast = Toast::normal(
                "Upload successful",
                format!("{} has been uploaded.", info.name),
            );
            (UploadOutcome::Uploaded(info.clone()), toast)
        }
        Err(err) => {
            tracing::warn!(name = file.name(), error = %err, elapsed_ms, "upload failed");
            let toast = Toast::destructive("Upload failed", err.display_message());
            (UploadOutcome::Failed(err.clone()), toast)
        }
    };

    // The sink must observe the settled state.
    state.update(|s| s.finish_upload(ticket, result));
    notifier.notify(toast);
    outcome
}
