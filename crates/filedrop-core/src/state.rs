//! Transient state of the upload widget.
//!
//! [`UploadState`] holds everything the widget renders: the drag flag,
//! in-flight uploads, the accepted-file list, the current error and the
//! current warnings. All mutation goes through its methods so the
//! invariants below hold no matter which front end drives it.
//!
//! # Overlapping uploads
//!
//! A second file may be accepted while an earlier upload is still in
//! flight. Each accepted file gets a [`Ticket`]; the widget reports
//! uploading until every ticket is released, and records are appended
//! in completion order. Warnings belong to the ticket whose validation
//! produced them, so an older upload completing late never clears the
//! warnings of a newer file.

use std::cell::RefCell;
use std::rc::Rc;

use crate::platform::UploadError;
use crate::types::{FileSource, UploadConfig, UploadedFileInfo};
use crate::validate::ValidationError;

/// Identifier of one accepted, in-flight upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// An accepted file whose delegate call has not finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    pub ticket: Ticket,
    pub name: String,
}

/// Widget state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadState {
    dragging: bool,
    pending: Vec<PendingUpload>,
    files: Vec<UploadedFileInfo>,
    error: Option<String>,
    warnings: Vec<String>,
    warnings_owner: Option<Ticket>,
    next_ticket: u64,
}

impl UploadState {
    /// Empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a file is being dragged over the drop zone.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Update the drag flag.
    pub const fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Whether at least one delegate call is outstanding.
    #[must_use]
    pub const fn is_uploading(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Uploads currently in flight, oldest first.
    #[must_use]
    pub fn pending(&self) -> &[PendingUpload] {
        &self.pending
    }

    /// Uploaded files in completion order.
    #[must_use]
    pub fn files(&self) -> &[UploadedFileInfo] {
        &self.files
    }

    /// Last validation or upload failure, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Advisory warnings from the latest accepted validation.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Validate `file` and, if it is accepted, register it as in flight.
    ///
    /// On rejection the error is stored and the warnings are cleared. On
    /// acceptance the error is cleared, the file's warnings replace the
    /// current ones and a [`Ticket`] is returned; the caller must hand it
    /// back to [`finish_upload`](Self::finish_upload) once the delegate
    /// call resolves.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] that rejected the file.
    pub fn begin_upload<F: FileSource + ?Sized>(
        &mut self,
        file: &F,
        config: &UploadConfig,
    ) -> Result<Ticket, ValidationError> {
        match config.validate(file) {
            Err(err) => {
                self.error = Some(err.to_string());
                self.warnings.clear();
                self.warnings_owner = None;
                Err(err)
            }
            Ok(warnings) => {
                let ticket = Ticket(self.next_ticket);
                self.next_ticket += 1;
                self.error = None;
                self.warnings = warnings.iter().map(ToString::to_string).collect();
                self.warnings_owner = Some(ticket);
                self.pending.push(PendingUpload {
                    ticket,
                    name: file.name().to_owned(),
                });
                Ok(ticket)
            }
        }
    }

    /// Release `ticket` and record the delegate's result.
    ///
    /// A success appends the record and clears the warnings if they still
    /// belong to `ticket`. A failure stores the failure's display message.
    /// Unknown tickets are ignored.
    pub fn finish_upload(
        &mut self,
        ticket: Ticket,
        result: Result<UploadedFileInfo, UploadError>,
    ) {
        let Some(index) = self.pending.iter().position(|p| p.ticket == ticket) else {
            tracing::warn!(?ticket, "finish_upload called with unknown ticket");
            return;
        };
        self.pending.remove(index);

        match result {
            Ok(info) => {
                self.files.push(info);
                if self.warnings_owner == Some(ticket) {
                    self.warnings.clear();
                    self.warnings_owner = None;
                }
            }
            Err(err) => {
                self.error = Some(err.display_message());
            }
        }
    }

    /// Remove the record with `id` from the list.
    ///
    /// Other records keep their order. Nothing is deleted on the backend.
    /// Returns the removed record, or `None` if no record matched.
    pub fn remove_file(&mut self, id: &str) -> Option<UploadedFileInfo> {
        let index = self.files.iter().position(|f| f.id == id)?;
        Some(self.files.remove(index))
    }

    /// Dismiss the current error message.
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

/// Mutable access to an [`UploadState`] that may live behind a cell or
/// a UI signal.
///
/// The orchestrator only touches state inside `update` and never holds
/// the borrow across an `.await`, so shared handles can be used while
/// several uploads overlap.
pub trait StateHandle {
    fn update<R>(&mut self, f: impl FnOnce(&mut UploadState) -> R) -> R;
}

impl StateHandle for UploadState {
    fn update<R>(&mut self, f: impl FnOnce(&mut UploadState) -> R) -> R {
        f(self)
    }
}

impl StateHandle for Rc<RefCell<UploadState>> {
    fn update<R>(&mut self, f: impl FnOnce(&mut UploadState) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}
