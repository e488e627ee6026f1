//! In-page toast queue backed by a Dioxus signal.
//!
//! [`ToastQueue`] is the browser [`NotificationSink`]: every toast is
//! pushed onto a signal rendered by [`crate::components::ToastStack`]
//! and dismissed automatically after [`TOAST_LIFETIME_MS`].

use dioxus::prelude::*;
use filedrop_core::{NotificationSink, Toast};

/// How long a toast stays on screen unless dismissed earlier.
pub const TOAST_LIFETIME_MS: u32 = 4000;

/// A toast with the identifier used to dismiss it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastEntry {
    pub id: u64,
    pub toast: Toast,
}

/// Signal-backed toast queue. Cheap to copy.
#[derive(Clone, Copy, PartialEq)]
pub struct ToastQueue {
    entries: Signal<Vec<ToastEntry>>,
    next_id: Signal<u64>,
}

impl ToastQueue {
    /// Toasts currently shown, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<ToastEntry> {
        self.entries.read().clone()
    }

    /// Remove the toast with `id`, if it is still shown.
    pub fn dismiss(&self, id: u64) {
        let mut entries = self.entries;
        entries.write().retain(|e| e.id != id);
    }

    /// Add a toast and return its identifier.
    fn push(&self, toast: Toast) -> u64 {
        let mut next_id = self.next_id;
        let id = *next_id.peek();
        next_id.set(id + 1);
        let mut entries = self.entries;
        entries.write().push(ToastEntry { id, toast });
        id
    }
}

impl NotificationSink for ToastQueue {
    fn notify(&self, toast: Toast) {
        let id = self.push(toast);
        let queue = *self;
        spawn(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_LIFETIME_MS).await;
            queue.dismiss(id);
        });
    }
}

/// Create a toast queue owned by the calling component.
pub fn use_toast_queue() -> ToastQueue {
    ToastQueue {
        entries: use_signal(Vec::new),
        next_id: use_signal(|| 0),
    }
}
