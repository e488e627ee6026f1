//! File upload widget with drag-and-drop, file picker and file list.

use std::rc::Rc;

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdUpload;
use filedrop_core::{
    ResourceLocator, StateHandle, UploadConfig, UploadDelegate, UploadState, handle_upload,
};

use super::FileList;
use crate::browser::BrowserPlatform;
use crate::file::BrowserFile;
use crate::toast::ToastQueue;

/// An Upload Delegate shared between renders.
pub type SharedDelegate = Rc<dyn UploadDelegate<BrowserFile>>;

/// Widget state living in a Dioxus signal.
struct SignalState(Signal<UploadState>);

impl StateHandle for SignalState {
    fn update<R>(&mut self, f: impl FnOnce(&mut UploadState) -> R) -> R {
        f(&mut self.0.write())
    }
}

/// Props for the [`FileUpload`] component.
#[derive(Props, Clone)]
pub struct FileUploadProps {
    /// Constraints for the next validation.
    config: UploadConfig,
    /// Performs the actual upload of accepted files.
    delegate: SharedDelegate,
    /// Receives success and failure toasts.
    notifier: ToastQueue,
}

impl PartialEq for FileUploadProps {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
            && Rc::ptr_eq(&self.delegate, &other.delegate)
            && self.notifier == other.notifier
    }
}

/// A drag-and-drop zone with a file picker button and the list of
/// uploaded files.
///
/// Every dropped or picked file is validated against `config` and, if
/// accepted, handed to `delegate`. Files dropped while another upload is
/// in flight are uploaded concurrently.
#[component]
pub fn FileUpload(props: FileUploadProps) -> Element {
    let mut state = use_signal(UploadState::new);

    // Shared by the file-picker and drag-and-drop paths.
    let start_uploads = {
        let config = props.config.clone();
        let delegate = Rc::clone(&props.delegate);
        let notifier = props.notifier;
        move |files: Vec<FileData>| {
            for data in files {
                let file = BrowserFile::new(data);
                let config = config.clone();
                let delegate = Rc::clone(&delegate);
                spawn(async move {
                    let mut handle = SignalState(state);
                    handle_upload(&file, &config, &*delegate, &notifier, &mut handle).await;
                });
            }
        }
    };

    let handle_files = {
        let start_uploads = start_uploads.clone();
        move |evt: FormEvent| start_uploads(evt.files())
    };

    let handle_drop = move |evt: DragEvent| {
        evt.prevent_default();
        state.write().set_dragging(false);
        start_uploads(evt.files());
    };

    let current = state.read();
    let zone_class = if current.is_dragging() {
        "fd-dropzone fd-dropzone--active"
    } else {
        "fd-dropzone"
    };
    let accept = props.config.allowed_types.join(",");
    let hint = constraint_hint(&props.config);
    let pending: Vec<&str> = current.pending().iter().map(|p| p.name.as_str()).collect();
    let pending_label = pending.join(", ");
    let error = current.error().map(str::to_owned);
    let warnings = current.warnings().to_vec();
    let files = current.files().to_vec();
    drop(current);

    rsx! {
        div { class: "fd-upload",
            div {
                class: "{zone_class}",
                ondragover: move |evt| {
                    evt.prevent_default();
                    if !state.peek().is_dragging() {
                        state.write().set_dragging(true);
                    }
                },
                ondragleave: move |_| {
                    state.write().set_dragging(false);
                },
                ondrop: handle_drop,

                div { class: "fd-dropzone-icon",
                    Icon { width: 32, height: 32, icon: LdUpload }
                }
                p { class: "fd-dropzone-title", "Drop files here or " }

                label { class: "fd-button fd-button--primary",
                    input {
                        r#type: "file",
                        accept: "{accept}",
                        multiple: true,
                        class: "fd-hidden",
                        onchange: handle_files,
                    }
                    "Choose File"
                }

                p { class: "fd-muted fd-small", "{hint}" }
            }

            if !pending_label.is_empty() {
                div { class: "fd-status", role: "status",
                    span { class: "fd-spinner" }
                    "Uploading {pending_label}..."
                }
            }

            if let Some(ref err) = error {
                div { class: "fd-alert fd-alert--error", role: "alert",
                    p { "{err}" }
                    button {
                        class: "fd-link",
                        onclick: move |_| state.write().clear_error(),
                        "Dismiss"
                    }
                }
            }

            if !warnings.is_empty() {
                div { class: "fd-alert fd-alert--warning",
                    ul {
                        for warning in warnings {
                            li { "{warning}" }
                        }
                    }
                }
            }

            FileList {
                files,
                on_remove: move |id: String| {
                    let removed = state.write().remove_file(&id);
                    // Object URLs created in this page hold the file's bytes.
                    if let Some(file) = removed.filter(|f| f.url.starts_with("blob:")) {
                        BrowserPlatform.revoke_locator(&file.url);
                    }
                },
            }
        }
    }
}

/// One-line summary of the active constraints shown under the drop zone.
fn constraint_hint(config: &UploadConfig) -> String {
    let types = if config.allowed_types.is_empty() {
        "any file type".to_owned()
    } else {
        config.allowed_types.join(", ")
    };
    format!("Up to {} MB · {types}", config.max_size_mb)
}
