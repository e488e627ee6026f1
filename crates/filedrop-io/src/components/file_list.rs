//! List of uploaded files with preview, download and remove actions.

use std::collections::HashSet;

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdDownload, LdEye, LdEyeOff, LdTrash2};
use filedrop_core::{UploadedFileInfo, download_file, format_file_size};

use super::FilePreview;
use crate::browser::BrowserPlatform;

/// Props for the [`FileList`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileListProps {
    /// Uploaded files in completion order.
    files: Vec<UploadedFileInfo>,
    /// Called with a file's id when the user removes it.
    on_remove: EventHandler<String>,
}

/// Uploaded files, one row each.
///
/// Removal is immediate and only affects this list. Preview visibility
/// is tracked per file id.
#[component]
pub fn FileList(props: FileListProps) -> Element {
    let previews = use_signal(HashSet::<String>::new);
    let download_error = use_signal(|| Option::<String>::None);

    if props.files.is_empty() {
        return rsx! {
            p { class: "fd-muted fd-empty", "No files uploaded yet." }
        };
    }

    let count = props.files.len();

    rsx! {
        div { class: "fd-file-list",
            h3 { class: "fd-heading", "Uploaded files ({count})" }

            if let Some(ref err) = download_error() {
                p { class: "fd-error fd-small", "{err}" }
            }

            ul {
                for file in props.files {
                    {render_row(file, previews, download_error, props.on_remove)}
                }
            }
        }
    }
}

/// Render a single file row.
fn render_row(
    file: UploadedFileInfo,
    mut previews: Signal<HashSet<String>>,
    mut download_error: Signal<Option<String>>,
    on_remove: EventHandler<String>,
) -> Element {
    let shown = previews.read().contains(&file.id);
    let size = format_file_size(file.size);
    let toggle_title = if shown { "Hide preview" } else { "Show preview" };

    let on_toggle = {
        let id = file.id.clone();
        move |_| {
            let mut set = previews.write();
            if !set.remove(&id) {
                set.insert(id.clone());
            }
        }
    };

    let on_download = {
        let target = file.clone();
        move |_| match download_file(&BrowserPlatform, &target) {
            Ok(()) => download_error.set(None),
            Err(e) => download_error.set(Some(format!("Download failed: {e}"))),
        }
    };

    let on_delete = {
        let id = file.id.clone();
        move |_| {
            previews.write().remove(&id);
            on_remove.call(id.clone());
        }
    };

    rsx! {
        li { key: "{file.id}", class: "fd-file-row",
            div { class: "fd-file-main",
                div { class: "fd-file-meta",
                    span { class: "fd-file-name", title: "{file.name}", "{file.name}" }
                    span { class: "fd-muted fd-small", "{size} · {file.mime_type}" }
                }
                div { class: "fd-file-actions",
                    button {
                        class: "fd-icon-button",
                        title: "{toggle_title}",
                        aria_label: "{toggle_title}: {file.name}",
                        "aria-pressed": "{shown}",
                        onclick: on_toggle,
                        if shown {
                            Icon { width: 16, height: 16, icon: LdEyeOff }
                        } else {
                            Icon { width: 16, height: 16, icon: LdEye }
                        }
                    }
                    button {
                        class: "fd-icon-button",
                        title: "Download",
                        aria_label: "Download {file.name}",
                        onclick: on_download,
                        Icon { width: 16, height: 16, icon: LdDownload }
                    }
                    button {
                        class: "fd-icon-button fd-icon-button--danger",
                        title: "Remove",
                        aria_label: "Remove {file.name}",
                        onclick: on_delete,
                        Icon { width: 16, height: 16, icon: LdTrash2 }
                    }
                }
            }
            if shown {
                FilePreview { file: file.clone() }
            }
        }
    }
}
