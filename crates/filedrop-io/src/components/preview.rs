//! Inline preview of an uploaded file.

use dioxus::prelude::*;
use filedrop_core::{PreviewContent, UploadedFileInfo, load_preview};

use crate::browser::BrowserPlatform;

/// Props for the [`FilePreview`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FilePreviewProps {
    /// The file to preview.
    file: UploadedFileInfo,
}

/// Renders a file according to its MIME category.
///
/// Images are shown directly, PDFs in an embedded viewer, plain text,
/// JSON and CSV as raw text; anything else gets a placeholder. Text
/// content is fetched asynchronously and a read failure is shown in
/// place of the preview without affecting the upload itself.
#[component]
pub fn FilePreview(props: FilePreviewProps) -> Element {
    let name = props.file.name.clone();
    let preview = use_resource({
        let file = props.file;
        move || {
            let file = file.clone();
            async move { load_preview(&BrowserPlatform, &file).await }
        }
    });

    let body = match &*preview.read_unchecked() {
        None => rsx! {
            p { class: "fd-muted fd-small", "Loading preview..." }
        },
        Some(Err(e)) => rsx! {
            p { class: "fd-error fd-small", "Preview unavailable: {e}" }
        },
        Some(Ok(PreviewContent::Image { url })) => rsx! {
            img { class: "fd-preview-image", src: "{url}", alt: "{name}" }
        },
        Some(Ok(PreviewContent::Pdf { url })) => rsx! {
            iframe { class: "fd-preview-pdf", src: "{url}", title: "{name}" }
        },
        Some(Ok(PreviewContent::Text { text, truncated })) => rsx! {
            pre { class: "fd-preview-text", "{text}" }
            if *truncated {
                p { class: "fd-muted fd-small", "Preview truncated." }
            }
        },
        Some(Ok(PreviewContent::Unsupported)) => rsx! {
            p { class: "fd-muted fd-small", "Preview is not available for this file type." }
        },
    };

    rsx! {
        div { class: "fd-preview", {body} }
    }
}
