//! Settings page for the upload constraints.
//!
//! Edits the shared [`UploadConfig`] signal in place. Changes apply to
//! the next validation; files already uploaded are not re-checked.

use dioxus::logger::tracing;
use dioxus::prelude::*;
use filedrop_core::UploadConfig;

/// MIME types offered as toggles, with display labels.
const COMMON_TYPES: &[(&str, &str)] = &[
    ("image/png", "PNG image"),
    ("image/jpeg", "JPEG image"),
    ("image/gif", "GIF image"),
    ("image/webp", "WebP image"),
    ("image/svg+xml", "SVG image"),
    ("application/pdf", "PDF document"),
    ("text/plain", "Plain text"),
    ("text/csv", "CSV"),
    ("application/json", "JSON"),
    ("application/zip", "ZIP archive"),
];

/// Props for the [`SettingsPanel`] component.
#[derive(Props, Clone, PartialEq)]
pub struct SettingsPanelProps {
    /// Configuration shared with the upload widget.
    config: Signal<UploadConfig>,
}

/// Form for the maximum file size and the MIME allow list.
#[component]
pub fn SettingsPanel(props: SettingsPanelProps) -> Element {
    let mut config = props.config;
    let mut size_error = use_signal(|| Option::<String>::None);
    let mut custom_type = use_signal(String::new);
    let mut type_error = use_signal(|| Option::<String>::None);

    let current = config.read().clone();
    let custom_types: Vec<String> = current
        .allowed_types
        .iter()
        .filter(|t| !COMMON_TYPES.iter().any(|(common, _)| common == t))
        .cloned()
        .collect();

    let mut add_custom = move || {
        let entry = custom_type.peek().clone();
        match config.write().allow_type(&entry) {
            Ok(()) => {
                tracing::info!("allowed MIME type {entry}");
                custom_type.set(String::new());
                type_error.set(None);
            }
            Err(e) => type_error.set(Some(e.to_string())),
        }
    };

    rsx! {
        div { class: "fd-settings",
            section { class: "fd-card",
                h3 { class: "fd-heading", "Maximum file size" }
                label { class: "fd-field", r#for: "max-size",
                    span { "Size limit (MB)" }
                    input {
                        id: "max-size",
                        r#type: "number",
                        min: "0.1",
                        step: "0.1",
                        value: "{current.max_size_mb}",
                        onchange: move |e| {
                            match parse_size_input(&e.value()) {
                                Ok(mb) => match config.write().set_max_size_mb(mb) {
                                    Ok(()) => size_error.set(None),
                                    Err(err) => size_error.set(Some(err.to_string())),
                                },
                                Err(msg) => size_error.set(Some(msg)),
                            }
                        },
                    }
                }
                if let Some(ref err) = size_error() {
                    p { class: "fd-error fd-small", "{err}" }
                }
            }

            section { class: "fd-card",
                h3 { class: "fd-heading", "Allowed file types" }
                if current.allowed_types.is_empty() {
                    p { class: "fd-muted fd-small",
                        "No types selected: every file type is accepted."
                    }
                }
                div { class: "fd-type-grid",
                    for (mime, title) in COMMON_TYPES.iter().copied() {
                        label { key: "{mime}", class: "fd-checkbox",
                            input {
                                r#type: "checkbox",
                                checked: current.is_type_listed(mime),
                                onchange: move |_| toggle_type(config, mime),
                            }
                            span { "{title} " }
                            code { class: "fd-muted fd-small", "{mime}" }
                        }
                    }
                }

                if !custom_types.is_empty() {
                    ul { class: "fd-custom-types",
                        for mime in custom_types {
                            li { key: "{mime}",
                                code { "{mime}" }
                                button {
                                    class: "fd-link",
                                    onclick: {
                                        let mime = mime.clone();
                                        move |_| {
                                            config.write().disallow_type(&mime);
                                        }
                                    },
                                    "Remove"
                                }
                            }
                        }
                    }
                }

                div { class: "fd-inline-form",
                    input {
                        r#type: "text",
                        placeholder: "e.g. audio/mpeg",
                        value: "{custom_type}",
                        oninput: move |e| custom_type.set(e.value()),
                        onkeydown: move |e| {
                            if e.key() == Key::Enter {
                                add_custom();
                            }
                        },
                    }
                    button {
                        class: "fd-button",
                        onclick: move |_| add_custom(),
                        "Add type"
                    }
                }
                if let Some(ref err) = type_error() {
                    p { class: "fd-error fd-small", "{err}" }
                }
            }

            button {
                class: "fd-button",
                onclick: move |_| {
                    config.set(UploadConfig::default());
                    size_error.set(None);
                    type_error.set(None);
                },
                "Reset to defaults"
            }
        }
    }
}

/// Flip `mime` in the allow list.
fn toggle_type(mut config: Signal<UploadConfig>, mime: &str) {
    let mut config = config.write();
    if !config.disallow_type(mime) {
        // Entries in COMMON_TYPES are well-formed.
        let _ = config.allow_type(mime);
    }
}

/// Parse the size field, rejecting anything that is not a number.
fn parse_size_input(raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| format!("{raw:?} is not a number"))
}
