//! Toast notifications rendered in a fixed corner stack.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdX;
use filedrop_core::ToastVariant;

use crate::toast::ToastQueue;

/// Props for the [`ToastStack`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ToastStackProps {
    /// Queue whose toasts are shown.
    queue: ToastQueue,
}

/// Shows every queued toast with a dismiss button.
#[component]
pub fn ToastStack(props: ToastStackProps) -> Element {
    let queue = props.queue;

    rsx! {
        div { class: "fd-toast-stack", aria_live: "polite",
            for entry in queue.entries() {
                div {
                    key: "{entry.id}",
                    class: variant_class(entry.toast.variant),
                    role: "status",
                    div { class: "fd-toast-body",
                        p { class: "fd-toast-title", "{entry.toast.title}" }
                        p { class: "fd-toast-description", "{entry.toast.description}" }
                    }
                    button {
                        class: "fd-icon-button",
                        aria_label: "Dismiss notification",
                        onclick: move |_| queue.dismiss(entry.id),
                        Icon { width: 14, height: 14, icon: LdX }
                    }
                }
            }
        }
    }
}

const fn variant_class(variant: ToastVariant) -> &'static str {
    match variant {
        ToastVariant::Normal => "fd-toast",
        ToastVariant::Destructive => "fd-toast fd-toast--destructive",
    }
}
