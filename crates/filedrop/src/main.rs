use std::rc::Rc;

use dioxus::logger::tracing;
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdSettings, LdUpload};
use filedrop_core::UploadConfig;
use filedrop_io::{FileUpload, SettingsPanel, SharedDelegate, SimulatedBackend, ToastStack};

fn main() {
    dioxus::launch(app);
}

/// Top-level pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Upload,
    Settings,
}

impl Tab {
    const ALL: [Self; 2] = [Self::Upload, Self::Settings];

    const fn label(self) -> &'static str {
        match self {
            Self::Upload => "Upload",
            Self::Settings => "Settings",
        }
    }
}

/// Root application component.
///
/// Owns the upload constraints, shared between the settings tab and the
/// upload widget, along with the toast queue and the upload backend.
fn app() -> Element {
    let config = use_signal(UploadConfig::default);
    let mut tab = use_signal(|| Tab::Upload);
    let toasts = filedrop_io::use_toast_queue();
    let delegate = use_hook(|| {
        tracing::info!("using the simulated upload backend");
        Rc::new(SimulatedBackend::default()) as SharedDelegate
    });

    let active = tab();

    rsx! {
        style { dangerous_inner_html: include_str!("../assets/style.css") }

        div { class: "fd-app",
            header { class: "fd-header",
                h1 { class: "fd-title", "filedrop" }
                p { class: "fd-muted",
                    "Drop files to validate and upload them, then preview or download the results."
                }
            }

            nav { class: "fd-tabs", role: "tablist",
                for t in Tab::ALL {
                    button {
                        key: "{t.label()}",
                        role: "tab",
                        class: if t == active { "fd-tab fd-tab--active" } else { "fd-tab" },
                        "aria-selected": "{t == active}",
                        onclick: move |_| tab.set(t),
                        {tab_icon(t)}
                        "{t.label()}"
                    }
                }
            }

            // Both pages stay mounted so uploads survive a tab switch.
            main { class: "fd-main",
                section { role: "tabpanel", hidden: active != Tab::Upload,
                    FileUpload {
                        config: config(),
                        delegate: Rc::clone(&delegate),
                        notifier: toasts,
                    }
                }
                section { role: "tabpanel", hidden: active != Tab::Settings,
                    SettingsPanel { config }
                }
            }

            ToastStack { queue: toasts }
        }
    }
}

fn tab_icon(tab: Tab) -> Element {
    match tab {
        Tab::Upload => rsx! {
            Icon { width: 16, height: 16, icon: LdUpload }
        },
        Tab::Settings => rsx! {
            Icon { width: 16, height: 16, icon: LdSettings }
        },
    }
}
