// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings page — backend endpoints, timeouts and session sealing.

use dioxus::prelude::*;

use crate::services::app_services::AppServices;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const ROW: &str = "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;";
const FIELD: &str = "width: 60%; padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px;";

#[component]
pub fn Settings() -> Element {
    let svc = use_context::<AppServices>();
    let mut config = use_signal({
        let svc = svc.clone();
        move || svc.config()
    });
    let mut save_msg = use_signal(|| Option::<String>::None);

    rsx! {
        div {
            h1 { "Settings" }

            section { style: "margin: 16px 0;",
                h3 { "Backend" }
                div { style: ROW,
                    span { "API URL" }
                    input {
                        style: FIELD,
                        value: "{config.read().api_url}",
                        onchange: move |evt| config.write().api_url = evt.value().trim().to_owned(),
                    }
                }
                div { style: ROW,
                    span { "Image base URL" }
                    input {
                        style: FIELD,
                        value: "{config.read().asset_base_url}",
                        onchange: move |evt| config.write().asset_base_url = evt.value().trim().to_owned(),
                    }
                }
                div { style: ROW,
                    span { "Request timeout (seconds)" }
                    input {
                        r#type: "number",
                        style: "width: 80px; padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px; text-align: right;",
                        value: "{config.read().request_timeout_secs}",
                        onchange: move |evt| {
                            if let Ok(secs) = evt.value().parse::<u64>()
                                && secs > 0
                            {
                                config.write().request_timeout_secs = secs;
                            }
                        },
                    }
                }
            }

            section { style: "margin: 16px 0;",
                h3 { "Security" }
                SettingRow {
                    label: "Encrypt stored session",
                    checked: config.read().encrypt_session,
                    on_toggle: move |v: bool| { config.write().encrypt_session = v; },
                }
            }

            button {
                style: "width: 100%; padding: 12px; border-radius: 8px; border: none; background: #2563eb; color: white; font-size: 16px; margin-top: 8px;",
                onclick: move |_| {
                    let updated = config.read().clone();
                    match svc.save_config(&updated) {
                        Ok(()) => {
                            tracing::info!("settings saved");
                            save_msg.set(Some("Settings saved. Restart to apply endpoint changes.".into()));
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "failed to save settings");
                            save_msg.set(Some(format!("Save failed: {e}")));
                        }
                    }
                },
                "Save Settings"
            }
            if let Some(ref msg) = *save_msg.read() {
                p { style: "color: #16a34a; font-size: 14px; text-align: center; margin-top: 8px;",
                    "{msg}"
                }
            }

            section { style: "margin: 24px 0;",
                h3 { "About" }
                p { style: "color: #666; font-size: 14px;",
                    "Pandi v{VERSION}"
                    br {}
                    "Local services marketplace"
                    br {}
                    "PMPL-1.0-or-later"
                }
            }
        }
    }
}

#[component]
fn SettingRow(label: &'static str, checked: bool, on_toggle: EventHandler<bool>) -> Element {
    rsx! {
        div { style: ROW,
            span { "{label}" }
            input {
                r#type: "checkbox",
                checked: checked,
                onchange: move |evt| {
                    on_toggle.call(evt.checked());
                },
            }
        }
    }
}
