//! Import and export controls
//!
//! Export writes the full collection as `quotes.json` into the user's
//! download directory; import reads a JSON document from a typed-in path
//! and appends its quotes to the store.

use dioxus::prelude::*;
use std::fs;

use crate::app::AppState;
use crate::storage::quotes::export_quotes;
use crate::ui::notifications::NotificationKind;

#[component]
pub fn ImportExport() -> Element {
    let app_state = use_context::<AppState>();
    let mut import_path = use_signal(String::new);

    let handle_export = {
        let app_state = app_state.clone();
        move |_: MouseEvent| {
            let result = {
                let store = app_state.quotes.read();
                export_quotes(store.quotes())
            };
            match result {
                Ok(path) => {
                    app_state.notify(
                        NotificationKind::Success,
                        format!("Exported quotes to {}", path.display()),
                    );
                }
                Err(e) => {
                    tracing::error!("Export failed: {}", e);
                    app_state.notify(NotificationKind::Error, "Failed to export quotes");
                }
            }
        }
    };

    let handle_import = {
        let app_state = app_state.clone();
        let mut import_path = import_path.clone();
        move |_: MouseEvent| {
            let path = import_path().trim().to_string();
            if path.is_empty() {
                app_state.notify(NotificationKind::Error, "Enter a JSON file path to import");
                return;
            }
            let raw = match fs::read_to_string(&path) {
                Ok(raw) => raw,
                Err(e) => {
                    app_state.notify(
                        NotificationKind::Error,
                        format!("Could not read {}: {}", path, e),
                    );
                    return;
                }
            };
            match app_state.import_quotes(&raw) {
                Ok(count) => {
                    import_path.set(String::new());
                    app_state.notify(
                        NotificationKind::Success,
                        format!("Quotes imported successfully! ({})", count),
                    );
                }
                Err(e) => {
                    app_state.notify(NotificationKind::Error, format!("Failed to import: {}", e));
                }
            }
        }
    };

    rsx! {
        section {
            class: "panel",
            h3 { class: "panel-title", "Import / Export" }
            button {
                class: "btn",
                onclick: handle_export,
                "Export Quotes"
            }
            input {
                r#type: "text",
                class: "field",
                placeholder: "Path to a quotes JSON file",
                value: "{import_path}",
                oninput: move |evt| import_path.set(evt.value()),
            }
            button {
                class: "btn",
                onclick: handle_import,
                "Import Quotes"
            }
        }
    }
}
