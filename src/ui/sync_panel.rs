//! Sync panel
//!
//! Manual reconciliation trigger, the auto-sync toggle, and the last
//! cycle's outcome.

use dioxus::prelude::*;

use crate::app::AppState;
use crate::storage::settings::save_settings;
use crate::sync::{run_cycle, SyncError};
use crate::ui::notifications::NotificationKind;

#[component]
pub fn SyncPanel() -> Element {
    let app_state = use_context::<AppState>();
    let status = app_state.sync_status.read().clone();
    let auto_sync = app_state.settings.read().auto_sync;

    let status_line = if status.in_progress {
        "Syncing...".to_string()
    } else {
        match &status.last_outcome {
            Some(outcome) => {
                let mut line = format!(
                    "Last synced {} ({} new, {} pushed",
                    outcome.completed_at.format("%H:%M:%S"),
                    outcome.merged,
                    outcome.pushed,
                );
                if outcome.push_failures > 0 {
                    line.push_str(&format!(", {} failed", outcome.push_failures));
                }
                line.push(')');
                line
            }
            None => "Not synced yet".to_string(),
        }
    };

    let handle_sync = {
        let app_state = app_state.clone();
        move |_: MouseEvent| {
            let app_state = app_state.clone();
            spawn(async move {
                if let Err(SyncError::AlreadyRunning) = run_cycle(app_state.clone()).await {
                    app_state.notify(NotificationKind::Info, "A sync is already in progress");
                }
            });
        }
    };

    let handle_toggle = {
        let app_state = app_state.clone();
        move |_: MouseEvent| {
            let mut settings_signal = app_state.settings;
            let mut settings = settings_signal.write();
            settings.auto_sync = !settings.auto_sync;
            if let Err(error) = save_settings(&settings) {
                tracing::error!("Failed to save settings: {}", error);
            }
        }
    };

    rsx! {
        section {
            class: "panel",
            h3 { class: "panel-title", "Server Sync" }
            div { class: "sync-status", "{status_line}" }
            button {
                class: "btn",
                disabled: status.in_progress,
                onclick: handle_sync,
                "Sync Now"
            }
            div {
                class: "sync-toggle-row",
                span { class: "sync-toggle-label", "Auto-sync" }
                button {
                    class: if auto_sync { "toggle-switch active" } else { "toggle-switch" },
                    onclick: handle_toggle,
                    div { class: "toggle-switch-knob" }
                }
            }
        }
    }
}
