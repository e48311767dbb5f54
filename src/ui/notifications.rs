//! Transient notification toasts
//!
//! Notifications stack in a fixed corner and dismiss themselves after a few
//! seconds; nothing here requires acknowledgement.

use dioxus::prelude::*;
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::app::AppState;

/// How long a toast stays on screen
const DISMISS_AFTER: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

/// A single transient notification
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    created_at: Instant,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            created_at: Instant::now(),
        }
    }

    fn expired(&self) -> bool {
        self.created_at.elapsed() >= DISMISS_AFTER
    }
}

fn toast_class(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Info => "toast toast-info",
        NotificationKind::Success => "toast toast-success",
        NotificationKind::Warning => "toast toast-warning",
        NotificationKind::Error => "toast toast-error",
    }
}

/// Fixed-position stack of auto-dismissing toasts
#[component]
pub fn Toasts() -> Element {
    let app_state = use_context::<AppState>();

    // Sweep expired toasts off the stack
    {
        let mut notifications = app_state.notifications;
        use_effect(move || {
            spawn(async move {
                loop {
                    tokio::time::sleep(Duration::from_millis(500)).await;
                    let has_expired = notifications.read().iter().any(|n| n.expired());
                    if has_expired {
                        notifications.write().retain(|n| !n.expired());
                    }
                }
            });
        });
    }

    let notifications = app_state.notifications.read().clone();

    rsx! {
        div {
            class: "toast-stack",
            for notification in notifications {
                div {
                    key: "{notification.id}",
                    class: toast_class(notification.kind),
                    "{notification.message}"
                }
            }
        }
    }
}
