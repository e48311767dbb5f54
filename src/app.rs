//! Root Dioxus application component
//!
//! This module contains the main App component that serves as the root of the UI tree.

use crate::storage::quotes::{load_quotes, load_selected_category, save_quotes, save_selected_category};
use crate::storage::settings::{load_settings, AppSettings};
use crate::store::{QuoteStore, StoreError, ALL_CATEGORIES};
use crate::sync::SyncStatus;
use crate::types::quote::Quote;
use crate::ui::notifications::{Notification, NotificationKind};
use crate::ui::Layout;
use dioxus::prelude::*;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

static CSS: Asset = asset!("/assets/main.css");

/// Global application state shared across components
#[derive(Clone)]
pub struct AppState {
    pub quotes: Signal<QuoteStore>,
    /// Active category filter; `ALL_CATEGORIES` means no filter
    pub selected_category: Signal<String>,
    /// Most recently shown quote - session-scoped, not persisted across runs
    pub last_quote: Signal<Option<Quote>>,
    pub settings: Signal<AppSettings>,
    pub sync_status: Signal<SyncStatus>,
    pub notifications: Signal<Vec<Notification>>,
    /// Raised while a reconciliation cycle is in flight
    pub sync_in_flight: Arc<AtomicBool>,
    /// Stops the reconciler task
    pub sync_stop: Arc<AtomicBool>,
    /// Ensures the reconciler task is spawned at most once
    pub sync_task_started: Arc<AtomicBool>,
}

impl AppState {
    pub fn new() -> Self {
        tracing::info!("AppState initialized");
        let settings = load_settings();
        let store = QuoteStore::new(load_quotes());

        // Restore the saved filter only while it still names a known category
        let selected_category = match load_selected_category() {
            Some(saved) if store.category_index().iter().any(|c| c == &saved) => saved,
            _ => ALL_CATEGORIES.to_string(),
        };
        let initial_quote = store.pick_random(&selected_category);

        Self {
            quotes: Signal::new(store),
            selected_category: Signal::new(selected_category),
            last_quote: Signal::new(initial_quote),
            settings: Signal::new(settings),
            sync_status: Signal::new(SyncStatus::default()),
            notifications: Signal::new(Vec::new()),
            sync_in_flight: Arc::new(AtomicBool::new(false)),
            sync_stop: Arc::new(AtomicBool::new(false)),
            sync_task_started: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Push a transient notification
    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) {
        let mut notifications = self.notifications;
        notifications.write().push(Notification::new(kind, message));
    }

    /// Persistence choke point: mirror the store to disk after a mutation
    pub fn persist_quotes(&self) {
        let store = self.quotes.read();
        if let Err(e) = save_quotes(store.quotes()) {
            tracing::error!("Failed to persist quotes: {}", e);
        }
    }

    /// Add a quote from user input, persist, and optionally push it outward
    pub fn add_quote(&self, text: &str, category: &str) -> Result<Quote, StoreError> {
        let mut quotes_signal = self.quotes;
        let quote = quotes_signal.write().add(text, category)?;
        self.persist_quotes();

        let (push_on_add, endpoint) = {
            let settings = self.settings.read();
            (settings.push_on_add, settings.sync_endpoint.clone())
        };
        if push_on_add {
            let pushed = quote.clone();
            spawn(async move {
                crate::sync::push_one(endpoint, pushed).await;
            });
        }
        Ok(quote)
    }

    /// Import a JSON document's quotes and persist on success
    pub fn import_quotes(&self, raw: &str) -> Result<usize, StoreError> {
        let mut quotes_signal = self.quotes;
        let count = quotes_signal.write().import_json(raw)?;
        self.persist_quotes();
        Ok(count)
    }

    /// Draw a random quote under the active filter into the session slot
    ///
    /// Returns false when no quote matches the filter.
    pub fn draw_quote(&self) -> bool {
        let picked = {
            let category = self.selected_category.read().clone();
            self.quotes.read().pick_random(&category)
        };
        let drew = picked.is_some();
        let mut last_quote = self.last_quote;
        last_quote.set(picked);
        drew
    }

    /// Change the active category filter, persist it, and draw under it
    pub fn select_category(&self, category: &str) {
        let mut selected = self.selected_category;
        selected.set(category.to_string());
        if let Err(e) = save_selected_category(category) {
            tracing::warn!("Failed to persist selected category: {}", e);
        }
        self.draw_quote();
    }
}

#[component]
pub fn App() -> Element {
    let app_state = AppState::new();
    use_context_provider(|| app_state);

    {
        let app_state = use_context::<AppState>();
        use_effect(move || {
            crate::sync::start(app_state.clone());
        });
    }

    rsx! {
        document::Stylesheet { href: CSS }
        Layout {}
    }
}
