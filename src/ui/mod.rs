//! UI components for QuoteDeck
//!
//! This module contains all user interface components built with Dioxus.

pub mod add_quote;
pub mod category_filter;
pub mod import_export;
pub mod notifications;
pub mod quote_view;
pub mod sync_panel;

use dioxus::prelude::*;

use add_quote::AddQuoteForm;
use category_filter::CategoryFilter;
use import_export::ImportExport;
use notifications::Toasts;
use quote_view::QuoteView;
use sync_panel::SyncPanel;

/// Top-level window layout
#[component]
pub fn Layout() -> Element {
    rsx! {
        div {
            class: "app-shell",
            header {
                class: "app-header",
                h1 { class: "app-title", "QuoteDeck" }
                span { class: "app-subtitle", "A local quote collection, reconciled with the server" }
            }
            main {
                class: "app-main",
                QuoteView {}
                div {
                    class: "app-side",
                    CategoryFilter {}
                    AddQuoteForm {}
                    ImportExport {}
                    SyncPanel {}
                }
            }
            Toasts {}
        }
    }
}
