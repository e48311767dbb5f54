//! Category filter
//!
//! A select bound to the active filter, rebuilt from the store's category
//! index on every render. Changing it persists the selection and draws a
//! quote under the new filter.

use dioxus::prelude::*;

use crate::app::AppState;

#[component]
pub fn CategoryFilter() -> Element {
    let app_state = use_context::<AppState>();
    let categories = app_state.quotes.read().category_index();
    let selected = app_state.selected_category.read().clone();
    let handler_state = app_state.clone();

    rsx! {
        section {
            class: "panel",
            h3 { class: "panel-title", "Filter by Category" }
            select {
                class: "field",
                value: "{selected}",
                onchange: move |evt| handler_state.select_category(&evt.value()),
                for category in categories {
                    option {
                        key: "{category}",
                        value: "{category}",
                        "{category}"
                    }
                }
            }
        }
    }
}
