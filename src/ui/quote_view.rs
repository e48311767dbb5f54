//! Quote display
//!
//! Shows the most recently drawn quote and the action to draw another one
//! under the active category filter.

use dioxus::prelude::*;

use crate::app::AppState;

#[component]
pub fn QuoteView() -> Element {
    let app_state = use_context::<AppState>();
    let last_quote = app_state.last_quote.read().clone();
    let handler_state = app_state.clone();

    let quote_body = match last_quote {
        Some(quote) => rsx! {
            blockquote {
                class: "quote-text",
                "\u{201C}{quote.text}\u{201D}"
            }
            div {
                class: "quote-category",
                "({quote.category})"
            }
        },
        None => rsx! {
            div {
                class: "quote-empty",
                "No quotes available."
            }
        },
    };

    rsx! {
        section {
            class: "panel quote-panel",
            {quote_body}
            button {
                class: "btn btn-primary",
                onclick: move |_| {
                    handler_state.draw_quote();
                },
                "Show New Quote"
            }
        }
    }
}
