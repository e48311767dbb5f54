//! Add-quote form
//!
//! Two free-text fields and an action; validation (non-empty after trim)
//! lives in the store, this component only reports the outcome.

use dioxus::prelude::*;

use crate::app::AppState;
use crate::ui::notifications::NotificationKind;

#[component]
pub fn AddQuoteForm() -> Element {
    let app_state = use_context::<AppState>();
    let mut text = use_signal(String::new);
    let mut category = use_signal(String::new);

    let handle_add = {
        let app_state = app_state.clone();
        let mut text = text.clone();
        let mut category = category.clone();
        move |_: MouseEvent| match app_state.add_quote(&text(), &category()) {
            Ok(quote) => {
                text.set(String::new());
                category.set(String::new());
                app_state.notify(
                    NotificationKind::Success,
                    format!("Quote added under \"{}\"", quote.category),
                );
            }
            Err(e) => {
                app_state.notify(NotificationKind::Error, e.to_string());
            }
        }
    };

    rsx! {
        section {
            class: "panel",
            h3 { class: "panel-title", "Add a Quote" }
            input {
                r#type: "text",
                class: "field",
                placeholder: "Enter a new quote",
                value: "{text}",
                oninput: move |evt| text.set(evt.value()),
            }
            input {
                r#type: "text",
                class: "field",
                placeholder: "Enter quote category",
                value: "{category}",
                oninput: move |evt| category.set(evt.value()),
            }
            button {
                class: "btn btn-primary",
                onclick: handle_add,
                "Add Quote"
            }
        }
    }
}
