use dioxus::prelude::*;

use crate::ui::theme;

#[component]
pub fn StatCard(title: String, value: String, description: Option<String>) -> Element {
    rsx! {
        div {
            class: "{theme::panel()} stat-card",
            h3 { class: "{theme::label_class()}", "{title}" }
            p { class: "stat-value", "{value}" }
            if let Some(desc) = description {
                p { class: "{theme::text_muted()} stat-description", "{desc}" }
            }
        }
    }
}
