use dioxus::prelude::*;

use crate::domain::CompanyFilter;
use crate::ui::theme;

/// "Alle" plus one chip per carrier.
#[component]
pub fn FilterChips(
    companies: Vec<String>,
    selected: CompanyFilter,
    on_select: EventHandler<CompanyFilter>,
) -> Element {
    rsx! {
        div { class: "chip-row",
            button {
                class: "{theme::chip(selected == CompanyFilter::All)}",
                onclick: move |_| on_select.call(CompanyFilter::All),
                "Alle"
            }
            for company in companies {
                {
                    let filter = CompanyFilter::Company(company.clone());
                    let active = selected == filter;
                    rsx! {
                        button {
                            key: "{company}",
                            class: "{theme::chip(active)}",
                            onclick: move |_| on_select.call(filter.clone()),
                            "{company}"
                        }
                    }
                }
            }
        }
    }
}
