use dioxus::prelude::*;

use crate::domain::{RankedOption, ShippingOption, SortField, SortState};
use crate::ui::{format, theme};

/// Owned copy of a ranked row, so it can travel through component props.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultRow {
    pub rank: usize,
    pub option: ShippingOption,
    pub is_price_leader: bool,
}

impl From<&RankedOption<'_>> for ResultRow {
    fn from(row: &RankedOption<'_>) -> Self {
        Self {
            rank: row.rank,
            option: row.option.clone(),
            is_price_leader: row.is_price_leader,
        }
    }
}

#[component]
pub fn ResultsTable(rows: Vec<ResultRow>, sort: SortState, on_sort: EventHandler<SortField>) -> Element {
    rsx! {
        div { class: "{theme::panel()} table-wrap",
            table { class: "results-table",
                thead {
                    tr {
                        th { "#" }
                        SortHeader { field: SortField::Company, sort, on_sort }
                        SortHeader { field: SortField::Title, sort, on_sort }
                        SortHeader { field: SortField::Price, sort, on_sort }
                        SortHeader { field: SortField::MaxWeight, sort, on_sort }
                        th { "Max. Maße" }
                        SortHeader { field: SortField::Insurance, sort, on_sort }
                        th { "Hinweise" }
                    }
                }
                tbody {
                    for row in rows {
                        ResultLine { key: "{row.option.internal_name}", row }
                    }
                }
            }
        }
    }
}

#[component]
fn SortHeader(field: SortField, sort: SortState, on_sort: EventHandler<SortField>) -> Element {
    rsx! {
        th {
            class: "{theme::sort_header(sort.field == field)}",
            onclick: move |_| on_sort.call(field),
            "{field.label()} "
            span { class: "sort-icon", "{sort.icon_for(field)}" }
        }
    }
}

#[component]
fn ResultLine(row: ResultRow) -> Element {
    let option = &row.option;
    let price = format::format_price_text(&option.price);
    let max_weight = format::format_max_weight(option);
    let max_sizes = format::format_max_sizes(option);
    let insurance = format::format_insurance(option);
    let notes = [option.conditions.as_deref(), option.options.as_deref()]
        .into_iter()
        .flatten()
        .filter(|text| !text.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" · ");

    rsx! {
        tr { class: "{theme::result_row(row.is_price_leader)}",
            td { span { class: "{theme::rank_badge(row.rank)}", "{row.rank}" } }
            td { class: "cell-company", "{option.company}" }
            td {
                if let Some(link) = option.weblink.clone().filter(|link| !link.is_empty()) {
                    a { href: "{link}", target: "_blank", rel: "noopener", "{option.title}" }
                } else {
                    "{option.title}"
                }
                if row.is_price_leader {
                    span { class: "leader-tag", "Günstigste Option" }
                }
            }
            td { class: "cell-price", "{price}" }
            td { "{max_weight}" }
            td { "{max_sizes}" }
            td { "{insurance}" }
            td { class: "{theme::text_muted()} cell-notes", "{notes}" }
        }
    }
}
