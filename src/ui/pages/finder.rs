use dioxus::prelude::*;

use crate::{
    app::persist_user_state,
    config::{DEBOUNCE_DELAY, SHARE_BASE_URL},
    domain::{
        share_link, AppState, CatalogStatus, CompanyFilter, SortField, SortState, UserInput,
        WeightUnit,
    },
    ui::{
        components::{
            push_toast, FilterChips, ResultRow, ResultsTable, StatCard, ToastKind, ToastMessage,
        },
        format, theme,
    },
    util::debounce::Debouncer,
};

pub const CATALOG_ERROR_MESSAGE: &str = "Konnte Versandoptionen nicht laden. Bitte Seite neu laden.";

/// Raw text of the form fields. They run ahead of the committed input while typing.
#[derive(Clone, Copy, PartialEq)]
struct InputFields {
    side1: Signal<String>,
    side2: Signal<String>,
    side3: Signal<String>,
    weight: Signal<String>,
    unit: Signal<WeightUnit>,
    search: Signal<String>,
}

impl InputFields {
    fn to_input(&self) -> UserInput {
        UserInput::from_fields(
            &self.side1.peek(),
            &self.side2.peek(),
            &self.side3.peek(),
            &self.weight.peek(),
            *self.unit.peek(),
        )
    }

    fn fill_from(&mut self, input: &UserInput, search: &str) {
        self.side1.set(input_text(input.side1));
        self.side2.set(input_text(input.side2));
        self.side3.set(input_text(input.side3));
        self.weight.set(input_text(input.weight_in_unit()));
        self.unit.set(input.weight_unit);
        self.search.set(search.to_string());
    }
}

/// Number as the user would type it back: German comma, empty for zero.
fn input_text(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        value.to_string().replace('.', ",")
    }
}

/// Writes the field text into the state and recomputes the results.
fn commit_fields(mut state: Signal<AppState>, fields: InputFields) {
    let input = fields.to_input();
    let search = fields.search.peek().clone();
    let input_changed = state.with_mut(|st| {
        let changed = st.user_input != input;
        st.user_input = input;
        st.search_query = search;
        changed
    });
    if input_changed {
        persist_user_state(&state);
    }
}

fn schedule_commit(debouncer: Debouncer, state: Signal<AppState>, fields: InputFields) {
    spawn(async move {
        if debouncer.settle().await {
            commit_fields(state, fields);
        }
    });
}

#[component]
pub fn FinderPage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let debouncer = use_hook(|| Debouncer::new(DEBOUNCE_DELAY));

    let mut fields = {
        let (input, search) = state.with(|st| (st.user_input.clone(), st.search_query.clone()));
        InputFields {
            side1: use_signal(|| input_text(input.side1)),
            side2: use_signal(|| input_text(input.side2)),
            side3: use_signal(|| input_text(input.side3)),
            weight: use_signal(|| input_text(input.weight_in_unit())),
            unit: use_signal(|| input.weight_unit),
            search: use_signal(|| search),
        }
    };

    let snapshot = state.with(|st| {
        let view = st.view();
        Snapshot {
            rows: view.rows.iter().map(ResultRow::from).collect(),
            volume: format::format_volume(view.measurement.volume),
            girth: format::format_girth(view.measurement.girth),
            count: view.count(),
            cheapest: view.cheapest_price().map(format::format_price),
            cheapest_name: view.cheapest.map(|o| format!("{} {}", o.company, o.title)),
            companies: st.companies(),
            company_filter: st.company_filter.clone(),
            sort: st.sort,
            status: st.catalog_status.clone(),
        }
    });

    let on_text = {
        let debouncer = debouncer.clone();
        move |mut target: Signal<String>| {
            let debouncer = debouncer.clone();
            move |evt: FormEvent| {
                target.set(evt.value());
                schedule_commit(debouncer.clone(), state, fields);
            }
        }
    };

    let on_unit = move |evt: FormEvent| {
        fields.unit.set(WeightUnit::from_label(&evt.value()));
        commit_fields(state, fields);
    };

    let on_company = move |filter: CompanyFilter| {
        state.with_mut(|st| st.company_filter = filter);
        persist_user_state(&state);
    };

    let on_sort = move |field: SortField| {
        state.with_mut(|st| st.sort.toggle(field));
    };

    let on_reset = move |_| {
        debouncer.cancel();
        state.with_mut(|st| st.reset_inputs());
        fields.fill_from(&UserInput::default(), "");
        persist_user_state(&state);
        push_toast(toasts, ToastKind::Info, "Eingaben zurückgesetzt 🔄");
    };

    let on_share = move |_| {
        commit_fields(state, fields);
        let input = state.with(|st| st.user_input.clone());
        match share_link(SHARE_BASE_URL, &input) {
            Ok(link) => {
                copy_text_to_clipboard(&link);
                push_toast(toasts, ToastKind::Success, "Link kopiert! 📋");
            }
            Err(err) => {
                tracing::warn!("failed to build share link: {err}");
                push_toast(toasts, ToastKind::Error, "Link konnte nicht erstellt werden.");
            }
        }
    };

    let unit_label = fields.unit.read().label();
    let cheapest = snapshot.cheapest.clone().unwrap_or_else(|| "-".to_string());

    rsx! {
        div { class: "page finder",
            section { class: "{theme::panel()} input-panel",
                div { class: "input-grid",
                    InputField { label: "Länge (cm)", value: fields.side1.read().clone(), oninput: on_text(fields.side1) }
                    InputField { label: "Breite (cm)", value: fields.side2.read().clone(), oninput: on_text(fields.side2) }
                    InputField { label: "Höhe (cm)", value: fields.side3.read().clone(), oninput: on_text(fields.side3) }
                    div { class: "field",
                        label { class: "{theme::label_class()}", "Gewicht" }
                        div { class: "weight-row",
                            input {
                                class: "{theme::input_class()}",
                                r#type: "text",
                                inputmode: "decimal",
                                placeholder: "0",
                                value: fields.weight.read().clone(),
                                oninput: on_text(fields.weight),
                            }
                            select {
                                class: "{theme::input_class()} unit-select",
                                value: unit_label,
                                onchange: on_unit,
                                option { value: "g", "g" }
                                option { value: "kg", "kg" }
                            }
                        }
                    }
                }
                div { class: "search-row",
                    input {
                        class: "{theme::input_class()} search-input",
                        r#type: "search",
                        placeholder: "Suche nach Anbieter, Produkt oder Hinweis…",
                        value: fields.search.read().clone(),
                        oninput: on_text(fields.search),
                    }
                    button { class: "{theme::btn_secondary()}", onclick: on_reset, "Zurücksetzen" }
                    button { class: "{theme::btn_primary()}", onclick: on_share, "Link teilen" }
                }
            }

            section { class: "stats-grid",
                StatCard { title: "Volumen".to_string(), value: snapshot.volume.clone() }
                StatCard { title: "Gurtmaß".to_string(), value: snapshot.girth.clone() }
                StatCard { title: "Treffer".to_string(), value: snapshot.count.to_string() }
                StatCard {
                    title: "Günstigster Preis".to_string(),
                    value: cheapest,
                    description: snapshot.cheapest_name.clone(),
                }
            }

            FilterChips {
                companies: snapshot.companies.clone(),
                selected: snapshot.company_filter.clone(),
                on_select: on_company,
            }

            match &snapshot.status {
                CatalogStatus::Loading => rsx! {
                    p { class: "empty-state", "Lade Versandoptionen…" }
                },
                CatalogStatus::Failed(_) => rsx! {
                    p { class: "empty-state empty-state-error", "{CATALOG_ERROR_MESSAGE}" }
                },
                CatalogStatus::Ready { .. } if snapshot.rows.is_empty() => rsx! {
                    p { class: "empty-state", "Keine passenden Versandoptionen gefunden." }
                },
                CatalogStatus::Ready { .. } => rsx! {
                    ResultsTable { rows: snapshot.rows.clone(), sort: snapshot.sort, on_sort }
                },
            }
        }
    }
}

struct Snapshot {
    rows: Vec<ResultRow>,
    volume: String,
    girth: String,
    count: usize,
    cheapest: Option<String>,
    cheapest_name: Option<String>,
    companies: Vec<String>,
    company_filter: CompanyFilter,
    sort: SortState,
    status: CatalogStatus,
}

#[component]
fn InputField(label: &'static str, value: String, oninput: EventHandler<FormEvent>) -> Element {
    rsx! {
        div { class: "field",
            label { class: "{theme::label_class()}", "{label}" }
            input {
                class: "{theme::input_class()}",
                r#type: "text",
                inputmode: "decimal",
                placeholder: "0",
                value: value,
                oninput: move |evt| oninput.call(evt),
            }
        }
    }
}

fn copy_text_to_clipboard(text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    let payload = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
    let script = format!(
        r#"(async () => {{
            const data = {payload};
            try {{
                if (navigator.clipboard && navigator.clipboard.writeText) {{
                    await navigator.clipboard.writeText(data);
                    return true;
                }}
            }} catch (_err) {{}}
            try {{
                const textarea = document.createElement('textarea');
                textarea.value = data;
                textarea.style.position = 'fixed';
                textarea.style.opacity = '0';
                document.body.appendChild(textarea);
                textarea.select();
                const ok = document.execCommand('copy');
                document.body.removeChild(textarea);
                return ok;
            }} catch (_err) {{
                return false;
            }}
        }})()"#
    );
    let eval = document::eval(&script);
    spawn(async move {
        let _ = eval.await;
    });
    true
}
