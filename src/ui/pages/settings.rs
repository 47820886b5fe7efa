use dioxus::prelude::*;

use crate::{
    app::{persist_user_state, CatalogReload},
    domain::{AppState, CatalogStatus, Theme},
    infra::cache::age_string,
    ui::{
        components::{push_toast, ToastKind, ToastMessage},
        format, theme,
    },
    util::{
        persistence::clear_persisted_state,
        version::{version_label, APP_NAME},
    },
};

#[component]
pub fn SettingsPage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let mut reload = use_context::<Signal<CatalogReload>>();

    let current_theme = state.with(|st| st.theme);
    let status = state.with(|st| st.catalog_status.clone());

    let mut on_theme = move |selected: Theme| {
        state.with_mut(|st| st.theme = selected);
        persist_user_state(&state);
    };

    let on_reload = move |_| {
        reload.with_mut(|r| r.request_forced());
        push_toast(toasts, ToastKind::Info, "Versandoptionen werden neu geladen…");
    };

    let on_clear_saved = move |_| {
        state.with_mut(|st| {
            st.reset_inputs();
            st.theme = Theme::default();
        });
        match clear_persisted_state() {
            Ok(()) => push_toast(toasts, ToastKind::Success, "Gespeicherte Daten gelöscht."),
            Err(err) => {
                tracing::warn!("failed to clear saved state: {err}");
                push_toast(
                    toasts,
                    ToastKind::Error,
                    format!("Gespeicherte Daten konnten nicht gelöscht werden: {err}"),
                );
            }
        }
    };

    rsx! {
        div { class: "page settings",
            section { class: "{theme::panel()}",
                h2 { class: "{theme::label_class()}", "Darstellung" }
                div { class: "button-row",
                    for choice in [Theme::Dark, Theme::Light] {
                        button {
                            key: "{choice.name()}",
                            class: "{theme::theme_option(choice == current_theme)}",
                            onclick: move |_| on_theme(choice),
                            "{choice.icon()} {choice.name()}"
                        }
                    }
                }
            }

            section { class: "{theme::panel()}",
                h2 { class: "{theme::label_class()}", "Versandoptionen" }
                match status {
                    CatalogStatus::Loading => rsx! {
                        p { class: "{theme::text_muted()}", "Wird geladen…" }
                    },
                    CatalogStatus::Failed(message) => rsx! {
                        p { class: "empty-state-error", "{message}" }
                    },
                    CatalogStatus::Ready { source, entries, fetched_at } => {
                        let loaded = fetched_at
                            .map(|at| {
                                let age = at.elapsed().map(age_string).unwrap_or_default();
                                format!("{} ({age})", format::format_timestamp(at))
                            })
                            .unwrap_or_else(|| "mit der Anwendung ausgeliefert".to_string());
                        rsx! {
                            dl { class: "info-list",
                                dt { "Quelle" }
                                dd { "{source}" }
                                dt { "Einträge" }
                                dd { "{entries}" }
                                dt { "Stand" }
                                dd { "{loaded}" }
                            }
                        }
                    }
                }
                div { class: "button-row",
                    button { class: "{theme::btn_primary()}", onclick: on_reload, "Neu laden" }
                }
            }

            section { class: "{theme::panel()}",
                h2 { class: "{theme::label_class()}", "Gespeicherte Daten" }
                p { class: "{theme::text_muted()}",
                    "Maße, Anbieterfilter und Darstellung werden lokal gespeichert."
                }
                div { class: "button-row",
                    button { class: "{theme::btn_secondary()}", onclick: on_clear_saved, "Zurücksetzen" }
                }
            }

            p { class: "{theme::text_muted()} about", "{APP_NAME} {version_label()}" }
        }
    }
}
