use dioxus::prelude::*;

use crate::app::{persist_user_state, Route};
use crate::domain::AppState;
use crate::ui::theme;
use crate::util::version::{version_label, APP_NAME};

#[component]
pub fn Shell(children: Element) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let current_theme = state.with(|s| s.theme);
    let current_route = use_route::<Route>();
    let nav = use_navigator();

    let on_toggle_theme = move |_| {
        state.with_mut(|s| s.theme = s.theme.toggled());
        persist_user_state(&state);
    };

    rsx! {
        div { class: "{theme::root_class(current_theme)}",
            header { class: "app-header",
                div { class: "header-inner",
                    div { class: "brand",
                        span { class: "brand-icon", "📦" }
                        div {
                            h1 { class: "brand-title", "{APP_NAME}" }
                            p { class: "{theme::text_muted()} brand-version", "{version_label()}" }
                        }
                    }
                    nav { class: "main-nav",
                        NavButton {
                            active: matches!(current_route, Route::Finder {}),
                            onclick: move |_| { nav.push(Route::Finder {}); },
                            label: "📏 Rechner",
                        }
                        NavButton {
                            active: matches!(current_route, Route::Settings {}),
                            onclick: move |_| { nav.push(Route::Settings {}); },
                            label: "⚙️ Einstellungen",
                        }
                        button {
                            class: "{theme::nav_button(false)} theme-toggle",
                            title: "Darstellung wechseln",
                            onclick: on_toggle_theme,
                            "{current_theme.toggled().icon()}"
                        }
                    }
                }
            }
            main { class: "app-main",
                {children}
            }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    rsx! {
        button {
            class: "{theme::nav_button(active)}",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
