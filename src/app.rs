use dioxus::{prelude::*, signals::Signal};
use tracing::{error, info, warn};

use crate::{
    domain::{decode_share_link, AppState, CatalogStatus, UserInput},
    infra::catalog::{load_catalog, CacheStatus, CatalogError, CatalogSource, LoadedCatalog},
    ui::{
        components::{push_toast, Toast, ToastKind, ToastMessage},
        format,
        pages::{finder::CATALOG_ERROR_MESSAGE, FinderPage, SettingsPage},
        shell::Shell,
    },
    util::{
        assets,
        persistence::{load_persisted_state, save_persisted_state},
    },
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Finder {},
    #[route("/settings")]
    Settings {},
}

/// Catalog load request. Bumping the generation re-runs the loader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CatalogReload {
    generation: u64,
    force: bool,
}

impl CatalogReload {
    /// Reloads and bypasses a fresh download cache.
    pub fn request_forced(&mut self) {
        self.generation += 1;
        self.force = true;
    }
}

#[component]
pub fn App() -> Element {
    let state = use_signal(AppState::default);
    let from_link = use_hook({
        let mut state = state;
        move || {
            if let Some(saved) = load_persisted_state() {
                state.with_mut(|st| st.apply_persisted(saved));
            }
            match link_from_args() {
                Some(input) => {
                    state.with_mut(|st| st.user_input = input);
                    true
                }
                None => false,
            }
        }
    });
    use_context_provider(|| state);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    use_hook(move || {
        if from_link {
            push_toast(toasts, ToastKind::Info, "Daten aus Link geladen 🔗");
        }
    });

    let reload = use_signal(CatalogReload::default);
    use_context_provider(|| reload);

    let _catalog = use_resource(move || async move {
        let request = reload();
        refresh_catalog(state, toasts, request.force).await
    });

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

/// A share link passed as the first argument, e.g. from a desktop URL handler.
fn link_from_args() -> Option<UserInput> {
    let arg = std::env::args().nth(1)?;
    match decode_share_link(&arg) {
        Ok(input) => {
            if input.is_some() {
                info!("using measurements from share link");
            }
            input
        }
        Err(err) => {
            warn!("ignoring command-line argument: {err}");
            None
        }
    }
}

pub fn persist_user_state(state: &Signal<AppState>) {
    let snapshot = state.with(|st| st.to_persisted());
    if let Err(err) = save_persisted_state(&snapshot) {
        warn!("failed to persist user state: {err}");
    }
}

async fn fetch_catalog(force: bool) -> Result<LoadedCatalog, CatalogError> {
    let source = CatalogSource::from_env()?;
    load_catalog(source, force).await
}

async fn refresh_catalog(
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
    force: bool,
) -> Option<CacheStatus> {
    if force {
        state.with_mut(|st| st.catalog_status = CatalogStatus::Loading);
    }

    match fetch_catalog(force).await {
        Ok(loaded) => {
            let status = CatalogStatus::Ready {
                source: loaded.source.label(),
                entries: loaded.options.len(),
                fetched_at: loaded.fetched_at,
            };
            match loaded.status {
                CacheStatus::Stale => {
                    let stand = loaded
                        .fetched_at
                        .map(format::format_timestamp)
                        .unwrap_or_default();
                    push_toast(
                        toasts,
                        ToastKind::Warning,
                        format!("Offline: gespeicherte Versandoptionen vom {stand}."),
                    );
                }
                _ if force => {
                    push_toast(toasts, ToastKind::Success, "Versandoptionen aktualisiert.");
                }
                _ => {}
            }
            let cache_status = loaded.status.clone();
            state.with_mut(|st| st.set_catalog(loaded.options, status));
            Some(cache_status)
        }
        Err(err) => {
            error!("failed to load catalog: {err}");
            state.with_mut(|st| {
                st.catalog.clear();
                st.catalog_status = CatalogStatus::Failed(err.to_string());
            });
            push_toast(toasts, ToastKind::Error, CATALOG_ERROR_MESSAGE);
            None
        }
    }
}

#[component]
pub fn Finder() -> Element {
    rsx! { Shell { FinderPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}
