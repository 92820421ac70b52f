use std::{path::PathBuf, rc::Rc};

use dioxus::{prelude::*, signals::Signal};

use switchlist::{
    domain::AppState,
    engine::{ReportRenderer, TemplateLocator},
    util::{
        assets,
        persistence::{load_preferences, save_preferences, PersistSaveError},
    },
};

use crate::ui::{
    components::toast::{push_toast, Toast, ToastKind, ToastMessage},
    pages::{ReportsPage, SettingsPage, SwitchlistsPage},
    shell::Shell,
};

/// Renderer shared by every page; `Err` carries the start-up failure.
pub type SharedRenderer = Result<Rc<ReportRenderer>, String>;

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    #[route("/switchlists")]
    Switchlists {},
    #[route("/reports")]
    Reports {},
    #[route("/settings")]
    Settings {},
}

#[component]
pub fn App() -> Element {
    let state = use_signal(load_initial_state);
    use_context_provider(|| state);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    let renderer: SharedRenderer = use_hook(build_renderer);
    use_context_provider(|| renderer.clone());

    use_hook(move || {
        let problems = state.with(|st| st.problems.len());
        if problems > 0 {
            push_toast(
                toasts,
                ToastKind::Warning,
                format!("The layout has {problems} problem(s); see Reports."),
            );
        }
    });

    rsx! {
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

fn load_initial_state() -> AppState {
    let preferences = load_preferences().unwrap_or_default();
    let requested = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| preferences.last_layout.clone());
    AppState::open(requested, preferences)
}

fn build_renderer() -> SharedRenderer {
    let bundle = assets::bundle_dir();
    if let Err(err) = assets::install_bundled_templates(&bundle) {
        // An older install may still be usable.
        tracing::warn!("[assets] Failed to install bundled templates: {err}");
    }
    ReportRenderer::new(TemplateLocator::for_user(bundle))
        .map(Rc::new)
        .map_err(|err| err.to_string())
}

pub fn persist_user_state(state: &Signal<AppState>) -> Result<(), PersistSaveError> {
    let snapshot = state.with(|st| st.preferences.clone());
    save_preferences(&snapshot).inspect_err(|err| {
        tracing::warn!("Failed to persist preferences: {err}");
    })
}

#[component]
pub fn Switchlists() -> Element {
    rsx! { Shell { SwitchlistsPage {} } }
}

#[component]
pub fn Reports() -> Element {
    rsx! { Shell { ReportsPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}
