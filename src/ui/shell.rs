use dioxus::prelude::*;

use switchlist::{domain::AppState, util::version};

use crate::app::Route;

#[component]
pub fn Shell(children: Element) -> Element {
    let state = use_context::<Signal<AppState>>();
    let current_route = use_route::<Route>();
    let nav = use_navigator();

    let title = state.with(|st| version::window_title(Some(&st.layout.name)));
    let template = state.with(|st| {
        st.preferences
            .template_name
            .clone()
            .unwrap_or_else(|| "Default".to_string())
    });

    rsx! {
        div {
            header { class: "app-header",
                div {
                    h1 { "{title}" }
                    p { "Switchlist style: {template}" }
                }
                nav { class: "app-nav",
                    NavButton { active: matches!(current_route, Route::Switchlists {}), onclick: move |_| { nav.push(Route::Switchlists {}); }, label: "Switchlists" }
                    NavButton { active: matches!(current_route, Route::Reports {}), onclick: move |_| { nav.push(Route::Reports {}); }, label: "Reports" }
                    NavButton { active: matches!(current_route, Route::Settings {}), onclick: move |_| { nav.push(Route::Settings {}); }, label: "Settings" }
                }
            }
            main { class: "app-main",
                {children}
            }
        }
    }
}

#[component]
pub fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    let class = active_class(active);
    rsx! {
        button {
            class: "{class}",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}

pub fn active_class(active: bool) -> &'static str {
    if active {
        "active"
    } else {
        ""
    }
}
