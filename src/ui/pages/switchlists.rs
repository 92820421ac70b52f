use dioxus::prelude::*;

use switchlist::{
    domain::{AppState, TrainId},
    engine::{renderer::SWITCHLIST_CSS, SwitchlistMode},
};

use crate::{
    app::SharedRenderer,
    ui::{
        components::report_frame::{with_stylesheet, ReportFrame},
        shell::active_class,
    },
};

#[component]
pub fn SwitchlistsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let renderer = use_context::<SharedRenderer>();

    let trains = state.with(|st| {
        st.layout
            .trains()
            .map(|train| (train.id, train.name.clone()))
            .collect::<Vec<_>>()
    });
    let first_train = trains.first().map(|(id, _)| *id);
    let mut selected = use_signal(move || first_train);
    let mut interactive = use_signal(|| true);
    let mut phone = use_signal(|| false);

    let Some(train) = selected() else {
        return rsx! { p { "This layout has no trains." } };
    };

    let mode = if interactive() {
        SwitchlistMode::interactive(phone())
    } else {
        SwitchlistMode {
            is_iphone: phone(),
            ..SwitchlistMode::print()
        }
    };

    let html = match renderer.as_ref() {
        Ok(renderer) => state.with(|st| {
            let config = st.render_config(renderer.locator());
            with_stylesheet(
                renderer.render_switchlist(&config, &st.layout, train, mode),
                renderer.stylesheet(&config, SWITCHLIST_CSS),
            )
        }),
        Err(message) => Err(message.clone()),
    };

    rsx! {
        section {
            div { class: "toolbar",
                select {
                    value: "{train}",
                    onchange: move |evt: Event<FormData>| {
                        if let Ok(id) = evt.value().parse::<TrainId>() {
                            selected.set(Some(id));
                        }
                    },
                    for (id, name) in trains {
                        option { value: "{id}", selected: id == train, "{name}" }
                    }
                }
                button {
                    class: active_class(interactive()),
                    onclick: move |_| interactive.toggle(),
                    "Interactive"
                }
                button {
                    class: active_class(phone()),
                    onclick: move |_| phone.toggle(),
                    "Phone layout"
                }
            }
            ReportFrame { html }
        }
    }
}
