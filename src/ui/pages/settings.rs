use dioxus::prelude::*;

use switchlist::{
    domain::AppState,
    engine::{OptionalSetting, Report},
};

use crate::{
    app::{persist_user_state, SharedRenderer},
    ui::components::toast::{push_toast, ToastKind, ToastMessage},
};

const DEFAULT_TEMPLATE: &str = "";

#[component]
pub fn SettingsPage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let renderer = use_context::<SharedRenderer>();

    let Ok(renderer) = renderer else {
        return rsx! { p { class: "report-error", "Templates are unavailable." } };
    };

    let template_names = renderer.locator().template_names();
    let current_template = state.with(|st| st.preferences.template_name.clone().unwrap_or_default());

    // Declared optional variables with the user's value, if any.
    let rows = state.with(|st| {
        let config = st.render_config(renderer.locator());
        let declared = renderer
            .optional_settings(&config, Report::Switchlist.name())
            .unwrap_or_else(|err| {
                tracing::warn!("[settings] Could not read optional settings: {err}");
                Vec::new()
            });
        let mut rows: Vec<(OptionalSetting, String)> = Vec::new();
        for setting in declared {
            if rows.iter().any(|(seen, _)| seen.name == setting.name) {
                continue;
            }
            let value = config.override_for(&setting.name).unwrap_or("").to_string();
            rows.push((setting, value));
        }
        rows
    });

    let on_save = move |_| {
        match persist_user_state(&state) {
            Ok(()) => push_toast(toasts, ToastKind::Success, "Saved switchlist preferences."),
            Err(err) => push_toast(
                toasts,
                ToastKind::Error,
                format!("Failed to save preferences: {err}"),
            ),
        }
    };

    rsx! {
        section {
            h2 { "Switchlist style" }
            div { class: "settings-grid",
                label { "Template" }
                select {
                    value: "{current_template}",
                    onchange: move |evt: Event<FormData>| {
                        let name = evt.value();
                        state.with_mut(|st| {
                            st.preferences.template_name =
                                (name != DEFAULT_TEMPLATE).then_some(name);
                        });
                    },
                    option { value: DEFAULT_TEMPLATE, selected: current_template.is_empty(), "Default" }
                    for name in template_names {
                        option { value: "{name}", selected: name == current_template, "{name}" }
                    }
                }
            }

            h2 { "Custom text" }
            if rows.is_empty() {
                p { "This template has no customizable text." }
            }
            div { class: "settings-grid",
                for (setting, value) in rows {
                    OptionalSettingRow {
                        key: "{setting.name}",
                        name: setting.name.clone(),
                        default_value: setting.value.clone(),
                        value,
                        on_change: move |(name, value): (String, String)| {
                            state.with_mut(|st| st.preferences.set_optional(&name, &value));
                        },
                    }
                }
            }

            div { class: "toolbar",
                button { class: "active", onclick: on_save, "Save" }
            }
        }
    }
}

#[component]
fn OptionalSettingRow(
    name: String,
    default_value: String,
    value: String,
    on_change: EventHandler<(String, String)>,
) -> Element {
    let label = name.replace('_', " ").to_lowercase();
    rsx! {
        label { "{label}" }
        input {
            r#type: "text",
            placeholder: "{default_value}",
            value: "{value}",
            oninput: move |evt: Event<FormData>| on_change.call((name.clone(), evt.value())),
        }
    }
}
