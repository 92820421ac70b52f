use dioxus::prelude::*;

use switchlist::{
    domain::AppState,
    engine::{renderer::SWITCHLIST_CSS, RenderConfig, RenderError, Report, ReportRenderer},
};

use crate::{
    app::SharedRenderer,
    ui::{
        components::report_frame::{with_stylesheet, ReportFrame},
        shell::active_class,
    },
};

/// Reports that only need the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LayoutReport {
    Cars,
    Industries,
    Yards,
    Cargo,
    ReservedCars,
    Layout,
    Layouts,
}

impl LayoutReport {
    const ALL: [LayoutReport; 7] = [
        LayoutReport::Cars,
        LayoutReport::Industries,
        LayoutReport::Yards,
        LayoutReport::Cargo,
        LayoutReport::ReservedCars,
        LayoutReport::Layout,
        LayoutReport::Layouts,
    ];

    fn report(&self) -> Report {
        match self {
            LayoutReport::Cars => Report::CarReport,
            LayoutReport::Industries => Report::IndustryReport,
            LayoutReport::Yards => Report::YardReport,
            LayoutReport::Cargo => Report::CargoReport,
            LayoutReport::ReservedCars => Report::ReservedCarReport,
            LayoutReport::Layout => Report::LayoutPage,
            LayoutReport::Layouts => Report::LayoutsPage,
        }
    }

    fn render(
        &self,
        renderer: &ReportRenderer,
        config: &RenderConfig,
        state: &AppState,
    ) -> Result<String, RenderError> {
        let layout = &state.layout;
        match self {
            LayoutReport::Cars => renderer.render_car_report(config, layout),
            LayoutReport::Industries => renderer.render_industry_report(config, layout),
            LayoutReport::Yards => renderer.render_yard_report(config, layout),
            LayoutReport::Cargo => renderer.render_cargo_report(config, layout),
            LayoutReport::ReservedCars => renderer.render_reserved_car_report(config, layout),
            LayoutReport::Layout => renderer.render_layout_page(config, layout),
            LayoutReport::Layouts => renderer.render_layouts_page(config, &state.known_layouts()),
        }
    }
}

#[component]
pub fn ReportsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let renderer = use_context::<SharedRenderer>();
    let mut selected = use_signal(|| LayoutReport::Cars);

    let current = selected();
    let html = match renderer.as_ref() {
        Ok(renderer) => state.with(|st| {
            let config = st.render_config(renderer.locator());
            with_stylesheet(
                current.render(renderer, &config, st),
                renderer.stylesheet(&config, SWITCHLIST_CSS),
            )
        }),
        Err(message) => Err(message.clone()),
    };
    let problems = state.with(|st| st.problems.clone());

    rsx! {
        section {
            div { class: "toolbar",
                for report in LayoutReport::ALL {
                    button {
                        class: active_class(report == current),
                        onclick: move |_| selected.set(report),
                        "{report.report().title()}"
                    }
                }
            }
            if !problems.is_empty() {
                ul { class: "problems",
                    for problem in problems {
                        li { "{problem}" }
                    }
                }
            }
            ReportFrame { html }
        }
    }
}
