//! Turns layout data into HTML through the report templates.

use std::{fs, path::Path};

use liquid::{
    model::{to_object, Value},
    Object, Parser, ParserBuilder,
};
use serde::Serialize;

use super::{
    error::RenderError,
    locator::{RenderConfig, TemplateLocator},
    optional::{self, OptionalSetting},
};
use crate::domain::{reports, Layout, TrainId};

pub const SWITCHLIST_CSS: &str = "switchlist.css";

/// The reports every template set can provide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Report {
    Switchlist,
    SwitchlistIphone,
    CarReport,
    IndustryReport,
    YardReport,
    CargoReport,
    ReservedCarReport,
    LayoutPage,
    LayoutsPage,
}

impl Report {
    /// Report name, i.e. the template file without `.html`.
    pub fn name(&self) -> &'static str {
        match self {
            Report::Switchlist => "switchlist",
            Report::SwitchlistIphone => "switchlist-iphone",
            Report::CarReport => "car-report",
            Report::IndustryReport => "industry-report",
            Report::YardReport => "yard-report",
            Report::CargoReport => "cargo-report",
            Report::ReservedCarReport => "reserved-car-report",
            Report::LayoutPage => "layout",
            Report::LayoutsPage => "layouts",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Report::Switchlist => "Switchlist",
            Report::SwitchlistIphone => "Switchlist (phone)",
            Report::CarReport => "Car report",
            Report::IndustryReport => "Industry report",
            Report::YardReport => "Yard report",
            Report::CargoReport => "Cargo report",
            Report::ReservedCarReport => "Reserved cars",
            Report::LayoutPage => "Layout",
            Report::LayoutsPage => "Layouts",
        }
    }
}

/// How a switchlist is going to be shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SwitchlistMode {
    pub is_iphone: bool,
    /// Enables buttons and other controls in the page. Always off for print.
    pub is_interactive: bool,
}

impl SwitchlistMode {
    pub fn print() -> Self {
        Self::default()
    }

    pub fn interactive(is_iphone: bool) -> Self {
        Self {
            is_iphone,
            is_interactive: true,
        }
    }
}

pub struct ReportRenderer {
    locator: TemplateLocator,
    parser: Parser,
}

impl ReportRenderer {
    pub fn new(locator: TemplateLocator) -> Result<Self, RenderError> {
        let parser = ParserBuilder::with_stdlib()
            .build()
            .map_err(RenderError::Template)?;
        Ok(Self { locator, parser })
    }

    pub fn locator(&self) -> &TemplateLocator {
        &self.locator
    }

    /// Optional variables declared by a report, with the template's defaults.
    pub fn optional_settings(
        &self,
        config: &RenderConfig,
        report_name: &str,
    ) -> Result<Vec<OptionalSetting>, RenderError> {
        let text = self.load_report(config, report_name)?;
        Ok(optional::scan(&text))
    }

    /// Contents of a companion file (usually CSS) for the active template.
    pub fn stylesheet(
        &self,
        config: &RenderConfig,
        filename: &str,
    ) -> Result<String, RenderError> {
        let path = self
            .locator
            .file_path_for_template_file(&config.template_dir, filename)?;
        read_file(&path)
    }

    /// Renders `<report_name>.html` with `data`. Keys in `data` win over
    /// optional values of the same name.
    pub fn render_report(
        &self,
        config: &RenderConfig,
        report_name: &str,
        data: &Object,
    ) -> Result<String, RenderError> {
        self.render_with_flags(config, report_name, data, &[])
    }

    pub fn render_switchlist(
        &self,
        config: &RenderConfig,
        layout: &Layout,
        train: TrainId,
        mode: SwitchlistMode,
    ) -> Result<String, RenderError> {
        let train = layout.train(train).ok_or(RenderError::UnknownTrain(train))?;
        let report = if mode.is_iphone {
            Report::SwitchlistIphone
        } else {
            Report::Switchlist
        };
        let data = context_from(&reports::switchlist(layout, train))?;
        self.render_with_flags(
            config,
            report.name(),
            &data,
            &[
                ("is_iphone", mode.is_iphone),
                ("is_interactive", mode.is_interactive),
            ],
        )
    }

    pub fn render_car_report(
        &self,
        config: &RenderConfig,
        layout: &Layout,
    ) -> Result<String, RenderError> {
        self.render_view(config, Report::CarReport, &reports::car_report(layout))
    }

    pub fn render_industry_report(
        &self,
        config: &RenderConfig,
        layout: &Layout,
    ) -> Result<String, RenderError> {
        self.render_view(config, Report::IndustryReport, &reports::industry_report(layout))
    }

    pub fn render_yard_report(
        &self,
        config: &RenderConfig,
        layout: &Layout,
    ) -> Result<String, RenderError> {
        self.render_view(config, Report::YardReport, &reports::yard_report(layout))
    }

    pub fn render_cargo_report(
        &self,
        config: &RenderConfig,
        layout: &Layout,
    ) -> Result<String, RenderError> {
        self.render_view(config, Report::CargoReport, &reports::cargo_report(layout))
    }

    pub fn render_reserved_car_report(
        &self,
        config: &RenderConfig,
        layout: &Layout,
    ) -> Result<String, RenderError> {
        self.render_view(
            config,
            Report::ReservedCarReport,
            &reports::reserved_car_report(layout),
        )
    }

    pub fn render_layout_page(
        &self,
        config: &RenderConfig,
        layout: &Layout,
    ) -> Result<String, RenderError> {
        self.render_view(config, Report::LayoutPage, &reports::layout_page(layout))
    }

    pub fn render_layouts_page(
        &self,
        config: &RenderConfig,
        layouts: &[Layout],
    ) -> Result<String, RenderError> {
        self.render_view(config, Report::LayoutsPage, &reports::layouts_page(layouts))
    }

    fn render_view<T: Serialize>(
        &self,
        config: &RenderConfig,
        report: Report,
        view: &T,
    ) -> Result<String, RenderError> {
        let data = context_from(view)?;
        self.render_report(config, report.name(), &data)
    }

    fn render_with_flags(
        &self,
        config: &RenderConfig,
        report_name: &str,
        data: &Object,
        flags: &[(&'static str, bool)],
    ) -> Result<String, RenderError> {
        let text = self.load_report(config, report_name)?;

        let mut context = Object::new();
        for setting in optional::scan(&text) {
            let key = setting.variable();
            if context.contains_key(key.as_str()) {
                continue;
            }
            let value = config
                .override_for(&setting.name)
                .map(str::to_string)
                .unwrap_or(setting.value);
            context.insert(key.into(), Value::scalar(value));
        }
        for (key, value) in data.iter() {
            context.insert(key.clone(), value.clone());
        }
        for (key, value) in flags {
            context.insert((*key).into(), Value::scalar(*value));
        }

        let template = self
            .parser
            .parse(&optional::strip_declarations(&text))
            .map_err(RenderError::Template)?;
        let html = template.render(&context).map_err(RenderError::Template)?;
        tracing::debug!(
            "[render] {report_name} from {} ({} bytes)",
            config.template_dir.display(),
            html.len()
        );
        Ok(html)
    }

    fn load_report(&self, config: &RenderConfig, report_name: &str) -> Result<String, RenderError> {
        let filename = format!("{report_name}.html");
        let path = self
            .locator
            .file_path_for_template_file(&config.template_dir, &filename)?;
        read_file(&path)
    }
}

/// Converts a serializable view into a render context.
pub fn context_from<T: Serialize>(view: &T) -> Result<Object, RenderError> {
    to_object(view).map_err(RenderError::Context)
}

fn read_file(path: &Path) -> Result<String, RenderError> {
    fs::read_to_string(path).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use liquid::object;

    use super::*;
    use crate::domain::layout::fixtures::sample_layout;

    fn renderer_with(files: &[(&str, &str)]) -> (tempfile::TempDir, ReportRenderer) {
        let root = tempfile::tempdir().expect("tempdir");
        let bundle = root.path().join("bundle");
        for (name, body) in files {
            let path = bundle.join(name);
            fs::create_dir_all(path.parent().expect("parent")).expect("dirs");
            fs::write(path, body).expect("write template");
        }
        let renderer = ReportRenderer::new(TemplateLocator::new(None, bundle)).expect("renderer");
        (root, renderer)
    }

    fn default_config(renderer: &ReportRenderer) -> RenderConfig {
        renderer.locator().config_for(None)
    }

    #[test]
    fn override_replaces_declared_default() {
        let (_root, renderer) = renderer_with(&[(
            "greeting.html",
            "<h1>{{OPTIONAL_RAILWAY_NAME | default: Mid-Continent Terminal Railway}}</h1>",
        )]);
        let config = default_config(&renderer);

        let plain = renderer
            .render_report(&config, "greeting", &Object::new())
            .expect("render");
        assert_eq!(plain, "<h1>Mid-Continent Terminal Railway</h1>");

        let custom = config.with_overrides(vec![OptionalSetting::new("RAILWAY_NAME", "Vasona Branch")]);
        let html = renderer
            .render_report(&custom, "greeting", &Object::new())
            .expect("render");
        assert_eq!(html, "<h1>Vasona Branch</h1>");
    }

    #[test]
    fn filters_after_default_apply_to_the_value() {
        let (_root, renderer) = renderer_with(&[(
            "title.html",
            r#"<h1>{{ OPTIONAL_NAME | default: "mid-continent" | upcase }}</h1>"#,
        )]);
        let config = default_config(&renderer);

        let plain = renderer
            .render_report(&config, "title", &Object::new())
            .expect("render");
        assert_eq!(plain, "<h1>MID-CONTINENT</h1>");

        let custom = config.with_overrides(vec![OptionalSetting::new("NAME", "vasona")]);
        let html = renderer
            .render_report(&custom, "title", &Object::new())
            .expect("render");
        assert_eq!(html, "<h1>VASONA</h1>");
    }

    #[test]
    fn undeclared_override_is_ignored() {
        let (_root, renderer) = renderer_with(&[("plain.html", "<p>{{ layout_name }}</p>")]);
        let config = default_config(&renderer)
            .with_overrides(vec![OptionalSetting::new("RAILWAY_NAME", "Injected")]);
        let html = renderer
            .render_report(&config, "plain", &object!({ "layout_name": "Vasona" }))
            .expect("render");
        assert_eq!(html, "<p>Vasona</p>");
    }

    #[test]
    fn domain_data_wins_over_optional_values() {
        let (_root, renderer) = renderer_with(&[(
            "clash.html",
            "{{OPTIONAL_ROAD | default: SP}}",
        )]);
        let html = renderer
            .render_report(
                &default_config(&renderer),
                "clash",
                &object!({ "OPTIONAL_ROAD": "WP" }),
            )
            .expect("render");
        assert_eq!(html, "WP");
    }

    #[test]
    fn missing_report_is_an_error() {
        let (_root, renderer) = renderer_with(&[("switchlist.html", "x")]);
        let result = renderer.render_report(&default_config(&renderer), "nope", &Object::new());
        assert!(matches!(result, Err(RenderError::FileNotFound { .. })));
    }

    #[test]
    fn undefined_variable_surfaces_as_template_error() {
        let (_root, renderer) = renderer_with(&[("broken.html", "{{ not_there }}")]);
        let result = renderer.render_report(&default_config(&renderer), "broken", &Object::new());
        assert!(matches!(result, Err(RenderError::Template(_))));
    }

    #[test]
    fn print_switchlist_omits_interactive_controls() {
        let (_root, renderer) = renderer_with(&[(
            "switchlist.html",
            "{{ train_name }}{% if is_interactive %}<button>Done</button>{% endif %}",
        )]);
        let config = default_config(&renderer);
        let layout = sample_layout();

        let printed = renderer
            .render_switchlist(&config, &layout, 7, SwitchlistMode::print())
            .expect("print");
        let live = renderer
            .render_switchlist(&config, &layout, 7, SwitchlistMode::interactive(false))
            .expect("interactive");
        assert_eq!(printed, "Local 7");
        assert_eq!(live, "Local 7<button>Done</button>");
    }

    #[test]
    fn phone_switchlist_uses_its_own_file() {
        let (_root, renderer) = renderer_with(&[
            ("switchlist.html", "desk"),
            ("switchlist-iphone.html", "phone {% if is_iphone %}yes{% endif %}"),
        ]);
        let html = renderer
            .render_switchlist(
                &default_config(&renderer),
                &sample_layout(),
                7,
                SwitchlistMode::interactive(true),
            )
            .expect("render");
        assert_eq!(html, "phone yes");
    }

    #[test]
    fn unknown_train_is_reported() {
        let (_root, renderer) = renderer_with(&[("switchlist.html", "x")]);
        let result = renderer.render_switchlist(
            &default_config(&renderer),
            &sample_layout(),
            99,
            SwitchlistMode::print(),
        );
        assert!(matches!(result, Err(RenderError::UnknownTrain(99))));
    }
}
