//! Renders the bundled template set against the sample layout.

use std::fs;
use std::path::Path;

use switchlist::domain::Layout;
use switchlist::engine::{
    OptionalSetting, RenderConfig, RenderError, Report, ReportRenderer, SwitchlistMode,
    TemplateLocator,
};
use switchlist::util::assets::{install_bundled_templates, sample_layout_json};

struct Fixture {
    _root: tempfile::TempDir,
    renderer: ReportRenderer,
    layout: Layout,
}

impl Fixture {
    fn new() -> Self {
        let root = tempfile::tempdir().expect("tempdir");
        let bundle = root.path().join("bundle");
        let user = root.path().join("user");
        fs::create_dir_all(&user).expect("user dir");
        install_bundled_templates(&bundle).expect("install bundle");

        let renderer =
            ReportRenderer::new(TemplateLocator::new(Some(user), bundle)).expect("renderer");
        let layout = Layout::from_json_str(&sample_layout_json()).expect("sample layout");
        Self {
            _root: root,
            renderer,
            layout,
        }
    }

    fn user_dir(&self) -> &Path {
        self.renderer.locator().user_dir().expect("user dir")
    }

    fn config(&self, template: Option<&str>) -> RenderConfig {
        self.renderer.locator().config_for(template)
    }
}

#[test]
fn every_layout_report_renders_with_the_default_template() {
    let fx = Fixture::new();
    let config = fx.config(None);

    let cars = fx.renderer.render_car_report(&config, &fx.layout).expect("cars");
    assert!(cars.contains("SP 99012"));
    assert!(cars.contains("4 cars on the layout."));

    let industries = fx
        .renderer
        .render_industry_report(&config, &fx.layout)
        .expect("industries");
    assert!(industries.contains("Los Gatos / Team Track"));
    assert!(industries.contains("No cars."));

    let yards = fx.renderer.render_yard_report(&config, &fx.layout).expect("yards");
    assert!(yards.contains("Campbell / Campbell Yard (2 cars)"));

    let cargo = fx.renderer.render_cargo_report(&config, &fx.layout).expect("cargo");
    assert!(cargo.contains("Total: 7 cars per week."));
    assert!(cargo.contains("random"));

    let reserved = fx
        .renderer
        .render_reserved_car_report(&config, &fx.layout)
        .expect("reserved");
    assert!(reserved.contains("Vasona Job"));

    let page = fx.renderer.render_layout_page(&config, &fx.layout).expect("layout");
    assert!(page.contains("Campbell turn"));

    let index = fx
        .renderer
        .render_layouts_page(&config, std::slice::from_ref(&fx.layout))
        .expect("layouts");
    assert!(index.contains("Vasona Branch (2 trains)"));
}

#[test]
fn switchlist_shows_railway_name_default_and_override() {
    let fx = Fixture::new();
    let config = fx.config(None);

    let html = fx
        .renderer
        .render_switchlist(&config, &fx.layout, 7, SwitchlistMode::print())
        .expect("switchlist");
    assert!(html.contains("Mid-Continent Terminal Railway"));
    assert!(html.contains("Los Gatos Lumber"));

    let custom = config.with_overrides(vec![
        OptionalSetting::new("RAILWAY_NAME", "Vasona Branch Railroad"),
        OptionalSetting::new("NOT_DECLARED", "should not appear"),
    ]);
    let html = fx
        .renderer
        .render_switchlist(&custom, &fx.layout, 7, SwitchlistMode::print())
        .expect("switchlist");
    assert!(html.contains("Vasona Branch Railroad"));
    assert!(!html.contains("Mid-Continent Terminal Railway"));
    assert!(!html.contains("should not appear"));
}

#[test]
fn print_and_interactive_switchlists_differ_only_by_controls() {
    let fx = Fixture::new();
    let config = fx.config(None);

    let printed = fx
        .renderer
        .render_switchlist(&config, &fx.layout, 7, SwitchlistMode::print())
        .expect("print");
    let live = fx
        .renderer
        .render_switchlist(&config, &fx.layout, 7, SwitchlistMode::interactive(false))
        .expect("interactive");
    assert!(!printed.contains("<button"));
    assert!(live.contains("<button"));

    let phone = fx
        .renderer
        .render_switchlist(&config, &fx.layout, 7, SwitchlistMode::interactive(true))
        .expect("phone");
    assert!(phone.contains("viewport"));
}

#[test]
fn rendering_is_idempotent() {
    let fx = Fixture::new();
    let config = fx.config(Some("Pick Up Drop Off"));
    let first = fx
        .renderer
        .render_switchlist(&config, &fx.layout, 8, SwitchlistMode::print())
        .expect("first");
    let second = fx
        .renderer
        .render_switchlist(&config, &fx.layout, 8, SwitchlistMode::print())
        .expect("second");
    assert_eq!(first, second);
    assert!(first.contains("Los Gatos / Team Track"));
}

#[test]
fn named_templates_fall_back_to_bundled_reports() {
    let fx = Fixture::new();
    let config = fx.config(Some("PICL Report"));
    assert_eq!(config.template_name.as_deref(), Some("PICL Report"));

    let html = fx
        .renderer
        .render_switchlist(&config, &fx.layout, 7, SwitchlistMode::print())
        .expect("picl");
    assert!(html.contains("PICL REPORT"));
    assert!(html.contains("MID-CONTINENT TERMINAL RAILWAY"));

    let css = fx.renderer.stylesheet(&config, "switchlist.css").expect("css");
    assert!(css.contains("Courier"));

    // PICL only ships a switchlist; other reports come from the bundle root.
    let cars = fx.renderer.render_car_report(&config, &fx.layout).expect("cars");
    assert!(cars.contains("Car report for Vasona Branch"));
}

#[test]
fn user_templates_shadow_the_bundle() {
    let fx = Fixture::new();
    let custom = fx.user_dir().join("Pick Up Drop Off");
    fs::create_dir_all(&custom).expect("custom dir");
    fs::write(
        custom.join("switchlist.html"),
        "<p>{{OPTIONAL_CREW | default: Conductor}}: {{ train_name }}</p>",
    )
    .expect("custom switchlist");

    let config = fx.config(Some("Pick Up Drop Off"));
    assert_eq!(config.template_dir, custom);
    let html = fx
        .renderer
        .render_switchlist(&config, &fx.layout, 7, SwitchlistMode::print())
        .expect("custom");
    assert_eq!(html, "<p>Conductor: Local 7</p>");

    let names = fx.renderer.locator().template_names();
    assert_eq!(names, vec!["PICL Report", "Pick Up Drop Off"]);
}

#[test]
fn unknown_template_uses_default_and_missing_report_fails() {
    let fx = Fixture::new();
    let config = fx.config(Some("No Such Style"));
    assert_eq!(config.template_dir, fx.renderer.locator().default_template_dir());
    assert_eq!(config.template_name, None);

    let result = fx
        .renderer
        .render_report(&config, "timetable", &liquid::Object::new());
    assert!(matches!(result, Err(RenderError::FileNotFound { .. })));
}

#[test]
fn optional_settings_are_listed_per_report() {
    let fx = Fixture::new();
    let config = fx.config(None);
    let settings = fx
        .renderer
        .optional_settings(&config, Report::Switchlist.name())
        .expect("settings");
    assert_eq!(
        settings,
        vec![
            OptionalSetting::new("RAILWAY_NAME", "Mid-Continent Terminal Railway"),
            OptionalSetting::new("FOOTER", "Report all bad orders to the yardmaster."),
        ]
    );
}
