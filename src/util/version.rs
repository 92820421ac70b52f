pub const APP_NAME: &str = "SwitchList";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_TAG: Option<&str> = option_env!("GIT_TAG");

pub fn version_label() -> String {
    if let Some(tag) = GIT_TAG {
        tag.to_string()
    } else {
        format!("v{}", APP_VERSION)
    }
}

/// Window title, e.g. "SwitchList v1.0.0 - Vasona Branch".
pub fn window_title(layout_name: Option<&str>) -> String {
    match layout_name.filter(|name| !name.is_empty()) {
        Some(name) => format!("{APP_NAME} {} - {name}", version_label()),
        None => format!("{APP_NAME} {}", version_label()),
    }
}
