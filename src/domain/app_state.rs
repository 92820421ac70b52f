use std::path::PathBuf;

use crate::engine::{RenderConfig, TemplateLocator};
use crate::util::{assets, persistence::Preferences};

use super::layout::Layout;

/// Everything the desktop shell keeps between interactions.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub layout: Layout,
    /// File the layout came from; `None` for the built-in sample.
    pub layout_path: Option<PathBuf>,
    pub preferences: Preferences,
    /// Messages about the layout that the user should see.
    pub problems: Vec<String>,
}

impl AppState {
    /// Opens `path` if given and readable, otherwise the sample layout.
    pub fn open(path: Option<PathBuf>, preferences: Preferences) -> Self {
        let mut problems = Vec::new();
        let loaded = path.and_then(|path| match Layout::load(&path) {
            Ok(layout) => Some((layout, path)),
            Err(err) => {
                tracing::warn!("[layout] Could not open {}: {err}", path.display());
                problems.push(format!("Could not open {}: {err}", path.display()));
                None
            }
        });

        let (layout, layout_path) = match loaded {
            Some((layout, path)) => (layout, Some(path)),
            None => match Layout::from_json_str(&assets::sample_layout_json()) {
                Ok(layout) => (layout, None),
                Err(err) => {
                    problems.push(format!("Sample layout is unreadable: {err}"));
                    (Layout::new("Untitled"), None)
                }
            },
        };

        problems.extend(layout.validate().into_iter().map(|err| err.to_string()));

        let mut preferences = preferences;
        if let Some(path) = &layout_path {
            preferences.remember_layout(path);
        }

        Self {
            layout,
            layout_path,
            preferences,
            problems,
        }
    }

    /// The open layout followed by every readable recently opened one.
    pub fn known_layouts(&self) -> Vec<Layout> {
        let mut layouts = vec![self.layout.clone()];
        for path in &self.preferences.recent_layouts {
            if self.layout_path.as_ref() == Some(path) {
                continue;
            }
            match Layout::load(path) {
                Ok(layout) => layouts.push(layout),
                Err(err) => {
                    tracing::debug!("[layout] Skipping recent {}: {err}", path.display());
                }
            }
        }
        layouts
    }

    /// Render configuration for the user's chosen template and overrides.
    pub fn render_config(&self, locator: &TemplateLocator) -> RenderConfig {
        locator
            .config_for(self.preferences.template_name.as_deref())
            .with_overrides(self.preferences.optional_settings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::layout::fixtures::sample_layout;
    use crate::engine::OptionalSetting;

    #[test]
    fn unreadable_layout_falls_back_to_sample() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("missing.json");
        let state = AppState::open(Some(missing), Preferences::default());

        assert_eq!(state.layout.name, "Vasona Branch");
        assert_eq!(state.layout_path, None);
        assert_eq!(state.preferences.last_layout, None);
        assert_eq!(state.problems.len(), 1);
        assert!(state.problems[0].contains("missing.json"));
    }

    #[test]
    fn opened_layout_is_remembered() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("vasona.json");
        sample_layout().save(&path).expect("save");

        let state = AppState::open(Some(path.clone()), Preferences::default());
        assert_eq!(state.layout_path.as_deref(), Some(path.as_path()));
        assert_eq!(state.preferences.last_layout, Some(path));
        assert!(state.problems.is_empty());
    }

    #[test]
    fn known_layouts_include_readable_recent_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let current = dir.path().join("vasona.json");
        sample_layout().save(&current).expect("save");
        let other = dir.path().join("peninsula.json");
        Layout::new("Peninsula").save(&other).expect("save");

        let mut preferences = Preferences::default();
        preferences.remember_layout(&dir.path().join("deleted.json"));
        preferences.remember_layout(&other);

        let state = AppState::open(Some(current.clone()), preferences);
        assert_eq!(
            state.preferences.recent_layouts,
            vec![current, other, dir.path().join("deleted.json")]
        );
        let names = state
            .known_layouts()
            .into_iter()
            .map(|layout| layout.name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Vasona Branch", "Peninsula"]);
    }

    #[test]
    fn render_config_carries_preferences() {
        let dir = tempfile::tempdir().expect("tempdir");
        let locator = TemplateLocator::new(None, dir.path());
        let mut state = AppState::open(None, Preferences::default());
        state.preferences.template_name = Some("Unknown".into());
        state.preferences.set_optional("RAILWAY_NAME", "Vasona");

        let config = state.render_config(&locator);
        assert_eq!(config.template_dir, dir.path());
        assert_eq!(
            config.overrides,
            vec![OptionalSetting::new("RAILWAY_NAME", "Vasona")]
        );
    }
}
