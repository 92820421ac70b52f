use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeError;

use crate::engine::OptionalSetting;

pub const APP_QUALIFIER: &str = "org";
pub const APP_ORG: &str = "SwitchList";
pub const APP_NAME: &str = "SwitchList";

pub const MAX_RECENT_LAYOUTS: usize = 8;

/// User choices that survive restarts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Switchlist template to use; `None` means the bundled default.
    #[serde(default)]
    pub template_name: Option<String>,
    /// Custom values for the template's optional variables.
    #[serde(default)]
    pub optional_settings: Vec<OptionalSetting>,
    #[serde(default)]
    pub last_layout: Option<PathBuf>,
    /// Layouts opened before, most recent first.
    #[serde(default)]
    pub recent_layouts: Vec<PathBuf>,
}

impl Preferences {
    /// Replaces (or adds) the override for one optional variable. An empty
    /// value removes it so the template default shows again.
    pub fn set_optional(&mut self, name: &str, value: &str) {
        self.optional_settings.retain(|setting| setting.name != name);
        if !value.trim().is_empty() {
            self.optional_settings
                .push(OptionalSetting::new(name, value.trim()));
        }
    }

    /// Records `path` as the layout to reopen and moves it to the front of
    /// the recent list.
    pub fn remember_layout(&mut self, path: &Path) {
        self.recent_layouts.retain(|recent| recent != path);
        self.recent_layouts.insert(0, path.to_path_buf());
        self.recent_layouts.truncate(MAX_RECENT_LAYOUTS);
        self.last_layout = Some(path.to_path_buf());
    }
}

fn data_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join("preferences.json"))
}

pub fn load_preferences() -> Option<Preferences> {
    let path = data_file()?;
    load_preferences_from(&path)
}

pub fn load_preferences_from(path: &Path) -> Option<Preferences> {
    let data = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&data) {
        Ok(preferences) => Some(preferences),
        Err(err) => {
            tracing::warn!("[prefs] Ignoring unreadable {}: {err}", path.display());
            None
        }
    }
}

pub fn save_preferences(preferences: &Preferences) -> Result<(), PersistSaveError> {
    let path = data_file().ok_or(PersistSaveError::StorageUnavailable)?;
    save_preferences_to(&path, preferences)
}

pub fn save_preferences_to(path: &Path, preferences: &Preferences) -> Result<(), PersistSaveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(preferences)?;
    fs::write(path, json)?;
    tracing::debug!("[prefs] Saved preferences to {}", path.display());
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum PersistSaveError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}
