//! Finding switchlist templates on disk.
//!
//! Two directories are searched: the user's customization directory and the
//! bundled template directory. Each holds one subdirectory per named
//! template. The bundle root doubles as the default template.

use std::{
    collections::BTreeSet,
    fs,
    path::{Component, Path, PathBuf},
};

use directories::ProjectDirs;

use super::{error::RenderError, optional::OptionalSetting};
use crate::util::persistence::{APP_NAME, APP_ORG, APP_QUALIFIER};

/// File whose presence marks a directory as a usable template.
pub const SWITCHLIST_FILE: &str = "switchlist.html";

/// Per-call rendering configuration: which template directory to read and
/// which optional values the user overrode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    pub template_dir: PathBuf,
    /// Name the directory was resolved from, `None` for the default.
    pub template_name: Option<String>,
    pub overrides: Vec<OptionalSetting>,
}

impl RenderConfig {
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
            template_name: None,
            overrides: Vec::new(),
        }
    }

    pub fn with_overrides(mut self, overrides: Vec<OptionalSetting>) -> Self {
        self.overrides = overrides;
        self
    }

    /// First override with the given name.
    pub fn override_for(&self, name: &str) -> Option<&str> {
        self.overrides
            .iter()
            .find(|setting| setting.name == name)
            .map(|setting| setting.value.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct TemplateLocator {
    user_dir: Option<PathBuf>,
    bundle_dir: PathBuf,
}

impl TemplateLocator {
    pub fn new(user_dir: Option<PathBuf>, bundle_dir: impl Into<PathBuf>) -> Self {
        Self {
            user_dir,
            bundle_dir: bundle_dir.into(),
        }
    }

    /// Locator using `<data dir>/templates` as the customization directory.
    pub fn for_user(bundle_dir: impl Into<PathBuf>) -> Self {
        let user_dir = ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
            .map(|dirs| dirs.data_dir().join("templates"));
        Self::new(user_dir, bundle_dir)
    }

    pub fn user_dir(&self) -> Option<&Path> {
        self.user_dir.as_deref()
    }

    pub fn bundle_dir(&self) -> &Path {
        &self.bundle_dir
    }

    pub fn default_template_dir(&self) -> &Path {
        &self.bundle_dir
    }

    /// Directory for the named template. Never fails: an empty or unknown
    /// name resolves to the default template. Names must match a
    /// subdirectory exactly; anything that is not a single path component
    /// is unknown.
    pub fn resolve(&self, name: Option<&str>) -> PathBuf {
        let Some(name) = name.filter(|name| !name.is_empty()) else {
            return self.default_template_dir().to_path_buf();
        };
        if !is_plain_name(name) {
            tracing::warn!("[templates] Ignoring template name \"{name}\"; using the default");
            return self.default_template_dir().to_path_buf();
        }

        let candidates = self
            .user_dir
            .iter()
            .map(|dir| dir.join(name))
            .chain(std::iter::once(self.bundle_dir.join(name)));
        for candidate in candidates {
            if candidate.is_dir() {
                tracing::debug!("[templates] Using \"{name}\" from {}", candidate.display());
                return candidate;
            }
        }

        tracing::warn!("[templates] No template named \"{name}\"; using the default");
        self.default_template_dir().to_path_buf()
    }

    pub fn config_for(&self, name: Option<&str>) -> RenderConfig {
        let template_dir = self.resolve(name);
        let template_name = name
            .filter(|name| !name.is_empty() && template_dir != self.bundle_dir)
            .map(str::to_string);
        RenderConfig {
            template_dir,
            template_name,
            overrides: Vec::new(),
        }
    }

    /// A single file from `template_dir`, or from the bundle root when the
    /// template does not carry its own copy.
    pub fn file_path_for_template_file(
        &self,
        template_dir: &Path,
        filename: &str,
    ) -> Result<PathBuf, RenderError> {
        let local = template_dir.join(filename);
        if local.is_file() {
            return Ok(local);
        }
        let bundled = self.bundle_dir.join(filename);
        if bundled.is_file() {
            return Ok(bundled);
        }
        Err(RenderError::FileNotFound {
            filename: filename.to_string(),
            template_dir: template_dir.to_path_buf(),
        })
    }

    /// Names of every template in either directory that has a switchlist.
    pub fn template_names(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        for dir in self.user_dir.iter().chain(std::iter::once(&self.bundle_dir)) {
            let Ok(entries) = fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() && path.join(SWITCHLIST_FILE).is_file() {
                    if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                        names.insert(name.to_string());
                    }
                }
            }
        }
        names.into_iter().collect()
    }
}

fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
