use std::{
    borrow::Cow,
    fs, io,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use rust_embed::RustEmbed;

/// Embed the entire `assets/` directory into the binary.
#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

/// The template set shipped with the app. Files at the root form the
/// default template; each subdirectory is a named alternative.
#[derive(RustEmbed)]
#[folder = "templates"]
struct BundledTemplates;

static MAIN_CSS: OnceLock<String> = OnceLock::new();

/// Returns the contents of `assets/main.css` as a static string.
pub fn main_css() -> &'static str {
    MAIN_CSS
        .get_or_init(|| load_text("/assets/main.css"))
        .as_str()
}

/// JSON of the demo layout opened when no layout file is given.
pub fn sample_layout_json() -> String {
    load_text("/assets/sample-layout.json")
}

/// Where the bundled templates are unpacked for the locator.
pub fn bundle_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("switchlist")
        .join("bundled-templates")
}

/// Writes every bundled template file under `dest`, replacing older copies.
/// Returns the number of files written.
pub fn install_bundled_templates(dest: &Path) -> io::Result<usize> {
    let mut written = 0;
    for name in BundledTemplates::iter() {
        let Some(file) = BundledTemplates::get(&name) else {
            continue;
        };
        let target = dest.join(name.as_ref());
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, file.data.as_ref())?;
        written += 1;
    }
    tracing::info!(
        "[assets] Installed {written} bundled template files to {}",
        dest.display()
    );
    Ok(written)
}

fn load_text(path: &str) -> String {
    let asset = load_asset(path);
    String::from_utf8(asset.into_owned())
        .unwrap_or_else(|_| panic!("Embedded asset {path} is not valid UTF-8"))
}

fn load_asset(path: &str) -> Cow<'static, [u8]> {
    let canonical = canonical_asset_path(path);
    EmbeddedAssets::get(&canonical)
        .map(|file| file.data)
        .unwrap_or_else(|| panic!("Failed to locate embedded asset: {path}"))
}

fn canonical_asset_path(path: &str) -> String {
    let trimmed = path.trim_start_matches('/');
    if let Some(rest) = trimmed.strip_prefix("assets/") {
        rest.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Layout;

    #[test]
    fn bundle_contains_default_switchlist_and_named_templates() {
        let dir = tempfile::tempdir().expect("tempdir");
        let count = install_bundled_templates(dir.path()).expect("install");
        assert!(count > 0);
        assert!(dir.path().join("switchlist.html").is_file());
        assert!(dir.path().join("switchlist.css").is_file());
        assert!(dir.path().join("Pick Up Drop Off").join("switchlist.html").is_file());
    }

    #[test]
    fn sample_layout_parses_and_validates() {
        let layout = Layout::from_json_str(&sample_layout_json()).expect("sample layout");
        assert!(layout.validate().is_empty());
        assert!(layout.trains().count() > 0);
    }

    #[test]
    fn canonical_path_strips_assets_prefix() {
        assert_eq!(canonical_asset_path("/assets/main.css"), "main.css");
        assert_eq!(canonical_asset_path("main.css"), "main.css");
    }
}
