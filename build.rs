use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    // Bundled templates and assets are embedded; rebuild when they change.
    println!("cargo:rerun-if-changed=templates");
    println!("cargo:rerun-if-changed=assets");

    if let Some(tag) = git_tag() {
        println!("cargo:rustc-env=GIT_TAG={tag}");
    }
}

fn git_tag() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--abbrev=0"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let tag = String::from_utf8(output.stdout).ok()?;
    let tag = tag.trim();
    (!tag.is_empty()).then(|| tag.to_string())
}
