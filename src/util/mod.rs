//! Ambient plumbing: embedded assets, logging, preferences, version info.

use std::sync::atomic::{AtomicUsize, Ordering};

pub mod assets;
pub mod logging;
pub mod persistence;
pub mod version;

static ID_COUNTER: AtomicUsize = AtomicUsize::new(1);

/// Process-unique id such as `toast-3`, for keying UI elements.
pub fn generate_id(prefix: &str) -> String {
    let value = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_distinct_and_prefixed() {
        let first = generate_id("toast");
        let second = generate_id("toast");
        assert_ne!(first, second);
        assert!(first.starts_with("toast-"));
        assert!(second.starts_with("toast-"));
    }
}
