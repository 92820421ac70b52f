//! Optional template variables.
//!
//! A template may declare cosmetic values the user can override without
//! editing the file:
//!
//! ```text
//! declaration := "{{" ws* "OPTIONAL_" NAME ws* "|" ws* "default:" ws* TEXT ws* FILTERS? "}}"
//! NAME        := [A-Za-z0-9_]+
//! TEXT        := QUOTED | any characters except "|", "}" and newline
//! QUOTED      := '"' [^"\n]* '"' | "'" [^'\n]* "'"
//! FILTERS     := "|" any characters except "}" and newline
//! ```
//!
//! Filters chained after the default clause apply to the value, whether it
//! comes from the template default or from the user.
//!
//! Typically the declaration is the right-hand side of an assignment, e.g.
//! `title = {{OPTIONAL_RAILWAY_NAME | default: Mid-Continent Terminal Railway}};`.
//! Matching is purely textual and text that does not match is ignored.

use std::{borrow::Cow, sync::OnceLock};

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

pub const OPTIONAL_PREFIX: &str = "OPTIONAL_";

/// A named optional value, with the `OPTIONAL_` prefix stripped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionalSetting {
    pub name: String,
    pub value: String,
}

impl OptionalSetting {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Name of the variable the template engine sees.
    pub fn variable(&self) -> String {
        format!("{OPTIONAL_PREFIX}{}", self.name)
    }
}

fn declaration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(concat!(
            r"\{\{[ \t]*OPTIONAL_([A-Za-z0-9_]+)[ \t]*\|[ \t]*default:[ \t]*",
            r#"("[^"\n]*"|'[^'\n]*'|[^|}\n]*?)[ \t]*"#,
            r"(\|[^}\n]*?)?[ \t]*\}\}",
        ))
        .unwrap_or_else(|err| panic!("optional declaration pattern is invalid: {err}"))
    })
}

/// Every optional declaration in `text`, in order of appearance.
/// Repeated names produce repeated entries.
pub fn scan(text: &str) -> Vec<OptionalSetting> {
    declaration_pattern()
        .captures_iter(text)
        .map(|caps| OptionalSetting::new(&caps[1], unquote(&caps[2])))
        .collect()
}

/// Rewrites each declaration to a plain `{{ OPTIONAL_<NAME> }}` lookup so
/// the engine never has to evaluate the default clause. Trailing filters
/// are kept.
pub fn strip_declarations(text: &str) -> Cow<'_, str> {
    declaration_pattern().replace_all(text, |caps: &Captures<'_>| {
        match caps.get(3).map(|filters| filters.as_str().trim_end()) {
            Some(filters) => format!("{{{{ OPTIONAL_{} {filters} }}}}", &caps[1]),
            None => format!("{{{{ OPTIONAL_{} }}}}", &caps[1]),
        }
    })
}

fn unquote(raw: &str) -> &str {
    for quote in ['"', '\''] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}
