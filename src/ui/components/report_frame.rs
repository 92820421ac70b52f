use dioxus::prelude::*;

use switchlist::engine::RenderError;

/// Shows rendered report HTML, or the reason it could not be produced.
#[component]
pub fn ReportFrame(html: Result<String, String>) -> Element {
    match html {
        Ok(html) => rsx! {
            div { class: "report-frame", dangerous_inner_html: "{html}" }
        },
        Err(message) => rsx! {
            div { class: "report-error",
                h3 { "Report could not be generated" }
                p { "{message}" }
            }
        },
    }
}

/// Prepends the template's stylesheet so the report looks as it would print.
pub fn with_stylesheet(
    html: Result<String, RenderError>,
    css: Result<String, RenderError>,
) -> Result<String, String> {
    let html = html.map_err(|err| err.to_string())?;
    match css {
        Ok(css) => Ok(format!("<style>{css}</style>{html}")),
        Err(err) => {
            tracing::warn!("[render] Stylesheet unavailable: {err}");
            Ok(html)
        }
    }
}
