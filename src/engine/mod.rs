//! HTML report generation: template lookup, optional variables, rendering.

pub mod error;
pub mod locator;
pub mod optional;
pub mod renderer;

pub use error::RenderError;
pub use locator::{RenderConfig, TemplateLocator};
pub use optional::OptionalSetting;
pub use renderer::{Report, ReportRenderer, SwitchlistMode};
