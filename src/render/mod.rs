//! Rendering module for converting analyses to output formats.

mod json;
mod outline;
mod theme;

pub use json::{to_json, to_json_batch, JsonFormat};
pub use outline::to_outline;
pub use theme::to_theme_css;
