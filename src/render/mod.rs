/// Output backends that do not need a window.
pub mod svg;

pub use svg::{export_svg, render_svg};
