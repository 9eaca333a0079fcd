mod fonts;
mod typst;

pub use fonts::{ensure_cached, FontProvider, FontSpec, HttpFontProvider};
pub use typst::{render_pdf, RenderFont};
