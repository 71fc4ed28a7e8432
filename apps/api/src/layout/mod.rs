// Text measurement for the PDF renderer: static font-metric tables drive
// word-wrap and line counting, since builtin PDF fonts ship no glyph data we
// can query at runtime.

pub mod font_metrics;

pub use font_metrics::{get_metrics, max_line_em, FontFamily, FontMetricTable};
