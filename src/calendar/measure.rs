use barcal::layout::TextMeasure;
use ratatui::text::Span;

/// Measures labels in terminal columns.  With a font size of 1, a label's
/// width is the number of cells it occupies.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(super) struct ColumnMeasure;

impl TextMeasure for ColumnMeasure {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        let cols = u32::try_from(Span::raw(text).width()).unwrap_or(u32::MAX);
        f64::from(cols) * font_size
    }
}
