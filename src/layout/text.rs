/// Estimates how wide a label will be when drawn.
///
/// The planner only needs this to decide whether a label fits in the room
/// an event has in a week row, so an estimate is good enough; renderers
/// that know their real glyph metrics can substitute an exact measure.
pub trait TextMeasure {
    fn text_width(&self, text: &str, font_size: f64) -> f64;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        (**self).text_width(text, font_size)
    }
}

/// The default measure: every character is assumed to be two thirds of the
/// font size wide.
///
/// This is an approximation, not an exact metric.  It overestimates narrow
/// glyphs and underestimates wide (e.g., CJK) ones.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ApproxTextMeasure;

impl TextMeasure for ApproxTextMeasure {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        f64::from(u32::try_from(text.chars().count()).unwrap_or(u32::MAX)) * font_size * 2.0 / 3.0
    }
}
