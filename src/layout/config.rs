use super::date::FirstDay;
use super::grid::DayMarking;

/// Colors handed out, in order, to events that do not specify their own
const DEFAULT_PALETTE: [&str; 5] = ["#2e7d32", "#f9a825", "#c62828", "#6a1b9a", "#1565c0"];

/// Extra room a label needs beyond its text, for the bar's rounded ends and
/// inner margin
const DEFAULT_LABEL_PADDING: f64 = 24.0;

const DEFAULT_FONT_SIZE: f64 = 14.0;

const DEFAULT_VIEWPORT_WIDTH: f64 = 360.0;

// Invariant: never empty
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Palette(Vec<String>);

impl Palette {
    /// Returns `None` if `colors` is empty
    pub fn new<I, S>(colors: I) -> Option<Palette>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let colors = colors.into_iter().map(Into::into).collect::<Vec<_>>();
        (!colors.is_empty()).then_some(Palette(colors))
    }

    /// The color for the `index`-th event, cycling through the palette
    pub fn pick(&self, index: usize) -> &str {
        &self.0[index % self.0.len()]
    }

    pub fn colors(&self) -> &[String] {
        &self.0
    }
}

impl Default for Palette {
    fn default() -> Palette {
        Palette(DEFAULT_PALETTE.iter().map(|&s| String::from(s)).collect())
    }
}

/// Everything a layout pass depends on besides the month and the events
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    pub first_day: FirstDay,
    /// Width of the whole week row, in the same unit as `font_size`
    pub viewport_width: f64,
    pub font_size: f64,
    /// Added to every measured label width
    pub label_padding: f64,
    pub palette: Palette,
    pub day_marking: DayMarking,
}

impl LayoutConfig {
    pub fn new(viewport_width: f64) -> LayoutConfig {
        LayoutConfig {
            viewport_width,
            ..LayoutConfig::default()
        }
    }

    pub fn first_day(mut self, first_day: FirstDay) -> LayoutConfig {
        self.first_day = first_day;
        self
    }

    pub fn font_size(mut self, font_size: f64) -> LayoutConfig {
        self.font_size = font_size;
        self
    }

    pub fn label_padding(mut self, padding: f64) -> LayoutConfig {
        self.label_padding = padding;
        self
    }

    pub fn palette(mut self, palette: Palette) -> LayoutConfig {
        self.palette = palette;
        self
    }

    pub fn day_marking(mut self, marking: DayMarking) -> LayoutConfig {
        self.day_marking = marking;
        self
    }

    pub fn day_width(&self) -> f64 {
        self.viewport_width / 7.0
    }
}

impl Default for LayoutConfig {
    fn default() -> LayoutConfig {
        LayoutConfig {
            first_day: FirstDay::default(),
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            font_size: DEFAULT_FONT_SIZE,
            label_padding: DEFAULT_LABEL_PADDING,
            palette: Palette::default(),
            day_marking: DayMarking::default(),
        }
    }
}
