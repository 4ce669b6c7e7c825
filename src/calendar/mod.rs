mod measure;
mod widget;
mod window;
pub(crate) use self::widget::MonthView;
pub(crate) use self::window::MonthWindow;

/// Display switches that affect only how the month is drawn, not how events
/// are laid out
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct ViewOptions {
    /// Show ISO week numbers in a left margin
    pub(crate) show_week_numbers: bool,
    /// Leave the days of adjacent months blank instead of dimming them
    pub(crate) hide_extra_days: bool,
}
