use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEK_NUMBER_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

/// Days of the previous and next month padding out the first and last rows
pub(crate) const EXTRA_DAY_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const WARNING_STYLE: Style = BASE_STYLE.fg(Color::LightRed);

/// Bar color for events whose color cannot be parsed
pub(crate) const MISSING_COLOR: Color = Color::Gray;
