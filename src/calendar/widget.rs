use super::window::MonthWindow;
use super::ViewOptions;
use crate::theme::{
    EXTRA_DAY_STYLE, MISSING_COLOR, TITLE_STYLE, WARNING_STYLE, WEEKDAY_STYLE, WEEK_NUMBER_STYLE,
};
use barcal::layout::{
    DayCell, DayMarking, EventSpan, FirstDay, MonthLayout, RowLayout, WeekSegment,
};
use ratatui::{layout::Flex, prelude::*, widgets::*};
use std::iter::{successors, zip};
use time::{Date, Weekday};

/// Narrowest day column; enough for a bracketed day number
const MIN_DAY_WIDTH: u16 = 4;

const MAX_DAY_WIDTH: u16 = 12;

/// Number of columns on the left used for week numbers, when shown
const WEEK_MARGIN: u16 = 4;

/// Number of lines taken up by the month title
const TITLE_LINES: u16 = 1;

/// Number of lines taken up by the weekday header and its rule
const HEADER_LINES: u16 = 2;

/// Number of lines taken up by each week: day numbers, then event bars
const WEEK_LINES: u16 = 2;

/// Width of a day number with its brackets or padding, e.g. `[18]`
const DAY_NUMBER_WIDTH: u16 = 4;

const MAX_DOTS: u16 = 3;

const DOT: &str = "•";

const ACS_HLINE: char = '─';

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthView {
    options: ViewOptions,
}

impl MonthView {
    pub(crate) fn new(options: ViewOptions) -> MonthView {
        MonthView { options }
    }

    fn margin(self) -> u16 {
        if self.options.show_week_numbers {
            WEEK_MARGIN
        } else {
            0
        }
    }

    /// The widest even day column that fits in `width`, kept within
    /// `MIN_DAY_WIDTH..=MAX_DAY_WIDTH`.  Even widths put every half day on
    /// a column boundary.
    fn day_width(self, width: u16) -> u16 {
        let dw = width.saturating_sub(self.margin()) / 7;
        (dw & !1).clamp(MIN_DAY_WIDTH, MAX_DAY_WIDTH)
    }
}

impl StatefulWidget for MonthView {
    type State = MonthWindow;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let day_width = self.day_width(area.width);
        let margin = self.margin();
        let [area] = Layout::horizontal([margin + day_width * 7])
            .flex(Flex::Center)
            .areas(area);
        let today = state.today;
        let mut canvas = BufferCanvas::new(area, buf, margin, day_width);
        let layout = match state.ensure_layout(day_width) {
            Ok(layout) => layout,
            Err(e) => {
                canvas.mvprint(0, 0, e.to_string(), Some(WARNING_STYLE));
                return;
            }
        };
        canvas.draw_title(layout.month_start());
        canvas.draw_header(layout.grid.first_day());
        for (i, (row, row_layout)) in zip(0u16.., layout.rows_with_weeks()) {
            if self.options.show_week_numbers {
                canvas.draw_week_number(i, row.iso_week());
            }
            for (col, &cell) in zip(0u16.., row.days()) {
                if cell.in_month || !self.options.hide_extra_days {
                    let marks = day_marks(layout, cell.date);
                    canvas.draw_day(i, col, cell, cell.date == today, &marks);
                }
            }
            canvas.draw_bars(i, row_layout);
        }
        if !layout.rejected.is_empty() {
            let weeks = u16::try_from(layout.grid.weeks().len()).unwrap_or(u16::MAX);
            canvas.draw_rejected(weeks, layout.rejected.len());
        }
    }
}

/// What to draw on a day number, depending on the grid's day marking
#[derive(Clone, Debug, Eq, PartialEq)]
enum DayMarks {
    None,
    /// Colors of the events covering the day, in start order
    Dots(Vec<Color>),
    /// Color of the first event covering the day
    Period(Color),
}

fn day_marks(layout: &MonthLayout, date: Date) -> DayMarks {
    let mut colors = layout.events_on(date).map(|pe| event_color(&pe.color));
    match layout.grid.marking() {
        DayMarking::Simple => DayMarks::None,
        DayMarking::MultiDot => DayMarks::Dots(colors.collect()),
        DayMarking::Period => colors.next().map_or(DayMarks::None, DayMarks::Period),
    }
}

fn event_color(color: &str) -> Color {
    color.parse::<Color>().unwrap_or(MISSING_COLOR)
}

fn bar_style(color: &str) -> Style {
    Style::new().fg(Color::Black).bg(event_color(color))
}

fn weekday_abbrev(wd: Weekday) -> &'static str {
    match wd {
        Weekday::Sunday => "Su",
        Weekday::Monday => "Mo",
        Weekday::Tuesday => "Tu",
        Weekday::Wednesday => "We",
        Weekday::Thursday => "Th",
        Weekday::Friday => "Fr",
        Weekday::Saturday => "Sa",
    }
}

fn text_width(s: &str) -> u16 {
    u16::try_from(Span::raw(s).width()).unwrap_or(u16::MAX)
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
    margin: u16,
    day_width: u16,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer, margin: u16, day_width: u16) -> Self {
        Self {
            area,
            buf,
            margin,
            day_width,
        }
    }

    fn week_y(week_no: u16) -> u16 {
        TITLE_LINES + HEADER_LINES + week_no * WEEK_LINES
    }

    fn day_x(&self, col: u16) -> u16 {
        self.margin + col * self.day_width
    }

    fn draw_title(&mut self, month_start: Date) {
        let title = format!("{} {}", month_start.month(), month_start.year());
        let x = self.area.width.saturating_sub(text_width(&title)) / 2;
        self.mvprint(0, x, title, Some(TITLE_STYLE));
    }

    fn draw_header(&mut self, first_day: FirstDay) {
        let weekdays = successors(Some(first_day.weekday()), |wd| Some(wd.next()));
        for (col, wd) in zip(0..7, weekdays) {
            let x = self.day_x(col) + (self.day_width - 2) / 2;
            self.mvprint(TITLE_LINES, x, weekday_abbrev(wd), Some(WEEKDAY_STYLE));
        }
        self.hline(TITLE_LINES + 1, self.margin, ACS_HLINE, self.day_width * 7);
    }

    fn draw_week_number(&mut self, week_no: u16, iso_week: u8) {
        self.mvprint(
            Self::week_y(week_no),
            0,
            format!("{iso_week:>2}"),
            Some(WEEK_NUMBER_STYLE),
        );
    }

    fn draw_day(&mut self, week_no: u16, col: u16, cell: DayCell, today: bool, marks: &DayMarks) {
        let y = Self::week_y(week_no);
        let x = self.day_x(col) + (self.day_width - DAY_NUMBER_WIDTH) / 2;
        let day = cell.date.day();
        let s = if today {
            format!("[{day:>2}]")
        } else {
            format!(" {day:>2} ")
        };
        let style = match marks {
            DayMarks::Period(color) => Style::new().fg(Color::Black).bg(*color),
            _ if !cell.in_month => EXTRA_DAY_STYLE,
            _ => Style::new(),
        };
        self.mvprint(y, x, s, Some(style));
        if let DayMarks::Dots(colors) = marks {
            let room = self.day_x(col + 1) - (x + DAY_NUMBER_WIDTH);
            for (i, &color) in zip(0..room.min(MAX_DOTS), colors) {
                self.mvprint(
                    y,
                    x + DAY_NUMBER_WIDTH + i,
                    DOT,
                    Some(Style::new().fg(color)),
                );
            }
        }
    }

    fn draw_bars(&mut self, week_no: u16, row: &RowLayout) {
        let y = Self::week_y(week_no) + 1;
        let mut halves = 0;
        for seg in &row.segments {
            let start = halves;
            halves += seg.weight().halves();
            if let WeekSegment::Event(span) = seg {
                let x0 = start * self.day_width / 2;
                let x1 = halves * self.day_width / 2;
                self.draw_span(y, self.margin + x0, x1 - x0, span);
            }
        }
    }

    fn draw_span(&mut self, y: u16, x: u16, width: u16, span: &EventSpan) {
        let style = bar_style(&span.color);
        self.fill(y, x, width, style);
        let mut text = String::new();
        if let Some(d) = &span.leading_decoration {
            text.push_str(d);
        }
        if let Some(label) = &span.label {
            text.push_str(label);
        }
        self.mvprint_within(y, x, text, Some(style), width);
        if let Some(d) = &span.trailing_decoration {
            let dx = width.saturating_sub(text_width(d));
            self.mvprint_within(y, x + dx, d, Some(style), width - dx);
        }
    }

    fn draw_rejected(&mut self, weeks: u16, count: usize) {
        let msg = if count == 1 {
            String::from("1 event skipped: it ends before it starts")
        } else {
            format!("{count} events skipped: they end before they start")
        };
        self.mvprint(Self::week_y(weeks), self.margin, msg, Some(WARNING_STYLE));
    }

    fn fill(&mut self, y: u16, x: u16, width: u16, style: Style) {
        if y < self.area.height && x < self.area.width {
            self.buf.set_style(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                style,
            );
        }
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        self.mvprint_within(y, x, s, style, u16::MAX);
    }

    fn mvprint_within<S: AsRef<str>>(
        &mut self,
        y: u16,
        x: u16,
        s: S,
        style: Option<Style>,
        max_width: u16,
    ) {
        if y < self.area.height && x < self.area.width && max_width > 0 {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // calendar's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width).min(max_width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}
