use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Paragraph, Widget},
};

/// Key bindings and what they do, in display order
static COMMANDS: &[(&str, &str)] = &[
    ("h, LEFT", "Previous month"),
    ("l, RIGHT", "Next month"),
    ("0, HOME", "Jump to this month"),
    ("?", "Show this help"),
    ("q, ESC", "Quit"),
];

static FOOTER: &str = "Press the Any Key to dismiss.";

/// Columns between the widest key list and the descriptions
const KEY_GUTTER: usize = 4;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Help {
    fn text() -> Text<'static> {
        let key_width = COMMANDS.iter().map(|(k, _)| k.len()).max().unwrap_or(0) + KEY_GUTTER;
        let mut lines = COMMANDS
            .iter()
            .map(|(keys, what)| Line::raw(format!("{keys:key_width$}{what}")))
            .collect::<Vec<_>>();
        lines.push(Line::default());
        lines.push(Line::raw(FOOTER));
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Help::text();
        // Borders on all sides, plus a column of padding left and right
        let width = fit(text.width(), 4, area.width);
        let height = fit(text.height(), 2, area.height);
        let popup = centered(area, width, height);
        Clear.render(popup, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Keys ")
                    .title_alignment(Alignment::Center)
                    .padding(Padding::horizontal(1)),
            )
            .style(self.0)
            .render(popup, buf);
    }
}

fn fit(len: usize, chrome: u16, room: u16) -> u16 {
    u16::try_from(len)
        .unwrap_or(u16::MAX)
        .saturating_add(chrome)
        .min(room)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([height]).flex(Flex::Center).areas(area);
    let [popup] = Layout::horizontal([width]).flex(Flex::Center).areas(row);
    popup
}
