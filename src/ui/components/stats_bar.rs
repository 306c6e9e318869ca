use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::app::Readouts;
use crate::ui::theme::Theme;

/// Header row: live readouts on the left, the two selectors on the right.
pub struct StatsBar<'a> {
    readouts: &'a Readouts,
    time_limit_secs: u32,
    theme_name: &'a str,
    theme: &'a Theme,
}

impl<'a> StatsBar<'a> {
    pub fn new(
        readouts: &'a Readouts,
        time_limit_secs: u32,
        theme_name: &'a str,
        theme: &'a Theme,
    ) -> Self {
        Self {
            readouts,
            time_limit_secs,
            theme_name,
            theme,
        }
    }
}

fn readout_spans<'s>(label: &'s str, value: &'s str, theme: &Theme) -> [Span<'s>; 2] {
    let colors = &theme.colors;
    [
        Span::styled(label, Style::default().fg(colors.text_pending())),
        Span::styled(
            value,
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        ),
    ]
}

fn selector_spans<'s>(value: String, key_hint: &'s str, theme: &Theme) -> [Span<'s>; 2] {
    let colors = &theme.colors;
    [
        Span::styled(
            format!("\u{2039}{value}\u{203a}"),
            Style::default().fg(colors.header_fg()),
        ),
        Span::styled(key_hint, Style::default().fg(colors.accent_dim())),
    ]
}

impl Widget for StatsBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" keysprint ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.header_bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Length(34)])
            .split(inner);

        let mut left = Vec::with_capacity(8);
        left.push(Span::raw(" "));
        left.extend(readout_spans("WPM ", &self.readouts.wpm, self.theme));
        left.push(Span::raw("   "));
        left.extend(readout_spans("ACC ", &self.readouts.accuracy, self.theme));
        left.push(Span::raw("   "));
        left.extend(readout_spans("TIME ", &self.readouts.time, self.theme));
        Paragraph::new(Line::from(left)).render(halves[0], buf);

        let mut right = Vec::with_capacity(5);
        right.extend(selector_spans(
            format!("{}s", self.time_limit_secs),
            " [F2]",
            self.theme,
        ));
        right.push(Span::raw("  "));
        right.extend(selector_spans(
            self.theme_name.to_string(),
            " [F3]",
            self.theme,
        ));
        Paragraph::new(Line::from(right))
            .alignment(Alignment::Right)
            .render(halves[1], buf);
    }
}
