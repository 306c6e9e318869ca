use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use crate::session::result::SessionResult;
use crate::ui::layout::{RETRY_LABEL, retry_button};
use crate::ui::theme::Theme;

/// The modal shown when the countdown runs out.
pub struct ResultsOverlay<'a> {
    result: &'a SessionResult,
    theme: &'a Theme,
}

impl<'a> ResultsOverlay<'a> {
    pub fn new(result: &'a SessionResult, theme: &'a Theme) -> Self {
        Self { result, theme }
    }
}

impl Widget for ResultsOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        Clear.render(area, buf);
        let block = Block::bordered()
            .title(" Test Complete! ")
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let acc_color = if self.result.accuracy >= 95 {
            colors.success()
        } else if self.result.accuracy >= 85 {
            colors.warning()
        } else {
            colors.error()
        };

        let stat = |label: &'static str, value: String, color: Color| {
            Line::from(vec![
                Span::styled(label, Style::default().fg(colors.fg())),
                Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            ])
        };

        stat("  WPM:      ", self.result.wpm.to_string(), colors.accent())
            .render(rows[1], buf);
        stat("  Accuracy: ", format!("{}%", self.result.accuracy), acc_color)
            .render(rows[2], buf);
        stat("  Words:    ", self.result.correct_words.to_string(), colors.fg())
            .render(rows[3], buf);
        Line::from(Span::styled(
            format!(
                "  {}/{} chars correct in {}s",
                self.result.correct_chars, self.result.attempted_chars, self.result.time_limit_secs
            ),
            Style::default().fg(colors.text_pending()),
        ))
        .render(rows[4], buf);

        let button = retry_button(area);
        Paragraph::new(Span::styled(
            RETRY_LABEL,
            Style::default()
                .fg(colors.text_cursor_fg())
                .bg(colors.accent())
                .add_modifier(Modifier::BOLD),
        ))
        .render(button, buf);

        let help_row = Rect::new(inner.x, inner.bottom().saturating_sub(1), inner.width, 1);
        if help_row.y > button.y {
            Paragraph::new(Line::from(Span::styled(
                "[Enter] Try again  [Esc] Close",
                Style::default().fg(colors.text_pending()),
            )))
            .alignment(Alignment::Center)
            .render(help_row, buf);
        }
    }
}
