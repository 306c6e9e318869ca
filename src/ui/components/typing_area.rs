use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::input::CharStatus;
use crate::session::state::SessionState;
use crate::ui::theme::{Theme, ThemeColors};

pub struct TypingArea<'a> {
    session: &'a SessionState,
    theme: &'a Theme,
}

impl<'a> TypingArea<'a> {
    pub fn new(session: &'a SessionState, theme: &'a Theme) -> Self {
        Self { session, theme }
    }
}

fn status_style(status: CharStatus, colors: &ThemeColors) -> Style {
    match status {
        CharStatus::Pending => Style::default().fg(colors.text_pending()),
        CharStatus::Active => Style::default()
            .fg(colors.text_cursor_fg())
            .bg(colors.text_cursor_bg()),
        CharStatus::Correct => Style::default().fg(colors.text_correct()),
        CharStatus::Incorrect => Style::default()
            .fg(colors.text_incorrect())
            .bg(colors.text_incorrect_bg())
            .add_modifier(Modifier::UNDERLINED),
    }
}

/// One span per character, styled by its status.
fn build_spans<'s>(session: &SessionState, colors: &ThemeColors) -> Vec<Span<'s>> {
    session
        .text
        .iter()
        .zip(&session.statuses)
        .map(|(&ch, &status)| Span::styled(ch.to_string(), status_style(status, colors)))
        .collect()
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let line = Line::from(build_spans(self.session, colors));

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        let paragraph = Paragraph::new(line)
            .block(block)
            .wrap(Wrap { trim: false });

        paragraph.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::input::process_char;

    #[test]
    fn spans_follow_statuses() {
        let theme = Theme::default();
        let mut session = SessionState::new("abc", 30);
        process_char(&mut session, 'a');
        process_char(&mut session, 'x');

        let spans = build_spans(&session, &theme.colors);
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].content, "a");
        assert_eq!(spans[0].style, status_style(CharStatus::Correct, &theme.colors));
        // the expected character stays visible even when mistyped
        assert_eq!(spans[1].content, "b");
        assert_eq!(spans[1].style, status_style(CharStatus::Incorrect, &theme.colors));
        assert_eq!(spans[2].style, status_style(CharStatus::Active, &theme.colors));
    }

    #[test]
    fn four_statuses_render_distinctly() {
        let colors = Theme::default().colors;
        let styles = [
            status_style(CharStatus::Pending, &colors),
            status_style(CharStatus::Active, &colors),
            status_style(CharStatus::Correct, &colors),
            status_style(CharStatus::Incorrect, &colors),
        ];
        for i in 0..styles.len() {
            for j in (i + 1)..styles.len() {
                assert_ne!(styles[i], styles[j]);
            }
        }
    }
}
