use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::ui::layout::RESTART_LABEL;
use crate::ui::theme::Theme;

const HINTS: &str = " [Shift+Tab] restart  [F2] time  [F3] theme  [Esc] quit";

/// Key hints plus the clickable restart button at `button`.
pub struct Footer<'a> {
    theme: &'a Theme,
    button: Rect,
}

impl<'a> Footer<'a> {
    pub fn new(theme: &'a Theme, button: Rect) -> Self {
        Self { theme, button }
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        Paragraph::new(Line::from(Span::styled(
            HINTS,
            Style::default().fg(colors.text_pending()),
        )))
        .style(Style::default().bg(colors.bg()))
        .render(area, buf);

        Paragraph::new(Span::styled(
            RESTART_LABEL,
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        ))
        .render(self.button.intersection(area), buf);
    }
}
