use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const RESTART_LABEL: &str = "[ F5 restart ]";
pub const RETRY_LABEL: &str = "[ Try again ]";

pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub footer: Rect,
    pub restart_button: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        let footer = vertical[2];
        let button_width = (RESTART_LABEL.chars().count() as u16).min(footer.width);
        let restart_button = Rect::new(
            footer.x + footer.width - button_width,
            footer.y,
            button_width,
            footer.height,
        );

        Self {
            header: vertical[0],
            main: vertical[1],
            footer,
            restart_button,
        }
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 40;
    const MIN_POPUP_HEIGHT: u16 = 11;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

/// Area of the results overlay within the whole screen.
pub fn results_rect(area: Rect) -> Rect {
    centered_rect(40, 40, area)
}

/// Position of the retry button inside the results overlay: centred on the
/// second-to-last inner row.
pub fn retry_button(overlay: Rect) -> Rect {
    let inner_height = overlay.height.saturating_sub(2);
    let inner_width = overlay.width.saturating_sub(2);
    let width = (RETRY_LABEL.chars().count() as u16).min(inner_width);
    let row = overlay.y + 1 + inner_height.saturating_sub(2);
    let left = overlay.x + 1 + (inner_width - width) / 2;
    Rect::new(left, row, width, inner_height.min(1))
}
