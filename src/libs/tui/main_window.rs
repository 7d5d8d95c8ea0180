use {
    crate::libs::tui::theme::Theme,
    ratatui::{
        prelude::*,
        widgets::{Block, BorderType, Borders},
    },
};

pub fn draw_main_window(f: &mut Frame, area: Rect) {
    let theme = Theme::polygon_dark();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent_soft))
        .style(Style::default().bg(theme.bg).fg(theme.fg));
    f.render_widget(block, area);
}
