use {
    crate::libs::tui::theme::Theme,
    ratatui::{
        prelude::*,
        text::{Line, Span},
        widgets::{Block, Paragraph},
    },
};

pub fn draw_title_bar(f: &mut Frame, area: Rect, app_name: &str, headline: &str, keys: &str) {
    let theme = Theme::polygon_dark();
    let bar = Rect {
        height: area.height.min(3),
        ..area
    };
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(app_name.chars().count() as u16 + 4),
            Constraint::Min(10),
            Constraint::Length(keys.chars().count() as u16 + 2),
        ])
        .split(bar);

    let name = Paragraph::new(Span::styled(
        format!(" {} ", app_name),
        Style::default()
            .fg(theme.fg)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    let mid = Paragraph::new(Line::from(Span::styled(
        headline,
        Style::default().fg(theme.muted),
    )))
    .alignment(Alignment::Center);
    let right = Paragraph::new(Span::styled(
        keys,
        Style::default()
            .fg(theme.accent_soft)
            .add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Right);

    f.render_widget(Block::new().style(Style::default().bg(theme.bg)), bar);
    f.render_widget(name, cols[0]);
    f.render_widget(mid, cols[1]);
    f.render_widget(right, cols[2]);
}
