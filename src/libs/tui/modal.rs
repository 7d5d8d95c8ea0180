use {
    crate::libs::tui::theme::Theme,
    ratatui::{
        prelude::*,
        widgets::{Block, BorderType, Borders, Clear, Paragraph},
    },
};

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1]);

    horiz[1]
}

pub fn draw_modal(f: &mut Frame, area: Rect, title: &str, lines: &[String]) {
    let theme = Theme::polygon_dark();
    let content: Vec<Line> = lines
        .iter()
        .map(|s| Line::from(Span::styled(s.as_str(), Style::default().fg(theme.fg))))
        .collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(title, Style::default().fg(theme.accent)));
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(content)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}
