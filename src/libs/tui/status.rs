use {
    crate::libs::tui::theme::Theme,
    ratatui::{
        prelude::*,
        widgets::{Block, Borders, Paragraph, Wrap},
    },
};

pub fn draw_status(f: &mut Frame, area: Rect, phase: &str, error: Option<&str>, ok: bool) {
    let theme = Theme::polygon_dark();
    let color = if ok { theme.good } else { theme.bad };
    let mut spans = vec![
        Span::styled("status: ", Style::default().fg(theme.muted)),
        Span::styled(phase, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ];
    if let Some(err) = error {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(err, Style::default().fg(theme.bad)));
    }
    let p = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(p, area);
}
