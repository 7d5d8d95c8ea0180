use {
    crate::libs::tui::theme::Theme,
    ratatui::{
        prelude::*,
        widgets::{Block, BorderType, Borders, Clear, Paragraph},
    },
};

/// A bordered button. Disabled buttons keep their label but lose the accent.
pub fn draw_button(f: &mut Frame, area: Rect, label: &str, hint: char, enabled: bool) {
    let theme = Theme::polygon_dark();
    f.render_widget(Clear, area);
    let (fg, border) = if enabled {
        (theme.fg, theme.accent)
    } else {
        (theme.accent_soft, theme.accent_soft)
    };
    let mut style = Style::default().fg(fg);
    if enabled {
        style = style.add_modifier(Modifier::BOLD);
    }
    let p = Paragraph::new(Line::from(vec![
        Span::styled(label, style),
        Span::styled(format!("  [{hint}]"), Style::default().fg(theme.accent_soft)),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(p, area);
}
