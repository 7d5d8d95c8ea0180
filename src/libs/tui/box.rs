use {
    crate::libs::tui::theme::Theme,
    ratatui::{
        layout::Margin,
        prelude::*,
        text::Line,
        widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    },
};

#[derive(Clone)]
pub struct BoxProps {
    pub border_color: Color,
    pub title: String,
    /// Column width reserved for row labels.
    pub label_width: usize,
}

impl Default for BoxProps {
    fn default() -> Self {
        Self {
            border_color: Theme::polygon_dark().accent,
            title: "Details".into(),
            label_width: 12,
        }
    }
}

impl BoxProps {
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Rows needed to show `rows` inside a bordered box.
pub fn box_height(rows: usize) -> u16 {
    (rows as u16).saturating_add(2).max(3)
}

/// Labelled rows in a rounded box. An empty label continues the row above.
pub fn draw_box(f: &mut Frame, area: Rect, rows: &[(&str, String)], props: &BoxProps) {
    let theme = Theme::polygon_dark();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(props.border_color))
        .title(Span::styled(
            format!(" {} ", props.title),
            Style::default()
                .fg(props.border_color)
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(block, area);

    let inner = area.inner(Margin::new(1, 1));
    let lines: Vec<Line> = rows
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{:<width$}", label, width = props.label_width),
                    Style::default().fg(theme.muted),
                ),
                Span::styled(value.clone(), Style::default().fg(theme.fg)),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
