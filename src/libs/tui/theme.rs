use ratatui::prelude::*;

#[derive(Clone, Debug)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub accent_soft: Color,
    pub good: Color,
    pub bad: Color,
    pub pending: Color,
    pub muted: Color,
}

impl Theme {
    pub fn polygon_dark() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            accent: Color::Rgb(130, 71, 229),
            accent_soft: Color::DarkGray,
            good: Color::Green,
            bad: Color::Red,
            pending: Color::Yellow,
            muted: Color::Gray,
        }
    }
}
