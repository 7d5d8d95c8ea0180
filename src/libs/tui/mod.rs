pub mod r#box;
pub mod button;
pub mod main_window;
pub mod modal;
pub mod status;
pub mod theme;
pub mod title;

pub use button::draw_button;
pub use main_window::draw_main_window;
pub use modal::{centered_rect, draw_modal};
pub use r#box::{box_height, draw_box, BoxProps};
pub use status::draw_status;
pub use theme::Theme;
pub use title::draw_title_bar;
