mod app;
mod theme;
mod views;

pub use app::SiteboardApp;
pub use theme::{setup_fonts, setup_theme};
