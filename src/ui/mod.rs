//! UIモジュール
//!
//! ratatuiベースのターミナルUI機能

pub mod renderer;
pub mod theme;
pub mod viewport;

// 公開API
pub use renderer::{status_line, styled_line, Footer, Renderer, HELP_TEXT};
pub use theme::Theme;
pub use viewport::Viewport;
