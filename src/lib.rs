//! xo - lazy line-oriented terminal text editor
//!
//! 行は必要になった時点で 1 行ずつ読み込み、編集していない行は読み込んだ時のバイト列のまま保存する

// コアモジュール
pub mod config;
pub mod error;
pub mod frontend;
pub mod logging;

// データ層
pub mod buffer;
pub mod file;

// 編集層
pub mod editor;

// ロジック層
pub mod highlight;
pub mod input;
pub mod search;

// 表示層
pub mod ui;

// 公開API
pub use buffer::{LineBuffer, LineRecord};
pub use config::{EditorConfig, TabSetting};
pub use editor::{Command, CommandResult, Session};
pub use error::{Result, XoError};
pub use frontend::TuiApplication;
