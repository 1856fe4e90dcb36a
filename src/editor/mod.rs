//! エディタモジュール
//!
//! 名前付きコマンドと、それを行バッファに適用する編集セッション

pub mod command;
pub mod session;

// 公開API
pub use command::{Command, CommandResult};
pub use session::Session;
