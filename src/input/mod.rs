//! 入力処理モジュール
//!
//! キーバインドとフッタープロンプトの入力処理を提供

pub mod keybinding;
pub mod prompt;

// 公開API
pub use keybinding::{Action, Key, KeyCode, KeyMap, KeyModifiers, KeyProcessResult};
pub use prompt::{Prompt, PromptKind, PromptOutcome};
