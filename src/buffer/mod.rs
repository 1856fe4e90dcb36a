//! バッファ管理モジュール
//!
//! 行レコード、遅延行ソース、行バッファ、クリップボード、保存用の再構成を提供

pub mod change_notifier;
pub mod clipboard;
pub mod line;
pub mod line_buffer;
pub mod save;
pub mod source;
pub mod tabs;

// 公開API
pub use change_notifier::{ChangeEvent, ChangeListener, ChangeNotifier, ListenerId};
pub use clipboard::Clipboard;
pub use line::{LineRecord, WordKind};
pub use line_buffer::LineBuffer;
pub use save::saved_form;
pub use source::{LazyLineSource, RawLine};
pub use tabs::{expand_tabs, re_tab};
