//! ファイル操作モジュール
//!
//! - 保存は元ファイルの上書き（バックアップ・サイドカーなし）
//! - 新規ファイルは起動時に空で作成
//! - ディレクトリは開けない

pub mod completion;
pub mod io;
pub mod path;

pub use completion::{common_prefix, complete_path};
pub use io::{ensure_regular_file, read_raw_lines, touch, write_file};
pub use path::{expand_path, parse_location, FileLocation};
