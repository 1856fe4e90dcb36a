//! 検索・置換モジュール

pub mod history;
pub mod regex;

pub use history::{History, HistoryCursor, SearchHistory};
pub use self::regex::{replace_match, seek_match};
