//! エラーハンドリングシステム
//!
//! xo 全体で使用される統一されたエラー型とユーティリティを定義
//! 境界外ナビゲーションと空クリップボードの貼り付けはエラーではなく無操作として扱う

use std::io::ErrorKind;
use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug)]
pub enum XoError {
    /// ファイル操作エラー
    #[error("File operation failed: {0}")]
    File(#[from] FileError),

    /// バッファ操作エラー
    #[error("Buffer operation failed: {0}")]
    Buffer(#[from] BufferError),

    /// 設定エラー
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// 検索エラー
    #[error("Search failed: {0}")]
    Search(#[from] SearchError),

    /// UI操作エラー
    #[error("UI operation failed: {0}")]
    Ui(#[from] UiError),
}

/// ファイル操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    #[error("May not open directory: {path}")]
    IsDirectory { path: String },

    #[error("Encoding error at line {line}: {message}")]
    Encoding { line: usize, message: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

impl FileError {
    /// `std::io::Error` をパス情報付きで分類
    pub fn from_io(error: &std::io::Error, path: &std::path::Path) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            ErrorKind::NotFound => FileError::NotFound { path },
            ErrorKind::PermissionDenied => FileError::PermissionDenied { path },
            _ => FileError::Io {
                message: format!("{}: {}", path, error),
            },
        }
    }
}

/// バッファ操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// 未読行を飛ばす位置が要求された
    #[error("Line {requested} requested out of sequence ({materialized} lines read)")]
    SequenceViolation { requested: usize, materialized: usize },

    /// 行・列の指定を解釈できない
    #[error("Invalid line and column: {input}")]
    InvalidPosition { input: String },
}

/// 設定固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration file {path}: {message}")]
    InvalidFile { path: String, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// 検索固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Invalid regular expression: {0}")]
    InvalidPattern(String),

    #[error("No regular expression has been set")]
    NoQuery,

    #[error("No substitution has been set")]
    NoReplacement,
}

/// UI操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    #[error("Terminal initialization failed: {0}")]
    TerminalInit(String),

    #[error("Rendering failed: {component}")]
    RenderingFailed { component: String },
}

/// エラーレベル分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLevel {
    Warning,
    Error,
    Fatal,
}

impl XoError {
    /// エラーの深刻度
    pub fn level(&self) -> ErrorLevel {
        match self {
            XoError::Search(_) => ErrorLevel::Warning,
            XoError::Ui(UiError::TerminalInit(_)) => ErrorLevel::Fatal,
            _ => ErrorLevel::Error,
        }
    }

    /// ステータスバー表示用の短い文言
    pub fn status_message(&self) -> &'static str {
        match self {
            XoError::Search(SearchError::InvalidPattern(_)) => "re fail",
            XoError::Search(SearchError::NoQuery) => "no re",
            XoError::Search(SearchError::NoReplacement) => "no sub",
            XoError::File(FileError::NotFound { .. }) => "no file",
            XoError::File(FileError::IsDirectory { .. }) => "is dir!",
            XoError::File(FileError::PermissionDenied { .. }) => "denied",
            XoError::File(FileError::Encoding { .. }) => "bad enc",
            XoError::File(_) => "io fail",
            XoError::Buffer(_) => "bad pos",
            XoError::Config(_) => "bad cfg",
            XoError::Ui(_) => "ui fail",
        }
    }
}

/// パニックハンドラの設定
///
/// 端末を復元してから位置とメッセージを出力し、即座に終了する
pub fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(std::io::stderr(), crossterm::terminal::LeaveAlternateScreen);

        let (file, line) = panic_info
            .location()
            .map(|location| (location.file(), location.line()))
            .unwrap_or(("<unknown>", 0));

        let payload = panic_info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("Unknown panic payload");

        log::error!("panic at {}:{}: {}", file, line, message);
        eprintln!("PANIC at {}:{}: {}", file, line, message);
        eprintln!("Stack trace: {}", std::backtrace::Backtrace::capture());

        std::process::exit(1);
    }));
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, XoError>;

// std::io::Error から XoError への変換
impl From<std::io::Error> for XoError {
    fn from(error: std::io::Error) -> Self {
        let file_error = match error.kind() {
            ErrorKind::InvalidData => FileError::Encoding {
                line: 0,
                message: error.to_string(),
            },
            _ => FileError::Io {
                message: error.to_string(),
            },
        };
        XoError::File(file_error)
    }
}

// regex::Error から XoError への変換
impl From<regex::Error> for XoError {
    fn from(error: regex::Error) -> Self {
        XoError::Search(SearchError::InvalidPattern(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn io_not_found_is_classified_with_path() {
        let io = std::io::Error::new(ErrorKind::NotFound, "gone");
        let error = FileError::from_io(&io, Path::new("missing.txt"));
        assert_eq!(
            error,
            FileError::NotFound {
                path: "missing.txt".to_string()
            }
        );
    }

    #[test]
    fn regex_error_becomes_search_warning() {
        let regex_error = regex::Regex::new("(").unwrap_err();
        let error: XoError = regex_error.into();
        assert_eq!(error.level(), ErrorLevel::Warning);
        assert_eq!(error.status_message(), "re fail");
    }

    #[test]
    fn sequence_violation_message_names_positions() {
        let error = XoError::from(BufferError::SequenceViolation {
            requested: 7,
            materialized: 3,
        });
        assert!(error.to_string().contains("Line 7"));
        assert_eq!(error.level(), ErrorLevel::Error);
    }
}
