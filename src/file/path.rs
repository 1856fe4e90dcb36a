//! パス処理ユーティリティ
//!
//! コマンドライン引数の `path:line:col` 解析と `~` / 環境変数の展開

use crate::error::{FileError, Result};
use std::path::PathBuf;

/// 開く位置付きのファイル指定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLocation {
    pub path: PathBuf,
    /// 1 始まりの行
    pub line: usize,
    /// 1 始まりの列
    pub column: usize,
}

/// `path[:line[:col]]` を解析する
///
/// 末尾の数字（または空）の区切りだけを行・列として扱い、それ以外のコロンはパスの一部とみなす。
pub fn parse_location(arg: &str) -> FileLocation {
    let mut path = arg;
    let mut numbers = Vec::with_capacity(2);

    for _ in 0..2 {
        match path.rsplit_once(':') {
            Some((head, tail)) if !head.is_empty() && tail.chars().all(|ch| ch.is_ascii_digit()) => {
                numbers.push(tail);
                path = head;
            }
            _ => break,
        }
    }
    numbers.reverse();

    let number_at = |index: usize| {
        numbers
            .get(index)
            .and_then(|text| text.parse::<usize>().ok())
            .filter(|&value| value > 0)
            .unwrap_or(1)
    };

    FileLocation {
        path: PathBuf::from(path),
        line: number_at(0),
        column: number_at(1),
    }
}

/// `~` と `$VAR` を展開する
pub fn expand_path(input: &str) -> Result<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(FileError::InvalidPath {
            path: input.to_string(),
        }
        .into());
    }

    match shellexpand::full(trimmed) {
        Ok(expanded) => Ok(PathBuf::from(expanded.as_ref())),
        Err(err) => Err(FileError::InvalidPath {
            path: format!("{}: {}", trimmed, err),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_path_defaults_to_origin() {
        let location = parse_location("src/main.rs");
        assert_eq!(location.path, PathBuf::from("src/main.rs"));
        assert_eq!((location.line, location.column), (1, 1));
    }

    #[test]
    fn line_and_column_are_parsed() {
        let location = parse_location("path/to/xo.py:10:42");
        assert_eq!(location.path, PathBuf::from("path/to/xo.py"));
        assert_eq!((location.line, location.column), (10, 42));

        let location = parse_location("notes.txt:7");
        assert_eq!((location.line, location.column), (7, 1));
    }

    #[test]
    fn empty_numbers_fall_back_to_one() {
        let location = parse_location("a.txt::");
        assert_eq!(location.path, PathBuf::from("a.txt"));
        assert_eq!((location.line, location.column), (1, 1));
    }

    #[test]
    fn non_numeric_colons_stay_in_path() {
        let location = parse_location("c:notes.txt");
        assert_eq!(location.path, PathBuf::from("c:notes.txt"));

        let location = parse_location("a:b:3");
        assert_eq!(location.path, PathBuf::from("a:b"));
        assert_eq!(location.line, 3);
    }

    #[test]
    fn expands_environment_variables() {
        std::env::set_var("XO_TEST_DIR", "/tmp/xo");
        assert_eq!(
            expand_path("$XO_TEST_DIR/file.txt").unwrap(),
            PathBuf::from("/tmp/xo/file.txt")
        );
    }

    #[test]
    fn empty_input_is_invalid() {
        assert!(expand_path("  ").is_err());
    }
}
