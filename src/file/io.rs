//! ファイルI/O操作
//!
//! 保存時の上書き、挿入用ファイルの読み込み、新規ファイルの作成

use crate::error::{FileError, Result};
use std::fs::{self, OpenOptions};
use std::path::Path;

/// 内容でファイルをその場で上書きする（バックアップや一時ファイルは作らない）
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content.as_bytes()).map_err(|err| {
        log::warn!("write to {} failed: {}", path.display(), err);
        FileError::from_io(&err, path)
    })?;
    Ok(())
}

/// 挿入用にファイル全体を行単位で読む
///
/// 各行から改行を 1 つ取り除く。末尾が改行で終わる場合に空の最終行は作らない。
pub fn read_raw_lines(path: &Path) -> Result<Vec<String>> {
    ensure_regular_file(path)?;
    let content = fs::read_to_string(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::InvalidData => FileError::Encoding {
            line: 0,
            message: err.to_string(),
        },
        _ => FileError::from_io(&err, path),
    })?;
    Ok(content.split_terminator('\n').map(str::to_string).collect())
}

/// ファイルが存在しなければ空で作成する
pub fn touch(path: &Path) -> Result<()> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| FileError::from_io(&err, path))?;
    Ok(())
}

/// 編集対象として開けるファイルかを確認する
pub fn ensure_regular_file(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Err(FileError::IsDirectory {
            path: path.display().to_string(),
        }
        .into());
    }
    if !path.exists() {
        return Err(FileError::NotFound {
            path: path.display().to_string(),
        }
        .into());
    }
    Ok(())
}
