//! 遅延行ソース
//!
//! 前方のみに読み進めるストリームから 1 回の呼び出しにつき 1 行を取り出す。
//! 改行で終わらない行（データなしを含む）を返した時点でソースは閉じられ、
//! 以後は常に `None` を返す。読み取りに失敗した場合はその行を飛ばさず、
//! 以後の呼び出しでも同じエラーを返し続ける。

use crate::buffer::tabs::expand_tabs;
use crate::error::{FileError, Result, XoError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const LINE_TERMINATOR: u8 = b'\n';

/// ソースから読んだ 1 行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// 改行を除いた元の文字列（タブはそのまま）
    pub original: String,
    /// タブ展開済みの表示用文字列
    pub display: String,
    /// 改行で終わっていたか
    pub terminated: bool,
}

/// 前方専用の行リーダー
#[derive(Debug)]
pub struct LazyLineSource<R> {
    reader: Option<R>,
    /// 読み取りに失敗した行のエラー
    failure: Option<FileError>,
    tab_size: usize,
    lines_read: usize,
}

impl LazyLineSource<BufReader<File>> {
    /// ファイルを開いてソースを作成
    pub fn open(path: &Path, tab_size: usize) -> Result<Self> {
        if path.is_dir() {
            return Err(FileError::IsDirectory {
                path: path.display().to_string(),
            }
            .into());
        }
        let file = File::open(path).map_err(|err| FileError::from_io(&err, path))?;
        Ok(Self::new(BufReader::new(file), tab_size))
    }
}

impl<R: BufRead> LazyLineSource<R> {
    pub fn new(reader: R, tab_size: usize) -> Self {
        Self {
            reader: Some(reader),
            failure: None,
            tab_size,
            lines_read: 0,
        }
    }

    /// 最後まで正常に読み切って閉じたか
    pub fn is_exhausted(&self) -> bool {
        self.reader.is_none() && self.failure.is_none()
    }

    /// 読み取りに失敗していればそのエラー
    pub fn failure(&self) -> Option<&FileError> {
        self.failure.as_ref()
    }

    /// これまでに読んだ行数
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// 次の 1 行を読む。閉じた後は `None`、失敗した後は同じエラー
    pub fn read_next_line(&mut self) -> Result<Option<RawLine>> {
        if let Some(failure) = &self.failure {
            return Err(failure.clone().into());
        }
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };

        let line_number = self.lines_read + 1;
        let mut bytes = Vec::new();
        if let Err(err) = reader.read_until(LINE_TERMINATOR, &mut bytes) {
            return Err(self.fail(FileError::Io {
                message: format!("line {}: {}", line_number, err),
            }));
        }

        let terminated = bytes.last() == Some(&LINE_TERMINATOR);
        if terminated {
            bytes.pop();
        }

        let original = match String::from_utf8(bytes) {
            Ok(original) => original,
            Err(err) => {
                return Err(self.fail(FileError::Encoding {
                    line: line_number,
                    message: err.to_string(),
                }))
            }
        };

        self.lines_read = line_number;
        if !terminated {
            log::debug!("source closed after {} lines", self.lines_read);
            self.reader = None;
        }

        let display = expand_tabs(&original, self.tab_size);
        Ok(Some(RawLine {
            original,
            display,
            terminated,
        }))
    }

    /// 失敗を記録してソースを止める
    fn fail(&mut self, error: FileError) -> XoError {
        log::warn!("reading stopped before line {}: {}", self.lines_read + 1, error);
        self.reader = None;
        self.failure = Some(error.clone());
        error.into()
    }
}
