//! 編集セッション
//!
//! 1 つのファイルに結び付いた行バッファ、検索履歴、分類器をまとめ、名前付きコマンドを実行する。

use super::command::{Command, CommandResult};
use crate::buffer::{LineBuffer, LineRecord};
use crate::config::{EditorConfig, TabSetting};
use crate::error::{BufferError, ErrorLevel, Result, SearchError, XoError};
use crate::file::{expand_path, read_raw_lines};
use crate::highlight::{classifier_for_path, TokenClassifier};
use crate::search::history::SearchHistory;
use crate::search::{replace_match, seek_match};
use regex::Regex;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

fn position_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)(\D+)?(\d+)?").expect("static regex"))
}

/// `line[<区切り>col]` を 1 始まりの (行, 列) に解釈する
fn parse_position(input: &str) -> Option<(usize, usize)> {
    let captures = position_regex().captures(input)?;
    let line = captures.get(1)?.as_str().parse().ok()?;
    let column = captures
        .get(3)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(1);
    Some((line, column))
}

/// 編集セッション
pub struct Session {
    buffer: LineBuffer<BufReader<File>>,
    path: PathBuf,
    name: String,
    tabs: TabSetting,
    history: SearchHistory,
    classifier: Box<dyn TokenClassifier>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("path", &self.path)
            .field("tabs", &self.tabs)
            .field("lines_read", &self.buffer.len())
            .finish()
    }
}

impl Session {
    /// ファイルを開く。1 行目だけを読んで分類器を決める
    pub fn open(path: &Path, config: &EditorConfig) -> Result<Self> {
        let tabs = config.tab_setting_for(path);
        let mut buffer = LineBuffer::open(path, tabs)?;

        let first_line = buffer
            .get_at(0)?
            .map(|(line, _)| line.display_text().to_string())
            .unwrap_or_default();
        let classifier = classifier_for_path(path, &first_line);

        Ok(Self {
            buffer,
            path: path.to_path_buf(),
            name: path.display().to_string(),
            tabs,
            history: SearchHistory::with_limit(config.history_limit),
            classifier,
        })
    }

    pub fn buffer(&self) -> &LineBuffer<BufReader<File>> {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut LineBuffer<BufReader<File>> {
        &mut self.buffer
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tab_setting(&self) -> TabSetting {
        self.tabs
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    pub fn classifier(&self) -> &dyn TokenClassifier {
        self.classifier.as_ref()
    }

    /// `name:line:col`
    pub fn get_position_text(&self) -> String {
        let (line, column) = self.buffer.get_coords();
        format!("{}:{}:{}", self.name, line, column)
    }

    /// 表示範囲の行を取り込む
    pub fn materialize_view(&mut self, top: usize, height: usize) -> Result<()> {
        self.buffer.ensure_materialized(top.saturating_add(height))
    }

    /// コマンドを実行し、失敗はステータス文言に変換する
    pub fn run(&mut self, command: Command) -> CommandResult {
        let name = command.name();
        match self.execute(command) {
            Ok(result) => result,
            Err(err) => {
                match err.level() {
                    ErrorLevel::Warning => log::warn!("{} failed: {}", name, err),
                    ErrorLevel::Error | ErrorLevel::Fatal => log::error!("{} failed: {}", name, err),
                }
                CommandResult::from(err)
            }
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<CommandResult> {
        log::debug!("execute {}", command.name());
        match command {
            Command::Navigate(delta) => self.navigate(delta)?,
            Command::Split => self.split()?,
            Command::JoinWithPrev => {
                self.buffer.combine_focus_with_prev()?;
            }
            Command::JoinWithNext => {
                self.buffer.combine_focus_with_next()?;
            }
            Command::Cut => {
                self.buffer.cut_to_focus()?;
                return Ok(CommandResult::status("cut"));
            }
            Command::Paste => {
                self.buffer.paste_from_clipboard();
                return Ok(CommandResult::status("pasted"));
            }
            Command::ClearClipboard => {
                self.buffer.clear_clipboard();
                return Ok(CommandResult::status("cleared"));
            }
            Command::Save => {
                self.buffer.save_to(&self.path)?;
                return Ok(CommandResult::status("saved"));
            }
            Command::Goto(input) => {
                let (line, column) = parse_position(&input)
                    .ok_or(BufferError::InvalidPosition { input })?;
                self.buffer.goto(line, column)?;
            }
            Command::Query(pattern) => {
                let regex = Regex::new(&pattern)?;
                self.history.queries.push(pattern);
                return self.seek_with(&regex);
            }
            Command::Replacement(text) => {
                self.history.replacements.push(text);
                return self.replace_next();
            }
            Command::Seek => {
                let regex = self.current_query()?;
                return self.seek_with(&regex);
            }
            Command::Replace => return self.replace_next(),
            Command::InsertFile(input) => {
                let path = expand_path(&input)?;
                let raw_lines = read_raw_lines(&path)?;
                log::info!("inserting {} lines from {}", raw_lines.len(), path.display());
                self.buffer.insert_raw_lines(raw_lines);
            }
            Command::Insert(text) => self.edit_focused(|line| line.insert_text(&text))?,
            Command::Tab => {
                let size = self.tabs.size;
                self.edit_focused(|line| line.insert_tab(size))?;
            }
            Command::Backspace => self.backspace()?,
            Command::Delete => self.delete()?,
            Command::Home => self.edit_focused(LineRecord::smart_home)?,
            Command::End => self.edit_focused(LineRecord::move_end)?,
            Command::Left => self.left()?,
            Command::Right => self.right()?,
            Command::WordLeft(kind) => self.edit_focused(|line| line.word_left(kind))?,
            Command::WordRight(kind) => self.edit_focused(|line| line.word_right(kind))?,
            Command::Quit => return Ok(CommandResult::quit()),
        }
        Ok(CommandResult::default())
    }

    fn current_query(&self) -> Result<Regex> {
        let pattern = self.history.queries.latest().ok_or(SearchError::NoQuery)?;
        Ok(Regex::new(pattern)?)
    }

    fn seek_with(&mut self, regex: &Regex) -> Result<CommandResult> {
        match seek_match(&mut self.buffer, regex)? {
            Some(_) => Ok(CommandResult::default()),
            None => Ok(CommandResult::status("0 res.")),
        }
    }

    fn replace_next(&mut self) -> Result<CommandResult> {
        let regex = self.current_query()?;
        let replacement = self
            .history
            .replacements
            .latest()
            .ok_or(SearchError::NoReplacement)?
            .to_string();
        match replace_match(&mut self.buffer, &regex, &replacement)? {
            Some(_) => Ok(CommandResult::default()),
            None => Ok(CommandResult::status("0 res.")),
        }
    }

    /// 1 行ずつ移動する。端に達したらそこで止まり、列は行末でクランプされる
    fn navigate(&mut self, delta: isize) -> Result<()> {
        let column = self.cursor()?;
        let step: isize = if delta < 0 { -1 } else { 1 };

        for _ in 0..delta.unsigned_abs() {
            let target = self.focus_position() + step;
            if self.buffer.get_at(target)?.is_none() {
                break;
            }
            self.buffer.set_focus(target.unsigned_abs())?;
        }

        if let Some(line) = self.buffer.focused_line_mut()? {
            line.set_cursor(column);
        }
        Ok(())
    }

    /// 分割して新しい行の先頭へ
    fn split(&mut self) -> Result<()> {
        self.ensure_line()?;
        self.buffer.split_focus()?;
        let below = self.buffer.focus() + 1;
        self.buffer.set_focus(below)?;
        self.edit_focused(|line| line.set_cursor(0))
    }

    fn backspace(&mut self) -> Result<()> {
        if self.cursor()? == 0 {
            self.buffer.combine_focus_with_prev()?;
            return Ok(());
        }
        self.edit_focused(|line| {
            line.delete_before_cursor();
        })
    }

    fn delete(&mut self) -> Result<()> {
        let at_end = match self.buffer.focused_line()? {
            Some(line) => line.cursor_offset() >= line.len_chars(),
            None => return Ok(()),
        };
        if at_end {
            self.buffer.combine_focus_with_next()?;
            return Ok(());
        }
        self.edit_focused(|line| {
            line.delete_at_cursor();
        })
    }

    /// 行頭では前の行の末尾へ
    fn left(&mut self) -> Result<()> {
        let cursor = self.cursor()?;
        if cursor > 0 {
            return self.edit_focused(|line| line.set_cursor(cursor - 1));
        }

        let focus = self.buffer.focus();
        if focus > 0 {
            self.buffer.set_focus(focus - 1)?;
            self.edit_focused(LineRecord::move_end)?;
        }
        Ok(())
    }

    /// 行末では次の行の先頭へ
    fn right(&mut self) -> Result<()> {
        let at_end = match self.buffer.focused_line()? {
            Some(line) => line.cursor_offset() >= line.len_chars(),
            None => return Ok(()),
        };
        if !at_end {
            return self.edit_focused(|line| line.set_cursor(line.cursor_offset() + 1));
        }

        let below = self.focus_position() + 1;
        if self.buffer.get_at(below)?.is_some() {
            self.buffer.set_focus(below.unsigned_abs())?;
            self.edit_focused(|line| line.set_cursor(0))?;
        }
        Ok(())
    }

    fn focus_position(&self) -> isize {
        isize::try_from(self.buffer.focus()).unwrap_or(isize::MAX)
    }

    fn cursor(&mut self) -> Result<usize> {
        Ok(self
            .buffer
            .focused_line()?
            .map_or(0, LineRecord::cursor_offset))
    }

    /// 全行を切り取った後でも入力できるよう空行を 1 つ用意する
    fn ensure_line(&mut self) -> Result<()> {
        if self.buffer.focused_line()?.is_none() && self.buffer.is_empty() {
            self.buffer.insert_raw_lines(vec![String::new()]);
        }
        Ok(())
    }

    fn edit_focused<F>(&mut self, edit: F) -> Result<()>
    where
        F: FnOnce(&mut LineRecord),
    {
        self.ensure_line()?;
        if let Some(line) = self.buffer.focused_line_mut()? {
            edit(line);
        }
        Ok(())
    }
}

impl From<XoError> for CommandResult {
    fn from(error: XoError) -> Self {
        CommandResult::status(error.status_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_line_and_optional_column() {
        assert_eq!(parse_position("12"), Some((12, 1)));
        assert_eq!(parse_position("12:5"), Some((12, 5)));
        assert_eq!(parse_position(" 3 , 9 "), Some((3, 9)));
        assert_eq!(parse_position("end"), None);
    }
}
