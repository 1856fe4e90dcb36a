//! フッターの入力プロンプト
//!
//! 1 行の入力欄。確定するとプロンプトの種類に応じたコマンドになる。
//! 正規表現と置換文字列のプロンプトでは上下キーで履歴を呼び出せる。

use super::keybinding::{Key, KeyCode};
use crate::editor::Command;
use crate::file::{common_prefix, complete_path};
use crate::search::history::{History, HistoryCursor, SearchHistory};

/// プロンプトの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Goto,
    Query,
    Replacement,
    InsertFile,
}

impl PromptKind {
    pub fn caption(self) -> &'static str {
        match self {
            PromptKind::Goto => "line & col: ",
            PromptKind::Query => "re: ",
            PromptKind::Replacement => "sub: ",
            PromptKind::InsertFile => "read in file: ",
        }
    }

    fn history(self, history: &SearchHistory) -> Option<&History> {
        match self {
            PromptKind::Query => Some(&history.queries),
            PromptKind::Replacement => Some(&history.replacements),
            PromptKind::Goto | PromptKind::InsertFile => None,
        }
    }
}

/// キー処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// 入力継続中
    Pending,
    /// 確定した
    Submit(Command),
    /// キャンセルされた
    Cancel,
}

/// 入力中のプロンプト
#[derive(Debug, Clone)]
pub struct Prompt {
    kind: PromptKind,
    text: String,
    /// 文字単位の入力位置
    cursor: usize,
    history_cursor: Option<HistoryCursor>,
    /// 補完候補の一覧（複数候補のときだけ）
    hint: Option<String>,
}

impl Prompt {
    pub fn new(kind: PromptKind, history: &SearchHistory) -> Self {
        Self {
            kind,
            text: String::new(),
            cursor: 0,
            history_cursor: kind.history(history).map(HistoryCursor::new),
            hint: None,
        }
    }

    pub fn kind(&self) -> PromptKind {
        self.kind
    }

    pub fn caption(&self) -> &'static str {
        self.kind.caption()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// 入力内容に対応するコマンド
    pub fn command(&self) -> Command {
        let text = self.text.clone();
        match self.kind {
            PromptKind::Goto => Command::Goto(text),
            PromptKind::Query => Command::Query(text),
            PromptKind::Replacement => Command::Replacement(text),
            PromptKind::InsertFile => Command::InsertFile(text),
        }
    }

    pub fn handle_key(&mut self, key: &Key, history: &SearchHistory) -> PromptOutcome {
        if let Some(ch) = key.printable() {
            self.insert(ch);
            return PromptOutcome::Pending;
        }
        if key.modifiers.ctrl || key.modifiers.alt {
            return PromptOutcome::Pending;
        }

        match key.code {
            KeyCode::Enter => return PromptOutcome::Submit(self.command()),
            KeyCode::Esc => return PromptOutcome::Cancel,
            KeyCode::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                let index = self.byte_index(self.cursor);
                self.text.remove(index);
            }
            KeyCode::Delete if self.cursor < self.text.chars().count() => {
                let index = self.byte_index(self.cursor);
                self.text.remove(index);
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.text.chars().count()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.text.chars().count(),
            KeyCode::Up => self.recall_older(history),
            KeyCode::Down => self.recall_newer(history),
            KeyCode::Tab if self.kind == PromptKind::InsertFile => self.complete(),
            _ => {}
        }
        PromptOutcome::Pending
    }

    fn insert(&mut self, ch: char) {
        let index = self.byte_index(self.cursor);
        self.text.insert(index, ch);
        self.cursor += 1;
    }

    fn byte_index(&self, offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(offset)
            .map_or(self.text.len(), |(index, _)| index)
    }

    fn replace_text(&mut self, text: String) {
        self.cursor = text.chars().count();
        self.text = text;
    }

    fn recall_older(&mut self, history: &SearchHistory) {
        let (Some(entries), Some(cursor)) = (self.kind.history(history), self.history_cursor.as_mut()) else {
            return;
        };
        if let Some(text) = cursor.older(entries, &self.text) {
            self.replace_text(text);
        }
    }

    fn recall_newer(&mut self, history: &SearchHistory) {
        let (Some(entries), Some(cursor)) = (self.kind.history(history), self.history_cursor.as_mut()) else {
            return;
        };
        if let Some(text) = cursor.newer(entries) {
            self.replace_text(text);
        }
    }

    /// 共通接頭辞まで補完し、候補が複数なら一覧をヒントに出す
    fn complete(&mut self) {
        let candidates = complete_path(&self.text);
        let prefix = common_prefix(&candidates);
        if prefix.chars().count() > self.text.chars().count() {
            self.replace_text(prefix);
        }

        self.hint = if candidates.len() > 1 {
            Some(candidates.join(" "))
        } else {
            None
        };
    }
}
