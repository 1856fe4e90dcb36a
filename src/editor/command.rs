//! 名前付きコマンド
//!
//! キー入力とは独立したエディタ操作の表現。`name argument` 形式の文字列からも作れる。

use crate::buffer::WordKind;

/// エディタ操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 行単位の上下移動（負なら上へ）
    Navigate(isize),
    Split,
    JoinWithPrev,
    JoinWithNext,
    Cut,
    Paste,
    ClearClipboard,
    Save,
    /// `line[:col]` 形式の移動先
    Goto(String),
    /// 正規表現を設定して次のマッチへ
    Query(String),
    /// 置換文字列を設定して次のマッチを置換
    Replacement(String),
    /// 最新の正規表現で次のマッチへ
    Seek,
    /// 最新の正規表現と置換文字列で次のマッチを置換
    Replace,
    /// ファイルの内容をフォーカス位置に挿入
    InsertFile(String),
    Insert(String),
    Backspace,
    Delete,
    Tab,
    Home,
    End,
    Left,
    Right,
    WordLeft(WordKind),
    WordRight(WordKind),
    Quit,
}

impl Command {
    /// `name` または `name argument` から作成
    pub fn from_name(input: &str) -> Option<Self> {
        let (name, argument) = match input.split_once(' ') {
            Some((name, argument)) => (name, Some(argument)),
            None => (input, None),
        };

        let command = match (name, argument) {
            ("navigate", Some(delta)) => Command::Navigate(delta.trim().parse().ok()?),
            ("up", None) => Command::Navigate(-1),
            ("down", None) => Command::Navigate(1),
            ("split", None) => Command::Split,
            ("join-with-prev", None) => Command::JoinWithPrev,
            ("join-with-next", None) => Command::JoinWithNext,
            ("cut", None) => Command::Cut,
            ("paste", None) => Command::Paste,
            ("clear-clipboard", None) => Command::ClearClipboard,
            ("save", None) => Command::Save,
            ("goto", Some(position)) => Command::Goto(position.to_string()),
            ("query", Some(pattern)) => Command::Query(pattern.to_string()),
            ("replacement", Some(text)) => Command::Replacement(text.to_string()),
            ("seek", None) => Command::Seek,
            ("replace", None) => Command::Replace,
            ("insert-file", Some(path)) => Command::InsertFile(path.to_string()),
            ("insert", Some(text)) => Command::Insert(text.to_string()),
            ("backspace", None) => Command::Backspace,
            ("delete", None) => Command::Delete,
            ("tab", None) => Command::Tab,
            ("home", None) => Command::Home,
            ("end", None) => Command::End,
            ("left", None) => Command::Left,
            ("right", None) => Command::Right,
            ("word-left", None) => Command::WordLeft(WordKind::Word),
            ("word-right", None) => Command::WordRight(WordKind::Word),
            ("nonword-left", None) => Command::WordLeft(WordKind::NonWord),
            ("nonword-right", None) => Command::WordRight(WordKind::NonWord),
            ("quit", None) => Command::Quit,
            _ => return None,
        };
        Some(command)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Navigate(_) => "navigate",
            Command::Split => "split",
            Command::JoinWithPrev => "join-with-prev",
            Command::JoinWithNext => "join-with-next",
            Command::Cut => "cut",
            Command::Paste => "paste",
            Command::ClearClipboard => "clear-clipboard",
            Command::Save => "save",
            Command::Goto(_) => "goto",
            Command::Query(_) => "query",
            Command::Replacement(_) => "replacement",
            Command::Seek => "seek",
            Command::Replace => "replace",
            Command::InsertFile(_) => "insert-file",
            Command::Insert(_) => "insert",
            Command::Backspace => "backspace",
            Command::Delete => "delete",
            Command::Tab => "tab",
            Command::Home => "home",
            Command::End => "end",
            Command::Left => "left",
            Command::Right => "right",
            Command::WordLeft(WordKind::Word) => "word-left",
            Command::WordRight(WordKind::Word) => "word-right",
            Command::WordLeft(WordKind::NonWord) => "nonword-left",
            Command::WordRight(WordKind::NonWord) => "nonword-right",
            Command::Quit => "quit",
        }
    }
}

/// コマンド実行結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// ステータスバーに出す短い文言
    pub status: String,
    pub quit: bool,
}

impl CommandResult {
    pub const IDLE_STATUS: &'static str = "xo";

    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            quit: false,
        }
    }

    pub fn quit() -> Self {
        Self {
            status: Self::IDLE_STATUS.to_string(),
            quit: true,
        }
    }
}

impl Default for CommandResult {
    fn default() -> Self {
        Self::status(Self::IDLE_STATUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_with_arguments() {
        assert_eq!(Command::from_name("navigate -3"), Some(Command::Navigate(-3)));
        assert_eq!(Command::from_name("goto 10:4"), Some(Command::Goto("10:4".to_string())));
        assert_eq!(
            Command::from_name("insert two words"),
            Some(Command::Insert("two words".to_string()))
        );
        assert_eq!(Command::from_name("cut"), Some(Command::Cut));
    }

    #[test]
    fn rejects_unknown_or_malformed() {
        assert_eq!(Command::from_name("explode"), None);
        assert_eq!(Command::from_name("navigate"), None);
        assert_eq!(Command::from_name("navigate x"), None);
        assert_eq!(Command::from_name("cut now"), None);
    }

    #[test]
    fn names_parse_back() {
        for command in [
            Command::Split,
            Command::JoinWithPrev,
            Command::JoinWithNext,
            Command::Paste,
            Command::ClearClipboard,
            Command::Save,
            Command::Seek,
            Command::Replace,
            Command::WordLeft(WordKind::NonWord),
            Command::WordRight(WordKind::Word),
        ] {
            assert_eq!(Command::from_name(command.name()), Some(command.clone()));
        }
    }
}
