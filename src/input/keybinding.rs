//! キーバインドシステム
//!
//! crossterm のキーイベントを内部表現に変換し、本文編集中のアクションへ対応付ける

use super::prompt::PromptKind;
use crate::buffer::WordKind;
use crate::editor::Command;
use crossterm::event::{KeyCode as CrosstermKeyCode, KeyEvent, KeyModifiers as CrosstermModifiers};
use std::collections::HashMap;

/// キー入力の内部表現
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    /// 修飾キー
    pub modifiers: KeyModifiers,
    /// 基本キー
    pub code: KeyCode,
}

/// 修飾キーの組み合わせ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub alt: bool,
}

/// 基本キーコード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Esc,
    Unknown,
}

impl Key {
    pub fn plain(code: KeyCode) -> Self {
        Self {
            modifiers: KeyModifiers::default(),
            code,
        }
    }

    pub fn ctrl(ch: char) -> Self {
        Self::ctrl_code(KeyCode::Char(ch))
    }

    pub fn alt(ch: char) -> Self {
        Self::alt_code(KeyCode::Char(ch))
    }

    pub fn ctrl_code(code: KeyCode) -> Self {
        Self {
            modifiers: KeyModifiers { ctrl: true, alt: false },
            code,
        }
    }

    pub fn alt_code(code: KeyCode) -> Self {
        Self {
            modifiers: KeyModifiers { ctrl: false, alt: true },
            code,
        }
    }

    /// 修飾なしの文字キーなら文字を返す
    pub fn printable(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(ch) if !self.modifiers.ctrl && !self.modifiers.alt => Some(ch),
            _ => None,
        }
    }
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        let modifiers = KeyModifiers {
            ctrl: event.modifiers.contains(CrosstermModifiers::CONTROL),
            alt: event.modifiers.contains(CrosstermModifiers::ALT),
        };

        let code = match event.code {
            CrosstermKeyCode::Char(c) => KeyCode::Char(c),
            CrosstermKeyCode::Enter => KeyCode::Enter,
            CrosstermKeyCode::Backspace => KeyCode::Backspace,
            CrosstermKeyCode::Delete => KeyCode::Delete,
            CrosstermKeyCode::Tab => KeyCode::Tab,
            CrosstermKeyCode::Up => KeyCode::Up,
            CrosstermKeyCode::Down => KeyCode::Down,
            CrosstermKeyCode::Left => KeyCode::Left,
            CrosstermKeyCode::Right => KeyCode::Right,
            CrosstermKeyCode::Home => KeyCode::Home,
            CrosstermKeyCode::End => KeyCode::End,
            CrosstermKeyCode::PageUp => KeyCode::PageUp,
            CrosstermKeyCode::PageDown => KeyCode::PageDown,
            CrosstermKeyCode::Esc => KeyCode::Esc,
            _ => KeyCode::Unknown,
        };

        Key { modifiers, code }
    }
}

/// キーに対応するアクション
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// セッションへそのまま渡すコマンド
    Command(Command),
    /// フッターに入力プロンプトを開く
    OpenPrompt(PromptKind),
    /// 画面 1 枚分の上下移動（負なら上へ）
    Page(isize),
    /// ヘルプの表示切り替え、またはプロンプトを閉じる
    ToggleHelp,
}

/// キー処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyProcessResult {
    /// アクション実行
    Action(Action),
    /// マッチなし（無視）
    NoMatch,
}

/// 本文編集中のキーマップ
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: HashMap<Key, Action>,
}

impl KeyMap {
    pub fn new() -> Self {
        let mut bindings = HashMap::with_capacity(32);
        let mut bind = |key: Key, action: Action| {
            bindings.insert(key, action);
        };
        let command = Action::Command;

        bind(Key::ctrl('o'), command(Command::Save));
        bind(Key::ctrl('x'), command(Command::Quit));
        bind(Key::ctrl('k'), command(Command::Cut));
        bind(Key::ctrl('u'), command(Command::Paste));
        bind(Key::ctrl('t'), command(Command::ClearClipboard));
        bind(Key::alt('w'), command(Command::Seek));
        bind(Key::alt('r'), command(Command::Replace));

        bind(Key::ctrl('y'), Action::OpenPrompt(PromptKind::Goto));
        bind(Key::ctrl('w'), Action::OpenPrompt(PromptKind::Query));
        bind(Key::ctrl('r'), Action::OpenPrompt(PromptKind::Replacement));
        bind(Key::ctrl('f'), Action::OpenPrompt(PromptKind::InsertFile));
        bind(Key::plain(KeyCode::Esc), Action::ToggleHelp);

        bind(Key::plain(KeyCode::Enter), command(Command::Split));
        bind(Key::plain(KeyCode::Backspace), command(Command::Backspace));
        bind(Key::plain(KeyCode::Delete), command(Command::Delete));
        bind(Key::plain(KeyCode::Tab), command(Command::Tab));
        bind(Key::plain(KeyCode::Up), command(Command::Navigate(-1)));
        bind(Key::plain(KeyCode::Down), command(Command::Navigate(1)));
        bind(Key::plain(KeyCode::Left), command(Command::Left));
        bind(Key::plain(KeyCode::Right), command(Command::Right));
        bind(Key::plain(KeyCode::Home), command(Command::Home));
        bind(Key::plain(KeyCode::End), command(Command::End));
        bind(Key::plain(KeyCode::PageUp), Action::Page(-1));
        bind(Key::plain(KeyCode::PageDown), Action::Page(1));

        bind(Key::ctrl_code(KeyCode::Left), command(Command::WordLeft(WordKind::Word)));
        bind(Key::alt_code(KeyCode::Left), command(Command::WordLeft(WordKind::NonWord)));
        bind(Key::ctrl_code(KeyCode::Right), command(Command::WordRight(WordKind::NonWord)));
        bind(Key::alt_code(KeyCode::Right), command(Command::WordRight(WordKind::Word)));

        Self { bindings }
    }

    pub fn process_key(&self, key: &Key) -> KeyProcessResult {
        if key.code == KeyCode::Unknown {
            return KeyProcessResult::NoMatch;
        }

        if let Some(action) = self.bindings.get(key) {
            return KeyProcessResult::Action(action.clone());
        }

        // 通常文字の場合は挿入
        match key.printable() {
            Some(ch) => KeyProcessResult::Action(Action::Command(Command::Insert(ch.to_string()))),
            None => KeyProcessResult::NoMatch,
        }
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(key: Key) -> Option<Action> {
        match KeyMap::new().process_key(&key) {
            KeyProcessResult::Action(action) => Some(action),
            KeyProcessResult::NoMatch => None,
        }
    }

    #[test]
    fn converts_crossterm_events() {
        let event = KeyEvent::new(CrosstermKeyCode::Char('o'), CrosstermModifiers::CONTROL);
        assert_eq!(Key::from(event), Key::ctrl('o'));

        let event = KeyEvent::new(CrosstermKeyCode::Left, CrosstermModifiers::ALT);
        assert_eq!(Key::from(event), Key::alt_code(KeyCode::Left));
    }

    #[test]
    fn control_keys_map_to_commands() {
        assert_eq!(action(Key::ctrl('o')), Some(Action::Command(Command::Save)));
        assert_eq!(action(Key::ctrl('k')), Some(Action::Command(Command::Cut)));
        assert_eq!(
            action(Key::ctrl('w')),
            Some(Action::OpenPrompt(PromptKind::Query))
        );
        assert_eq!(action(Key::alt('r')), Some(Action::Command(Command::Replace)));
    }

    #[test]
    fn printable_characters_are_inserted() {
        assert_eq!(
            action(Key::plain(KeyCode::Char('é'))),
            Some(Action::Command(Command::Insert("é".to_string())))
        );
        assert_eq!(action(Key::ctrl('q')), None);
        assert_eq!(action(Key::plain(KeyCode::Unknown)), None);
    }

    #[test]
    fn word_jumps_differ_by_modifier() {
        assert_eq!(
            action(Key::ctrl_code(KeyCode::Left)),
            Some(Action::Command(Command::WordLeft(WordKind::Word)))
        );
        assert_eq!(
            action(Key::ctrl_code(KeyCode::Right)),
            Some(Action::Command(Command::WordRight(WordKind::NonWord)))
        );
    }
}
