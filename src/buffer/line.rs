//! 行レコード
//!
//! 1 行分の編集可能テキストと、ソースから読んだままの元テキスト、行内カーソル位置

use regex::Regex;
use std::sync::OnceLock;

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w+").expect("static regex"))
}

fn non_word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\W+").expect("static regex"))
}

/// 単語移動で使う区切りの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordKind {
    /// `\w+`
    Word,
    /// `\W+`
    NonWord,
}

impl WordKind {
    fn regex(self) -> &'static Regex {
        match self {
            WordKind::Word => word_regex(),
            WordKind::NonWord => non_word_regex(),
        }
    }
}

/// 1 行分の編集状態
///
/// `original_text` はソースから読み込んだ時点で確定し、以後変更されない。
/// 分割や貼り付けで生成された行は `original_text` が空文字列になる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    display_text: String,
    original_text: String,
    /// 行内の文字単位の位置
    cursor_offset: usize,
}

impl LineRecord {
    /// ソースから読み込んだ行を作成
    pub fn loaded(original_text: String, display_text: String) -> Self {
        Self {
            display_text,
            original_text,
            cursor_offset: 0,
        }
    }

    /// メモリ上の操作で生成した行を作成
    pub fn synthesized(display_text: String) -> Self {
        Self {
            display_text,
            original_text: String::new(),
            cursor_offset: 0,
        }
    }

    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    /// ソース由来の行かどうか
    pub fn is_synthesized(&self) -> bool {
        self.original_text.is_empty()
    }

    pub fn cursor_offset(&self) -> usize {
        self.cursor_offset
    }

    /// 表示テキストの文字数
    pub fn len_chars(&self) -> usize {
        self.display_text.chars().count()
    }

    /// カーソル位置を設定（行末でクランプ）
    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor_offset = offset.min(self.len_chars());
    }

    /// 表示テキストを置き換え、カーソルを範囲内に収める
    pub fn set_display_text(&mut self, text: String) {
        self.display_text = text;
        self.cursor_offset = self.cursor_offset.min(self.len_chars());
    }

    /// 末尾にテキストを追加
    pub fn append_text(&mut self, text: &str) {
        self.display_text.push_str(text);
    }

    /// 指定文字位置で表示テキストを切り、後半を返す
    pub fn truncate_at(&mut self, offset: usize) -> String {
        let byte_idx = self.byte_index(offset);
        let tail = self.display_text.split_off(byte_idx);
        self.cursor_offset = self.cursor_offset.min(self.len_chars());
        tail
    }

    /// 文字位置をバイト位置へ変換
    pub fn byte_index(&self, offset: usize) -> usize {
        self.display_text
            .char_indices()
            .nth(offset)
            .map_or(self.display_text.len(), |(idx, _)| idx)
    }

    /// バイト位置を文字位置へ変換
    pub fn char_offset(&self, byte_idx: usize) -> usize {
        let byte_idx = byte_idx.min(self.display_text.len());
        self.display_text[..byte_idx].chars().count()
    }

    /// カーソル位置にテキストを挿入し、カーソルを挿入分進める
    pub fn insert_text(&mut self, text: &str) {
        let byte_idx = self.byte_index(self.cursor_offset);
        self.display_text.insert_str(byte_idx, text);
        self.cursor_offset += text.chars().count();
    }

    /// カーソル直前の 1 文字を削除
    pub fn delete_before_cursor(&mut self) -> bool {
        if self.cursor_offset == 0 {
            return false;
        }
        let byte_idx = self.byte_index(self.cursor_offset - 1);
        self.display_text.remove(byte_idx);
        self.cursor_offset -= 1;
        true
    }

    /// カーソル位置の 1 文字を削除
    pub fn delete_at_cursor(&mut self) -> bool {
        if self.cursor_offset >= self.len_chars() {
            return false;
        }
        let byte_idx = self.byte_index(self.cursor_offset);
        self.display_text.remove(byte_idx);
        true
    }

    /// 次のタブストップまでスペースを挿入
    pub fn insert_tab(&mut self, tab_size: usize) {
        let tab_size = tab_size.max(1);
        let spaces = tab_size - (self.cursor_offset % tab_size);
        self.insert_text(&" ".repeat(spaces));
    }

    /// スマートホーム: 最初の非空白文字へ、既にそこなら行頭へ
    pub fn smart_home(&mut self) {
        let first = self
            .display_text
            .chars()
            .position(|ch| !ch.is_whitespace())
            .unwrap_or(0);
        self.cursor_offset = if first == self.cursor_offset { 0 } else { first };
    }

    pub fn move_end(&mut self) {
        self.cursor_offset = self.len_chars();
    }

    /// カーソルより前にある最後の単語（または非単語）の先頭へ移動
    pub fn word_left(&mut self, kind: WordKind) {
        let cursor_byte = self.byte_index(self.cursor_offset);
        let last_start = kind
            .regex()
            .find_iter(&self.display_text[..cursor_byte])
            .last()
            .map(|m| m.start());
        if let Some(start) = last_start {
            self.cursor_offset = self.char_offset(start);
        }
    }

    /// カーソル以降の最初の単語（または非単語）の末尾へ移動
    pub fn word_right(&mut self, kind: WordKind) {
        let cursor_byte = self.byte_index(self.cursor_offset);
        if let Some(m) = kind.regex().find_at(&self.display_text, cursor_byte) {
            self.cursor_offset = self.char_offset(m.end());
        }
    }

    /// 表示テキストを複製した新しい生成行
    pub fn detached_copy(&self) -> Self {
        Self::synthesized(self.display_text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loaded_and_synthesized_are_distinguishable() {
        let loaded = LineRecord::loaded("\tx".to_string(), "        x".to_string());
        let synthesized = LineRecord::synthesized(String::new());
        assert!(!loaded.is_synthesized());
        assert!(synthesized.is_synthesized());
        assert_eq!(synthesized.display_text(), "");
    }

    #[test]
    fn truncate_returns_tail_and_clamps_cursor() {
        let mut line = LineRecord::synthesized("hello world".to_string());
        line.set_cursor(11);
        let tail = line.truncate_at(5);
        assert_eq!(line.display_text(), "hello");
        assert_eq!(tail, " world");
        assert_eq!(line.cursor_offset(), 5);
    }

    #[test]
    fn insert_and_delete_around_cursor() {
        let mut line = LineRecord::synthesized("ac".to_string());
        line.set_cursor(1);
        line.insert_text("b");
        assert_eq!(line.display_text(), "abc");
        assert_eq!(line.cursor_offset(), 2);

        assert!(line.delete_before_cursor());
        assert_eq!(line.display_text(), "ac");
        assert!(line.delete_at_cursor());
        assert_eq!(line.display_text(), "a");
        assert!(!line.delete_at_cursor());
    }

    #[test]
    fn edits_never_touch_original_text() {
        let mut line = LineRecord::loaded("x".to_string(), "x".to_string());
        line.move_end();
        line.insert_text("yz");
        assert_eq!(line.original_text(), "x");
        assert_eq!(line.display_text(), "xyz");
    }

    #[test]
    fn insert_tab_pads_to_stop() {
        let mut line = LineRecord::synthesized("abc".to_string());
        line.move_end();
        line.insert_tab(4);
        assert_eq!(line.display_text(), "abc ");
        line.insert_tab(4);
        assert_eq!(line.display_text(), "abc     ");
    }

    #[test]
    fn smart_home_toggles() {
        let mut line = LineRecord::synthesized("    body".to_string());
        line.move_end();
        line.smart_home();
        assert_eq!(line.cursor_offset(), 4);
        line.smart_home();
        assert_eq!(line.cursor_offset(), 0);
    }

    #[test]
    fn word_jumps() {
        let mut line = LineRecord::synthesized("let value = 42;".to_string());
        line.word_right(WordKind::Word);
        assert_eq!(line.cursor_offset(), 3);
        line.word_right(WordKind::Word);
        assert_eq!(line.cursor_offset(), 9);
        line.word_left(WordKind::Word);
        assert_eq!(line.cursor_offset(), 4);
        line.word_left(WordKind::NonWord);
        assert_eq!(line.cursor_offset(), 3);
    }

    #[test]
    fn multibyte_offsets_are_in_chars() {
        let mut line = LineRecord::synthesized("日本語".to_string());
        line.set_cursor(1);
        line.insert_text("x");
        assert_eq!(line.display_text(), "日x本語");
        assert_eq!(line.cursor_offset(), 2);
        assert_eq!(line.len_chars(), 4);
    }
}
