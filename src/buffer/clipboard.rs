//! 行クリップボード
//!
//! 切り取った行レコードを所有権ごと受け取り、貼り付けのたびに独立したコピーを渡す

use super::line::LineRecord;

/// 切り取った行を順に保持する領域
#[derive(Debug, Default, Clone)]
pub struct Clipboard {
    entries: Vec<LineRecord>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 行を末尾に追加
    pub fn push(&mut self, line: LineRecord) {
        self.entries.push(line);
    }

    /// 貼り付け用のコピー（元テキストを持たない生成行）
    pub fn copies(&self) -> Vec<LineRecord> {
        self.entries.iter().map(LineRecord::detached_copy).collect()
    }

    pub fn entries(&self) -> &[LineRecord] {
        &self.entries
    }

    /// エントリ数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_cut_order() {
        let mut clipboard = Clipboard::new();
        clipboard.push(LineRecord::synthesized("first".to_string()));
        clipboard.push(LineRecord::synthesized("second".to_string()));
        let texts: Vec<_> = clipboard.entries().iter().map(|l| l.display_text()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn copies_are_detached() {
        let mut clipboard = Clipboard::new();
        clipboard.push(LineRecord::loaded("\tx".to_string(), "        x".to_string()));
        let copies = clipboard.copies();
        assert_eq!(copies.len(), 1);
        assert!(copies[0].is_synthesized());
        assert_eq!(copies[0].display_text(), "        x");
        assert_eq!(clipboard.len(), 1);
    }
}
