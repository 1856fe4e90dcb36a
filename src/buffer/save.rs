//! 保存用の再構成
//!
//! 未編集行はディスク上の元の表記のまま、編集行は表示テキストで書き出す

use super::change_notifier::ChangeEvent;
use super::line::LineRecord;
use super::line_buffer::LineBuffer;
use super::tabs::{expand_tabs, re_tab};
use crate::config::TabSetting;
use crate::error::Result;
use crate::file::io::write_file;
use std::io::BufRead;
use std::path::Path;

const LINE_TERMINATOR: &str = "\n";

/// 1 行分の保存形式
///
/// 再タブ化した表示テキストが元テキストと一致すれば（またはタブ展開した元テキストが
/// 表示テキストと一致すれば）未編集とみなして元テキストを返す。
pub fn saved_form(line: &LineRecord, tabs: TabSetting) -> String {
    let display = line.display_text();
    let original = line.original_text();

    if re_tab(display, tabs.size) == original || expand_tabs(original, tabs.size) == display {
        return original.to_string();
    }

    if tabs.must_retab {
        re_tab(display, tabs.size)
    } else {
        display.to_string()
    }
}

impl<R: BufRead> LineBuffer<R> {
    /// ファイル内容を再構成する。未読の行はここで全て取り込む
    ///
    /// 行は改行 1 つで連結し、最後の行の後ろには改行を付けない。
    pub fn flatten_for_save(&mut self) -> Result<String> {
        let tabs = self.tabs;
        let mut output: Vec<String> = self.lines.iter().map(|line| saved_form(line, tabs)).collect();

        while let Some(raw) = self.source.read_next_line()? {
            output.push(raw.original.clone());
            self.lines.push(LineRecord::loaded(raw.original, raw.display));
        }

        Ok(output.join(LINE_TERMINATOR))
    }

    /// 再構成した内容でファイルを上書きする
    ///
    /// 書き込みに失敗してもメモリ上のバッファは変更されない。
    pub fn save_to(&mut self, path: &Path) -> Result<()> {
        log::info!("saving {}", path.display());
        let content = self.flatten_for_save()?;
        write_file(path, &content)?;

        let lines = self.lines.len();
        log::info!("saved {} lines to {}", lines, path.display());
        self.notifier.notify(&ChangeEvent::Saved { lines });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn buffer(text: &str) -> LineBuffer<Cursor<Vec<u8>>> {
        LineBuffer::from_reader(Cursor::new(text.as_bytes().to_vec()), TabSetting::default())
    }

    #[test]
    fn unmodified_buffer_round_trips() {
        for text in ["def f():\n\tpass\nend", "a\nb\n", "", "\n\n", "x\tyz\t\n  \t"] {
            let mut buf = buffer(text);
            buf.get_at(0).unwrap();
            assert_eq!(buf.flatten_for_save().unwrap(), text);
            assert!(buf.is_source_exhausted());
        }
    }

    #[test]
    fn scenario_three_lines_without_final_terminator() {
        let mut buf = buffer("def f():\n\tpass\nend");
        for position in 0..3 {
            assert!(buf.get_at(position).unwrap().is_some());
        }
        assert!(buf.is_source_exhausted());
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.flatten_for_save().unwrap(), "def f():\n\tpass\nend");
    }

    #[test]
    fn edited_line_is_written_expanded() {
        let mut buf = buffer("\tpass\nend");
        let line = buf.focused_line_mut().unwrap().unwrap();
        line.move_end();
        line.insert_text("  # x");
        assert_eq!(buf.flatten_for_save().unwrap(), "        pass  # x\nend");
    }

    #[test]
    fn edit_that_retabs_to_original_keeps_tabs() {
        let mut buf = buffer("\tpass");
        let line = buf.focused_line_mut().unwrap().unwrap();
        line.set_display_text("        pass".to_string());
        assert_eq!(buf.flatten_for_save().unwrap(), "\tpass");
    }

    #[test]
    fn synthesized_lines_use_display_text() {
        let mut buf = buffer("ab\tc");
        buf.focused_line_mut().unwrap().unwrap().set_cursor(2);
        buf.split_focus().unwrap();
        assert_eq!(buf.flatten_for_save().unwrap(), "ab\n      c");
    }

    #[test]
    fn must_retab_reinserts_tabs_in_edited_lines() {
        let tabs = TabSetting::new(8, true);
        let mut buf = LineBuffer::from_reader(Cursor::new(b"all:\n\tcc x".to_vec()), tabs);
        buf.ensure_materialized(2).unwrap();
        buf.set_focus(1).unwrap();
        let line = buf.focused_line_mut().unwrap().unwrap();
        line.move_end();
        line.insert_text(".c");
        assert_eq!(buf.flatten_for_save().unwrap(), "all:\n\tcc x.c");
    }

    #[test]
    fn save_writes_file_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "keep\n\tme\n").unwrap();

        let mut buf = LineBuffer::open(&path, TabSetting::default()).unwrap();
        buf.get_at(0).unwrap();
        buf.save_to(&path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep\n\tme\n");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn failed_save_leaves_buffer_intact() {
        let dir = tempfile::tempdir().unwrap();
        let mut buf = buffer("a\nb");
        buf.get_at(0).unwrap();
        assert!(buf.save_to(dir.path()).is_err());
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.flatten_for_save().unwrap(), "a\nb");
    }
}
