//! 行バッファとタブ変換の性質テスト
//!
//! 分割と結合、切り取りと貼り付けが互いに打ち消し合うこと、未編集の保存がバイト列を
//! 保つこと、桁揃えされたタブが展開後に復元されることを確認する

use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use std::io::Cursor;
use xo::buffer::{expand_tabs, re_tab, LineBuffer};
use xo::config::TabSetting;

fn buffer(text: &str) -> LineBuffer<Cursor<Vec<u8>>> {
    LineBuffer::from_reader(Cursor::new(text.as_bytes().to_vec()), TabSetting::default())
}

fn texts(buffer: &LineBuffer<Cursor<Vec<u8>>>) -> Vec<String> {
    buffer.lines().map(|line| line.display_text().to_string()).collect()
}

fn line_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _#:.é日]{0,24}"
}

/// タブが 8 桁の境界にだけ現れる行
fn aligned_tab_line() -> impl Strategy<Value = String> {
    (
        proptest::collection::vec("[a-zA-Z0-9_#:;.(){}]{0,6}", 0..5),
        "[a-zA-Z0-9_#:;.(){}]{0,12}",
    )
        .prop_map(|(segments, tail)| {
            let mut line: String = segments.into_iter().map(|segment| segment + "\t").collect();
            line.push_str(&tail);
            line
        })
}

fn file_text() -> impl Strategy<Value = String> {
    "[a-z \t\né]{0,80}"
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn split_then_join_with_prev_restores_text(text in line_text(), at in 0usize..32) {
        let mut buf = buffer(&text);
        buf.goto(1, at + 1).unwrap();
        buf.split_focus().unwrap();
        buf.set_focus(1).unwrap();
        prop_assert!(buf.combine_focus_with_prev().unwrap());
        prop_assert_eq!(texts(&buf), vec![text.clone()]);
    }

    #[test]
    fn split_then_join_with_next_restores_text(text in line_text(), at in 0usize..32) {
        let mut buf = buffer(&text);
        buf.goto(1, at + 1).unwrap();
        buf.split_focus().unwrap();
        prop_assert!(buf.combine_focus_with_next().unwrap());
        prop_assert_eq!(texts(&buf), vec![text.clone()]);
        prop_assert_eq!(buf.focus(), 0);
    }

    #[test]
    fn retab_restores_aligned_tabs(line in aligned_tab_line()) {
        prop_assert_eq!(re_tab(&expand_tabs(&line, 8), 8), line);
    }

    #[test]
    fn cut_then_paste_restores_buffer(
        lines in proptest::collection::vec(line_text(), 2..8),
        pick in 0usize..64,
    ) {
        let text = lines.join("\n");
        let mut buf = buffer(&text);
        buf.ensure_materialized(lines.len()).unwrap();
        prop_assert!(buf.is_source_exhausted());

        let focus = pick % (lines.len() - 1);
        for position in 0..=focus {
            buf.set_focus(position).unwrap();
        }
        let before = texts(&buf);

        prop_assert!(buf.cut_to_focus().unwrap());
        prop_assert_eq!(buf.clipboard().map(|clipboard| clipboard.len()), Some(1));
        prop_assert_eq!(buf.paste_from_clipboard(), 1);

        prop_assert_eq!(texts(&buf), before);
        prop_assert!(buf.clipboard().map_or(false, |clipboard| !clipboard.is_empty()));
    }

    #[test]
    fn unedited_save_reproduces_bytes(text in file_text(), reads in 0usize..6) {
        let mut buf = buffer(&text);
        buf.ensure_materialized(reads).unwrap();
        prop_assert_eq!(buf.flatten_for_save().unwrap(), text);
    }
}
