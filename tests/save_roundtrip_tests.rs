//! 保存の結合テスト
//!
//! 未編集行のバイト列保持、未読行の書き出し、編集行の扱いを実ファイルで確認する

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use xo::buffer::LineBuffer;
use xo::config::{EditorConfig, TabSetting};
use xo::Result;

fn write_temp(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    (dir, path)
}

#[test]
fn untouched_files_are_byte_identical() -> Result<()> {
    let samples = [
        "",
        "\n",
        "single line",
        "trailing newline\n",
        "mixed\tseparators\t here\n\tand\t\ttabs\nend",
        "  \t  odd spacing\t\n\n\n",
        "héllo\twörld\n日本語\tテキスト",
    ];

    for content in samples {
        let (_dir, path) = write_temp("sample.txt", content);
        let mut buffer = LineBuffer::open(&path, TabSetting::default())?;
        buffer.get_at(0)?;
        buffer.save_to(&path)?;
        assert_eq!(fs::read_to_string(&path).unwrap(), content, "content {:?}", content);
    }
    Ok(())
}

#[test]
fn unread_tail_is_written_verbatim() -> Result<()> {
    let (_dir, path) = write_temp("big.txt", "head\n\tone\n\ttwo\nlast");
    let mut buffer = LineBuffer::open(&path, TabSetting::default())?;
    buffer.get_at(0)?;
    buffer.line_mut(0).unwrap().set_display_text("HEAD".to_string());

    buffer.save_to(&path)?;
    assert_eq!(fs::read_to_string(&path).unwrap(), "HEAD\n\tone\n\ttwo\nlast");
    assert!(buffer.is_source_exhausted());
    assert_eq!(buffer.len(), 4);
    Ok(())
}

#[test]
fn edited_lines_keep_expanded_spaces() -> Result<()> {
    let (_dir, path) = write_temp("code.py", "def f():\n\tpass\n");
    let mut buffer = LineBuffer::open(&path, TabSetting::default())?;
    buffer.goto(2, 100)?;
    buffer.focused_line_mut()?.unwrap().insert_text("  # noop");

    buffer.save_to(&path)?;
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "def f():\n        pass  # noop\n"
    );
    Ok(())
}

#[test]
fn retab_setting_restores_tabs_on_edited_lines() -> Result<()> {
    let (_dir, path) = write_temp("Makefile", "all:\n\tcc -o x x.c\n");
    let tabs = EditorConfig::default().tab_setting_for(&path);
    assert!(tabs.must_retab);

    let mut buffer = LineBuffer::open(&path, tabs)?;
    buffer.goto(2, 100)?;
    buffer.focused_line_mut()?.unwrap().insert_text(" -O2");

    buffer.save_to(&path)?;
    assert_eq!(fs::read_to_string(&path).unwrap(), "all:\n\tcc -o x x.c -O2\n");
    Ok(())
}

#[test]
fn split_lines_are_saved_as_separate_lines() -> Result<()> {
    let (_dir, path) = write_temp("notes.txt", "hello world\n");
    let mut buffer = LineBuffer::open(&path, TabSetting::default())?;
    buffer.goto(1, 6)?;
    buffer.split_focus()?;

    buffer.save_to(&path)?;
    assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n world\n");
    Ok(())
}

#[test]
fn failed_save_keeps_buffer() -> Result<()> {
    let (dir, path) = write_temp("doc.txt", "a\nb\n");
    let mut buffer = LineBuffer::open(&path, TabSetting::default())?;
    buffer.get_at(0)?;

    let target = dir.path().join("missing-dir").join("doc.txt");
    assert!(buffer.save_to(&target).is_err());
    assert_eq!(buffer.line(0).map(|line| line.display_text()), Some("a"));
    Ok(())
}
