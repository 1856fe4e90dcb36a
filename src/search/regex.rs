//! 正規表現による行単位の検索と置換
//!
//! 検索はフォーカス行のカーソルの次の列から下へ進み、未読の行は 1 行ずつ取り込む。
//! 末尾まで見つからなければ先頭に戻ってフォーカス行まで探す。

use crate::buffer::{LineBuffer, LineRecord};
use crate::error::Result;
use regex::Regex;
use std::io::BufRead;

/// 行内の `start` 列以降で最初にマッチした位置（列）
fn find_in_line(line: &LineRecord, regex: &Regex, start: usize) -> Option<usize> {
    if start > line.len_chars() {
        return None;
    }
    let start_byte = line.byte_index(start);
    regex
        .find_at(line.display_text(), start_byte)
        .map(|m| line.char_offset(m.start()))
}

fn search_at<R: BufRead>(
    buffer: &mut LineBuffer<R>,
    position: usize,
    regex: &Regex,
    start: usize,
) -> Result<Option<Option<usize>>> {
    let position = isize::try_from(position).unwrap_or(isize::MAX);
    Ok(buffer
        .get_at(position)?
        .map(|(line, _)| find_in_line(line, regex, start)))
}

/// 次のマッチへ移動し、その (行, 列)（0 始まり）を返す
pub fn seek_match<R: BufRead>(buffer: &mut LineBuffer<R>, regex: &Regex) -> Result<Option<(usize, usize)>> {
    let origin = buffer.focus();
    let Some(cursor) = buffer.focused_line()?.map(LineRecord::cursor_offset) else {
        return Ok(None);
    };

    let mut found = search_at(buffer, origin, regex, cursor + 1)?
        .flatten()
        .map(|column| (origin, column));

    let mut position = origin + 1;
    while found.is_none() {
        match search_at(buffer, position, regex, 0)? {
            Some(Some(column)) => found = Some((position, column)),
            Some(None) => position += 1,
            None => break,
        }
    }

    if found.is_none() {
        for position in 0..=origin {
            if let Some(column) = search_at(buffer, position, regex, 0)?.flatten() {
                found = Some((position, column));
                break;
            }
        }
    }

    match found {
        Some((line, column)) => {
            log::debug!("match at {}:{}", line + 1, column + 1);
            buffer.goto(line + 1, column + 1)?;
            Ok(Some((line, column)))
        }
        None => Ok(None),
    }
}

/// 次のマッチへ移動し、カーソル以降の最初のマッチを置換する
///
/// 置換文字列では `$1` や `${name}` でグループを参照できる。カーソルはマッチの先頭に残る。
pub fn replace_match<R: BufRead>(
    buffer: &mut LineBuffer<R>,
    regex: &Regex,
    replacement: &str,
) -> Result<Option<(usize, usize)>> {
    let Some(found) = seek_match(buffer, regex)? else {
        return Ok(None);
    };

    if let Some(line) = buffer.focused_line_mut()? {
        let cursor = line.cursor_offset();
        let split = line.byte_index(cursor);
        let text = line.display_text();
        let replaced = format!("{}{}", &text[..split], regex.replacen(&text[split..], 1, replacement));
        line.set_display_text(replaced);
        line.set_cursor(cursor);
    }

    Ok(Some(found))
}
