//! 行バッファ
//!
//! 遅延行ソースの上に乗る行レコードの可変長配列。行は末尾の次の位置が要求された
//! ときにだけ 1 行ずつソースから取り込まれ、途中の未読行を飛ばすことはない。

use super::change_notifier::{ChangeEvent, ChangeListener, ChangeNotifier, ListenerId};
use super::clipboard::Clipboard;
use super::line::LineRecord;
use super::source::LazyLineSource;
use super::tabs::expand_tabs;
use crate::config::TabSetting;
use crate::error::{BufferError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// 行バッファ本体
#[derive(Debug)]
pub struct LineBuffer<R> {
    pub(super) lines: Vec<LineRecord>,
    pub(super) source: LazyLineSource<R>,
    focus: usize,
    clipboard: Option<Clipboard>,
    pub(super) tabs: TabSetting,
    pub(super) notifier: ChangeNotifier,
}

impl LineBuffer<BufReader<File>> {
    /// ファイルに結び付いたバッファを作成（ファイルを開けなければ即座にエラー）
    pub fn open(path: &Path, tabs: TabSetting) -> Result<Self> {
        let source = LazyLineSource::open(path, tabs.size)?;
        log::info!("opened {} (tab size {})", path.display(), tabs.size);
        Ok(Self::with_source(source, tabs))
    }
}

impl<R: BufRead> LineBuffer<R> {
    /// 任意のリーダーからバッファを作成
    pub fn from_reader(reader: R, tabs: TabSetting) -> Self {
        Self::with_source(LazyLineSource::new(reader, tabs.size), tabs)
    }

    fn with_source(source: LazyLineSource<R>, tabs: TabSetting) -> Self {
        Self {
            lines: Vec::new(),
            source,
            focus: 0,
            clipboard: None,
            tabs,
            notifier: ChangeNotifier::new(),
        }
    }

    /// 取り込み済みの行数
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    /// ソースを読み切ったか
    pub fn is_source_exhausted(&self) -> bool {
        self.source.is_exhausted()
    }

    pub fn tab_setting(&self) -> TabSetting {
        self.tabs
    }

    /// 取り込み済みの行（ソースは読まない）
    pub fn line(&self, index: usize) -> Option<&LineRecord> {
        self.lines.get(index)
    }

    pub fn line_mut(&mut self, index: usize) -> Option<&mut LineRecord> {
        self.lines.get_mut(index)
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineRecord> {
        self.lines.iter()
    }

    pub fn clipboard(&self) -> Option<&Clipboard> {
        self.clipboard.as_ref()
    }

    pub fn add_listener(&mut self, listener: Box<dyn ChangeListener>) -> ListenerId {
        self.notifier.add_listener(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.notifier.remove_listener(id)
    }

    /// ソースから 1 行取り込む。ソースが閉じていれば `false`
    fn pull_next(&mut self) -> Result<bool> {
        match self.source.read_next_line()? {
            Some(raw) => {
                log::debug!("pulled line {}", self.lines.len() + 1);
                self.lines.push(LineRecord::loaded(raw.original, raw.display));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// 位置を解決する。必要なら末尾の次の 1 行だけ取り込む
    ///
    /// 負の位置、読み切った後の末尾、末尾より 2 つ以上先はいずれも `None`。
    fn resolve(&mut self, position: isize) -> Result<Option<usize>> {
        let Ok(index) = usize::try_from(position) else {
            return Ok(None);
        };

        if index < self.lines.len() {
            return Ok(Some(index));
        }

        if index == self.lines.len() && self.pull_next()? {
            return Ok(Some(index));
        }

        Ok(None)
    }

    /// 指定位置の行とその位置を返す
    pub fn get_at(&mut self, position: isize) -> Result<Option<(&LineRecord, usize)>> {
        let resolved = self.resolve(position)?;
        Ok(resolved.map(|index| (&self.lines[index], index)))
    }

    /// 少なくとも `count` 行を取り込む（ソースが尽きたらそこまで）
    pub fn ensure_materialized(&mut self, count: usize) -> Result<()> {
        while self.lines.len() < count {
            if !self.pull_next()? {
                break;
            }
        }
        Ok(())
    }

    /// フォーカス行を設定し、観測者へ通知する
    ///
    /// 取り込み済みか、次に取り込める位置でなければ `SequenceViolation`。
    pub fn set_focus(&mut self, position: usize) -> Result<()> {
        let requested = isize::try_from(position).unwrap_or(isize::MAX);
        if self.resolve(requested)?.is_none() {
            log::warn!(
                "focus {} requested with {} lines read",
                position,
                self.lines.len()
            );
            return Err(BufferError::SequenceViolation {
                requested: position,
                materialized: self.lines.len(),
            }
            .into());
        }

        self.focus = position;
        self.notifier.notify(&ChangeEvent::FocusChanged { focus: position });
        Ok(())
    }

    /// フォーカス行（未取り込みなら取り込む）
    pub fn focused_line(&mut self) -> Result<Option<&LineRecord>> {
        let focus = self.focus_index()?;
        Ok(focus.map(|index| &self.lines[index]))
    }

    pub fn focused_line_mut(&mut self) -> Result<Option<&mut LineRecord>> {
        match self.focus_index()? {
            Some(index) => Ok(Some(&mut self.lines[index])),
            None => Ok(None),
        }
    }

    fn focus_index(&mut self) -> Result<Option<usize>> {
        let focus = isize::try_from(self.focus).unwrap_or(isize::MAX);
        self.resolve(focus)
    }

    /// 1 始まりの (行, 列)
    pub fn get_coords(&self) -> (usize, usize) {
        let column = self
            .lines
            .get(self.focus)
            .map_or(0, LineRecord::cursor_offset);
        (self.focus + 1, column + 1)
    }

    /// フォーカス行をカーソル位置で 2 行に分ける。ソースは読まない
    pub fn split_focus(&mut self) -> Result<()> {
        let Some(focus) = self.focus_index()? else {
            return Ok(());
        };

        let line = &mut self.lines[focus];
        let offset = line.cursor_offset();
        let tail = line.truncate_at(offset);
        self.lines.insert(focus + 1, LineRecord::synthesized(tail));
        self.notifier.notify(&ChangeEvent::LinesChanged { start: focus });
        Ok(())
    }

    /// フォーカス行を前の行の末尾に結合する。先頭行なら何もしない
    pub fn combine_focus_with_prev(&mut self) -> Result<bool> {
        let Some(focus) = self.focus_index()? else {
            return Ok(false);
        };
        if focus == 0 {
            return Ok(false);
        }

        let removed = self.lines.remove(focus);
        let above = &mut self.lines[focus - 1];
        let join_point = above.len_chars();
        above.append_text(removed.display_text());
        above.set_cursor(join_point);

        self.notifier.notify(&ChangeEvent::LinesChanged { start: focus - 1 });
        self.set_focus(focus - 1)?;
        Ok(true)
    }

    /// 次の行をフォーカス行の末尾に結合する。次の行が未読なら 1 行だけ読む
    pub fn combine_focus_with_next(&mut self) -> Result<bool> {
        let Some(focus) = self.focus_index()? else {
            return Ok(false);
        };
        let below_position = isize::try_from(focus + 1).unwrap_or(isize::MAX);
        if self.resolve(below_position)?.is_none() {
            return Ok(false);
        }

        let below = self.lines.remove(focus + 1);
        self.lines[focus].append_text(below.display_text());
        self.notifier.notify(&ChangeEvent::LinesChanged { start: focus });
        Ok(true)
    }

    /// フォーカス行をクリップボードの末尾へ移す
    pub fn cut_to_focus(&mut self) -> Result<bool> {
        let Some(focus) = self.focus_index()? else {
            return Ok(false);
        };

        let line = self.lines.remove(focus);
        self.clipboard.get_or_insert_with(Clipboard::new).push(line);

        if focus >= self.lines.len() {
            self.focus = self.lines.len().saturating_sub(1);
        }
        self.notifier.notify(&ChangeEvent::LinesChanged { start: focus });
        self.notifier.notify(&ChangeEvent::FocusChanged { focus: self.focus });
        Ok(true)
    }

    /// クリップボードの全行のコピーをフォーカス位置に挿入し、挿入行数だけフォーカスを進める
    ///
    /// 進めた先が末尾を越える場合（全行を切り取った後など）は最終行に留める。
    /// クリップボードは消費しない。クリップボードがなければ 0 を返す。
    pub fn paste_from_clipboard(&mut self) -> usize {
        let Some(clipboard) = &self.clipboard else {
            return 0;
        };

        let copies = clipboard.copies();
        let count = copies.len();
        let position = self.focus.min(self.lines.len());
        self.lines.splice(position..position, copies);

        self.focus = (position + count).min(self.lines.len().saturating_sub(1));
        self.notifier.notify(&ChangeEvent::LinesChanged { start: position });
        self.notifier.notify(&ChangeEvent::FocusChanged { focus: self.focus });
        count
    }

    /// クリップボードを破棄する
    pub fn clear_clipboard(&mut self) {
        self.clipboard = None;
    }

    /// 1 始まりの行・列へ移動する。行は必要な分だけ順に取り込む
    pub fn goto(&mut self, line: usize, column: usize) -> Result<()> {
        self.ensure_materialized(line)?;
        if self.lines.is_empty() {
            return Ok(());
        }

        let focus = line.clamp(1, self.lines.len()) - 1;
        self.lines[focus].set_cursor(column.saturating_sub(1));
        self.set_focus(focus)
    }

    /// 外部から読んだ行をフォーカス位置に順に挿入する（フォーカスは動かさない）
    ///
    /// 挿入行は読み込んだ行と同様に元テキストを保持し、保存時にタブが保たれる。
    pub fn insert_raw_lines(&mut self, raw_lines: Vec<String>) {
        if raw_lines.is_empty() {
            return;
        }

        let tab_size = self.tabs.size;
        let records = raw_lines.into_iter().map(|raw| {
            let display = expand_tabs(&raw, tab_size);
            LineRecord::loaded(raw, display)
        });
        let position = self.focus.min(self.lines.len());
        self.lines.splice(position..position, records);
        self.notifier.notify(&ChangeEvent::LinesChanged { start: position });
    }
}
