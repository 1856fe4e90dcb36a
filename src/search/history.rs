//! 検索履歴
//!
//! 正規表現と置換文字列をそれぞれ上限付きで保持し、プロンプトから上下キーで呼び出す

use crate::config::DEFAULT_HISTORY_LIMIT;
use std::collections::VecDeque;

/// 上限付きの履歴（古いものが先頭）
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
    limit: usize,
}

impl History {
    pub fn with_limit(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// 末尾に追加し、上限を超えた古いエントリを捨てる
    pub fn push(&mut self, entry: String) {
        if self.entries.len() == self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// 最新のエントリ
    pub fn latest(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    /// 古い順のインデックスで取得
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

/// プロンプト入力中の履歴呼び出し位置
///
/// 初期位置は履歴の末尾の次（入力中のテキスト）。
#[derive(Debug, Clone)]
pub struct HistoryCursor {
    index: usize,
    pending_text: String,
}

impl HistoryCursor {
    pub fn new(history: &History) -> Self {
        Self {
            index: history.len(),
            pending_text: String::new(),
        }
    }

    /// 1 つ古いエントリへ。入力中のテキストは覚えておく
    pub fn older(&mut self, history: &History, current_text: &str) -> Option<String> {
        if self.index == history.len() {
            self.pending_text = current_text.to_string();
        }
        self.index = self.index.saturating_sub(1);
        history.get(self.index).map(str::to_string)
    }

    /// 1 つ新しいエントリへ。末尾を越えたら入力中のテキストに戻る
    pub fn newer(&mut self, history: &History) -> Option<String> {
        if self.index < history.len() {
            self.index += 1;
        }
        if self.index == history.len() {
            Some(self.pending_text.clone())
        } else {
            history.get(self.index).map(str::to_string)
        }
    }
}

/// 正規表現と置換文字列の履歴
#[derive(Debug, Clone, Default)]
pub struct SearchHistory {
    pub queries: History,
    pub replacements: History,
}

impl SearchHistory {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            queries: History::with_limit(limit),
            replacements: History::with_limit(limit),
        }
    }
}
