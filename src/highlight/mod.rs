//! 表示用のトークン分類
//!
//! 行テキストを (カテゴリ, 文字数) の並びへ分割する。バッファの状態には一切触れない。
//! 形式が判定できない場合や規則を構築できない場合は行全体を 1 つのテキストとして扱う。

pub mod rules;

pub use rules::{Language, RuleClassifier};

use std::path::Path;

/// トークンのカテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Text,
    Keyword,
    String,
    Comment,
    Number,
    Operator,
}

impl TokenCategory {
    pub fn label(self) -> &'static str {
        match self {
            TokenCategory::Text => "text",
            TokenCategory::Keyword => "keyword",
            TokenCategory::String => "string",
            TokenCategory::Comment => "comment",
            TokenCategory::Number => "number",
            TokenCategory::Operator => "operator",
        }
    }
}

/// 分類結果の 1 区間（長さは文字数）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    pub category: TokenCategory,
    pub len: usize,
}

impl TokenSpan {
    pub fn new(category: TokenCategory, len: usize) -> Self {
        Self { category, len }
    }
}

/// 行テキストの分類器
pub trait TokenClassifier {
    /// 行全体を覆う区間の列。長さの合計は行の文字数に等しい
    fn classify(&self, line: &str) -> Vec<TokenSpan>;
}

/// 行全体を 1 つのテキストとして扱う分類器
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextClassifier;

impl TokenClassifier for PlainTextClassifier {
    fn classify(&self, line: &str) -> Vec<TokenSpan> {
        let len = line.chars().count();
        if len == 0 {
            return Vec::new();
        }
        vec![TokenSpan::new(TokenCategory::Text, len)]
    }
}

/// 空の区間を捨て、隣接する同じカテゴリの区間をまとめる
pub fn merge_spans(spans: impl IntoIterator<Item = TokenSpan>) -> Vec<TokenSpan> {
    let mut merged: Vec<TokenSpan> = Vec::new();
    for span in spans.into_iter().filter(|span| span.len > 0) {
        match merged.last_mut() {
            Some(last) if last.category == span.category => last.len += span.len,
            _ => merged.push(span),
        }
    }
    merged
}

/// ファイル名（拡張子）と 1 行目（shebang）から分類器を選ぶ
pub fn classifier_for_path(path: &Path, first_line: &str) -> Box<dyn TokenClassifier> {
    let language = Language::from_path(path).or_else(|| Language::from_shebang(first_line));

    match language {
        Some(language) => match RuleClassifier::for_language(language) {
            Ok(classifier) => {
                log::debug!("highlighting {} as {:?}", path.display(), language);
                Box::new(classifier)
            }
            Err(err) => {
                log::warn!("highlight rules for {:?} failed: {}", language, err);
                Box::new(PlainTextClassifier)
            }
        },
        None => Box::new(PlainTextClassifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_covers_whole_line() {
        let spans = PlainTextClassifier.classify("héllo world");
        assert_eq!(spans, vec![TokenSpan::new(TokenCategory::Text, 11)]);
        assert!(PlainTextClassifier.classify("").is_empty());
    }

    #[test]
    fn merge_drops_empty_and_joins_neighbours() {
        let spans = merge_spans(vec![
            TokenSpan::new(TokenCategory::Text, 2),
            TokenSpan::new(TokenCategory::Keyword, 0),
            TokenSpan::new(TokenCategory::Text, 3),
            TokenSpan::new(TokenCategory::Number, 1),
        ]);
        assert_eq!(
            spans,
            vec![
                TokenSpan::new(TokenCategory::Text, 5),
                TokenSpan::new(TokenCategory::Number, 1)
            ]
        );
    }

    #[test]
    fn unknown_format_falls_back_to_plain_text() {
        let classifier = classifier_for_path(Path::new("notes.unknown"), "fn main() {}");
        assert_eq!(
            classifier.classify("fn main() {}"),
            vec![TokenSpan::new(TokenCategory::Text, 12)]
        );
    }

    #[test]
    fn shebang_selects_language() {
        let classifier = classifier_for_path(Path::new("script"), "#!/usr/bin/env python3");
        let spans = classifier.classify("def f(): pass");
        assert_eq!(spans[0], TokenSpan::new(TokenCategory::Keyword, 3));
    }
}
