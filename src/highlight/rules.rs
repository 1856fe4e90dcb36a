//! 正規表現規則による言語別の分類器

use super::{merge_spans, TokenCategory, TokenClassifier, TokenSpan};
use regex::Regex;
use std::path::Path;

/// 対応言語
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Rust,
    Python,
    C,
    Shell,
    Json,
}

impl Language {
    /// 拡張子またはファイル名から判定
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_string_lossy();
        if file_name == "Makefile" || file_name.ends_with(".mk") {
            return Some(Language::Shell);
        }

        let extension = path.extension()?.to_string_lossy().to_ascii_lowercase();
        match extension.as_str() {
            "rs" => Some(Language::Rust),
            "py" | "pyw" => Some(Language::Python),
            "c" | "h" | "cc" | "cpp" | "cxx" | "hpp" | "hxx" | "c++" | "h++" => Some(Language::C),
            "sh" | "bash" | "zsh" => Some(Language::Shell),
            "json" => Some(Language::Json),
            _ => None,
        }
    }

    /// `#!` 行から判定
    pub fn from_shebang(first_line: &str) -> Option<Self> {
        let interpreter = first_line.strip_prefix("#!")?;
        if interpreter.contains("python") {
            Some(Language::Python)
        } else if ["sh", "bash", "zsh"]
            .iter()
            .any(|shell| interpreter.split(['/', ' ']).any(|part| part == *shell))
        {
            Some(Language::Shell)
        } else {
            None
        }
    }

    fn rules(self) -> Vec<(TokenCategory, String)> {
        const STRING_DQ: &str = r#""(?:[^"\\]|\\.)*"?"#;
        const STRING_SQ: &str = r"'(?:[^'\\]|\\.)*'?";
        const NUMBER: &str = r"\b(?:0[xX][0-9a-fA-F_]+|\d[\d_]*(?:\.\d+)?(?:[eE][+-]?\d+)?)\b";

        let keywords = |words: &[&str]| format!(r"\b(?:{})\b", words.join("|"));

        match self {
            Language::Rust => vec![
                (TokenCategory::Comment, r"//.*".to_string()),
                (TokenCategory::String, STRING_DQ.to_string()),
                (
                    TokenCategory::Keyword,
                    keywords(&[
                        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else",
                        "enum", "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop",
                        "match", "mod", "move", "mut", "pub", "ref", "return", "self", "Self",
                        "static", "struct", "super", "trait", "true", "type", "unsafe", "use",
                        "where", "while",
                    ]),
                ),
                (TokenCategory::Number, NUMBER.to_string()),
                (TokenCategory::Operator, r"[-+*/%=<>!&|^?]+".to_string()),
            ],
            Language::Python => vec![
                (TokenCategory::Comment, r"#.*".to_string()),
                (TokenCategory::String, format!("{}|{}", STRING_DQ, STRING_SQ)),
                (
                    TokenCategory::Keyword,
                    keywords(&[
                        "and", "as", "assert", "async", "await", "break", "class", "continue",
                        "def", "del", "elif", "else", "except", "False", "finally", "for", "from",
                        "global", "if", "import", "in", "is", "lambda", "None", "nonlocal", "not",
                        "or", "pass", "raise", "return", "True", "try", "while", "with", "yield",
                    ]),
                ),
                (TokenCategory::Number, NUMBER.to_string()),
                (TokenCategory::Operator, r"[-+*/%=<>!&|^~@]+".to_string()),
            ],
            Language::C => vec![
                (TokenCategory::Comment, r"//.*|/\*.*?(?:\*/|$)".to_string()),
                (TokenCategory::String, format!("{}|{}", STRING_DQ, STRING_SQ)),
                (TokenCategory::Keyword, r"^\s*#\s*\w+".to_string()),
                (
                    TokenCategory::Keyword,
                    keywords(&[
                        "auto", "break", "case", "char", "class", "const", "continue", "default",
                        "do", "double", "else", "enum", "extern", "float", "for", "goto", "if",
                        "int", "long", "namespace", "public", "private", "register", "return",
                        "short", "signed", "sizeof", "static", "struct", "switch", "template",
                        "typedef", "union", "unsigned", "void", "volatile", "while",
                    ]),
                ),
                (TokenCategory::Number, NUMBER.to_string()),
                (TokenCategory::Operator, r"[-+*/%=<>!&|^~?]+".to_string()),
            ],
            Language::Shell => vec![
                (TokenCategory::Comment, r"(?:^|\s)#.*".to_string()),
                (TokenCategory::String, format!("{}|{}", STRING_DQ, STRING_SQ)),
                (TokenCategory::Keyword, r"\$\{?\w+\}?|\$\(".to_string()),
                (
                    TokenCategory::Keyword,
                    keywords(&[
                        "case", "do", "done", "elif", "else", "esac", "export", "fi", "for",
                        "function", "if", "in", "local", "return", "then", "until", "while",
                    ]),
                ),
                (TokenCategory::Number, NUMBER.to_string()),
                (TokenCategory::Operator, r"[|&;<>]+".to_string()),
            ],
            Language::Json => vec![
                (TokenCategory::String, STRING_DQ.to_string()),
                (TokenCategory::Keyword, keywords(&["true", "false", "null"])),
                (TokenCategory::Number, r"-?\d+(?:\.\d+)?(?:[eE][+-]?\d+)?".to_string()),
                (TokenCategory::Operator, r"[:,]".to_string()),
            ],
        }
    }
}

/// 規則を 1 つの選択正規表現にまとめた分類器
///
/// 各規則は `r<番号>` という名前付きグループになり、同じ位置では先に書いた規則が優先される。
#[derive(Debug, Clone)]
pub struct RuleClassifier {
    regex: Regex,
    /// 規則順の (グループ番号, カテゴリ)
    groups: Vec<(usize, TokenCategory)>,
}

impl RuleClassifier {
    pub fn new(rules: &[(TokenCategory, String)]) -> Result<Self, regex::Error> {
        let pattern = rules
            .iter()
            .enumerate()
            .map(|(index, (_, rule))| format!("(?P<r{}>{})", index, rule))
            .collect::<Vec<_>>()
            .join("|");
        let regex = Regex::new(&pattern)?;

        // 規則内の捕獲グループがあっても番号がずれないよう名前から引く
        let names: Vec<Option<&str>> = regex.capture_names().collect();
        let groups = rules
            .iter()
            .enumerate()
            .filter_map(|(index, (category, _))| {
                let name = format!("r{}", index);
                names
                    .iter()
                    .position(|group| *group == Some(name.as_str()))
                    .map(|group| (group, *category))
            })
            .collect();

        Ok(Self { regex, groups })
    }

    pub fn for_language(language: Language) -> Result<Self, regex::Error> {
        Self::new(&language.rules())
    }

    fn category_of(&self, captures: &regex::Captures<'_>) -> TokenCategory {
        self.groups
            .iter()
            .find(|(group, _)| captures.get(*group).is_some())
            .map_or(TokenCategory::Text, |(_, category)| *category)
    }
}

impl TokenClassifier for RuleClassifier {
    fn classify(&self, line: &str) -> Vec<TokenSpan> {
        let mut spans = Vec::new();
        let mut last_end = 0usize;

        for captures in self.regex.captures_iter(line) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            if whole.start() == whole.end() {
                continue;
            }

            spans.push(TokenSpan::new(
                TokenCategory::Text,
                line[last_end..whole.start()].chars().count(),
            ));
            spans.push(TokenSpan::new(
                self.category_of(&captures),
                whole.as_str().chars().count(),
            ));
            last_end = whole.end();
        }

        spans.push(TokenSpan::new(TokenCategory::Text, line[last_end..].chars().count()));
        merge_spans(spans)
    }
}
