//! テーマ
//!
//! トークンのカテゴリとフッターの各要素に割り当てる端末スタイル

use crate::highlight::TokenCategory;
use ratatui::style::{Color, Modifier, Style};

/// 表示スタイル一式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub body: Style,
    pub footer: Style,
    /// フッター内のキー表記
    pub key: Style,
    pub keyword: Style,
    pub string: Style,
    pub comment: Style,
    pub number: Style,
    pub operator: Style,
}

impl Theme {
    pub const NAMES: [&'static str; 2] = ["default", "mono"];

    /// 名前で選ぶ。未知の名前なら `None`
    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim() {
            "default" => Some(Self::colored()),
            "mono" => Some(Self::mono()),
            _ => None,
        }
    }

    fn colored() -> Self {
        Self {
            name: "default",
            body: Style::default(),
            footer: Style::default()
                .fg(Color::Black)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            key: Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::UNDERLINED),
            keyword: Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            string: Style::default().fg(Color::Yellow),
            comment: Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            number: Style::default().fg(Color::Cyan),
            operator: Style::default().fg(Color::Red),
        }
    }

    fn mono() -> Self {
        Self {
            name: "mono",
            body: Style::default(),
            footer: Style::default().add_modifier(Modifier::REVERSED),
            key: Style::default().add_modifier(Modifier::UNDERLINED),
            keyword: Style::default().add_modifier(Modifier::BOLD),
            string: Style::default(),
            comment: Style::default().add_modifier(Modifier::DIM),
            number: Style::default(),
            operator: Style::default(),
        }
    }

    pub fn style_for(&self, category: TokenCategory) -> Style {
        match category {
            TokenCategory::Text => self.body,
            TokenCategory::Keyword => self.keyword,
            TokenCategory::String => self.string,
            TokenCategory::Comment => self.comment,
            TokenCategory::Number => self.number,
            TokenCategory::Operator => self.operator,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::colored()
    }
}
