//! 画面描画
//!
//! 本文（フォーカス行を含む表示範囲）とフッター（ステータス、プロンプト、ヘルプ）を描く。
//! 描画は取り込み済みの行だけを参照し、ソースは読まない。

use super::theme::Theme;
use super::viewport::Viewport;
use crate::editor::Session;
use crate::highlight::TokenClassifier;
use crate::input::Prompt;
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

/// ヘルプ表示の本文
pub const HELP_TEXT: &str = "\
xo: lazy line editor, untouched lines are saved exactly as read
esc: help / close prompt      ctrl+o: save    ctrl+x: exit (does not save)
ctrl+f: insert file at the current line   ctrl+y: go to line & column
ctrl+k: cut line   ctrl+u: paste clipboard   ctrl+t: clear clipboard
ctrl+w: set regex and jump to match      meta+w: jump to next match
ctrl+r: set substitution and replace     meta+r: replace next match";

const STATUS_WIDTH: usize = 8;

/// フッターの表示内容
#[derive(Debug, Clone, Copy)]
pub enum Footer<'a> {
    Status(&'a str),
    Prompt(&'a Prompt),
    Help,
}

impl Footer<'_> {
    /// 必要な行数
    pub fn height(&self) -> u16 {
        match self {
            Footer::Status(_) => 1,
            Footer::Prompt(prompt) => 1 + u16::from(prompt.hint().is_some()),
            Footer::Help => HELP_TEXT.lines().count() as u16,
        }
    }
}

/// 1 行分のテキストを分類結果に従って装飾する。`left` 列より前と `width` 列より後ろは切り捨てる
pub fn styled_line(
    text: &str,
    classifier: &dyn TokenClassifier,
    theme: &Theme,
    left: usize,
    width: usize,
) -> Line<'static> {
    let mut spans = Vec::new();
    let mut chars = text.chars();
    let mut column = 0usize;
    let visible_end = left + width;

    for token in classifier.classify(text) {
        let piece: String = chars.by_ref().take(token.len).collect();
        let start = column;
        column += token.len;

        let from = left.max(start);
        let to = visible_end.min(column);
        if from >= to {
            continue;
        }
        let visible: String = piece.chars().skip(from - start).take(to - from).collect();
        spans.push(Span::styled(visible, theme.style_for(token.category)));
    }

    Line::from(spans)
}

/// ステータスバー: 状態文言、キーの説明、右寄せの位置表示
pub fn status_line(status: &str, position: &str, theme: &Theme, width: usize) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("{:<width$}", status, width = STATUS_WIDTH),
        theme.footer,
    )];
    let mut used = STATUS_WIDTH.max(status.chars().count());

    for (key, label) in [("^x", " exit "), ("^o", " save "), ("esc", " help ")] {
        spans.push(Span::styled(key, theme.key));
        spans.push(Span::styled(label, theme.footer));
        used += key.len() + label.len();
    }

    let padding = width.saturating_sub(used);
    spans.push(Span::styled(
        format!("{:>padding$}", position, padding = padding),
        theme.footer,
    ));
    Line::from(spans)
}

/// 描画器
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    theme: Theme,
    viewport: Viewport,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            viewport: Viewport::default(),
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// 描画前に表示範囲を決め、その範囲の行を取り込む
    pub fn prepare(&mut self, session: &mut Session, area: Rect, footer_height: u16) -> crate::error::Result<()> {
        let height = usize::from(area.height.saturating_sub(footer_height));
        let width = usize::from(area.width);
        let buffer = session.buffer();
        let focus = buffer.focus();
        let column = buffer.line(focus).map_or(0, |line| line.cursor_offset());

        self.viewport.follow(focus, column, height, width);
        session.materialize_view(self.viewport.top, self.viewport.height)
    }

    pub fn draw(&self, frame: &mut Frame<'_>, session: &Session, footer: Footer<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(footer.height())])
            .split(frame.area());
        let (body_area, footer_area) = (chunks[0], chunks[1]);

        let cursor = self.draw_body(frame, body_area, session);
        let prompt_cursor = self.draw_footer(frame, footer_area, session, footer);

        if let Some(position) = prompt_cursor.or(cursor) {
            frame.set_cursor_position(position);
        }
    }

    fn draw_body(&self, frame: &mut Frame<'_>, area: Rect, session: &Session) -> Option<Position> {
        let buffer = session.buffer();
        let width = usize::from(area.width);
        let lines: Vec<Line<'static>> = self
            .viewport
            .rows()
            .take(usize::from(area.height))
            .map_while(|index| buffer.line(index))
            .map(|line| {
                styled_line(
                    line.display_text(),
                    session.classifier(),
                    &self.theme,
                    self.viewport.left,
                    width,
                )
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).style(self.theme.body), area);

        let focus = buffer.focus();
        let row = focus.checked_sub(self.viewport.top)?;
        let column = buffer
            .line(focus)?
            .cursor_offset()
            .saturating_sub(self.viewport.left);
        if row >= usize::from(area.height) || column >= width {
            return None;
        }
        Some(Position::new(
            area.x + column as u16,
            area.y + row as u16,
        ))
    }

    fn draw_footer(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        session: &Session,
        footer: Footer<'_>,
    ) -> Option<Position> {
        frame.render_widget(Clear, area);
        match footer {
            Footer::Status(status) => {
                let line = status_line(
                    status,
                    &session.get_position_text(),
                    &self.theme,
                    usize::from(area.width),
                );
                frame.render_widget(Paragraph::new(line).style(self.theme.footer), area);
                None
            }
            Footer::Help => {
                let lines: Vec<Line<'static>> = HELP_TEXT.lines().map(Line::from).collect();
                frame.render_widget(Paragraph::new(lines).style(self.theme.footer), area);
                None
            }
            Footer::Prompt(prompt) => {
                let mut lines = Vec::with_capacity(2);
                if let Some(hint) = prompt.hint() {
                    lines.push(Line::from(hint.to_string()));
                }
                lines.push(Line::from(vec![
                    Span::styled(prompt.caption(), self.theme.key),
                    Span::raw(prompt.text().to_string()),
                ]));
                frame.render_widget(Paragraph::new(lines).style(self.theme.footer), area);

                let column = prompt.caption().chars().count() + prompt.cursor();
                Some(Position::new(
                    area.x + (column as u16).min(area.width.saturating_sub(1)),
                    area.y + area.height.saturating_sub(1),
                ))
            }
        }
    }
}
