use crate::editor::{Command, CommandResult, Session};
use crate::error::{Result, UiError, XoError};
use crate::input::{Action, Key, KeyCode, KeyMap, KeyProcessResult, Prompt, PromptKind, PromptOutcome};
use crate::ui::{Footer, Renderer, Theme};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::stdout;
use std::time::Duration;

/// フッターの状態
#[derive(Debug, Clone)]
enum FooterMode {
    Status,
    Prompt(Prompt),
    Help,
}

pub struct TuiApplication {
    session: Session,
    keymap: KeyMap,
    renderer: Renderer,
    footer: FooterMode,
    status: String,
    running: bool,
    page_height: usize,
}

impl TuiApplication {
    pub fn new(session: Session, theme: Theme) -> Self {
        Self {
            session,
            keymap: KeyMap::new(),
            renderer: Renderer::new(theme),
            footer: FooterMode::Status,
            status: CommandResult::IDLE_STATUS.to_string(),
            running: true,
            page_height: 20,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// 開いているプロンプトの種類
    pub fn prompt_kind(&self) -> Option<PromptKind> {
        match &self.footer {
            FooterMode::Prompt(prompt) => Some(prompt.kind()),
            FooterMode::Status | FooterMode::Help => None,
        }
    }

    pub fn is_help_visible(&self) -> bool {
        matches!(self.footer, FooterMode::Help)
    }

    /// 1 始まりの行・列へ移動してからイベントループを回す
    pub fn run(&mut self, line: usize, column: usize) -> Result<()> {
        self.apply(Command::Goto(format!("{}:{}", line, column)));

        enter_terminal()?;

        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend).map_err(|err| terminal_error("terminal init", err))?;

        let loop_result = self.event_loop(&mut terminal);
        let show_cursor_result = terminal.show_cursor().map_err(|err| terminal_error("show cursor", err));
        drop(terminal);
        let cleanup_result = leave_terminal();

        loop_result.and(show_cursor_result).and(cleanup_result)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while self.running {
            self.render(terminal)?;

            if event::poll(Duration::from_millis(250)).map_err(|err| terminal_error("event poll", err))? {
                match event::read().map_err(|err| terminal_error("event read", err))? {
                    Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                        self.handle_key(Key::from(key_event));
                    }
                    Event::Key(_) | Event::Resize(_, _) => {}
                    Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
                }
            }
        }

        log::info!("leaving editor");
        Ok(())
    }

    fn render<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let size = terminal.size().map_err(|err| terminal_error("terminal size", err))?;
        self.prepare_view(Rect::new(0, 0, size.width, size.height));

        let footer = self.footer();
        let renderer = &self.renderer;
        let session = &self.session;
        terminal
            .draw(|frame| renderer.draw(frame, session, footer))
            .map_err(|err| terminal_error("render", err))?;
        Ok(())
    }

    /// 表示範囲を決めて行を取り込む。読み取りの失敗はステータスに出して編集を続ける
    pub fn prepare_view(&mut self, area: Rect) {
        let footer_height = self.footer().height();
        if let Err(err) = self.renderer.prepare(&mut self.session, area, footer_height) {
            log::warn!("view not fully loaded: {}", err);
            self.status = err.status_message().to_string();
        }
        self.page_height = self.renderer.viewport().height.max(1);
    }

    fn footer(&self) -> Footer<'_> {
        match &self.footer {
            FooterMode::Status => Footer::Status(&self.status),
            FooterMode::Prompt(prompt) => Footer::Prompt(prompt),
            FooterMode::Help => Footer::Help,
        }
    }

    /// キー入力を 1 つ処理する
    pub fn handle_key(&mut self, key: Key) {
        if let FooterMode::Prompt(prompt) = &mut self.footer {
            let query_pending = prompt.kind() == PromptKind::Query;
            // クエリ入力中の C-r / M-r はクエリを確定してから置換へ進む
            if query_pending && (key == Key::ctrl('r') || key == Key::alt('r')) {
                let command = prompt.command();
                self.footer = FooterMode::Status;
                self.apply(command);
                if key == Key::ctrl('r') {
                    self.open_prompt(PromptKind::Replacement);
                } else {
                    self.apply(Command::Replace);
                }
                return;
            }

            match prompt.handle_key(&key, self.session.history()) {
                PromptOutcome::Pending => {}
                PromptOutcome::Submit(command) => {
                    self.footer = FooterMode::Status;
                    self.apply(command);
                }
                PromptOutcome::Cancel => {
                    self.footer = FooterMode::Status;
                    self.status = CommandResult::IDLE_STATUS.to_string();
                }
            }
            return;
        }

        if self.is_help_visible() {
            self.footer = FooterMode::Status;
            if key == Key::plain(KeyCode::Esc) {
                return;
            }
        }

        match self.keymap.process_key(&key) {
            KeyProcessResult::Action(Action::Command(command)) => self.apply(command),
            KeyProcessResult::Action(Action::OpenPrompt(kind)) => self.open_prompt(kind),
            KeyProcessResult::Action(Action::Page(direction)) => {
                let delta = direction.saturating_mul(isize::try_from(self.page_height).unwrap_or(isize::MAX));
                self.apply(Command::Navigate(delta));
            }
            KeyProcessResult::Action(Action::ToggleHelp) => self.footer = FooterMode::Help,
            KeyProcessResult::NoMatch => self.status = CommandResult::IDLE_STATUS.to_string(),
        }
    }

    fn open_prompt(&mut self, kind: PromptKind) {
        log::debug!("prompt {:?}", kind);
        self.footer = FooterMode::Prompt(Prompt::new(kind, self.session.history()));
    }

    fn apply(&mut self, command: Command) {
        let result = self.session.run(command);
        if result.quit {
            self.running = false;
        }
        self.status = result.status;
    }
}

fn enter_terminal() -> Result<()> {
    enable_raw_mode().map_err(|err| XoError::Ui(UiError::TerminalInit(err.to_string())))?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen).map_err(|err| terminal_error("enter alternate screen", err))?;
    Ok(())
}

fn leave_terminal() -> Result<()> {
    let mut out = stdout();
    execute!(out, LeaveAlternateScreen).map_err(|err| terminal_error("leave alternate screen", err))?;
    disable_raw_mode().map_err(|err| terminal_error("disable raw mode", err))?;
    Ok(())
}

fn terminal_error(context: &str, err: impl std::fmt::Display) -> XoError {
    XoError::Ui(UiError::RenderingFailed {
        component: format!("{}: {}", context, err),
    })
}
