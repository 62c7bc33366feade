use color_eyre::eyre::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders};
use tracing::{error, info};
use tui_textarea::TextArea;

use crate::core::engine::Options;
use crate::core::registry::{Registry, TargetId};
use crate::infrastructure::textarea_surface::TextAreaSurface;
use crate::infrastructure::tui::{Frame, Tui};
use crate::model::status_bar::{Message, StatusBar};
use crate::presentation::widgets::status_bar::StatusBarWidget;

const EDITOR: &str = "editor";
const HINT: &str = "Type {keyword} to expand. Esc or Ctrl-C: quit";

/// Single-buffer editor with keyword expansion attached to it.
pub struct App<'a> {
    registry: Registry,
    target: TargetId,
    textarea: TextArea<'a>,
    status_bar: StatusBar,
    should_quit: bool,
}

impl App<'_> {
    pub fn new(options: Options, text: &str) -> Result<Self> {
        let mut registry = Registry::new();
        let target = TargetId::from(EDITOR);
        registry.attach(target.clone(), options)?;

        let mut textarea = TextArea::new(text.split('\n').map(String::from).collect());
        textarea.set_block(Block::default().borders(Borders::ALL).title("kwexpand"));
        textarea.move_cursor(tui_textarea::CursorMove::Bottom);
        textarea.move_cursor(tui_textarea::CursorMove::End);

        Ok(Self {
            registry,
            target,
            textarea,
            status_bar: StatusBar::default(),
            should_quit: false,
        })
    }

    pub fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.textarea.cursor()
    }

    pub fn status_bar(&self) -> &StatusBar {
        &self.status_bar
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn is_quit_key(key: &KeyEvent) -> bool {
        key.kind == KeyEventKind::Press
            && (key.code == KeyCode::Esc
                || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)))
    }

    /// Edits the buffer with `key`, then lets the engine look at it.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if Self::is_quit_key(&key) {
            self.should_quit = true;
            return;
        }
        if key.kind != KeyEventKind::Release {
            self.textarea.input(key);
        }

        let mut surface = TextAreaSurface::new(&mut self.textarea);
        match self.registry.handle_event(&self.target, &key, &mut surface) {
            Ok(outcome) => {
                if outcome.is_replaced() {
                    info!(?outcome, "expanded");
                }
                if let Some(message) = Message::from_outcome(&outcome) {
                    self.status_bar.update(message);
                }
            }
            Err(e) => {
                error!("expansion failed: {e}");
                self.status_bar.update(Message::ErrorMessageChanged {
                    label: "expand".to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        self.textarea.insert_str(text);
    }

    pub fn render(&self, frame: &mut Frame<'_>) {
        let layout = Layout::new(
            Direction::Vertical,
            [Constraint::Min(3), Constraint::Length(2)],
        )
        .split(frame.area());
        frame.render_widget(&self.textarea, layout[0]);
        frame.render_widget(StatusBarWidget::new(&self.status_bar, HINT), layout[1]);
    }

    pub fn run(&mut self, tui: &mut Tui) -> Result<()> {
        while !self.should_quit {
            tui.draw(|frame| self.render(frame))?;
            match tui.next_event()? {
                Event::Key(key) => self.handle_key(key),
                Event::Paste(text) => self.handle_paste(&text),
                _ => {}
            }
        }
        Ok(())
    }
}
