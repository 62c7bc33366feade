use std::io::{stdout, Stdout};

use color_eyre::eyre::Result;
use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

pub type Frame<'a> = ratatui::Frame<'a>;

/// Raw-mode terminal with an alternate screen.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    reports_releases: bool,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        Ok(Self {
            terminal,
            reports_releases: false,
        })
    }

    /// Enters raw mode. With `key_releases`, asks the terminal to report key
    /// release events, which only some terminals support.
    pub fn enter(&mut self, key_releases: bool) -> Result<()> {
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, EnableBracketedPaste, cursor::Hide)?;
        if key_releases && terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(stdout(), PushKeyboardEnhancementFlags(release_reporting_flags()))?;
            self.reports_releases = true;
        }
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if self.reports_releases {
            execute!(stdout(), PopKeyboardEnhancementFlags)?;
            self.reports_releases = false;
        }
        restore()
    }

    /// Whether the terminal agreed to report key releases.
    pub fn reports_releases(&self) -> bool {
        self.reports_releases
    }

    pub fn draw(&mut self, f: impl FnOnce(&mut Frame<'_>)) -> Result<()> {
        self.terminal.draw(f)?;
        Ok(())
    }

    /// Blocks until the next terminal event.
    pub fn next_event(&self) -> Result<Event> {
        Ok(event::read()?)
    }
}

/// Flags pushed to get release events. Alternate keys make shifted keys
/// arrive as the shifted character (`}` rather than `]` with SHIFT), as they
/// do without enhancement.
pub fn release_reporting_flags() -> KeyboardEnhancementFlags {
    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
        | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
}

/// Leaves raw mode and the alternate screen. Safe to call more than once.
pub fn restore() -> Result<()> {
    if terminal::is_raw_mode_enabled()? {
        execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen, cursor::Show)?;
        disable_raw_mode()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_reporting_flags() {
        let flags = release_reporting_flags();
        assert!(flags.contains(KeyboardEnhancementFlags::REPORT_EVENT_TYPES));
        assert!(flags.contains(KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS));
    }
}
