use std::fmt::Debug;
use std::sync::Mutex;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::step_log::StepLog;
use crate::core::surface::{CursorSnapshot, EditSurface};
use crate::domain::ui::CursorPosition;
use crate::error::SurfaceError;

/// Key release without modifiers, the default trigger event class.
pub fn key_release(code: KeyCode) -> KeyEvent {
    KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
}

/// Key press without modifiers.
pub fn key_press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// In-memory multi-line surface that counts every collaborator call.
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    lines: Vec<String>,
    cursor: CursorPosition,
    anchor: Option<CursorPosition>,
    failure: Option<SurfaceError>,
    saves: usize,
    writes: usize,
    restores: usize,
}

impl LineBuffer {
    /// Create a buffer from `\n`-separated text
    pub fn new(text: &str, cursor: CursorPosition) -> Self {
        Self::from_lines(text.split('\n'), cursor)
    }

    pub fn from_lines<I, S>(lines: I, cursor: CursorPosition) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            cursor,
            ..Default::default()
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    pub fn anchor(&self) -> Option<CursorPosition> {
        self.anchor
    }

    /// Start a selection anchored at `anchor`, ending at the cursor
    pub fn select_from(&mut self, anchor: CursorPosition) -> &mut Self {
        self.anchor = Some(anchor);
        self
    }

    /// Make every subsequent collaborator call fail with `error`
    pub fn fail_with(&mut self, error: SurfaceError) -> &mut Self {
        self.failure = Some(error);
        self
    }

    pub fn saves(&self) -> usize {
        self.saves
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn restores(&self) -> usize {
        self.restores
    }

    fn check(&self) -> Result<(), SurfaceError> {
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

impl EditSurface for LineBuffer {
    fn save_cursor(&mut self) -> Result<CursorSnapshot, SurfaceError> {
        self.check()?;
        self.saves += 1;
        Ok(CursorSnapshot::new(self.cursor, self.anchor))
    }

    fn active_container(&self) -> Result<usize, SurfaceError> {
        self.check()?;
        if self.cursor.line < self.lines.len() {
            Ok(self.cursor.line)
        } else {
            Err(SurfaceError::ContainerMissing {
                line: self.cursor.line,
            })
        }
    }

    fn container_text(&self, container: usize) -> Result<String, SurfaceError> {
        self.check()?;
        self.lines
            .get(container)
            .cloned()
            .ok_or(SurfaceError::ContainerMissing { line: container })
    }

    fn set_container_text(&mut self, container: usize, text: &str) -> Result<(), SurfaceError> {
        self.check()?;
        let line = self
            .lines
            .get_mut(container)
            .ok_or(SurfaceError::ContainerMissing { line: container })?;
        *line = text.to_string();
        self.writes += 1;
        Ok(())
    }

    fn restore_cursor(&mut self, snapshot: CursorSnapshot) -> Result<(), SurfaceError> {
        self.check()?;
        self.cursor = snapshot.cursor();
        self.anchor = snapshot.anchor();
        self.restores += 1;
        Ok(())
    }
}

/// Step log that keeps every tag it receives.
#[derive(Debug, Default)]
pub struct RecordingStepLog {
    entries: Mutex<Vec<(String, String)>>,
}

impl RecordingStepLog {
    pub fn tags(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .map(|(tag, _)| tag)
            .collect()
    }

    /// Tag and the `Debug` rendering of its values
    pub fn entries(&self) -> Vec<(String, String)> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

impl StepLog for RecordingStepLog {
    fn log(&self, tag: &str, values: &[&dyn Debug]) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((tag.to_string(), format!("{values:?}")));
        }
    }
}
