use tui_textarea::{CursorMove, TextArea};

use crate::core::surface::{CursorSnapshot, EditSurface};
use crate::domain::ui::CursorPosition;
use crate::error::SurfaceError;

/// [`EditSurface`] over a tui-textarea editor. Each line is a container.
pub struct TextAreaSurface<'t, 'a> {
    textarea: &'t mut TextArea<'a>,
}

impl<'t, 'a> TextAreaSurface<'t, 'a> {
    pub fn new(textarea: &'t mut TextArea<'a>) -> Self {
        Self { textarea }
    }

    fn extract_cursor_position(textarea: &TextArea<'_>) -> CursorPosition {
        let (line, column) = textarea.cursor();
        CursorPosition { line, column }
    }

    /// The fixed end of the selection, i.e. the end the cursor is not on.
    fn extract_anchor(textarea: &TextArea<'_>) -> Option<CursorPosition> {
        let cursor = textarea.cursor();
        textarea.selection_range().map(|(start, end)| {
            let (line, column) = if start == cursor { end } else { start };
            CursorPosition { line, column }
        })
    }

    fn jump(textarea: &mut TextArea<'_>, pos: CursorPosition) {
        textarea.move_cursor(CursorMove::Jump(
            u16::try_from(pos.line).unwrap_or(u16::MAX),
            u16::try_from(pos.column).unwrap_or(u16::MAX),
        ));
    }

    fn check_line(&self, container: usize) -> Result<(), SurfaceError> {
        if container < self.textarea.lines().len() {
            Ok(())
        } else {
            Err(SurfaceError::ContainerMissing { line: container })
        }
    }
}

impl EditSurface for TextAreaSurface<'_, '_> {
    fn save_cursor(&mut self) -> Result<CursorSnapshot, SurfaceError> {
        Ok(CursorSnapshot::new(
            Self::extract_cursor_position(self.textarea),
            Self::extract_anchor(self.textarea),
        ))
    }

    fn active_container(&self) -> Result<usize, SurfaceError> {
        let (line, _) = self.textarea.cursor();
        self.check_line(line)?;
        Ok(line)
    }

    fn container_text(&self, container: usize) -> Result<String, SurfaceError> {
        self.check_line(container)?;
        Ok(self.textarea.lines()[container].clone())
    }

    fn set_container_text(&mut self, container: usize, text: &str) -> Result<(), SurfaceError> {
        let current = self.container_text(container)?;
        let old: Vec<char> = current.chars().collect();
        let new: Vec<char> = text.chars().collect();

        // only the changed run is edited, so history and settings survive
        let prefix = old.iter().zip(&new).take_while(|(a, b)| a == b).count();
        let suffix = old[prefix..]
            .iter()
            .rev()
            .zip(new[prefix..].iter().rev())
            .take_while(|(a, b)| a == b)
            .count();
        let removed = old.len() - prefix - suffix;
        let inserted: String = new[prefix..new.len() - suffix].iter().collect();
        if removed == 0 && inserted.is_empty() {
            return Ok(());
        }

        self.textarea.cancel_selection();
        Self::jump(self.textarea, CursorPosition::new(container, prefix));
        if removed > 0 {
            self.textarea.start_selection();
            for _ in 0..removed {
                self.textarea.move_cursor(CursorMove::Forward);
            }
        }
        // replaces the selection, if any
        self.textarea.insert_str(inserted);
        Ok(())
    }

    fn restore_cursor(&mut self, snapshot: CursorSnapshot) -> Result<(), SurfaceError> {
        self.textarea.cancel_selection();
        if let Some(anchor) = snapshot.anchor() {
            Self::jump(self.textarea, anchor);
            self.textarea.start_selection();
        }
        Self::jump(self.textarea, snapshot.cursor());
        Ok(())
    }
}
