use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::Deserialize;
use strum::{Display, EnumString};

use crate::error::TriggerError;

/// The class of key event an engine listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventKind {
    #[default]
    KeyUp,
    KeyDown,
    KeyRepeat,
}

impl EventKind {
    pub fn matches(self, event: &KeyEvent) -> bool {
        self.key_event_kind() == event.kind
    }

    pub fn key_event_kind(self) -> KeyEventKind {
        match self {
            EventKind::KeyUp => KeyEventKind::Release,
            EventKind::KeyDown => KeyEventKind::Press,
            EventKind::KeyRepeat => KeyEventKind::Repeat,
        }
    }
}

/// Raw trigger as written in configuration files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TriggerSpec {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub modifiers: Option<String>,
}

/// Field predicate over a key event. Every field that is set must equal the
/// corresponding field of the event; an empty trigger matches every event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "TriggerSpec")]
pub struct Trigger {
    code: Option<KeyCode>,
    modifiers: Option<KeyModifiers>,
}

impl Trigger {
    pub fn new(code: Option<KeyCode>, modifiers: Option<KeyModifiers>) -> Self {
        Self { code, modifiers }
    }

    /// A trigger on a single key code with any modifiers.
    pub fn key(code: KeyCode) -> Self {
        Self::new(Some(code), None)
    }

    /// A trigger that fires on every event.
    pub fn any() -> Self {
        Self::new(None, None)
    }

    pub fn code(&self) -> Option<KeyCode> {
        self.code
    }

    pub fn modifiers(&self) -> Option<KeyModifiers> {
        self.modifiers
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.code.is_none_or(|code| code == event.code)
            && self
                .modifiers
                .is_none_or(|modifiers| modifiers == event.modifiers)
    }
}

impl Default for Trigger {
    /// Closing brace: the key that completes a `{keyword}` span.
    fn default() -> Self {
        Self::key(KeyCode::Char('}'))
    }
}

impl TryFrom<TriggerSpec> for Trigger {
    type Error = TriggerError;

    fn try_from(spec: TriggerSpec) -> Result<Self, Self::Error> {
        let code = spec.code.as_deref().map(parse_key_code).transpose()?;
        let modifiers = spec.modifiers.as_deref().map(parse_modifiers).transpose()?;
        Ok(Self::new(code, modifiers))
    }
}

pub fn parse_modifiers(value: &str) -> Result<KeyModifiers, TriggerError> {
    let mut modifiers = KeyModifiers::NONE;
    for part in value.split('+').map(str::trim).filter(|p| !p.is_empty()) {
        match part.to_ascii_lowercase().as_str() {
            "none" => {}
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" | "option" => modifiers |= KeyModifiers::ALT,
            "super" | "meta" | "cmd" | "command" => modifiers |= KeyModifiers::SUPER,
            _ => return Err(TriggerError::Modifier(part.to_string())),
        }
    }
    Ok(modifiers)
}

pub fn parse_key_code(value: &str) -> Result<KeyCode, TriggerError> {
    // a lone space is a key too, so only trim longer names
    let v = if value.chars().count() > 1 {
        value.trim()
    } else {
        value
    };
    let unknown = || TriggerError::KeyCode(value.to_string());

    let code = match v.to_ascii_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "esc" | "escape" => KeyCode::Esc,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "space" => KeyCode::Char(' '),
        lc if lc.len() > 1 && lc.starts_with('f') => {
            let n = lc[1..].parse::<u8>().map_err(|_| unknown())?;
            KeyCode::F(n)
        }
        _ => {
            let mut chars = v.chars();
            let ch = chars.next().ok_or_else(unknown)?;
            if chars.next().is_some() {
                return Err(unknown());
            }
            KeyCode::Char(ch)
        }
    };

    Ok(code)
}
