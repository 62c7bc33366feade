//! Trigger handling and in-place replacement.
//!
//! One handled event walks through the phases
//! `evaluating -> scanning -> resolving -> replacing -> restoring`, stopping
//! early (without touching the surface) when the event does not trigger,
//! no delimited keyword is found, or the keyword has no replacement.

use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::Arc;

use crossterm::event::KeyEvent;
use serde::Deserialize;
use strum::Display;

use crate::core::matcher::{self, DelimiterPattern};
use crate::core::step_log::{StepLog, TracingStepLog};
use crate::core::surface::EditSurface;
use crate::core::trigger::{EventKind, Trigger};
use crate::domain::ui::Splice;
use crate::error::{PatternError, SurfaceError};

/// Non-breaking space.
pub const DEFAULT_APPEND: &str = "\u{a0}";

/// Attachment options. Every field is optional and falls back to the
/// [`Settings`] default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Options {
    #[serde(default)]
    pub event: Option<EventKind>,
    #[serde(default)]
    pub trigger: Option<Trigger>,
    #[serde(default)]
    pub filters: Option<HashMap<String, String>>,
    #[serde(default, rename = "match")]
    pub pattern: Option<String>,
    #[serde(default)]
    pub append: Option<String>,
    #[serde(default, rename = "DEBUG", alias = "debug")]
    pub debug: Option<bool>,
}

impl Options {
    /// Fills every unset field from `fallback`. Filters are merged key by
    /// key, entries in `self` win.
    pub fn or(self, fallback: Options) -> Options {
        let filters = match (self.filters, fallback.filters) {
            (Some(mut own), Some(base)) => {
                for (keyword, value) in base {
                    own.entry(keyword).or_insert(value);
                }
                Some(own)
            }
            (own, base) => own.or(base),
        };
        Options {
            event: self.event.or(fallback.event),
            trigger: self.trigger.or(fallback.trigger),
            filters,
            pattern: self.pattern.or(fallback.pattern),
            append: self.append.or(fallback.append),
            debug: self.debug.or(fallback.debug),
        }
    }

    /// Validates the options and fills in defaults.
    pub fn into_settings(self) -> Result<Settings, PatternError> {
        let pattern = match self.pattern {
            Some(source) => DelimiterPattern::new(&source)?,
            None => DelimiterPattern::default(),
        };
        Ok(Settings {
            event: self.event.unwrap_or_default(),
            trigger: self.trigger.unwrap_or_default(),
            filters: self.filters.unwrap_or_default(),
            pattern,
            append: self.append.unwrap_or_else(|| DEFAULT_APPEND.to_string()),
            debug: self.debug.unwrap_or(false),
        })
    }
}

/// Validated configuration of one attached engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub event: EventKind,
    pub trigger: Trigger,
    /// Keyword to replacement. Keys are case-sensitive.
    pub filters: HashMap<String, String>,
    pub pattern: DelimiterPattern,
    /// Appended after every replacement.
    pub append: String,
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            event: EventKind::default(),
            trigger: Trigger::default(),
            filters: HashMap::new(),
            pattern: DelimiterPattern::default(),
            append: DEFAULT_APPEND.to_string(),
            debug: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    Evaluating,
    Scanning,
    Resolving,
    Replacing,
    Restoring,
}

/// A completed replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub keyword: String,
    /// The delimited text that was replaced.
    pub full_span: String,
    /// Lookup value plus the append suffix.
    pub replacement: String,
    pub splice: Splice,
}

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No engine is attached to the target.
    Unbound,
    /// The event is not of the bound kind.
    Ignored,
    /// The event did not satisfy the trigger.
    NotTriggered,
    NoMatch,
    /// A keyword was found but has no replacement.
    Unresolved { keyword: String },
    Replaced(Expansion),
}

impl Outcome {
    pub fn is_replaced(&self) -> bool {
        matches!(self, Outcome::Replaced(_))
    }
}

pub type SharedStepLog = Arc<dyn StepLog + Send + Sync>;

pub struct ReplacementEngine {
    settings: Settings,
    log: SharedStepLog,
}

impl ReplacementEngine {
    pub fn new(settings: Settings) -> Self {
        Self::with_logger(settings, Arc::new(TracingStepLog))
    }

    pub fn with_logger(settings: Settings, log: SharedStepLog) -> Self {
        Self { settings, log }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn logger(&self) -> SharedStepLog {
        Arc::clone(&self.log)
    }

    fn dlog(&self, phase: Phase, values: &[&dyn Debug]) {
        if self.settings.debug {
            self.log.log(&phase.to_string(), values);
        }
    }

    /// Runs the full cycle for one key event.
    ///
    /// Surface errors are returned as-is.
    pub fn handle_event<S>(&self, event: &KeyEvent, surface: &mut S) -> Result<Outcome, SurfaceError>
    where
        S: EditSurface + ?Sized,
    {
        if !self.settings.event.matches(event) {
            return Ok(Outcome::Ignored);
        }
        self.dlog(Phase::Evaluating, &[event]);
        if !self.settings.trigger.matches(event) {
            return Ok(Outcome::NotTriggered);
        }
        self.expand(surface)
    }

    /// Scans the active container and replaces its first resolvable keyword,
    /// without checking any trigger.
    pub fn expand<S>(&self, surface: &mut S) -> Result<Outcome, SurfaceError>
    where
        S: EditSurface + ?Sized,
    {
        let snapshot = surface.save_cursor()?;
        let container = surface.active_container()?;
        let text = surface.container_text(container)?;
        self.dlog(Phase::Scanning, &[&container, &text]);

        let Some(found) = matcher::find(&text, &self.settings.pattern) else {
            return Ok(Outcome::NoMatch);
        };
        self.dlog(Phase::Resolving, &[&found]);

        let Some(value) = self.settings.filters.get(&found.keyword) else {
            return Ok(Outcome::Unresolved {
                keyword: found.keyword,
            });
        };
        let replacement = format!("{value}{}", self.settings.append);

        // the first occurrence of the span, which is the match itself unless
        // the pattern is context sensitive
        let start = text.find(&found.full_span).unwrap_or(found.start);
        let end = start + found.full_span.len();
        let mut mutated = String::with_capacity(text.len() + replacement.len());
        mutated.push_str(&text[..start]);
        mutated.push_str(&replacement);
        mutated.push_str(&text[end..]);
        let splice = Splice {
            line: container,
            column: text[..start].chars().count(),
            removed: found.full_span.chars().count(),
            inserted: replacement.chars().count(),
        };
        self.dlog(Phase::Replacing, &[&found.full_span, &replacement]);
        surface.set_container_text(container, &mutated)?;

        let restored = snapshot.rebased(&splice);
        self.dlog(Phase::Restoring, &[&restored]);
        surface.restore_cursor(restored)?;

        Ok(Outcome::Replaced(Expansion {
            keyword: found.keyword,
            full_span: found.full_span,
            replacement,
            splice,
        }))
    }
}

impl Debug for ReplacementEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplacementEngine")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};
    use pretty_assertions::assert_eq;
    use rstest::*;

    use super::*;
    use crate::domain::ui::CursorPosition;
    use crate::test_helpers::{key_release, LineBuffer, RecordingStepLog};

    fn settings() -> Settings {
        Settings {
            filters: HashMap::from([
                ("hello".to_string(), "Hello there".to_string()),
                ("sig".to_string(), "Best,\u{a0}Ann".to_string()),
                ("a&b".to_string(), "ampersand".to_string()),
            ]),
            append: " ".to_string(),
            ..Default::default()
        }
    }

    fn brace() -> KeyEvent {
        key_release(KeyCode::Char('}'))
    }

    #[test]
    fn test_replaces_and_restores_cursor() -> Result<(), SurfaceError> {
        let engine = ReplacementEngine::new(settings());
        let mut buffer = LineBuffer::new("say {hello} now", CursorPosition::new(0, 11));

        let outcome = engine.handle_event(&brace(), &mut buffer)?;

        assert!(outcome.is_replaced());
        assert_eq!(buffer.text(), "say Hello there  now");
        assert_eq!(buffer.cursor(), CursorPosition::new(0, 16));
        Ok(())
    }

    #[test]
    fn test_unresolved_keyword_leaves_text() -> Result<(), SurfaceError> {
        let engine = ReplacementEngine::new(settings());
        let mut buffer = LineBuffer::new("say {bye} now", CursorPosition::new(0, 9));

        let outcome = engine.handle_event(&brace(), &mut buffer)?;

        assert_eq!(
            outcome,
            Outcome::Unresolved {
                keyword: "bye".to_string()
            }
        );
        assert_eq!(buffer.text(), "say {bye} now");
        assert_eq!(buffer.cursor(), CursorPosition::new(0, 9));
        assert_eq!(buffer.writes(), 0);
        Ok(())
    }

    #[rstest]
    #[case("plain text")]
    #[case("")]
    #[case("{} and {")]
    fn test_no_match_touches_nothing(#[case] text: &str) -> Result<(), SurfaceError> {
        let engine = ReplacementEngine::new(settings());
        let cursor = CursorPosition::new(0, text.chars().count());
        let mut buffer = LineBuffer::new(text, cursor);

        let outcome = engine.handle_event(&brace(), &mut buffer)?;

        assert_eq!(outcome, Outcome::NoMatch);
        assert_eq!(buffer.text(), text);
        assert_eq!(buffer.cursor(), cursor);
        assert_eq!(buffer.restores(), 0);
        Ok(())
    }

    #[test]
    fn test_only_first_span_is_replaced() -> Result<(), SurfaceError> {
        let engine = ReplacementEngine::new(settings());
        let mut buffer = LineBuffer::new("{hello} {sig}", CursorPosition::new(0, 13));

        engine.handle_event(&brace(), &mut buffer)?;

        assert_eq!(buffer.text(), "Hello there  {sig}");
        assert_eq!(buffer.cursor(), CursorPosition::new(0, 18));
        Ok(())
    }

    #[test]
    fn test_first_unresolved_span_blocks_later_spans() -> Result<(), SurfaceError> {
        let engine = ReplacementEngine::new(settings());
        let mut buffer = LineBuffer::new("{bye} {hello}", CursorPosition::new(0, 13));

        let outcome = engine.handle_event(&brace(), &mut buffer)?;

        assert!(!outcome.is_replaced());
        assert_eq!(buffer.text(), "{bye} {hello}");
        Ok(())
    }

    #[test]
    fn test_lookup_uses_decoded_keyword() -> Result<(), SurfaceError> {
        let engine = ReplacementEngine::new(settings());
        let mut buffer = LineBuffer::new("x {a&amp;b}", CursorPosition::new(0, 11));

        engine.handle_event(&brace(), &mut buffer)?;

        assert_eq!(buffer.text(), "x ampersand ");
        assert_eq!(buffer.cursor(), CursorPosition::new(0, 12));
        Ok(())
    }

    #[test]
    fn test_keywords_are_case_sensitive() -> Result<(), SurfaceError> {
        let engine = ReplacementEngine::new(settings());
        let mut buffer = LineBuffer::new("{Hello}", CursorPosition::new(0, 7));

        let outcome = engine.handle_event(&brace(), &mut buffer)?;

        assert!(matches!(outcome, Outcome::Unresolved { .. }));
        Ok(())
    }

    #[test]
    fn test_default_append_is_nbsp() -> Result<(), SurfaceError> {
        let mut settings = settings();
        settings.append = DEFAULT_APPEND.to_string();
        let engine = ReplacementEngine::new(settings);
        let mut buffer = LineBuffer::new("{hello}", CursorPosition::new(0, 7));

        engine.handle_event(&brace(), &mut buffer)?;

        assert_eq!(buffer.text(), "Hello there\u{a0}");
        Ok(())
    }

    #[test]
    fn test_only_active_line_changes() -> Result<(), SurfaceError> {
        let engine = ReplacementEngine::new(settings());
        let mut buffer = LineBuffer::from_lines(
            ["{hello} above", "and {sig}", "{hello} below"],
            CursorPosition::new(1, 9),
        );

        engine.handle_event(&brace(), &mut buffer)?;

        assert_eq!(buffer.text(), "{hello} above\nand Best,\u{a0}Ann \n{hello} below");
        assert_eq!(buffer.cursor(), CursorPosition::new(1, 14));
        Ok(())
    }

    #[test]
    fn test_cursor_before_span_stays() -> Result<(), SurfaceError> {
        let engine = ReplacementEngine::new(settings());
        let mut buffer = LineBuffer::new("ab {hello}", CursorPosition::new(0, 1));

        engine.handle_event(&brace(), &mut buffer)?;

        assert_eq!(buffer.text(), "ab Hello there ");
        assert_eq!(buffer.cursor(), CursorPosition::new(0, 1));
        Ok(())
    }

    #[test]
    fn test_selection_is_carried_through() -> Result<(), SurfaceError> {
        let engine = ReplacementEngine::new(settings());
        let mut buffer = LineBuffer::new("{hello} tail", CursorPosition::new(0, 12));
        buffer.select_from(CursorPosition::new(0, 8));

        engine.handle_event(&brace(), &mut buffer)?;

        assert_eq!(buffer.anchor(), Some(CursorPosition::new(0, 13)));
        assert_eq!(buffer.cursor(), CursorPosition::new(0, 17));
        Ok(())
    }

    #[rstest]
    #[case(key_release(KeyCode::Char(']')), Outcome::NotTriggered)]
    #[case(KeyEvent::new(KeyCode::Char('}'), KeyModifiers::NONE), Outcome::Ignored)]
    fn test_gated_events_touch_nothing(
        #[case] event: KeyEvent,
        #[case] expected: Outcome,
    ) -> Result<(), SurfaceError> {
        let engine = ReplacementEngine::new(settings());
        let mut buffer = LineBuffer::new("say {hello} now", CursorPosition::new(0, 11));

        let outcome = engine.handle_event(&event, &mut buffer)?;

        assert_eq!(outcome, expected);
        assert_eq!(buffer.text(), "say {hello} now");
        assert_eq!(buffer.saves(), 0);
        Ok(())
    }

    #[test]
    fn test_surface_error_propagates() {
        let engine = ReplacementEngine::new(settings());
        let mut buffer = LineBuffer::new("{hello}", CursorPosition::new(0, 7));
        buffer.fail_with(SurfaceError::NoSelection);

        let result = engine.handle_event(&brace(), &mut buffer);

        assert_eq!(result, Err(SurfaceError::NoSelection));
        assert_eq!(buffer.text(), "{hello}");
    }

    #[test]
    fn test_expand_skips_trigger() -> Result<(), SurfaceError> {
        let engine = ReplacementEngine::new(settings());
        let mut buffer = LineBuffer::new("{hello}", CursorPosition::new(0, 7));

        let outcome = engine.expand(&mut buffer)?;

        assert!(outcome.is_replaced());
        Ok(())
    }

    #[test]
    fn test_debug_logs_each_phase() -> Result<(), SurfaceError> {
        let log = Arc::new(RecordingStepLog::default());
        let settings = Settings {
            debug: true,
            ..settings()
        };
        let engine = ReplacementEngine::with_logger(settings, Arc::clone(&log) as SharedStepLog);
        let mut buffer = LineBuffer::new("{hello}", CursorPosition::new(0, 7));

        engine.handle_event(&brace(), &mut buffer)?;

        assert_eq!(
            log.tags(),
            vec!["evaluating", "scanning", "resolving", "replacing", "restoring"]
        );
        Ok(())
    }

    #[test]
    fn test_debug_skips_events_of_other_kinds() -> Result<(), SurfaceError> {
        let log = Arc::new(RecordingStepLog::default());
        let settings = Settings {
            debug: true,
            ..settings()
        };
        let engine = ReplacementEngine::with_logger(settings, Arc::clone(&log) as SharedStepLog);
        let mut buffer = LineBuffer::new("{hello}", CursorPosition::new(0, 7));

        let press = KeyEvent::new(KeyCode::Char('}'), KeyModifiers::NONE);
        assert_eq!(engine.handle_event(&press, &mut buffer)?, Outcome::Ignored);
        assert!(log.tags().is_empty());

        engine.handle_event(&key_release(KeyCode::Char('x')), &mut buffer)?;
        assert_eq!(log.tags(), vec!["evaluating"]);
        Ok(())
    }

    #[test]
    fn test_debug_disabled_is_silent() -> Result<(), SurfaceError> {
        let log = Arc::new(RecordingStepLog::default());
        let engine = ReplacementEngine::with_logger(settings(), Arc::clone(&log) as SharedStepLog);
        let mut buffer = LineBuffer::new("{hello}", CursorPosition::new(0, 7));

        engine.handle_event(&brace(), &mut buffer)?;

        assert!(log.tags().is_empty());
        Ok(())
    }

    #[test]
    fn test_options_defaults() -> Result<(), PatternError> {
        let settings = Options::default().into_settings()?;
        assert_eq!(settings, Settings::default());
        Ok(())
    }

    #[test]
    fn test_options_deserialize() -> Result<(), Box<dyn std::error::Error>> {
        let options: Options = json5::from_str(
            r#"{
                event: "keydown",
                trigger: { code: "space", modifiers: "ctrl" },
                filters: { hi: "Hi!" },
                match: "\\[\\[(\\w+)\\]\\]",
                append: "",
                DEBUG: true,
            }"#,
        )?;
        let settings = options.into_settings()?;
        assert_eq!(settings.event, EventKind::KeyDown);
        assert_eq!(settings.trigger.code(), Some(KeyCode::Char(' ')));
        assert_eq!(settings.filters.get("hi").map(String::as_str), Some("Hi!"));
        assert_eq!(settings.pattern.as_str(), r"\[\[(\w+)\]\]");
        assert_eq!(settings.append, "");
        assert!(settings.debug);
        Ok(())
    }

    #[test]
    fn test_options_or_merges_filters() {
        let user = Options {
            filters: Some(HashMap::from([("sig".to_string(), "mine".to_string())])),
            append: Some(String::new()),
            ..Default::default()
        };
        let defaults = Options {
            filters: Some(HashMap::from([
                ("sig".to_string(), "default".to_string()),
                ("hi".to_string(), "Hi!".to_string()),
            ])),
            append: Some(" ".to_string()),
            debug: Some(true),
            ..Default::default()
        };

        let merged = user.or(defaults);

        assert_eq!(
            merged.filters,
            Some(HashMap::from([
                ("sig".to_string(), "mine".to_string()),
                ("hi".to_string(), "Hi!".to_string()),
            ]))
        );
        assert_eq!(merged.append, Some(String::new()));
        assert_eq!(merged.debug, Some(true));
        assert_eq!(merged.event, None);
    }

    #[test]
    fn test_options_invalid_pattern() {
        let options = Options {
            pattern: Some("no groups".to_string()),
            ..Default::default()
        };
        assert_eq!(
            options.into_settings(),
            Err(PatternError::CaptureGroups(0))
        );
    }
}
