//! Attachment of engines to editable targets.
//!
//! Each target owns at most one [`ReplacementEngine`]. Targets share nothing;
//! attaching again detaches the previous engine first.

use std::collections::HashMap;
use std::fmt;

use crossterm::event::KeyEvent;
use tracing::debug;

use crate::core::engine::{Options, Outcome, ReplacementEngine, Settings, SharedStepLog};
use crate::core::surface::EditSurface;
use crate::error::{Error, UsageError};

/// Marks methods that cannot be invoked by name.
pub const PRIVATE_PREFIX: char = '_';

/// Identity of an editable target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetId(String);

impl TargetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TargetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An invocation of the dispatch surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call<'a> {
    /// Attach (or re-attach) with the given options, defaults when `None`.
    Init(Option<Options>),
    /// Invoke a named method on the attached engine.
    Method(&'a str),
}

impl<'a> From<&'a str> for Call<'a> {
    fn from(name: &'a str) -> Self {
        Call::Method(name)
    }
}

impl From<Options> for Call<'_> {
    fn from(options: Options) -> Self {
        Call::Init(Some(options))
    }
}

/// What a dispatched call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    Attached,
    /// Whether an engine was actually removed.
    Detached(bool),
    Expanded(Outcome),
    Settings(Box<Settings>),
}

#[derive(Default)]
pub struct Registry {
    engines: HashMap<TargetId, ReplacementEngine>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, target: TargetId, options: Options) -> Result<(), Error> {
        let settings = options.into_settings()?;
        self.install(target, ReplacementEngine::new(settings));
        Ok(())
    }

    pub fn attach_with_logger(
        &mut self,
        target: TargetId,
        options: Options,
        log: SharedStepLog,
    ) -> Result<(), Error> {
        let settings = options.into_settings()?;
        self.install(target, ReplacementEngine::with_logger(settings, log));
        Ok(())
    }

    fn install(&mut self, target: TargetId, engine: ReplacementEngine) {
        self.detach(&target);
        debug!(id = %target, event = %engine.settings().event, "attached");
        self.engines.insert(target, engine);
    }

    /// Removes the target's engine. Detaching an unattached target is a no-op.
    pub fn detach(&mut self, target: &TargetId) -> bool {
        let removed = self.engines.remove(target).is_some();
        if removed {
            debug!(id = %target, "detached");
        }
        removed
    }

    pub fn is_attached(&self, target: &TargetId) -> bool {
        self.engines.contains_key(target)
    }

    pub fn engine(&self, target: &TargetId) -> Option<&ReplacementEngine> {
        self.engines.get(target)
    }

    pub fn settings(&self, target: &TargetId) -> Option<&Settings> {
        self.engine(target).map(ReplacementEngine::settings)
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    /// Delivers a key event to the target's engine.
    pub fn handle_event<S>(
        &self,
        target: &TargetId,
        event: &KeyEvent,
        surface: &mut S,
    ) -> Result<Outcome, Error>
    where
        S: EditSurface + ?Sized,
    {
        match self.engines.get(target) {
            Some(engine) => Ok(engine.handle_event(event, surface)?),
            None => Ok(Outcome::Unbound),
        }
    }

    /// Named entry point mirroring [`Call`].
    ///
    /// Public methods are `init`, `detach`, `expand` and `settings`.
    pub fn dispatch<S>(
        &mut self,
        target: &TargetId,
        call: Call<'_>,
        surface: &mut S,
    ) -> Result<Dispatched, Error>
    where
        S: EditSurface + ?Sized,
    {
        let name = match call {
            Call::Init(options) => {
                self.attach(target.clone(), options.unwrap_or_default())?;
                return Ok(Dispatched::Attached);
            }
            Call::Method(name) => name,
        };

        let Some(engine) = self.engines.get(target) else {
            return Err(UsageError::NotInitialised(name.to_string()).into());
        };
        if name.starts_with(PRIVATE_PREFIX) {
            return Err(UsageError::PrivateMethod(name.to_string()).into());
        }

        match name {
            "init" => {
                let engine = ReplacementEngine::with_logger(engine.settings().clone(), engine.logger());
                self.install(target.clone(), engine);
                Ok(Dispatched::Attached)
            }
            "detach" => Ok(Dispatched::Detached(self.detach(target))),
            "expand" => Ok(Dispatched::Expanded(engine.expand(surface)?)),
            "settings" => Ok(Dispatched::Settings(Box::new(engine.settings().clone()))),
            _ => Err(UsageError::NoSuchMethod(name.to_string()).into()),
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("targets", &self.engines.keys().collect::<Vec<_>>())
            .finish()
    }
}
