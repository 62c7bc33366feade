//! Error types for attachment, dispatch and surface access.
//!
//! A keyword that has no match, or that is not present in the lookup table,
//! is never an error: both are reported as [`crate::core::engine::Outcome`]
//! variants.

/// Misuse of the named dispatch surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    /// A named method was invoked on a target with no attached engine.
    #[error("engine must be attached before using method: {0}")]
    NotInitialised(String),

    /// The method name carries the internal marker prefix.
    #[error("method {0} is private")]
    PrivateMethod(String),

    /// No public method with this name exists.
    #[error("method {0} does not exist")]
    NoSuchMethod(String),
}

/// Failure reported by an [`crate::core::surface::EditSurface`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("no active selection")]
    NoSelection,

    #[error("no container at line {line}")]
    ContainerMissing { line: usize },
}

/// Invalid delimiter pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("invalid delimiter pattern: {0}")]
    Regex(String),

    /// The pattern must have exactly one capture group for the keyword.
    #[error("delimiter pattern must have exactly one capture group, found {0}")]
    CaptureGroups(usize),

    #[error("delimiter pattern must not match the empty string")]
    MatchesEmpty,
}

/// Invalid trigger definition, reported while deserializing options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TriggerError {
    #[error("unknown key code: {0}")]
    KeyCode(String),

    #[error("unknown modifier: {0}")]
    Modifier(String),
}

/// Any error surfaced by the library.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_usage_error_messages() {
        assert_eq!(
            UsageError::NotInitialised("_triggerEvent".into()).to_string(),
            "engine must be attached before using method: _triggerEvent"
        );
        assert_eq!(
            UsageError::PrivateMethod("_bind".into()).to_string(),
            "method _bind is private"
        );
        assert_eq!(
            UsageError::NoSuchMethod("doStuff".into()).to_string(),
            "method doStuff does not exist"
        );
    }

    #[test]
    fn test_error_is_transparent() {
        let err: Error = SurfaceError::ContainerMissing { line: 3 }.into();
        assert_eq!(err.to_string(), "no container at line 3");
    }
}
