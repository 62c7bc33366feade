//! Delimited keyword detection.
//!
//! A [`DelimiterPattern`] is a regular expression with exactly one capture
//! group that marks the keyword inside its delimiters, e.g. `\{([^{}<>]+)\}`
//! for `{keyword}`. [`find`] returns the leftmost match only; a single
//! trigger never acts on more than one span.

use std::borrow::Cow;
use std::fmt;

use regex::Regex;
use serde::Deserialize;

use crate::error::PatternError;

/// Text wrapped in `{ }` without nested braces or angle brackets.
pub const DEFAULT_PATTERN: &str = r"\{([^{}<>]+)\}";

/// A validated delimiter pattern.
#[derive(Clone, Deserialize)]
#[serde(try_from = "String")]
pub struct DelimiterPattern {
    regex: Regex,
}

impl DelimiterPattern {
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(pattern).map_err(|e| PatternError::Regex(e.to_string()))?;
        // captures_len includes the implicit whole-match group
        let groups = regex.captures_len() - 1;
        if groups != 1 {
            return Err(PatternError::CaptureGroups(groups));
        }
        if regex.is_match("") {
            return Err(PatternError::MatchesEmpty);
        }
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Default for DelimiterPattern {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN).expect("default delimiter pattern is valid")
    }
}

impl TryFrom<String> for DelimiterPattern {
    type Error = PatternError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl fmt::Debug for DelimiterPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DelimiterPattern")
            .field(&self.regex.as_str())
            .finish()
    }
}

impl PartialEq for DelimiterPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for DelimiterPattern {}

/// The first delimited keyword found in a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Delimiters and keyword exactly as they appear in the text.
    pub full_span: String,
    /// The captured keyword after entity decoding.
    pub keyword: String,
    /// Byte offset of `full_span` in the scanned text.
    pub start: usize,
    pub end: usize,
}

/// Finds the leftmost delimited keyword in `text`.
///
/// The scan always starts at the beginning of `text`.
pub fn find(text: &str, pattern: &DelimiterPattern) -> Option<MatchResult> {
    let captures = pattern.regex.captures(text)?;
    let full = captures.get(0)?;
    let keyword = captures.get(1)?;
    Some(MatchResult {
        full_span: full.as_str().to_string(),
        keyword: decode_entities(keyword.as_str()).into_owned(),
        start: full.start(),
        end: full.end(),
    })
}

/// Decodes HTML entities such as `&amp;` or `&#123;`.
///
/// Text without entities is returned unchanged.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(text)
}
