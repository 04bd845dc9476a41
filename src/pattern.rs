//! Route path patterns.
//!
//! A pattern is a `/`-separated template whose segments are either literals
//! or named captures written `:name`:
//!
//! ```text
//! Pattern: /hey/:name
//!
//!  /hey/Keiko        match, name = "Keiko"
//!  /hey              no match (segment count differs)
//!  /hey/Keiko/x      no match (segment count differs)
//!  /hey/             no match (captures never bind an empty segment)
//! ```
//!
//! There are no wildcards or optional segments. A single-capture pattern such
//! as `/:greeting` therefore matches *every* one-segment path, which is why
//! the [`Router`](crate::Router) tries routes strictly in registration order.

use std::fmt;

use thiserror::Error;

use crate::params::Params;

const CAPTURE_MARKER: char = ':';

/// Reasons a pattern string is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern must start with `/`")]
    MissingLeadingSlash,
    #[error("capture at segment {0} has no name")]
    EmptyCapture(usize),
    #[error("capture `{0}` appears more than once")]
    DuplicateCapture(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Capture(String),
}

/// A parsed route pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoutePattern {
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parses `pattern` into literal and capture segments.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let rest = pattern.strip_prefix('/').ok_or(PatternError::MissingLeadingSlash)?;

        let mut segments = Vec::new();
        for (i, raw) in rest.split('/').enumerate() {
            let segment = match raw.strip_prefix(CAPTURE_MARKER) {
                Some("") => return Err(PatternError::EmptyCapture(i)),
                Some(name) => {
                    let taken = segments.iter().any(|s| matches!(s, Segment::Capture(n) if n == name));
                    if taken {
                        return Err(PatternError::DuplicateCapture(name.to_owned()));
                    }
                    Segment::Capture(name.to_owned())
                }
                None => Segment::Literal(raw.to_owned()),
            };
            segments.push(segment);
        }

        Ok(Self { segments })
    }

    /// Matches a concrete request path (no query string).
    ///
    /// Returns the captured values, or `None` when the path does not fit.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let rest = path.strip_prefix('/')?;
        let mut concrete = rest.split('/');
        let mut captures = Params::new();

        for segment in &self.segments {
            let value = concrete.next()?;
            match segment {
                Segment::Literal(lit) if lit == value => {}
                Segment::Literal(_) => return None,
                Segment::Capture(_) if value.is_empty() => return None,
                Segment::Capture(name) => captures.insert(name.as_str(), value),
            }
        }

        // Leftover segments mean the path is longer than the pattern.
        if concrete.next().is_some() {
            return None;
        }
        Some(captures)
    }

    /// Number of `/`-separated segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Literal(lit) => write!(f, "/{lit}")?,
                Segment::Capture(name) => write!(f, "/{CAPTURE_MARKER}{name}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(s: &str) -> RoutePattern {
        RoutePattern::parse(s).unwrap()
    }

    #[test]
    fn literal_pattern_matches_exactly() {
        let p = pattern("/hello");
        assert_eq!(p.matches("/hello"), Some(Params::new()));
        assert_eq!(p.matches("/hello2"), None);
        assert_eq!(p.matches("/Hello"), None);
    }

    #[test]
    fn capture_binds_segment_verbatim() {
        let captures = pattern("/getData/:publicKey").matches("/getData/ke%20iko").unwrap();
        assert_eq!(captures.get("publicKey"), Some("ke%20iko"));
    }

    #[test]
    fn segment_count_must_agree() {
        let p = pattern("/hey/:name");
        assert!(p.matches("/hey").is_none());
        assert!(p.matches("/hey/a/b").is_none());
        assert!(p.matches("/hey/a/").is_none());

        let catch_all = pattern("/:aisatsu");
        assert!(catch_all.matches("/Good").is_some());
        assert!(catch_all.matches("/Good/morning").is_none());
    }

    #[test]
    fn captures_never_bind_empty_segments() {
        assert!(pattern("/:aisatsu").matches("/").is_none());
        assert!(pattern("/hey/:name").matches("/hey/").is_none());
    }

    #[test]
    fn root_pattern_matches_root_only() {
        let p = pattern("/");
        assert!(p.matches("/").is_some());
        assert!(p.matches("/x").is_none());
    }

    #[test]
    fn multiple_captures_are_all_bound() {
        let captures = pattern("/users/:user/posts/:post").matches("/users/7/posts/9").unwrap();
        assert_eq!(captures.get("user"), Some("7"));
        assert_eq!(captures.get("post"), Some("9"));
    }

    #[test]
    fn rejects_invalid_patterns() {
        assert_eq!(RoutePattern::parse("hello"), Err(PatternError::MissingLeadingSlash));
        assert_eq!(RoutePattern::parse("/a/:"), Err(PatternError::EmptyCapture(1)));
        assert_eq!(
            RoutePattern::parse("/:id/x/:id"),
            Err(PatternError::DuplicateCapture("id".into())),
        );
    }

    #[test]
    fn display_round_trips_source() {
        assert_eq!(pattern("/articles/:id").to_string(), "/articles/:id");
        assert_eq!(pattern("/articles/:id").len(), 2);
    }
}
