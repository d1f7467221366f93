//! Exclude patterns for the input walk.
//!
//! Patterns are segment-oriented, not character-oriented: a pattern is split
//! on `/` and each segment is either a literal (exact, case-sensitive
//! equality), `*` (exactly one segment), or `**` (zero or more segments).
//! Anything that is not exactly `*` or `**` is a literal, so `*.*` matches
//! only a file literally named `*.*`. A pattern must consume the entire
//! candidate path; there is no substring matching.
//!
//! Patterns are parsed once when the run starts and are immutable afterward.

use crate::error::{DocprepError, Result};
use crate::relpath;

/// One path segment of a compiled exclude pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    AnyOne,
    AnySubpath,
}

/// A single compiled exclude pattern.
#[derive(Debug, Clone)]
pub struct ExcludePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl ExcludePattern {
    /// Parse a raw pattern string.
    ///
    /// Patterns are written in canonical relative form: no leading, trailing,
    /// or repeated separators. An empty pattern or an empty segment is
    /// rejected rather than silently matching nothing.
    pub fn parse(raw: &str) -> Result<ExcludePattern> {
        if raw.is_empty() {
            return Err(DocprepError::Pattern {
                pattern: raw.to_string(),
                reason: "pattern is empty".to_string(),
            });
        }

        let mut segments = Vec::new();
        for segment in raw.split('/') {
            match segment {
                "" => {
                    return Err(DocprepError::Pattern {
                        pattern: raw.to_string(),
                        reason: "pattern contains an empty segment".to_string(),
                    })
                }
                "*" => segments.push(Segment::AnyOne),
                "**" => segments.push(Segment::AnySubpath),
                literal => segments.push(Segment::Literal(literal.to_string())),
            }
        }

        Ok(ExcludePattern {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The pattern as originally written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether this pattern matches the whole of `path`.
    pub fn matches(&self, path: &str) -> bool {
        let normalized = relpath::normalize(path);
        let candidate: Vec<&str> = normalized
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();
        match_segments(&self.segments, &candidate)
    }
}

/// A compiled set of exclude patterns. The set matches a path when any of
/// its patterns does; an empty set matches nothing.
#[derive(Debug, Clone, Default)]
pub struct ExcludeSet {
    patterns: Vec<ExcludePattern>,
}

impl ExcludeSet {
    /// Compile raw pattern strings into a set. Fails on the first invalid
    /// pattern.
    pub fn compile<S: AsRef<str>>(raw_patterns: &[S]) -> Result<ExcludeSet> {
        let mut patterns = Vec::with_capacity(raw_patterns.len());
        for raw in raw_patterns {
            patterns.push(ExcludePattern::parse(raw.as_ref())?);
        }
        Ok(ExcludeSet { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether any pattern in the set matches `path`.
    pub fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(path))
    }
}

/// Recursive segment walker. `**` tries every split point, which gives the
/// zero-or-more-segments semantics; the other segment kinds consume exactly
/// one candidate segment each.
fn match_segments(pattern: &[Segment], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((Segment::AnySubpath, rest)) => {
            (0..=path.len()).any(|skip| match_segments(rest, &path[skip..]))
        }
        Some((Segment::AnyOne, rest)) => match path.split_first() {
            Some((_, tail)) => match_segments(rest, tail),
            None => false,
        },
        Some((Segment::Literal(literal), rest)) => match path.split_first() {
            Some((head, tail)) => literal == head && match_segments(rest, tail),
            None => false,
        },
    }
}
