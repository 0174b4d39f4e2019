//! Ant-style Path Matcher
//!
//! # Pattern Syntax
//!
//! - `?` matches exactly one character
//! - `*` matches zero or more characters within a path segment
//! - `**` matches zero or more path segments
//! - `{name}` matches exactly one path segment
//!
//! Patterns are checked when parsed, so a rule table that loads never
//! contains a pattern that cannot be evaluated.
//!
//! # Examples
//!
//! ```rust
//! use actix_gate_core::http::security::ant_matcher::AntMatcher;
//!
//! let matcher = AntMatcher::parse("/employees/**").unwrap();
//! assert!(matcher.matches("/employees"));
//! assert!(matcher.matches("/employees/42/payslips"));
//! assert!(!matcher.matches("/register"));
//!
//! let matcher = AntMatcher::parse("/reports/*.pdf").unwrap();
//! assert!(matcher.matches("/reports/2024.pdf"));
//! assert!(!matcher.matches("/reports/2024/q1.pdf"));
//!
//! assert!(AntMatcher::parse("reports").is_err());
//! ```
//!
//! # Spring Equivalent
//!
//! `org.springframework.util.AntPathMatcher`

use crate::http::error::ConfigError;

/// A parsed Ant-style pattern.
#[derive(Debug, Clone)]
pub struct AntMatcher {
    pattern: String,
    segments: Vec<Segment>,
    case_sensitive: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    /// `*`
    AnySegment,
    /// `**`
    AnyDepth,
    /// A segment containing `*` or `?` among literal characters.
    Glob(Vec<char>),
    /// `{name}`
    Variable(String),
}

impl AntMatcher {
    /// Parses a pattern.
    ///
    /// Trailing and repeated slashes are ignored, so `/api/users/` and
    /// `/api/users` are the same pattern.
    ///
    /// # Errors
    /// [`ConfigError::InvalidPattern`] when the pattern does not start with
    /// `/`, uses `**` inside a segment, has an unbalanced or empty `{}`
    /// variable, or declares the same variable twice.
    pub fn parse(pattern: &str) -> Result<Self, ConfigError> {
        if !pattern.starts_with('/') {
            return Err(invalid(pattern, "must start with '/'"));
        }

        let mut segments = Vec::new();
        let mut variables: Vec<String> = Vec::new();

        for part in pattern.split('/').filter(|p| !p.is_empty()) {
            let segment = parse_segment(pattern, part)?;
            if let Segment::Variable(name) = &segment {
                if variables.contains(name) {
                    return Err(invalid(pattern, "path variable declared twice"));
                }
                variables.push(name.clone());
            }
            segments.push(segment);
        }

        Ok(Self {
            pattern: pattern.to_string(),
            segments,
            case_sensitive: true,
        })
    }

    /// Compares literal characters ignoring case, using Unicode lowercase
    /// mapping for literal and glob segments alike.
    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    /// The pattern as it was declared.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// True for `/**`, which matches every path.
    pub fn is_catch_all(&self) -> bool {
        matches!(self.segments.as_slice(), [Segment::AnyDepth])
    }

    /// True when the pattern has no wildcards or variables.
    pub fn is_literal(&self) -> bool {
        self.segments
            .iter()
            .all(|segment| matches!(segment, Segment::Literal(_)))
    }

    /// True when both patterns accept the same paths.
    ///
    /// Compares parsed segments, so repeated slashes and variable names do
    /// not matter. Case is ignored when either matcher ignores it.
    pub(crate) fn same_pattern(&self, other: &AntMatcher) -> bool {
        let fold = !(self.case_sensitive && other.case_sensitive);
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| same_segment(a, b, fold))
    }

    /// Checks whether `path` matches this pattern.
    ///
    /// ```rust
    /// use actix_gate_core::http::security::ant_matcher::AntMatcher;
    ///
    /// let matcher = AntMatcher::parse("/users/{id}/profile").unwrap();
    /// assert!(matcher.matches("/users/123/profile"));
    /// assert!(!matcher.matches("/users/profile"));
    /// ```
    pub fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        self.match_from(&self.segments, &parts)
    }

    fn match_from(&self, segments: &[Segment], parts: &[&str]) -> bool {
        let Some((head, rest)) = segments.split_first() else {
            return parts.is_empty();
        };

        if *head == Segment::AnyDepth {
            return (0..=parts.len()).any(|skip| self.match_from(rest, &parts[skip..]));
        }

        match parts.split_first() {
            Some((part, remaining)) => {
                self.segment_matches(head, part) && self.match_from(rest, remaining)
            }
            None => false,
        }
    }

    fn segment_matches(&self, segment: &Segment, part: &str) -> bool {
        match segment {
            Segment::AnySegment | Segment::AnyDepth | Segment::Variable(_) => true,
            Segment::Literal(literal) => {
                same_text(literal.chars(), part.chars(), self.case_sensitive)
            }
            Segment::Glob(glob) => {
                let text: Vec<char> = part.chars().collect();
                glob_matches(glob, &text, self.case_sensitive)
            }
        }
    }
}

fn same_segment(a: &Segment, b: &Segment, fold: bool) -> bool {
    match (a, b) {
        (Segment::Literal(a), Segment::Literal(b)) => same_text(a.chars(), b.chars(), !fold),
        (Segment::Glob(a), Segment::Glob(b)) => {
            same_text(a.iter().copied(), b.iter().copied(), !fold)
        }
        (
            Segment::AnySegment | Segment::Variable(_),
            Segment::AnySegment | Segment::Variable(_),
        ) => true,
        (Segment::AnyDepth, Segment::AnyDepth) => true,
        _ => false,
    }
}

fn same_char(a: char, b: char, case_sensitive: bool) -> bool {
    a == b || (!case_sensitive && a.to_lowercase().eq(b.to_lowercase()))
}

fn same_text<A, B>(a: A, b: B, case_sensitive: bool) -> bool
where
    A: Iterator<Item = char>,
    B: Iterator<Item = char>,
{
    if case_sensitive {
        a.eq(b)
    } else {
        a.flat_map(char::to_lowercase)
            .eq(b.flat_map(char::to_lowercase))
    }
}

fn invalid(pattern: &str, reason: &'static str) -> ConfigError {
    ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        reason,
    }
}

fn parse_segment(pattern: &str, part: &str) -> Result<Segment, ConfigError> {
    match part {
        "**" => return Ok(Segment::AnyDepth),
        "*" => return Ok(Segment::AnySegment),
        _ => {}
    }

    if part.contains('{') || part.contains('}') {
        let name = part
            .strip_prefix('{')
            .and_then(|p| p.strip_suffix('}'))
            .ok_or_else(|| invalid(pattern, "path variable must span a whole segment"))?;
        if name.is_empty() {
            return Err(invalid(pattern, "path variable needs a name"));
        }
        if name.contains(['{', '}', '*', '?']) {
            return Err(invalid(pattern, "malformed path variable"));
        }
        return Ok(Segment::Variable(name.to_string()));
    }

    if part.contains("**") {
        return Err(invalid(pattern, "'**' must span a whole segment"));
    }

    if part.contains(['*', '?']) {
        Ok(Segment::Glob(part.chars().collect()))
    } else {
        Ok(Segment::Literal(part.to_string()))
    }
}

/// Matches one segment against a glob, backtracking on the last `*` seen.
fn glob_matches(glob: &[char], text: &[char], case_sensitive: bool) -> bool {
    let (mut g, mut t) = (0usize, 0usize);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match glob.get(g).copied() {
            Some('*') => {
                backtrack = Some((g, t));
                g += 1;
            }
            Some(c) if c == '?' || same_char(c, text[t], case_sensitive) => {
                g += 1;
                t += 1;
            }
            _ => match backtrack {
                Some((star, consumed)) => {
                    backtrack = Some((star, consumed + 1));
                    g = star + 1;
                    t = consumed + 1;
                }
                None => return false,
            },
        }
    }

    glob[g..].iter().all(|&c| c == '*')
}
