//! Filename matching and destination rendering.
//!
//! This module provides the `PathTemplate` type, which combines a compiled
//! regular expression with an optional destination template. The pattern is
//! matched against the filename component of a candidate path (never the
//! directory prefix), and the template renders a destination name by
//! substituting the match's capture groups into positional placeholders.
//!
//! # Placeholder syntax
//!
//! The destination template uses `{}` for the next capture group in
//! sequence, or `{i}` for an explicit group (0-indexed over capture
//! groups). Literal braces are written as `{{` and `}}`.

use regex::Regex;
use std::path::{Path, PathBuf};

/// Errors that can occur while compiling a pattern or template.
#[derive(Debug, Clone)]
pub enum TemplateError {
    /// The user-supplied regular expression failed to compile.
    InvalidPattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// The compile error reported by the regex engine.
        reason: String,
    },
    /// A `{` placeholder was opened but never closed.
    UnclosedPlaceholder { template: String },
    /// A `}` appeared outside any placeholder (and was not escaped as `}}`).
    UnmatchedBrace { template: String },
    /// A placeholder contained something other than a decimal group index.
    InvalidGroupIndex { token: String },
    /// The template references a capture group the pattern does not produce.
    GroupOutOfRange {
        /// The 0-indexed group the template asked for.
        index: usize,
        /// How many capture groups the pattern actually has.
        available: usize,
    },
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::InvalidPattern { pattern, reason } => {
                write!(f, "Invalid pattern '{}': {}", pattern, reason)
            }
            TemplateError::UnclosedPlaceholder { template } => {
                write!(f, "Unclosed '{{' in output template '{}'", template)
            }
            TemplateError::UnmatchedBrace { template } => {
                write!(f, "Unmatched '}}' in output template '{}'", template)
            }
            TemplateError::InvalidGroupIndex { token } => {
                write!(f, "Invalid group index '{{{}}}' in output template", token)
            }
            TemplateError::GroupOutOfRange { index, available } => {
                write!(
                    f,
                    "Output template references group {} but the pattern captures only {} group{}",
                    index,
                    available,
                    if *available == 1 { "" } else { "s" }
                )
            }
        }
    }
}

impl std::error::Error for TemplateError {}

/// Result type for template compilation and rendering.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// One parsed piece of an output template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Verbatim text, `{{`/`}}` already unescaped.
    Literal(String),
    /// A positional placeholder, 0-indexed over capture groups.
    Group(usize),
}

/// A pre-parsed destination template.
///
/// Parsing happens once at construction so malformed templates are rejected
/// before any file is touched; rendering is then a pure substitution over
/// the segments.
#[derive(Debug, Clone)]
pub struct OutputTemplate {
    segments: Vec<Segment>,
    /// Highest group index any placeholder references, if there is one.
    max_group: Option<usize>,
}

impl OutputTemplate {
    /// Parses a template string into segments.
    ///
    /// `{}` placeholders are assigned sequential group indices in order of
    /// appearance; `{i}` placeholders name their group explicitly. The two
    /// forms may be mixed, but sequential numbering is independent of any
    /// explicit indices (as in Python's `str.format`, the source of this
    /// syntax).
    ///
    /// # Errors
    ///
    /// Returns a `TemplateError` for unclosed or unmatched braces and for
    /// non-numeric placeholder contents.
    pub fn parse(template: &str) -> TemplateResult<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut max_group = None;
        let mut next_auto = 0usize;

        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '{' => {
                    if chars.peek() == Some(&'{') {
                        chars.next();
                        literal.push('{');
                        continue;
                    }
                    let mut token = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) => token.push(c),
                            None => {
                                return Err(TemplateError::UnclosedPlaceholder {
                                    template: template.to_string(),
                                });
                            }
                        }
                    }
                    let index = if token.is_empty() {
                        let i = next_auto;
                        next_auto += 1;
                        i
                    } else {
                        token
                            .parse::<usize>()
                            .map_err(|_| TemplateError::InvalidGroupIndex { token })?
                    };
                    max_group = Some(max_group.map_or(index, |m: usize| m.max(index)));
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Group(index));
                }
                '}' => {
                    if chars.peek() == Some(&'}') {
                        chars.next();
                        literal.push('}');
                    } else {
                        return Err(TemplateError::UnmatchedBrace {
                            template: template.to_string(),
                        });
                    }
                }
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            segments,
            max_group,
        })
    }

    /// Renders the template by substituting each placeholder with its group.
    ///
    /// Pure function of the groups and the parsed segments: rendering the
    /// same groups twice always yields the same string. Group indices are
    /// validated against the pattern at `PathTemplate` construction, so the
    /// slice access here cannot go out of range in normal use.
    fn render(&self, groups: &[&str]) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Group(i) => out.push_str(groups.get(*i).copied().unwrap_or("")),
            }
        }
        out
    }
}

/// A compiled filename pattern with an optional destination template.
///
/// The pattern matches at the start of the filename (not full containment,
/// and not requiring the whole name to be consumed). Move and Copy carry a
/// destination template; Delete and List carry none and `render` returns
/// no destination for them.
#[derive(Debug)]
pub struct PathTemplate {
    regex: Regex,
    output: Option<OutputTemplate>,
}

impl PathTemplate {
    /// Compiles a pattern and an optional destination template.
    ///
    /// The user pattern is wrapped as `^(?:pattern)` to anchor matching at
    /// the start of the filename without disturbing capture-group
    /// numbering. Group references in the template are validated against
    /// the pattern's capture count here, so an out-of-range reference
    /// aborts the run before any enumeration happens.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::InvalidPattern` if the regex does not
    /// compile, any parse error from `OutputTemplate::parse`, or
    /// `TemplateError::GroupOutOfRange` if the template names a group the
    /// pattern cannot produce.
    pub fn new(pattern: &str, template: Option<&str>) -> TemplateResult<Self> {
        let regex =
            Regex::new(&format!("^(?:{})", pattern)).map_err(|e| TemplateError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;

        let output = template.map(OutputTemplate::parse).transpose()?;

        // captures_len counts the implicit whole-match group 0.
        let available = regex.captures_len() - 1;
        if let Some(ref out) = output
            && let Some(max) = out.max_group
            && max >= available
        {
            return Err(TemplateError::GroupOutOfRange {
                index: max,
                available,
            });
        }

        Ok(Self { regex, output })
    }

    /// Returns true when a destination template is configured.
    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }

    /// Matches the filename component of a candidate path.
    ///
    /// Returns the capture groups (0-indexed, whole match excluded) on a
    /// match, or `None` when the filename does not match at its start.
    /// Groups that did not participate in the match render as empty.
    pub fn matches<'a>(&self, file_name: &'a str) -> Option<Vec<&'a str>> {
        let captures = self.regex.captures(file_name)?;
        Some(
            captures
                .iter()
                .skip(1)
                .map(|m| m.map_or("", |m| m.as_str()))
                .collect(),
        )
    }

    /// Renders a destination path for a match, preserving the candidate's
    /// directory prefix.
    ///
    /// Returns `None` when no destination template is configured (Delete
    /// and List): the candidate qualifies but has no rename target.
    pub fn render(&self, directory: &Path, groups: &[&str]) -> Option<PathBuf> {
        self.output
            .as_ref()
            .map(|template| directory.join(template.render(groups)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_anchors_at_start() {
        let template = PathTemplate::new("report", None).unwrap();
        assert!(template.matches("report1.csv").is_some());
        assert!(template.matches("old_report.csv").is_none());
    }

    #[test]
    fn test_match_does_not_require_full_consumption() {
        let template = PathTemplate::new(r"tmp_", None).unwrap();
        assert!(template.matches("tmp_a").is_some());
        assert!(template.matches("tmp_").is_some());
    }

    #[test]
    fn test_capture_groups_exclude_whole_match() {
        let template = PathTemplate::new(r"report(\d)\.csv", None).unwrap();
        let groups = template.matches("report1.csv").unwrap();
        assert_eq!(groups, vec!["1"]);
    }

    #[test]
    fn test_render_sequential_placeholders() {
        let template = PathTemplate::new(r"(\w+)-(\d+)", Some("{}_{}.bak")).unwrap();
        let groups = template.matches("photo-42").unwrap();
        let dest = template.render(Path::new(""), &groups).unwrap();
        assert_eq!(dest, PathBuf::from("photo_42.bak"));
    }

    #[test]
    fn test_render_explicit_indices_reorder_groups() {
        let template = PathTemplate::new(r"(\w+)-(\d+)", Some("{1}-{0}")).unwrap();
        let groups = template.matches("photo-42").unwrap();
        let dest = template.render(Path::new(""), &groups).unwrap();
        assert_eq!(dest, PathBuf::from("42-photo"));
    }

    #[test]
    fn test_render_preserves_directory_prefix() {
        let template = PathTemplate::new(r"(a)\.txt", Some("{0}.bak")).unwrap();
        let groups = template.matches("a.txt").unwrap();
        let dest = template.render(Path::new("sub/dir"), &groups).unwrap();
        assert_eq!(dest, PathBuf::from("sub/dir/a.bak"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let template = PathTemplate::new(r"(\w+)\.log", Some("archive_{0}.log")).unwrap();
        let groups = template.matches("app.log").unwrap();
        let first = template.render(Path::new("logs"), &groups);
        let second = template.render(Path::new("logs"), &groups);
        assert_eq!(first, second);
    }

    #[test]
    fn test_escaped_braces_are_literal() {
        let template = PathTemplate::new(r"(x)", Some("{{{0}}}")).unwrap();
        let groups = template.matches("x").unwrap();
        let dest = template.render(Path::new(""), &groups).unwrap();
        assert_eq!(dest, PathBuf::from("{x}"));
    }

    #[test]
    fn test_no_output_template_renders_no_destination() {
        let template = PathTemplate::new(r"tmp_", None).unwrap();
        assert!(!template.has_output());
        let groups = template.matches("tmp_a").unwrap();
        assert!(template.render(Path::new(""), &groups).is_none());
    }

    #[test]
    fn test_nonparticipating_group_renders_empty() {
        let template = PathTemplate::new(r"(a)|(b)", Some("{0}{1}.out")).unwrap();
        let groups = template.matches("a").unwrap();
        let dest = template.render(Path::new(""), &groups).unwrap();
        assert_eq!(dest, PathBuf::from("a.out"));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let result = PathTemplate::new("[invalid(", None);
        assert!(matches!(
            result,
            Err(TemplateError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_group_out_of_range_is_rejected_at_construction() {
        let result = PathTemplate::new(r"report(\d)\.csv", Some("{0}_{1}.csv"));
        assert!(matches!(
            result,
            Err(TemplateError::GroupOutOfRange {
                index: 1,
                available: 1
            })
        ));
    }

    #[test]
    fn test_sequential_placeholder_beyond_captures_is_rejected() {
        let result = PathTemplate::new(r"(\d)", Some("{}-{}"));
        assert!(matches!(result, Err(TemplateError::GroupOutOfRange { .. })));
    }

    #[test]
    fn test_unclosed_placeholder_is_rejected() {
        let result = OutputTemplate::parse("archive_{0.csv");
        assert!(matches!(
            result,
            Err(TemplateError::UnclosedPlaceholder { .. })
        ));
    }

    #[test]
    fn test_unmatched_closing_brace_is_rejected() {
        let result = OutputTemplate::parse("archive}.csv");
        assert!(matches!(result, Err(TemplateError::UnmatchedBrace { .. })));
    }

    #[test]
    fn test_non_numeric_placeholder_is_rejected() {
        let result = OutputTemplate::parse("{name}.csv");
        assert!(matches!(
            result,
            Err(TemplateError::InvalidGroupIndex { .. })
        ));
    }
}
