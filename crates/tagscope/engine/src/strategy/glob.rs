use glob::{MatchOptions, Pattern};
use tagscope_types::{ContentType, PatternOptions};
use tracing::warn;

use super::PatternMatch;
use crate::error::{MatcherError, MatcherResult};

/// Expand `{a,b}` alternatives into separate patterns.
///
/// Braces without a top-level comma are kept literally. An unclosed `{` is an error.
pub fn expand_braces(pattern: &str) -> Result<Vec<String>, String> {
    let Some(open) = pattern.find('{') else {
        return Ok(vec![pattern.to_string()]);
    };

    let mut depth = 0usize;
    let mut close = None;
    let mut commas = Vec::new();
    for (offset, c) in pattern[open..].char_indices() {
        let index = open + offset;
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(index);
                    break;
                }
            }
            ',' if depth == 1 => commas.push(index),
            _ => {}
        }
    }
    let close = close.ok_or_else(|| format!("unclosed '{{' at offset {open}"))?;

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];

    if commas.is_empty() {
        let literal = &pattern[open..=close];
        return Ok(expand_braces(suffix)?
            .into_iter()
            .map(|rest| format!("{prefix}{literal}{rest}"))
            .collect());
    }

    let mut expanded = Vec::new();
    let mut start = open + 1;
    for end in commas.into_iter().chain(std::iter::once(close)) {
        let alternative = &pattern[start..end];
        expanded.extend(expand_braces(&format!("{prefix}{alternative}{suffix}"))?);
        start = end + 1;
    }
    Ok(expanded)
}

/// Rewrite minimatch-style syntax the `glob` crate reads differently.
///
/// A `**` that is not a whole path segment matches like `*`, and `[^...]`
/// negates a class the same as `[!...]`.
pub fn normalize_glob(pattern: &str) -> String {
    pattern
        .split('/')
        .map(normalize_segment)
        .collect::<Vec<_>>()
        .join("/")
}

fn normalize_segment(segment: &str) -> String {
    let globstar = segment == "**";
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars().peekable();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '[' if !in_class => {
                in_class = true;
                out.push('[');
                if chars.next_if(|&n| n == '^' || n == '!').is_some() {
                    out.push('!');
                }
                // `]` right after the opening is a literal member
                if chars.next_if_eq(&']').is_some() {
                    out.push(']');
                }
            }
            ']' if in_class => {
                in_class = false;
                out.push(']');
            }
            '*' if !in_class && !globstar => {
                out.push('*');
                while chars.next_if_eq(&'*').is_some() {}
            }
            other => out.push(other),
        }
    }
    out
}

/// Glob matching over the whole path.
///
/// `*` and `?` stop at `/`, `**` spans directories, dotfiles match like any
/// other name. Negation is left to the `negative` option.
#[derive(Debug)]
pub struct GlobMatcher {
    patterns: Vec<Pattern>,
    match_options: MatchOptions,
    options: PatternOptions,
    target: ContentType,
}

impl GlobMatcher {
    pub fn new(pattern: &str, options: PatternOptions, target: ContentType) -> MatcherResult<Self> {
        if options.word_boundary {
            warn!(pattern = %pattern, "word_boundary is ignored for GLOB patterns");
        }

        let invalid = |message: String| MatcherError::InvalidGlob {
            pattern: pattern.to_string(),
            message,
        };

        let patterns = expand_braces(pattern)
            .map_err(invalid)?
            .iter()
            .map(|alternative| {
                Pattern::new(&normalize_glob(alternative)).map_err(|e| invalid(e.to_string()))
            })
            .collect::<MatcherResult<Vec<_>>>()?;

        Ok(Self {
            patterns,
            match_options: MatchOptions {
                case_sensitive: options.case_sensitive,
                require_literal_separator: true,
                require_literal_leading_dot: false,
            },
            options,
            target,
        })
    }
}

impl PatternMatch for GlobMatcher {
    fn target(&self) -> ContentType {
        self.target
    }

    fn options(&self) -> &PatternOptions {
        &self.options
    }

    fn is_match(&self, text: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| p.matches_with(text, self.match_options))
    }
}
