//! Query layer: tokenizer and token matcher.
//!
//! A raw query string is lower-cased and split on the literal space
//! character. Every resulting token is a regular-expression pattern that
//! must be *found* (not fully matched) in a haystack; a haystack matches the
//! query when every token is found (AND semantics, no OR mode).
//!
//! Tokens are compiled once per filter pass by [`Matcher::new`]. A token that
//! does not compile never matches, so a malformed query narrows the result
//! to nothing instead of aborting the pass.

use regex::{Regex, RegexBuilder};
use std::ops::Range;

/// Longest token accepted as a pattern. Longer tokens never match.
pub const MAX_TOKEN_LENGTH: usize = 500;

/// Upper bound on the compiled size of a single token pattern.
const TOKEN_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Split a raw query into lower-case tokens.
///
/// An empty input yields no tokens, which disables filtering. Otherwise the
/// input is split on `' '` only: consecutive spaces produce empty tokens,
/// and an empty token is found in every haystack.
pub fn tokenize(raw: &str) -> Vec<String> {
    let lowered = raw.to_lowercase();
    if lowered.is_empty() {
        return Vec::new();
    }
    lowered.split(' ').map(str::to_string).collect()
}

/// A tokenized query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    tokens: Vec<String>,
}

impl Query {
    pub fn parse(raw: &str) -> Self {
        Self {
            tokens: tokenize(raw),
        }
    }

    pub fn from_tokens(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Search mode is on whenever at least one token is present.
    pub fn is_search_mode(&self) -> bool {
        !self.tokens.is_empty()
    }

    pub fn matcher(&self) -> Matcher {
        Matcher::new(&self.tokens)
    }
}

/// Token patterns compiled for one filter pass.
///
/// Slots are kept in token order; a `None` slot is a token that failed to
/// compile and therefore never matches.
#[derive(Debug, Clone)]
pub struct Matcher {
    patterns: Vec<Option<Regex>>,
}

impl Matcher {
    pub fn new<S: AsRef<str>>(tokens: &[S]) -> Self {
        let patterns = tokens.iter().map(|t| compile_token(t.as_ref())).collect();
        Self { patterns }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True iff every token is found in `haystack`.
    ///
    /// Stops at the first token that is not found. With no tokens this is
    /// vacuously true. The haystack is expected to be lower-cased already.
    pub fn matches_all(&self, haystack: &str) -> bool {
        self.patterns.iter().all(|slot| match slot {
            Some(re) => re.is_match(haystack),
            None => false,
        })
    }

    /// Byte ranges of `haystack` covered by any token, sorted and merged.
    ///
    /// Used for highlighting; empty matches are skipped.
    pub fn spans(&self, haystack: &str) -> Vec<Range<usize>> {
        let mut spans: Vec<Range<usize>> = self
            .patterns
            .iter()
            .flatten()
            .flat_map(|re| re.find_iter(haystack).map(|m| m.range()))
            .filter(|r| !r.is_empty())
            .collect();
        spans.sort_by_key(|r| r.start);

        let mut merged: Vec<Range<usize>> = Vec::with_capacity(spans.len());
        for r in spans {
            match merged.last_mut() {
                Some(last) if r.start <= last.end => last.end = last.end.max(r.end),
                _ => merged.push(r),
            }
        }
        merged
    }
}

/// One-shot form of [`Matcher::matches_all`] for callers holding raw tokens.
pub fn matches_all<S: AsRef<str>>(tokens: &[S], haystack: &str) -> bool {
    Matcher::new(tokens).matches_all(haystack)
}

fn compile_token(token: &str) -> Option<Regex> {
    if token.len() > MAX_TOKEN_LENGTH {
        tracing::warn!(
            len = token.len(),
            max = MAX_TOKEN_LENGTH,
            "query token too long; treating as non-matching"
        );
        return None;
    }
    match RegexBuilder::new(token).size_limit(TOKEN_SIZE_LIMIT).build() {
        Ok(re) => Some(re),
        Err(err) => {
            tracing::warn!(token, error = %err, "query token is not a valid pattern; treating as non-matching");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
