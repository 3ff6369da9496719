//! Attribute name interning registry.
//!
//! The wire protocol substitutes real attribute names with `#attr<N>`
//! placeholders so reserved words and exotic characters never appear in
//! expression text. The registry hands out one placeholder per unique
//! interned unit and remembers the substitution for the final wire map.

use std::collections::HashMap;

use crate::error::ExpressionError;
use crate::path::{Path, PathSegment, parse_segments};

/// Key for one interned unit: a named segment (structured mode) or a whole
/// path string (literal mode). The two modes never share placeholders, even
/// for identical text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct NameUnit {
    literal: bool,
    name: String,
}

/// Interning registry for attribute name placeholders.
///
/// Created empty at the start of one compile call, mutated only by
/// interning during rendering, and consumed once at the end to produce the
/// wire-format substitution map. A single monotonic counter numbers units
/// across both interpretation modes.
#[derive(Debug, Default)]
pub struct NameRegistry {
    tokens: HashMap<NameUnit, String>,
    /// Substitutions in issue order: (token, original segment or path).
    substitutions: Vec<(String, String)>,
}

impl NameRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a path, returning its placeholder-substituted rendering.
    ///
    /// In structured mode every named segment is interned independently and
    /// the result re-joins the substituted segments with the original `.`
    /// and `[idx]` structure (`user.tags[0]` becomes `#attr1.#attr2[0]`).
    /// In literal mode the whole string is one unit and the result is a
    /// single placeholder.
    ///
    /// Interning is idempotent: repeats of a unit return its existing
    /// placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::PathSyntax`] when the path violates the
    /// structured grammar, or is empty in either mode.
    pub fn intern(&mut self, path: &Path) -> Result<String, ExpressionError> {
        if path.is_literal() {
            if path.as_str().is_empty() {
                return Err(ExpressionError::PathSyntax {
                    path: String::new(),
                    reason: "path is empty".to_owned(),
                });
            }
            return Ok(self.intern_unit(true, path.as_str()));
        }

        let segments = parse_segments(path.as_str())?;
        let mut rendered = String::new();
        for segment in &segments {
            match segment {
                PathSegment::Attribute(name) => {
                    if !rendered.is_empty() {
                        rendered.push('.');
                    }
                    rendered.push_str(&self.intern_unit(false, name));
                }
                PathSegment::Index(idx) => {
                    rendered.push('[');
                    rendered.push_str(&idx.to_string());
                    rendered.push(']');
                }
            }
        }
        Ok(rendered)
    }

    /// Intern one unit, reusing its placeholder if already seen.
    fn intern_unit(&mut self, literal: bool, name: &str) -> String {
        let unit = NameUnit {
            literal,
            name: name.to_owned(),
        };
        if let Some(token) = self.tokens.get(&unit) {
            return token.clone();
        }
        let token = format!("#attr{}", self.substitutions.len() + 1);
        self.substitutions.push((token.clone(), name.to_owned()));
        self.tokens.insert(unit, token.clone());
        token
    }

    /// Returns `true` if nothing has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.substitutions.is_empty()
    }

    /// Consume the registry into the wire substitution map, or `None` when
    /// no placeholder was generated.
    ///
    /// The downstream wire call treats an absent map differently from an
    /// empty one, so emptiness maps to `None` rather than an empty map.
    #[must_use]
    pub fn into_substitutions(self) -> Option<HashMap<String, String>> {
        if self.substitutions.is_empty() {
            return None;
        }
        Some(self.substitutions.into_iter().collect())
    }
}
