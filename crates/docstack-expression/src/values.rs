//! Literal value interning registry.
//!
//! Literal values are substituted with `:value<N>` placeholders and shipped
//! in a separate wire table. Interning equality is deliberately uneven:
//!
//! - scalars (string, number, binary, boolean, null) intern by value:
//!   two equal scalars share one placeholder;
//! - composites (lists, maps, sets) intern by instance identity: two
//!   structurally-equal but separately allocated composites get separate
//!   placeholders, while re-rendering the same node reuses its placeholder.
//!
//! The identity rule is observable wire behavior that downstream callers
//! rely on; it is preserved here via `Arc` pointer identity.

use std::collections::HashMap;
use std::sync::Arc;

use docstack_model::AttributeValue;

/// Interning registry for literal value placeholders.
///
/// Same lifecycle as [`crate::NameRegistry`]: fresh per compile call,
/// mutated during rendering, consumed once for the wire map.
#[derive(Debug, Default)]
pub struct ValueRegistry {
    /// Entries in issue order; the token index is the position + 1.
    entries: Vec<(Arc<AttributeValue>, String)>,
}

impl ValueRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a value, returning its placeholder.
    ///
    /// Scalars dedup by equality, composites by `Arc` identity. The
    /// registry performs no type validation; operand constructors enforce
    /// value legality before a value can reach this point.
    pub fn intern(&mut self, value: &Arc<AttributeValue>) -> String {
        for (existing, token) in &self.entries {
            let seen = if value.is_scalar() {
                **existing == **value
            } else {
                Arc::ptr_eq(existing, value)
            };
            if seen {
                return token.clone();
            }
        }
        let token = format!(":value{}", self.entries.len() + 1);
        self.entries.push((Arc::clone(value), token.clone()));
        token
    }

    /// Returns `true` if nothing has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the registry into the wire substitution map, or `None` when
    /// no placeholder was generated (absent and empty maps are distinct on
    /// the wire).
    #[must_use]
    pub fn into_substitutions(self) -> Option<HashMap<String, AttributeValue>> {
        if self.entries.is_empty() {
            return None;
        }
        Some(
            self.entries
                .into_iter()
                .map(|(value, token)| (token, (*value).clone()))
                .collect(),
        )
    }
}
