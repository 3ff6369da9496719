//! The expression formatter contract.
//!
//! Every algebra node renders through the same single capability, which is
//! what lets any node embed inside any other: a size-of operand inside a
//! comparison, a comparison inside a boolean combinator, a condition next
//! to an update statement sharing one registry pair.

use crate::error::ExpressionError;
use crate::names::NameRegistry;
use crate::values::ValueRegistry;

/// Render a node into wire expression text, interning attribute names and
/// literal values into the supplied registries as placeholders are needed.
///
/// Rendering is a pure function of the node and the registries: nodes are
/// immutable, carry no registry state, and may be rendered repeatedly.
/// Repeat calls against the same registries reuse existing placeholders.
pub trait Render {
    /// Produce the wire text for this node.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::PathSyntax`] when a path interned during
    /// this render violates the path grammar.
    fn render(
        &self,
        names: &mut NameRegistry,
        values: &mut ValueRegistry,
    ) -> Result<String, ExpressionError>;
}
