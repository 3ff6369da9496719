//! Error type for expression construction and compilation.

/// Errors produced while building or compiling expressions.
///
/// All variants are caller faults: the offending node must be fixed and the
/// compile retried. None of them is transient, and none escapes as a
/// successfully compiled expression; compilation fails closed instead of
/// emitting malformed or empty wire text.
#[derive(Debug, thiserror::Error)]
pub enum ExpressionError {
    /// An attribute path failed to parse.
    ///
    /// Raised lazily, at the moment the path is interned during rendering,
    /// not when the owning node is constructed.
    #[error("invalid document path '{path}': {reason}")]
    PathSyntax {
        /// The offending path string.
        path: String,
        /// What made it invalid.
        reason: String,
    },
    /// An operand of an unsupported value kind was supplied.
    ///
    /// Raised eagerly at node construction.
    #[error("invalid operand for {operation}: expected {expected} value, found {found}")]
    OperandType {
        /// The operation that rejected the operand.
        operation: &'static str,
        /// The value kinds the operation accepts.
        expected: &'static str,
        /// The wire type descriptor of the rejected value.
        found: &'static str,
    },
    /// A membership test was given too few or too many candidates.
    ///
    /// Raised eagerly at node construction.
    #[error("IN membership test requires 1 to 100 candidates, found {count}")]
    Cardinality {
        /// Number of candidates supplied.
        count: usize,
    },
    /// A projection was built from an empty path list.
    #[error("projection requires at least one attribute path")]
    EmptyProjection,
    /// An update statement was compiled with no actions.
    #[error("update statement contains no actions")]
    EmptyUpdate,
}
