//! The operand model: path, literal value, and size-of operands.

use std::sync::Arc;

use docstack_model::AttributeValue;

use crate::error::ExpressionError;
use crate::names::NameRegistry;
use crate::path::Path;
use crate::render::Render;
use crate::values::ValueRegistry;

/// An operand in an expression: a value producer.
///
/// Operands are immutable once constructed and carry no registry state;
/// the registries are threaded through [`Render::render`].
#[derive(Debug, Clone)]
pub enum Operand {
    /// A document path reference; renders via the name registry.
    Path(Path),
    /// A literal value; renders via the value registry.
    Value(Arc<AttributeValue>),
    /// The `size(operand)` function used as an operand.
    ///
    /// The inner operand may itself be a path, a value, or a nested size.
    Size(Box<Operand>),
}

impl Operand {
    /// Wrap an operand in the `size(...)` function.
    pub fn size(inner: impl Into<Operand>) -> Self {
        Self::Size(Box::new(inner.into()))
    }

    /// The literal value carried by a value operand, if this is one.
    ///
    /// Used by node constructors for eager type checks; path and size
    /// operands have no statically knowable value kind.
    #[must_use]
    pub(crate) fn literal_value(&self) -> Option<&AttributeValue> {
        match self {
            Self::Value(value) => Some(value),
            Self::Path(_) | Self::Size(_) => None,
        }
    }

    /// Reject a value operand whose kind fails `accepts`.
    ///
    /// Path and size operands always pass: their runtime type lives in the
    /// stored document and cannot be checked at construction.
    pub(crate) fn check_value_kind(
        &self,
        operation: &'static str,
        expected: &'static str,
        accepts: impl Fn(&AttributeValue) -> bool,
    ) -> Result<(), ExpressionError> {
        match self.literal_value() {
            Some(value) if !accepts(value) => Err(ExpressionError::OperandType {
                operation,
                expected,
                found: value.type_descriptor(),
            }),
            _ => Ok(()),
        }
    }
}

impl Render for Operand {
    fn render(
        &self,
        names: &mut NameRegistry,
        values: &mut ValueRegistry,
    ) -> Result<String, ExpressionError> {
        match self {
            Self::Path(path) => names.intern(path),
            Self::Value(value) => Ok(values.intern(value)),
            Self::Size(inner) => Ok(format!("size({})", inner.render(names, values)?)),
        }
    }
}

// ---------------------------------------------------------------------------
// Operand promotion
// ---------------------------------------------------------------------------

// Public entry points take `impl Into<Operand>` (or `impl Into<Path>` where
// a path is semantically expected), so bare Rust literals promote to value
// operands and bare strings promote to paths.

impl From<Path> for Operand {
    fn from(path: Path) -> Self {
        Self::Path(path)
    }
}

impl From<AttributeValue> for Operand {
    fn from(value: AttributeValue) -> Self {
        Self::Value(Arc::new(value))
    }
}

impl From<Arc<AttributeValue>> for Operand {
    fn from(value: Arc<AttributeValue>) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        AttributeValue::from(s).into()
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        AttributeValue::from(s).into()
    }
}

impl From<i32> for Operand {
    fn from(n: i32) -> Self {
        AttributeValue::from(n).into()
    }
}

impl From<i64> for Operand {
    fn from(n: i64) -> Self {
        AttributeValue::from(n).into()
    }
}

impl From<u64> for Operand {
    fn from(n: u64) -> Self {
        AttributeValue::from(n).into()
    }
}

impl From<f64> for Operand {
    fn from(n: f64) -> Self {
        AttributeValue::from(n).into()
    }
}

impl From<bool> for Operand {
    fn from(b: bool) -> Self {
        AttributeValue::from(b).into()
    }
}

impl From<bytes::Bytes> for Operand {
    fn from(b: bytes::Bytes) -> Self {
        AttributeValue::from(b).into()
    }
}
