//! The condition expression algebra.
//!
//! Condition nodes are immutable trees built from operands and other
//! nodes. Construction performs the eager type checks (comparability,
//! string/binary arguments, membership cardinality); rendering produces
//! the wire grammar exactly: `=`, `<>`, `<`, `<=`, `>`, `>=`,
//! `BETWEEN ... AND ...`, `IN (...)`, the `attribute_*`/`begins_with`/
//! `contains` functions, and parenthesized `AND`/`OR`/`NOT` combinators.

use std::sync::Arc;

use docstack_model::AttributeValue;

use crate::error::ExpressionError;
use crate::names::NameRegistry;
use crate::operand::Operand;
use crate::path::Path;
use crate::render::Render;
use crate::values::ValueRegistry;

/// Maximum number of candidates in an `IN` membership test.
pub const MAX_IN_CANDIDATES: usize = 100;

// ---------------------------------------------------------------------------
// Comparison operators
// ---------------------------------------------------------------------------

/// The six comparison operators.
///
/// This is a closed set: every dispatch over it is an exhaustive `match`,
/// so adding an operator is a compile-time-visible change at every site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    /// Equal (`=`). Accepts operands of any value kind.
    Equal,
    /// Not equal (`<>`). Accepts operands of any value kind.
    NotEqual,
    /// Less than (`<`). Comparable operands only.
    LessThan,
    /// Less than or equal (`<=`). Comparable operands only.
    LessOrEqual,
    /// Greater than (`>`). Comparable operands only.
    GreaterThan,
    /// Greater than or equal (`>=`). Comparable operands only.
    GreaterOrEqual,
}

impl ComparisonOperator {
    /// The literal operator token in the wire grammar.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::LessThan => "<",
            Self::LessOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterOrEqual => ">=",
        }
    }

    /// Whether this operator orders its operands (and therefore restricts
    /// them to comparable value kinds: string, number, binary).
    #[must_use]
    pub fn is_ordering(self) -> bool {
        match self {
            Self::Equal | Self::NotEqual => false,
            Self::LessThan | Self::LessOrEqual | Self::GreaterThan | Self::GreaterOrEqual => true,
        }
    }
}

// ---------------------------------------------------------------------------
// Attribute type tags
// ---------------------------------------------------------------------------

/// Wire type descriptors accepted by `attribute_type(path, type)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeTypeTag {
    /// String.
    String,
    /// Number.
    Number,
    /// Binary.
    Binary,
    /// String set.
    StringSet,
    /// Number set.
    NumberSet,
    /// Binary set.
    BinarySet,
    /// Boolean.
    Boolean,
    /// Null.
    Null,
    /// List.
    List,
    /// Map.
    Map,
}

impl AttributeTypeTag {
    /// The wire descriptor string for this tag.
    #[must_use]
    pub fn descriptor(self) -> &'static str {
        match self {
            Self::String => "S",
            Self::Number => "N",
            Self::Binary => "B",
            Self::StringSet => "SS",
            Self::NumberSet => "NS",
            Self::BinarySet => "BS",
            Self::Boolean => "BOOL",
            Self::Null => "NULL",
            Self::List => "L",
            Self::Map => "M",
        }
    }
}

// ---------------------------------------------------------------------------
// Condition nodes
// ---------------------------------------------------------------------------

/// A condition expression node.
///
/// Built through the constructors below; never mutated after construction.
/// Rendering is repeatable against the same registries.
#[derive(Debug, Clone)]
pub enum Condition {
    /// Comparison: `left op right`.
    Compare {
        /// Comparison operator.
        op: ComparisonOperator,
        /// Left-hand operand.
        left: Operand,
        /// Right-hand operand.
        right: Operand,
    },
    /// Range test: `value BETWEEN lower AND upper`, bounds inclusive.
    Between {
        /// Value to test.
        value: Operand,
        /// Lower bound.
        lower: Operand,
        /// Upper bound.
        upper: Operand,
    },
    /// Membership test: `value IN (c1,c2,...)`.
    In {
        /// Value to search for.
        value: Operand,
        /// Candidate operands, 1 to [`MAX_IN_CANDIDATES`].
        candidates: Vec<Operand>,
    },
    /// `attribute_exists(path)`.
    AttributeExists(Path),
    /// `attribute_not_exists(path)`.
    AttributeNotExists(Path),
    /// `attribute_type(path, type)`.
    AttributeType {
        /// Path to test.
        path: Path,
        /// Expected wire type.
        type_tag: AttributeTypeTag,
    },
    /// `begins_with(left, right)`.
    BeginsWith {
        /// Subject operand.
        left: Operand,
        /// Prefix operand.
        right: Operand,
    },
    /// `contains(left, right)`.
    Contains {
        /// Subject operand.
        left: Operand,
        /// Element or substring operand (may be a size operand).
        right: Operand,
    },
    /// `(left AND right)`.
    And(Box<Condition>, Box<Condition>),
    /// `(left OR right)`.
    Or(Box<Condition>, Box<Condition>),
    /// `(NOT inner)`.
    Not(Box<Condition>),
}

impl Condition {
    /// Build a comparison from its operator tag.
    ///
    /// Ordering operators restrict both sides to comparable value kinds
    /// (string, number, binary); equality operators accept any kind.
    /// Path and size operands always pass, their stored type being unknown
    /// until execution.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::OperandType`] when an ordering operator
    /// receives a list, map, set, boolean, or null value operand.
    pub fn compare(
        left: impl Into<Operand>,
        op: ComparisonOperator,
        right: impl Into<Operand>,
    ) -> Result<Self, ExpressionError> {
        let left = left.into();
        let right = right.into();
        // Exhaustive over the operator set: a new operator cannot be added
        // without deciding its operand restriction here.
        match op {
            ComparisonOperator::Equal | ComparisonOperator::NotEqual => {}
            ComparisonOperator::LessThan
            | ComparisonOperator::LessOrEqual
            | ComparisonOperator::GreaterThan
            | ComparisonOperator::GreaterOrEqual => {
                check_comparable(&left, "comparison")?;
                check_comparable(&right, "comparison")?;
            }
        }
        Ok(Self::Compare { op, left, right })
    }

    /// `left = right`.
    pub fn equal(left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Self::Compare {
            op: ComparisonOperator::Equal,
            left: left.into(),
            right: right.into(),
        }
    }

    /// `left <> right`.
    pub fn not_equal(left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Self::Compare {
            op: ComparisonOperator::NotEqual,
            left: left.into(),
            right: right.into(),
        }
    }

    /// `left < right`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::OperandType`] for non-comparable value
    /// operands.
    pub fn less_than(
        left: impl Into<Operand>,
        right: impl Into<Operand>,
    ) -> Result<Self, ExpressionError> {
        Self::compare(left, ComparisonOperator::LessThan, right)
    }

    /// `left <= right`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::OperandType`] for non-comparable value
    /// operands.
    pub fn less_or_equal(
        left: impl Into<Operand>,
        right: impl Into<Operand>,
    ) -> Result<Self, ExpressionError> {
        Self::compare(left, ComparisonOperator::LessOrEqual, right)
    }

    /// `left > right`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::OperandType`] for non-comparable value
    /// operands.
    pub fn greater_than(
        left: impl Into<Operand>,
        right: impl Into<Operand>,
    ) -> Result<Self, ExpressionError> {
        Self::compare(left, ComparisonOperator::GreaterThan, right)
    }

    /// `left >= right`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::OperandType`] for non-comparable value
    /// operands.
    pub fn greater_or_equal(
        left: impl Into<Operand>,
        right: impl Into<Operand>,
    ) -> Result<Self, ExpressionError> {
        Self::compare(left, ComparisonOperator::GreaterOrEqual, right)
    }

    /// `value BETWEEN lower AND upper`, bounds inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::OperandType`] for non-comparable value
    /// operands in any of the three positions.
    pub fn between(
        value: impl Into<Operand>,
        lower: impl Into<Operand>,
        upper: impl Into<Operand>,
    ) -> Result<Self, ExpressionError> {
        let value = value.into();
        let lower = lower.into();
        let upper = upper.into();
        check_comparable(&value, "BETWEEN")?;
        check_comparable(&lower, "BETWEEN")?;
        check_comparable(&upper, "BETWEEN")?;
        Ok(Self::Between {
            value,
            lower,
            upper,
        })
    }

    /// `value IN (c1,c2,...)`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::Cardinality`] when the candidate list is
    /// empty or longer than [`MAX_IN_CANDIDATES`], and
    /// [`ExpressionError::OperandType`] for non-comparable value operands.
    pub fn is_in(
        value: impl Into<Operand>,
        candidates: Vec<Operand>,
    ) -> Result<Self, ExpressionError> {
        if candidates.is_empty() || candidates.len() > MAX_IN_CANDIDATES {
            return Err(ExpressionError::Cardinality {
                count: candidates.len(),
            });
        }
        let value = value.into();
        check_comparable(&value, "IN")?;
        for candidate in &candidates {
            check_comparable(candidate, "IN")?;
        }
        Ok(Self::In { value, candidates })
    }

    /// `attribute_exists(path)`.
    pub fn attribute_exists(path: impl Into<Path>) -> Self {
        Self::AttributeExists(path.into())
    }

    /// `attribute_not_exists(path)`.
    pub fn attribute_not_exists(path: impl Into<Path>) -> Self {
        Self::AttributeNotExists(path.into())
    }

    /// `attribute_type(path, type)`.
    pub fn attribute_type(path: impl Into<Path>, type_tag: AttributeTypeTag) -> Self {
        Self::AttributeType {
            path: path.into(),
            type_tag,
        }
    }

    /// `begins_with(left, right)`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::OperandType`] when either side is a
    /// value operand that is not a string or binary.
    pub fn begins_with(
        left: impl Into<Operand>,
        right: impl Into<Operand>,
    ) -> Result<Self, ExpressionError> {
        let left = left.into();
        let right = right.into();
        for operand in [&left, &right] {
            operand.check_value_kind(
                "begins_with",
                "string or binary",
                AttributeValue::is_string_or_binary,
            )?;
        }
        Ok(Self::BeginsWith { left, right })
    }

    /// `contains(left, right)`.
    ///
    /// The right-hand side may be any operand, including a size operand.
    pub fn contains(left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Self::Contains {
            left: left.into(),
            right: right.into(),
        }
    }

    /// `(self AND other)`.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    /// `(self OR other)`.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    /// `(NOT self)`.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }
}

/// Eager comparability check for ordering, range, and membership positions.
fn check_comparable(operand: &Operand, operation: &'static str) -> Result<(), ExpressionError> {
    operand.check_value_kind(
        operation,
        "comparable (string, number, binary)",
        AttributeValue::is_comparable,
    )
}

impl Render for Condition {
    fn render(
        &self,
        names: &mut NameRegistry,
        values: &mut ValueRegistry,
    ) -> Result<String, ExpressionError> {
        match self {
            Self::Compare { op, left, right } => Ok(format!(
                "{} {} {}",
                left.render(names, values)?,
                op.as_str(),
                right.render(names, values)?
            )),
            Self::Between {
                value,
                lower,
                upper,
            } => Ok(format!(
                "{} BETWEEN {} AND {}",
                value.render(names, values)?,
                lower.render(names, values)?,
                upper.render(names, values)?
            )),
            Self::In { value, candidates } => {
                let rendered: Result<Vec<_>, _> = candidates
                    .iter()
                    .map(|candidate| candidate.render(names, values))
                    .collect();
                Ok(format!(
                    "{} IN ({})",
                    value.render(names, values)?,
                    rendered?.join(",")
                ))
            }
            Self::AttributeExists(path) => {
                Ok(format!("attribute_exists({})", names.intern(path)?))
            }
            Self::AttributeNotExists(path) => {
                Ok(format!("attribute_not_exists({})", names.intern(path)?))
            }
            Self::AttributeType { path, type_tag } => {
                let tag = values.intern(&Arc::new(AttributeValue::S(
                    type_tag.descriptor().to_owned(),
                )));
                Ok(format!("attribute_type({}, {tag})", names.intern(path)?))
            }
            Self::BeginsWith { left, right } => Ok(format!(
                "begins_with({}, {})",
                left.render(names, values)?,
                right.render(names, values)?
            )),
            Self::Contains { left, right } => Ok(format!(
                "contains({}, {})",
                left.render(names, values)?,
                right.render(names, values)?
            )),
            Self::And(left, right) => Ok(format!(
                "({} AND {})",
                left.render(names, values)?,
                right.render(names, values)?
            )),
            Self::Or(left, right) => Ok(format!(
                "({} OR {})",
                left.render(names, values)?,
                right.render(names, values)?
            )),
            Self::Not(inner) => Ok(format!("(NOT {})", inner.render(names, values)?)),
        }
    }
}
