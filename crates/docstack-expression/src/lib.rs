//! Condition, update, and projection expression compiler for the DocStack
//! wire protocol.
//!
//! Callers build immutable, typed expression trees from attribute paths,
//! literal values, and composable operators; compiling renders the tree
//! into wire grammar text plus the `#attr<N>`/`:value<N>` placeholder
//! substitution tables the protocol requires.
//!
//! ```
//! use docstack_expression::{Condition, Path, compile_condition};
//!
//! # fn main() -> Result<(), docstack_expression::ExpressionError> {
//! let condition = Condition::equal(Path::new("user.age"), 42_i64)
//!     .and(Condition::attribute_exists(Path::new("email")));
//! let compiled = compile_condition(&condition)?;
//!
//! assert_eq!(
//!     compiled.expression,
//!     "(#attr1.#attr2 = :value1 AND attribute_exists(#attr3))"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! The compiler is purely synchronous: rendering is pure-function
//! evaluation over in-memory trees, and every compile call owns a fresh
//! registry pair, so concurrent callers never share mutable state.

mod compile;
mod condition;
mod error;
mod names;
mod operand;
mod path;
mod projection;
mod render;
mod update;
mod values;

pub use compile::{
    CompiledCondition, CompiledProjection, CompiledUpdate, compile_condition, compile_projection,
    compile_update,
};
pub use condition::{AttributeTypeTag, ComparisonOperator, Condition, MAX_IN_CANDIDATES};
pub use error::ExpressionError;
pub use names::NameRegistry;
pub use operand::Operand;
pub use path::Path;
pub use projection::Projection;
pub use render::Render;
pub use update::{SetValue, Update, UpdateAction, UpdateClause};
pub use values::ValueRegistry;

pub use docstack_model::AttributeValue;
