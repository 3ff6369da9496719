//! The compile boundary handed to the transport layer.
//!
//! Each compile call constructs a fresh registry pair, renders once, and
//! returns the expression text plus the wire substitution maps. A map is
//! `None` (omitted) when no placeholder of that kind was generated; the
//! downstream wire call treats an absent map differently from an empty
//! one.
//!
//! Registries are never shared across compile calls, so concurrent callers
//! are isolated by construction.

use std::collections::HashMap;

use docstack_model::AttributeValue;
use tracing::debug;

use crate::condition::Condition;
use crate::error::ExpressionError;
use crate::names::NameRegistry;
use crate::projection::Projection;
use crate::render::Render;
use crate::update::Update;
use crate::values::ValueRegistry;

/// A compiled condition expression.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledCondition {
    /// The expression text.
    pub expression: String,
    /// Attribute name substitutions, absent when none were generated.
    pub names: Option<HashMap<String, String>>,
    /// Literal value substitutions, absent when none were generated.
    pub values: Option<HashMap<String, AttributeValue>>,
}

/// A compiled update statement, optionally with a condition sharing the
/// same substitution tables.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledUpdate {
    /// The update statement text.
    pub update_expression: String,
    /// The condition text, when a condition was supplied.
    pub condition_expression: Option<String>,
    /// Attribute name substitutions shared by both expressions.
    pub names: Option<HashMap<String, String>>,
    /// Literal value substitutions shared by both expressions.
    pub values: Option<HashMap<String, AttributeValue>>,
}

/// A compiled projection expression.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledProjection {
    /// The projection text.
    pub expression: String,
    /// Attribute name substitutions, absent when none were generated.
    pub names: Option<HashMap<String, String>>,
}

/// Compile a condition into wire text and substitution maps.
///
/// # Errors
///
/// Returns [`ExpressionError::PathSyntax`] when a path in the tree fails
/// to parse during rendering.
pub fn compile_condition(condition: &Condition) -> Result<CompiledCondition, ExpressionError> {
    let mut names = NameRegistry::new();
    let mut values = ValueRegistry::new();

    let expression = condition.render(&mut names, &mut values)?;
    debug!(expression = %expression, "compiled condition expression");

    Ok(CompiledCondition {
        expression,
        names: names.into_substitutions(),
        values: values.into_substitutions(),
    })
}

/// Compile an update statement, plus an optional condition guarding it.
///
/// The condition shares the update's registries so a path or value used by
/// both expressions gets one placeholder, not two.
///
/// # Errors
///
/// Returns [`ExpressionError::EmptyUpdate`] for a statement with no
/// actions, or [`ExpressionError::PathSyntax`] when a path fails to parse
/// during rendering.
pub fn compile_update(
    update: &Update,
    condition: Option<&Condition>,
) -> Result<CompiledUpdate, ExpressionError> {
    let mut names = NameRegistry::new();
    let mut values = ValueRegistry::new();

    let update_expression = update.render(&mut names, &mut values)?;
    let condition_expression = condition
        .map(|c| c.render(&mut names, &mut values))
        .transpose()?;
    debug!(
        update = %update_expression,
        condition = condition_expression.as_deref().unwrap_or(""),
        "compiled update statement"
    );

    Ok(CompiledUpdate {
        update_expression,
        condition_expression,
        names: names.into_substitutions(),
        values: values.into_substitutions(),
    })
}

/// Compile a projection into wire text and its name substitution map.
///
/// # Errors
///
/// Returns [`ExpressionError::PathSyntax`] when a path fails to parse
/// during rendering.
pub fn compile_projection(
    projection: &Projection,
) -> Result<CompiledProjection, ExpressionError> {
    let mut names = NameRegistry::new();
    let mut values = ValueRegistry::new();

    let expression = projection.render(&mut names, &mut values)?;
    debug!(expression = %expression, "compiled projection expression");

    Ok(CompiledProjection {
        expression,
        names: names.into_substitutions(),
    })
}
