//! The update expression algebra.
//!
//! An update statement is built from individual actions. Each action
//! carries an explicit clause tag (SET, REMOVE, ADD, DELETE) assigned at
//! construction; the statement assembler buckets actions by tag and emits
//! the clauses in fixed order, each as `<CLAUSE> action,action,...`,
//! joined by line breaks, omitting absent clauses entirely.

use std::sync::Arc;

use docstack_model::AttributeValue;

use crate::error::ExpressionError;
use crate::names::NameRegistry;
use crate::operand::Operand;
use crate::path::Path;
use crate::render::Render;
use crate::values::ValueRegistry;

// ---------------------------------------------------------------------------
// Clauses
// ---------------------------------------------------------------------------

/// The four update statement clauses, in their fixed output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateClause {
    /// `SET path = value` assignments.
    Set,
    /// `REMOVE path` removals.
    Remove,
    /// `ADD path value` numeric/set increments.
    Add,
    /// `DELETE path value` set subtractions.
    Delete,
}

impl UpdateClause {
    /// The clause keyword in the wire grammar.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Set => "SET",
            Self::Remove => "REMOVE",
            Self::Add => "ADD",
            Self::Delete => "DELETE",
        }
    }
}

// ---------------------------------------------------------------------------
// SET right-hand sides
// ---------------------------------------------------------------------------

/// The right-hand side of a SET action.
#[derive(Debug, Clone)]
pub enum SetValue {
    /// Plain operand assignment.
    Operand(Operand),
    /// Addition: `left + right`.
    Plus(Box<SetValue>, Box<SetValue>),
    /// Subtraction: `left - right`.
    Minus(Box<SetValue>, Box<SetValue>),
    /// `if_not_exists(path, default)`: use the default when the attribute
    /// is absent. Usable on either side of an addition or subtraction.
    IfNotExists(Path, Operand),
    /// `list_append(left, right)`: concatenate two lists.
    ListAppend(Operand, Operand),
}

impl SetValue {
    /// `if_not_exists(path, default)`.
    pub fn if_not_exists(path: impl Into<Path>, default: impl Into<Operand>) -> Self {
        Self::IfNotExists(path.into(), default.into())
    }

    /// `list_append(left, right)`.
    pub fn list_append(left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Self::ListAppend(left.into(), right.into())
    }

    /// `self + other`.
    #[must_use]
    pub fn plus(self, other: impl Into<SetValue>) -> Self {
        Self::Plus(Box::new(self), Box::new(other.into()))
    }

    /// `self - other`.
    #[must_use]
    pub fn minus(self, other: impl Into<SetValue>) -> Self {
        Self::Minus(Box::new(self), Box::new(other.into()))
    }
}

impl From<Operand> for SetValue {
    fn from(operand: Operand) -> Self {
        Self::Operand(operand)
    }
}

impl From<Path> for SetValue {
    fn from(path: Path) -> Self {
        Self::Operand(path.into())
    }
}

impl From<AttributeValue> for SetValue {
    fn from(value: AttributeValue) -> Self {
        Self::Operand(value.into())
    }
}

impl From<&str> for SetValue {
    fn from(s: &str) -> Self {
        Self::Operand(s.into())
    }
}

impl From<String> for SetValue {
    fn from(s: String) -> Self {
        Self::Operand(s.into())
    }
}

impl From<i32> for SetValue {
    fn from(n: i32) -> Self {
        Self::Operand(n.into())
    }
}

impl From<i64> for SetValue {
    fn from(n: i64) -> Self {
        Self::Operand(n.into())
    }
}

impl From<u64> for SetValue {
    fn from(n: u64) -> Self {
        Self::Operand(n.into())
    }
}

impl From<f64> for SetValue {
    fn from(n: f64) -> Self {
        Self::Operand(n.into())
    }
}

impl From<bool> for SetValue {
    fn from(b: bool) -> Self {
        Self::Operand(b.into())
    }
}

impl Render for SetValue {
    fn render(
        &self,
        names: &mut NameRegistry,
        values: &mut ValueRegistry,
    ) -> Result<String, ExpressionError> {
        match self {
            Self::Operand(operand) => operand.render(names, values),
            Self::Plus(left, right) => Ok(format!(
                "{} + {}",
                left.render(names, values)?,
                right.render(names, values)?
            )),
            Self::Minus(left, right) => Ok(format!(
                "{} - {}",
                left.render(names, values)?,
                right.render(names, values)?
            )),
            Self::IfNotExists(path, default) => Ok(format!(
                "if_not_exists({}, {})",
                names.intern(path)?,
                default.render(names, values)?
            )),
            Self::ListAppend(left, right) => Ok(format!(
                "list_append({}, {})",
                left.render(names, values)?,
                right.render(names, values)?
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// A single update action, tagged with its clause at construction.
#[derive(Debug, Clone)]
pub struct UpdateAction {
    clause: UpdateClause,
    kind: ActionKind,
}

#[derive(Debug, Clone)]
enum ActionKind {
    Set { path: Path, value: SetValue },
    Remove { path: Path },
    Add { path: Path, value: Arc<AttributeValue> },
    Delete { path: Path, value: Arc<AttributeValue> },
}

impl UpdateAction {
    /// `SET path = value`.
    pub fn set(path: impl Into<Path>, value: impl Into<SetValue>) -> Self {
        Self {
            clause: UpdateClause::Set,
            kind: ActionKind::Set {
                path: path.into(),
                value: value.into(),
            },
        }
    }

    /// `REMOVE path`.
    pub fn remove(path: impl Into<Path>) -> Self {
        Self {
            clause: UpdateClause::Remove,
            kind: ActionKind::Remove { path: path.into() },
        }
    }

    /// `ADD path value`.
    ///
    /// Whether the stored attribute is numerically incremented or
    /// set-unioned depends on its actual stored type at execution time;
    /// the wire protocol leaves that ambiguity to the server.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::OperandType`] when the value is neither
    /// a number nor a set.
    pub fn add(
        path: impl Into<Path>,
        value: impl Into<AttributeValue>,
    ) -> Result<Self, ExpressionError> {
        let value = value.into();
        if !value.is_number() && !value.is_set() {
            return Err(ExpressionError::OperandType {
                operation: "ADD",
                expected: "number or set",
                found: value.type_descriptor(),
            });
        }
        Ok(Self {
            clause: UpdateClause::Add,
            kind: ActionKind::Add {
                path: path.into(),
                value: Arc::new(value),
            },
        })
    }

    /// `DELETE path value`: remove the given elements from a stored set.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::OperandType`] when the value is not a
    /// set.
    pub fn delete(
        path: impl Into<Path>,
        value: impl Into<AttributeValue>,
    ) -> Result<Self, ExpressionError> {
        let value = value.into();
        if !value.is_set() {
            return Err(ExpressionError::OperandType {
                operation: "DELETE",
                expected: "set",
                found: value.type_descriptor(),
            });
        }
        Ok(Self {
            clause: UpdateClause::Delete,
            kind: ActionKind::Delete {
                path: path.into(),
                value: Arc::new(value),
            },
        })
    }

    /// The clause this action registers into.
    #[must_use]
    pub fn clause(&self) -> UpdateClause {
        self.clause
    }
}

impl Render for UpdateAction {
    fn render(
        &self,
        names: &mut NameRegistry,
        values: &mut ValueRegistry,
    ) -> Result<String, ExpressionError> {
        match &self.kind {
            ActionKind::Set { path, value } => Ok(format!(
                "{} = {}",
                names.intern(path)?,
                value.render(names, values)?
            )),
            ActionKind::Remove { path } => names.intern(path),
            ActionKind::Add { path, value } | ActionKind::Delete { path, value } => Ok(format!(
                "{} {}",
                names.intern(path)?,
                values.intern(value)
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Statement assembly
// ---------------------------------------------------------------------------

/// Transient clause buckets used while assembling one statement.
#[derive(Debug, Default)]
struct ClauseSet {
    set: Vec<String>,
    remove: Vec<String>,
    add: Vec<String>,
    delete: Vec<String>,
}

impl ClauseSet {
    /// Register a rendered action under its clause tag.
    fn register(&mut self, clause: UpdateClause, rendered: String) {
        match clause {
            UpdateClause::Set => self.set.push(rendered),
            UpdateClause::Remove => self.remove.push(rendered),
            UpdateClause::Add => self.add.push(rendered),
            UpdateClause::Delete => self.delete.push(rendered),
        }
    }

    /// Emit present clauses in fixed SET, REMOVE, ADD, DELETE order.
    fn assemble(self) -> String {
        let buckets = [
            (UpdateClause::Set, self.set),
            (UpdateClause::Remove, self.remove),
            (UpdateClause::Add, self.add),
            (UpdateClause::Delete, self.delete),
        ];
        let mut clauses = Vec::new();
        for (clause, actions) in buckets {
            if !actions.is_empty() {
                clauses.push(format!("{} {}", clause.keyword(), actions.join(",")));
            }
        }
        clauses.join("\n")
    }
}

/// An ordered collection of update actions forming one statement.
#[derive(Debug, Clone, Default)]
pub struct Update {
    actions: Vec<UpdateAction>,
}

impl Update {
    /// Create an empty statement.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action.
    #[must_use]
    pub fn action(mut self, action: UpdateAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Append a SET action.
    #[must_use]
    pub fn set(self, path: impl Into<Path>, value: impl Into<SetValue>) -> Self {
        self.action(UpdateAction::set(path, value))
    }

    /// Append a REMOVE action.
    #[must_use]
    pub fn remove(self, path: impl Into<Path>) -> Self {
        self.action(UpdateAction::remove(path))
    }

    /// Append an ADD action.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::OperandType`] when the value is neither
    /// a number nor a set.
    pub fn add(
        self,
        path: impl Into<Path>,
        value: impl Into<AttributeValue>,
    ) -> Result<Self, ExpressionError> {
        Ok(self.action(UpdateAction::add(path, value)?))
    }

    /// Append a DELETE action.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::OperandType`] when the value is not a
    /// set.
    pub fn delete(
        self,
        path: impl Into<Path>,
        value: impl Into<AttributeValue>,
    ) -> Result<Self, ExpressionError> {
        Ok(self.action(UpdateAction::delete(path, value)?))
    }

    /// The actions in supply order.
    #[must_use]
    pub fn actions(&self) -> &[UpdateAction] {
        &self.actions
    }

    /// Returns `true` if no action has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl From<Vec<UpdateAction>> for Update {
    fn from(actions: Vec<UpdateAction>) -> Self {
        Self { actions }
    }
}

impl Render for Update {
    fn render(
        &self,
        names: &mut NameRegistry,
        values: &mut ValueRegistry,
    ) -> Result<String, ExpressionError> {
        if self.actions.is_empty() {
            return Err(ExpressionError::EmptyUpdate);
        }
        let mut clauses = ClauseSet::default();
        for action in &self.actions {
            let rendered = action.render(names, values)?;
            clauses.register(action.clause(), rendered);
        }
        Ok(clauses.assemble())
    }
}
