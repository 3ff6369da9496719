//! The projection expression builder.

use crate::error::ExpressionError;
use crate::names::NameRegistry;
use crate::path::Path;
use crate::render::Render;
use crate::values::ValueRegistry;

/// A projection: the list of attribute paths to return.
///
/// Renders as the paths' placeholder forms joined by `,`. Each element may
/// independently use literal or structured interpretation.
#[derive(Debug, Clone)]
pub struct Projection {
    paths: Vec<Path>,
}

impl Projection {
    /// Build a projection from a non-empty path list.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::EmptyProjection`] when `paths` is empty.
    pub fn new(paths: Vec<Path>) -> Result<Self, ExpressionError> {
        if paths.is_empty() {
            return Err(ExpressionError::EmptyProjection);
        }
        Ok(Self { paths })
    }

    /// The projected paths in supply order.
    #[must_use]
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }
}

impl Render for Projection {
    fn render(
        &self,
        names: &mut NameRegistry,
        _values: &mut ValueRegistry,
    ) -> Result<String, ExpressionError> {
        let rendered: Result<Vec<_>, _> = self.paths.iter().map(|p| names.intern(p)).collect();
        Ok(rendered?.join(","))
    }
}
