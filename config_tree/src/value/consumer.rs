//! Callback contract for visiting resource values.

use super::Value;
use crate::ConfigTreeResult;
use crate::definition::DefinitionProperty;

/// Receives every resource value reachable from a definition subtree.
///
/// Exporters implement this to copy the referenced files alongside the
/// serialised definitions. Closures of the matching shape implement it too.
pub trait ValueConsumer {
    /// Handles one resource `value` declared on `property`.
    ///
    /// # Errors
    ///
    /// Implementations return an error to abort the walk; it is propagated
    /// unchanged to the caller of
    /// [`crate::definition::DefinitionNode::visit_resource_values`].
    fn accept(&mut self, value: &Value, property: &DefinitionProperty) -> ConfigTreeResult<()>;
}

impl<F> ValueConsumer for F
where
    F: FnMut(&Value, &DefinitionProperty) -> ConfigTreeResult<()>,
{
    fn accept(&mut self, value: &Value, property: &DefinitionProperty) -> ConfigTreeResult<()> {
        self(value, property)
    }
}
