//! Where a definition came from.

/// Origin metadata shared by every node and property of one source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DefinitionSource {
    origin: String,
    module: String,
    extension_group: Option<String>,
}

impl DefinitionSource {
    /// Creates a source for `origin` (typically a file path) in `module`.
    #[must_use]
    pub fn new(origin: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            module: module.into(),
            extension_group: None,
        }
    }

    /// Marks the module as part of an extension group.
    #[must_use]
    pub fn with_extension_group(mut self, group: impl Into<String>) -> Self {
        self.extension_group = Some(group.into());
        self
    }

    /// Human-readable origin used in diagnostics.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Name of the contributing module.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Extension group of the contributing module; `None` for core modules.
    #[must_use]
    pub fn extension_group(&self) -> Option<&str> {
        self.extension_group.as_deref()
    }
}
