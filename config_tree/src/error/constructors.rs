//! Constructors and accessors for `ConfigTreeError`.

use std::sync::Arc;

use figment::Error as FigmentError;

use super::{AggregatedErrors, ConfigTreeError};
use crate::path::NodePath;

impl ConfigTreeError {
    /// Folds the errors of one step into a single error.
    ///
    /// Returns `None` for no errors. A lone error is returned as itself when
    /// nothing else holds it, otherwise it stays wrapped in
    /// [`Self::Aggregate`]; two or more are always wrapped.
    #[must_use]
    pub fn try_aggregate<I, E>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        let mut gathered: Vec<Arc<Self>> = errors.into_iter().map(Into::into).collect();
        if gathered.len() > 1 {
            return Some(Self::Aggregate(Box::new(AggregatedErrors::new(gathered))));
        }
        let lone = gathered.pop()?;
        Some(Arc::try_unwrap(lone).unwrap_or_else(|shared| {
            Self::Aggregate(Box::new(AggregatedErrors::new(vec![shared])))
        }))
    }

    /// Wraps a figment failure raised while loading builder settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use config_tree::ConfigTreeError;
    /// let e = ConfigTreeError::settings(figment::Error::from("boom"));
    /// assert!(matches!(e, ConfigTreeError::Settings(_)));
    /// ```
    #[must_use]
    pub fn settings(source: FigmentError) -> Self {
        Self::Settings(Box::new(source))
    }

    /// The tree path the error is about, when it names one.
    #[must_use]
    pub const fn path(&self) -> Option<&NodePath> {
        match self {
            Self::UnreachableDefinitionRoot { path, .. }
            | Self::SelfOrderBefore { path, .. }
            | Self::MissingOrderBeforeTarget { path, .. }
            | Self::SnsGap { path, .. }
            | Self::ExtensionGroupConflict { path, .. }
            | Self::DeleteAndRedefine { path, .. }
            | Self::KindConflict { path, .. }
            | Self::ValueTypeConflict { path, .. }
            | Self::PrimaryTypeChange { path, .. }
            | Self::MixinRemoval { path, .. }
            | Self::MissingPrimaryType { path, .. }
            | Self::ValueAccessor { path, .. }
            | Self::ResourceVisit { path, .. } => Some(path),
            Self::RootModification { .. }
            | Self::InvalidPath { .. }
            | Self::Settings(_)
            | Self::Aggregate(_) => None,
        }
    }

    /// Origin of the definition that triggered the error, when known.
    #[must_use]
    pub const fn origin(&self) -> Option<&str> {
        match self {
            Self::UnreachableDefinitionRoot { origin, .. }
            | Self::RootModification { origin, .. }
            | Self::SelfOrderBefore { origin, .. }
            | Self::MissingOrderBeforeTarget { origin, .. }
            | Self::SnsGap { origin, .. }
            | Self::ExtensionGroupConflict { origin, .. }
            | Self::DeleteAndRedefine { origin, .. }
            | Self::KindConflict { origin, .. }
            | Self::ValueTypeConflict { origin, .. }
            | Self::PrimaryTypeChange { origin, .. }
            | Self::MixinRemoval { origin, .. }
            | Self::MissingPrimaryType { origin, .. } => Some(origin.as_str()),
            Self::ValueAccessor { .. }
            | Self::InvalidPath { .. }
            | Self::ResourceVisit { .. }
            | Self::Settings(_)
            | Self::Aggregate(_) => None,
        }
    }
}

impl From<FigmentError> for ConfigTreeError {
    fn from(e: FigmentError) -> Self {
        Self::settings(e)
    }
}
