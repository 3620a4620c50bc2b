//! Scalar values carried by properties.
//!
//! The merge engine only cares about a value's identity: its type tag, its
//! payload, and whether it is a resource or path reference. Resource values
//! keep a handle on the [`DefinitionSource`] they were declared in so an
//! exporter can still locate the referenced file after the value has been
//! cloned into the configuration tree.

mod consumer;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

pub use consumer::ValueConsumer;

use crate::definition::DefinitionSource;

/// Type tag of a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ValueType {
    /// Free text.
    String,
    /// Raw bytes, usually supplied as a resource.
    Binary,
    /// Signed 64-bit integer.
    Long,
    /// 64-bit float.
    Double,
    /// ISO-8601 timestamp kept as text.
    Date,
    /// `true` or `false`.
    Boolean,
    /// Qualified name such as `nt:unstructured`.
    Name,
    /// Repository path.
    Path,
    /// Hard reference by identifier.
    Reference,
    /// Weak reference by identifier.
    WeakReference,
    /// URI text.
    Uri,
    /// Arbitrary-precision decimal kept as text.
    Decimal,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::String => "string",
            Self::Binary => "binary",
            Self::Long => "long",
            Self::Double => "double",
            Self::Date => "date",
            Self::Boolean => "boolean",
            Self::Name => "name",
            Self::Path => "path",
            Self::Reference => "reference",
            Self::WeakReference => "weakreference",
            Self::Uri => "uri",
            Self::Decimal => "decimal",
        };
        f.write_str(label)
    }
}

/// Raw payload of a [`Value`].
#[derive(Debug, Clone)]
pub enum Payload {
    /// Textual payload, also used for dates, names, paths and resource references.
    Text(String),
    /// Integer payload.
    Long(i64),
    /// Floating point payload; compared bitwise.
    Double(f64),
    /// Boolean payload.
    Boolean(bool),
    /// Inline binary payload.
    Binary(Vec<u8>),
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Long(a), Self::Long(b)) => a == b,
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Binary(a), Self::Binary(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Payload {}

impl Hash for Payload {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Text(text) => text.hash(state),
            Self::Long(number) => number.hash(state),
            Self::Double(number) => number.to_bits().hash(state),
            Self::Boolean(flag) => flag.hash(state),
            Self::Binary(bytes) => bytes.hash(state),
        }
    }
}

/// A typed scalar property value.
#[derive(Debug, Clone)]
pub struct Value {
    payload: Payload,
    value_type: ValueType,
    is_resource: bool,
    is_path: bool,
    source: Option<Arc<DefinitionSource>>,
}

impl Value {
    fn text(value_type: ValueType, text: impl Into<String>) -> Self {
        Self {
            payload: Payload::Text(text.into()),
            value_type,
            is_resource: false,
            is_path: false,
            source: None,
        }
    }

    /// A string value.
    #[must_use]
    pub fn string(text: impl Into<String>) -> Self {
        Self::text(ValueType::String, text)
    }

    /// A name value, as used by primary types and mixins.
    #[must_use]
    pub fn name(text: impl Into<String>) -> Self {
        Self::text(ValueType::Name, text)
    }

    /// A date value in ISO-8601 form.
    #[must_use]
    pub fn date(text: impl Into<String>) -> Self {
        Self::text(ValueType::Date, text)
    }

    /// A value of any textual type.
    #[must_use]
    pub fn typed_text(value_type: ValueType, text: impl Into<String>) -> Self {
        Self::text(value_type, text)
    }

    /// An integer value.
    #[must_use]
    pub const fn long(number: i64) -> Self {
        Self {
            payload: Payload::Long(number),
            value_type: ValueType::Long,
            is_resource: false,
            is_path: false,
            source: None,
        }
    }

    /// A floating point value.
    #[must_use]
    pub const fn double(number: f64) -> Self {
        Self {
            payload: Payload::Double(number),
            value_type: ValueType::Double,
            is_resource: false,
            is_path: false,
            source: None,
        }
    }

    /// A boolean value.
    #[must_use]
    pub const fn boolean(flag: bool) -> Self {
        Self {
            payload: Payload::Boolean(flag),
            value_type: ValueType::Boolean,
            is_resource: false,
            is_path: false,
            source: None,
        }
    }

    /// An inline binary value.
    #[must_use]
    pub const fn binary(bytes: Vec<u8>) -> Self {
        Self {
            payload: Payload::Binary(bytes),
            value_type: ValueType::Binary,
            is_resource: false,
            is_path: false,
            source: None,
        }
    }

    /// A value whose content lives in a resource file next to its source.
    #[must_use]
    pub fn resource(value_type: ValueType, resource_path: impl Into<String>) -> Self {
        Self {
            is_resource: true,
            ..Self::text(value_type, resource_path)
        }
    }

    /// A reference value expressed as a repository path.
    #[must_use]
    pub fn path_reference(value_type: ValueType, path: impl Into<String>) -> Self {
        Self {
            is_path: true,
            ..Self::text(value_type, path)
        }
    }

    /// Attaches the source the value was declared in.
    #[must_use]
    pub fn with_source(mut self, source: Arc<DefinitionSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// The raw payload.
    #[must_use]
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }

    /// The type tag.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Returns `true` when the payload is a resource reference.
    #[must_use]
    pub const fn is_resource(&self) -> bool {
        self.is_resource
    }

    /// Returns `true` when the payload is a path standing in for a reference.
    #[must_use]
    pub const fn is_path(&self) -> bool {
        self.is_path
    }

    /// The source the value was declared in, if known.
    #[must_use]
    pub fn source(&self) -> Option<&Arc<DefinitionSource>> {
        self.source.as_ref()
    }

    /// Renders the value as text. Never fails: binaries render lossily and
    /// resources render as their reference.
    #[must_use]
    pub fn as_string(&self) -> String {
        match &self.payload {
            Payload::Text(text) => text.clone(),
            Payload::Long(number) => number.to_string(),
            Payload::Double(number) => number.to_string(),
            Payload::Boolean(flag) => flag.to_string(),
            Payload::Binary(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    /// Replaces the payload with a reference to `resource_path`.
    ///
    /// Used when exporting inline binaries or long strings to side files.
    pub fn make_resource(&mut self, resource_path: impl Into<String>) {
        self.payload = Payload::Text(resource_path.into());
        self.is_resource = true;
    }

    fn same_source(&self, other: &Self) -> bool {
        match (&self.source, &other.source) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b) || a.origin() == b.origin(),
            (None, None) => true,
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.value_type == other.value_type
            && self.is_resource == other.is_resource
            && self.is_path == other.is_path
            && self.payload == other.payload
            && (!self.is_resource || self.same_source(other))
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value_type.hash(state);
        self.is_resource.hash(state);
        self.is_path.hash(state);
        self.payload.hash(state);
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

#[cfg(test)]
mod tests;
