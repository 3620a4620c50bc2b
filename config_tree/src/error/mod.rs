//! Error types produced by the configuration tree builder.

mod aggregate;
mod constructors;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::ConfigTreeError;
