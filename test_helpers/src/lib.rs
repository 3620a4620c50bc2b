//! Test helpers shared across the workspace.
//!
//! Provides terse constructors for definitions, a wrapper around
//! `figment::Jail` for settings tests, and text normalisation for
//! behavioural step parameters.

pub mod definitions;
pub mod figment;
pub mod text;
