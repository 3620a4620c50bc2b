//! Behavioural step modules registered with `rstest-bdd`.

pub mod definition_steps;
pub mod helpers;
pub mod outcome_steps;
