//! Behavioural test harness for `config_tree` using `rstest-bdd`.
//!
//! Step implementations live under [`steps`], [`fixtures`] holds the shared
//! scenario state, and [`scenarios`] binds the `.feature` files to both.

mod fixtures;
mod scenarios;
pub mod steps;
