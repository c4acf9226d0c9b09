//! Shared utilities.
//!
//! Line counting for the build tracker and test helpers.

pub mod lines;

#[cfg(test)]
pub mod testutil;
