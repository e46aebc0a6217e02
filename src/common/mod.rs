//! Common, shared types.

pub mod field;
pub mod layers;
pub mod state;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
