//! Common, shared types.

pub mod config;
pub mod error;
pub mod layers;
pub mod state;

#[cfg(test)]
pub mod test_utils;
