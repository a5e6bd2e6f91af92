//! EVM chain connections

pub mod provider;

pub use provider::*;
