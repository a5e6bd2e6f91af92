//! Multi-chain EVM event monitoring and webhook notification.
//!
//! This library watches configured smart-contract deployments across EVM
//! chains and forwards every matching emitted event to a single webhook
//! endpoint as a normalized JSON notification. It includes:
//!
//! - Configuration management through a YAML file
//! - Human-readable ABI event discovery
//! - Per-chain connections shared by all listeners on that chain
//! - Fire-and-forget webhook delivery with Prometheus counters
//!
//! # Module Structure
//!
//! - `config`: Configuration loading, validation and lookups
//! - `abi`: Event discovery over ABI definition strings
//! - `subscriptions`: Resolution of configuration into subscription targets
//! - `network`: Chain connection management
//! - `listeners`: Listener registration, event decoding and dispatch
//! - `metrics`: Prometheus metrics and their exposition endpoint

pub mod abi;
pub mod config;
pub mod constants;
pub mod listeners;
pub mod metrics;
pub mod network;
pub mod subscriptions;
