//! Event listening and webhook notification module
//!
//! This module attaches listeners for planned subscriptions, decodes the
//! events they observe, and forwards each one to the webhook endpoint as a
//! normalized notification.

pub mod dispatcher;
pub mod error;
pub mod notification;
pub mod registry;

pub use dispatcher::*;
pub use error::*;
pub use notification::*;
pub use registry::*;
