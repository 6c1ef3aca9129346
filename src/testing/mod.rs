//! Headless testing framework: FormHarness, snapshot helpers.
//!
//! Use the [`FormHarness`] to programmatically drive a [`Form`](crate::form::Form)
//! without a host application. Use [`model_to_string`] and [`events_to_string`]
//! to capture models and event histories as plain text for snapshot-style
//! assertions.

pub mod harness;
pub mod snapshot;

pub use harness::FormHarness;
pub use snapshot::{events_to_string, model_to_inline_string, model_to_string};
