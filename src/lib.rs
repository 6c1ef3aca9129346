//! # crud-form
//!
//! A headless, schema-driven form core with two-way model binding.
//!
//! crud-form keeps a working copy of a host-owned model and reconciles the
//! two without feedback loops: external replacements refresh the working
//! model silently, field edits emit exactly one update carrying a full
//! snapshot, and a pair of re-entrancy guards drops the echoes each
//! direction produces. Schemas describe fields declaratively (kind,
//! defaults, conditional visibility, validation rules); the crate stays
//! renderer-agnostic and leaves control drawing to the host.
//!
//! ## Core Systems
//!
//! - **[`value`]** — Dynamically typed field values with serde support
//! - **[`model`]** — Ordered name/value map shared between host and form
//! - **[`schema`]** — Field descriptors, conditions, model seeding
//! - **[`validate`]** — Rule set, rule tables, pluggable validation hosts
//! - **[`event`]** — Form events and the synchronous emitter
//! - **[`sync`]** — Guarded two-way model synchronizer
//! - **[`form`]** — Form facade tying schema, sync, and validation together
//! - **[`layout`]** — Presentation hints (label width, spans, button text)
//! - **[`dispatch`]** — Slot registry and control-source resolution
//! - **[`testing`]** — FormHarness and snapshot helpers

// Foundation
pub mod model;
pub mod value;

// Core systems
pub mod schema;
pub mod validate;

// Events and synchronization
pub mod event;
pub mod sync;

// Form assembly
pub mod dispatch;
pub mod form;
pub mod layout;

// Test support
pub mod testing;
