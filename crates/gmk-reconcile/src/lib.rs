//! gmk-reconcile
//!
//! Marker reconciliation engine: single authority over the two logical
//! marker slots (origin = device, destination = tracked target).
//!
//! Architectural decisions:
//! - Origin is only ever added or left stale; it has no removal path
//! - Destination is always cleared before being re-added (remove-then-add,
//!   never a single replace)
//! - A no-fix report records nothing and emits no command
//! - Repeated identical fixes re-emit upserts; the engine does not diff
//!   observable state
//! - Results from a superseded refresh are rejected by the generation gate
//!
//! Deterministic, pure logic. No IO, no wall clock. The caller applies
//! emitted commands to the rendering surface and confirms minted handles.

mod engine;
mod generation;
mod types;

pub use engine::{confirm_handle, report_destination, report_destination_absent, report_origin};
pub use generation::{Freshness, Generation, GenerationGate};
pub use types::*;
