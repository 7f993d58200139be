//! gmk-session
//!
//! Async orchestration for the tracker screen's refresh flow.
//!
//! A session actor (see [`spawn_session`]) owns the reconciler state, the refresh
//! generation gate, and the map surface. Every refresh queries the device
//! location source and the remote target store independently; each result
//! is posted back to the actor's queue tagged with its refresh generation,
//! so reconciler state is only ever touched from one task even on a
//! multi-threaded runtime. Stale-generation results are dropped.
//!
//! User-visible conditions are broadcast as [`Notice`] events; rendering
//! them is the embedder's concern.

mod config;
mod notice;
mod session;
mod surface;

pub use config::SessionConfig;
pub use notice::Notice;
pub use session::{spawn_session, SessionClosed, SessionHandle, StatusSnapshot};
pub use surface::{AppliedMutation, MapSurface, RecordingSurface};
