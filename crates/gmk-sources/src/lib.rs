//! gmk-sources
//!
//! Boundary for the two asynchronous coordinate producers: the device
//! location provider and the remote tracked-target store.
//!
//! This crate defines the source traits and error taxonomy, one real
//! remote implementation (Firebase Realtime Database REST), and scripted
//! simulators for demos and scenario tests. Classification of payloads
//! into marker reports happens in the session layer, not here.

mod firebase;
mod sim;
mod source;

pub use firebase::FirebaseRestSource;
pub use sim::{ScriptedFetch, SimulatedLocationSource, SimulatedRemoteSource};
pub use source::{
    LocationError, LocationSource, Permission, RemoteError, RemotePayload, RemoteTargetSource,
};
