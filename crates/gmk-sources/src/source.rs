//! Source traits and error taxonomy.
//!
//! Implementations must be object-safe so callers can hold
//! `Arc<dyn LocationSource>` / `Arc<dyn RemoteTargetSource>` without
//! knowing the concrete type, and `Send + Sync` so they can be queried
//! from spawned tasks.

use std::fmt;

use async_trait::async_trait;
use gmk_coord::GeoPoint;

// ---------------------------------------------------------------------------
// Location side
// ---------------------------------------------------------------------------

/// Platform permission state for the location provider.
///
/// Checked as a precondition before the provider is queried at all;
/// `Denied` is not delivered through the query's error channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Errors a [`LocationSource`] may return.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LocationError {
    /// The provider could not produce a reading.
    Unavailable(String),
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::Unavailable(msg) => write!(f, "location unavailable: {msg}"),
        }
    }
}

impl std::error::Error for LocationError {}

/// Device location provider contract.
#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Human-readable name identifying this source (e.g. `"simulated"`).
    fn name(&self) -> &'static str;

    /// Current platform permission. Callers must check this before
    /// [`current_fix`][LocationSource::current_fix] and surface a
    /// permission request instead of querying when `Denied`.
    fn permission(&self) -> Permission;

    /// Resolve the device's current fix.
    ///
    /// `Ok(None)` means the provider has no reading right now; callers
    /// leave marker state unchanged.
    async fn current_fix(&self) -> Result<Option<GeoPoint>, LocationError>;
}

// ---------------------------------------------------------------------------
// Remote target side
// ---------------------------------------------------------------------------

/// Outcome of a remote fetch that reached the store.
///
/// `Absent` is not an error: it is a valid "no current position" signal,
/// distinct from transport failure, and triggers marker removal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemotePayload {
    /// The path exists; the raw value, stringified.
    Present(String),
    /// The path does not exist.
    Absent,
}

/// Errors a [`RemoteTargetSource`] may return.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemoteError {
    /// Network or transport failure; the store was not reached or did not
    /// answer usably.
    Transport(String),
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteError::Transport(msg) => write!(f, "remote fetch failed: {msg}"),
        }
    }
}

impl std::error::Error for RemoteError {}

/// Remote tracked-target store contract.
#[async_trait]
pub trait RemoteTargetSource: Send + Sync {
    /// Human-readable name identifying this source (e.g. `"firebase-rest"`).
    fn name(&self) -> &'static str;

    /// Fetch the raw payload at `path` (e.g. `"Animal/GPS"`).
    async fn fetch(&self, path: &str) -> Result<RemotePayload, RemoteError>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
