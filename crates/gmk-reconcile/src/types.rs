use gmk_coord::GeoPoint;
use serde::{Deserialize, Serialize};

/// The two logical marker slots tracked by the reconciler.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerRole {
    Origin,
    Destination,
}

impl MarkerRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerRole::Origin => "origin",
            MarkerRole::Destination => "destination",
        }
    }
}

/// Opaque handle minted by the rendering surface when a marker is created.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerHandle(pub u64);

/// A classified coordinate report fed to the engine.
///
/// Callers classify before reporting: the engine never sees a raw reading
/// and never fails. `NoFix` is an explicit tagged-absent value; the engine
/// does not overload any real coordinate as a sentinel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FixReport {
    Fix(GeoPoint),
    NoFix,
}

impl FixReport {
    /// Classify a raw provider reading.
    ///
    /// Device providers in this system report `(0,0)` for "no fix yet",
    /// and a reading counts as a fix only when both components are
    /// non-zero, so any zero component maps to `NoFix`. This keeps the
    /// sentinel quirk at the provider boundary instead of inside the
    /// engine.
    pub fn from_reading(point: GeoPoint) -> Self {
        if point.has_zero_component() {
            FixReport::NoFix
        } else {
            FixReport::Fix(point)
        }
    }
}

/// One marker slot: last recorded coordinate plus the surface handle, when
/// a marker is currently rendered for it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MarkerSlot {
    pub point: Option<GeoPoint>,
    pub handle: Option<MarkerHandle>,
}

/// Engine state. Owned exclusively by one reconciliation queue; never
/// shared across concurrent passes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReconcilerState {
    pub origin: MarkerSlot,
    pub destination: MarkerSlot,
}

impl ReconcilerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, role: MarkerRole) -> &MarkerSlot {
        match role {
            MarkerRole::Origin => &self.origin,
            MarkerRole::Destination => &self.destination,
        }
    }

    pub(crate) fn slot_mut(&mut self, role: MarkerRole) -> &mut MarkerSlot {
        match role {
            MarkerRole::Origin => &mut self.origin,
            MarkerRole::Destination => &mut self.destination,
        }
    }
}

/// A map mutation for the caller to execute.
///
/// `Upsert` asks the surface to create a marker; the caller must feed the
/// minted handle back via [`confirm_handle`][crate::confirm_handle] so a
/// later `Remove` can target it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MapCommand {
    Upsert {
        role: MarkerRole,
        point: GeoPoint,
    },
    Remove {
        role: MarkerRole,
        handle: MarkerHandle,
    },
}
