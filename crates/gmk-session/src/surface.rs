use std::sync::{Arc, Mutex};

use gmk_coord::GeoPoint;
use gmk_reconcile::{MarkerHandle, MarkerRole};

/// Rendering surface the session applies marker mutations to.
///
/// Implementations wrap a real map widget; `upsert_marker` mints the
/// opaque handle the widget uses for later removal.
pub trait MapSurface: Send {
    fn upsert_marker(&mut self, role: MarkerRole, point: GeoPoint, label: &str) -> MarkerHandle;

    fn remove_marker(&mut self, handle: MarkerHandle);
}

/// A surface mutation as applied, for inspection.
#[derive(Clone, Debug, PartialEq)]
pub enum AppliedMutation {
    Upserted {
        role: MarkerRole,
        point: GeoPoint,
        label: String,
        handle: MarkerHandle,
    },
    Removed {
        handle: MarkerHandle,
    },
}

/// In-memory surface that mints sequential handles and records every
/// applied mutation. Used by the CLI demo mode and scenario tests.
pub struct RecordingSurface {
    next_handle: u64,
    log: Arc<Mutex<Vec<AppliedMutation>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle onto the mutation log; clone before handing the
    /// surface to a session.
    pub fn mutation_log(&self) -> Arc<Mutex<Vec<AppliedMutation>>> {
        Arc::clone(&self.log)
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MapSurface for RecordingSurface {
    fn upsert_marker(&mut self, role: MarkerRole, point: GeoPoint, label: &str) -> MarkerHandle {
        let handle = MarkerHandle(self.next_handle);
        self.next_handle += 1;
        self.log.lock().unwrap().push(AppliedMutation::Upserted {
            role,
            point,
            label: label.to_string(),
            handle,
        });
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.log
            .lock()
            .unwrap()
            .push(AppliedMutation::Removed { handle });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_sequential_and_log_is_ordered() {
        let mut surface = RecordingSurface::new();
        let log = surface.mutation_log();

        let h1 = surface.upsert_marker(MarkerRole::Origin, GeoPoint::new(1.0, 2.0), "You");
        let h2 = surface.upsert_marker(MarkerRole::Destination, GeoPoint::new(3.0, 4.0), "Animal");
        surface.remove_marker(h2);

        assert_eq!(h1, MarkerHandle(1));
        assert_eq!(h2, MarkerHandle(2));

        let log = log.lock().unwrap();
        assert_eq!(log.len(), 3);
        assert_eq!(log[2], AppliedMutation::Removed { handle: h2 });
    }
}
