use crate::{FixReport, MapCommand, MarkerHandle, MarkerRole, ReconcilerState};

/// Report a device fix for the origin slot.
///
/// A `Fix` is recorded as the new origin coordinate and re-emits an upsert
/// even when identical to the previous fix (no observable-state diffing).
/// `NoFix` records nothing and emits nothing; the prior marker, if any,
/// stays on the surface. Origin has no removal path.
pub fn report_origin(st: &mut ReconcilerState, report: FixReport) -> Vec<MapCommand> {
    match report {
        FixReport::NoFix => Vec::new(),
        FixReport::Fix(point) => {
            st.origin.point = Some(point);
            vec![MapCommand::Upsert {
                role: MarkerRole::Origin,
                point,
            }]
        }
    }
}

/// Report that the tracked target has no current position.
///
/// Emits a remove targeting the confirmed destination handle when one
/// exists, clearing the slot; otherwise a no-op.
pub fn report_destination_absent(st: &mut ReconcilerState) -> Vec<MapCommand> {
    let mut out = Vec::new();
    if let Some(handle) = st.destination.handle.take() {
        st.destination.point = None;
        out.push(MapCommand::Remove {
            role: MarkerRole::Destination,
            handle,
        });
    }
    out
}

/// Report a fix for the tracked target.
///
/// The destination slot is cleared first (remove-then-add), then a `Fix`
/// records the coordinate and emits an upsert. `NoFix` degenerates to the
/// clear step alone.
pub fn report_destination(st: &mut ReconcilerState, report: FixReport) -> Vec<MapCommand> {
    let mut out = report_destination_absent(st);
    if let FixReport::Fix(point) = report {
        st.destination.point = Some(point);
        out.push(MapCommand::Upsert {
            role: MarkerRole::Destination,
            point,
        });
    }
    out
}

/// Caller feedback after executing an `Upsert`: stores the handle the
/// surface minted so a later remove can target it.
pub fn confirm_handle(st: &mut ReconcilerState, role: MarkerRole, handle: MarkerHandle) {
    st.slot_mut(role).handle = Some(handle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use gmk_coord::GeoPoint;

    #[test]
    fn no_fix_report_is_inert() {
        let mut st = ReconcilerState::new();
        assert!(report_origin(&mut st, FixReport::NoFix).is_empty());
        assert_eq!(st, ReconcilerState::new());
    }

    #[test]
    fn destination_no_fix_still_clears_existing_marker() {
        let mut st = ReconcilerState::new();
        report_destination(&mut st, FixReport::Fix(GeoPoint::new(1.0, 2.0)));
        confirm_handle(&mut st, MarkerRole::Destination, MarkerHandle(7));

        let cmds = report_destination(&mut st, FixReport::NoFix);
        assert_eq!(
            cmds,
            vec![MapCommand::Remove {
                role: MarkerRole::Destination,
                handle: MarkerHandle(7),
            }]
        );
        assert_eq!(st.destination.point, None);
    }

    #[test]
    fn unconfirmed_destination_upsert_has_nothing_to_remove() {
        let mut st = ReconcilerState::new();
        // Upsert emitted but the caller never confirmed a handle (e.g. the
        // surface was torn down before applying).
        report_destination(&mut st, FixReport::Fix(GeoPoint::new(1.0, 2.0)));
        assert!(report_destination_absent(&mut st).is_empty());
    }
}
