use gmk_coord::GeoPoint;
use gmk_reconcile::*;

#[test]
fn scenario_origin_upsert_emitted() {
    let mut st = ReconcilerState::new();
    let fix = GeoPoint::new(-23.5, -46.6);

    let cmds = report_origin(&mut st, FixReport::from_reading(fix));

    assert_eq!(
        cmds,
        vec![MapCommand::Upsert {
            role: MarkerRole::Origin,
            point: fix,
        }]
    );
    assert_eq!(st.origin.point, Some(fix));
    // Handle arrives only after the caller applies the command.
    assert_eq!(st.origin.handle, None);

    confirm_handle(&mut st, MarkerRole::Origin, MarkerHandle(1));
    assert_eq!(st.slot(MarkerRole::Origin).handle, Some(MarkerHandle(1)));
}
