use std::sync::Arc;
use std::time::Duration;

use gmk_coord::GeoPoint;
use gmk_reconcile::{MarkerHandle, MarkerRole};
use gmk_session::{spawn_session, AppliedMutation, Notice, RecordingSurface, SessionConfig};
use gmk_sources::{RemotePayload, ScriptedFetch, SimulatedLocationSource, SimulatedRemoteSource};

#[tokio::test]
async fn scenario_absent_target_removes_marker() {
    let surface = RecordingSurface::new();
    let log = surface.mutation_log();

    let location = Arc::new(SimulatedLocationSource::scripted(vec![]));
    // One position report, then the script exhausts to Absent.
    let remote = Arc::new(SimulatedRemoteSource::scripted(vec![
        ScriptedFetch::immediate(Ok(RemotePayload::Present("1,2".to_string()))),
    ]));

    let session = spawn_session(
        SessionConfig::default(),
        Box::new(surface),
        location,
        remote,
    );
    let mut notices = session.subscribe_notices();

    session.refresh().await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    session.refresh().await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let snapshot = log.lock().unwrap().clone();
    assert_eq!(
        snapshot,
        vec![
            AppliedMutation::Upserted {
                role: MarkerRole::Destination,
                point: GeoPoint::new(1.0, 2.0),
                label: "Animal".to_string(),
                handle: MarkerHandle(1),
            },
            AppliedMutation::Removed {
                handle: MarkerHandle(1),
            },
        ]
    );

    assert_eq!(
        notices.try_recv().unwrap(),
        Notice::TargetAbsent {
            path: "Animal/GPS".to_string(),
        }
    );

    assert_eq!(session.status().await.destination, None);

    // Absent again with nothing on the surface: no further mutation.
    session.refresh().await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(log.lock().unwrap().len(), 2);
}
