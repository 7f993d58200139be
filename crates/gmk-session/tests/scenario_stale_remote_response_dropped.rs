use std::sync::Arc;
use std::time::Duration;

use gmk_coord::GeoPoint;
use gmk_reconcile::MarkerRole;
use gmk_session::{spawn_session, AppliedMutation, RecordingSurface, SessionConfig};
use gmk_sources::{RemotePayload, ScriptedFetch, SimulatedLocationSource, SimulatedRemoteSource};

#[tokio::test]
async fn scenario_stale_remote_response_dropped() {
    let surface = RecordingSurface::new();
    let log = surface.mutation_log();

    let location = Arc::new(SimulatedLocationSource::scripted(vec![]));
    // Refresh 1's fetch is slow; refresh 2's answers immediately.
    let remote = Arc::new(SimulatedRemoteSource::scripted(vec![
        ScriptedFetch::delayed(
            Duration::from_millis(300),
            Ok(RemotePayload::Present("1,2".to_string())),
        ),
        ScriptedFetch::immediate(Ok(RemotePayload::Present("3,4".to_string()))),
    ]));

    let session = spawn_session(
        SessionConfig::default(),
        Box::new(surface),
        location,
        remote,
    );

    session.refresh().await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    session.refresh().await.unwrap();

    // Wait past the slow response's arrival.
    tokio::time::sleep(Duration::from_millis(500)).await;

    // Refresh 2's result landed first and won; refresh 1's late response
    // carries a superseded generation and is dropped, so the newer marker
    // is never overwritten with stale data.
    let log = log.lock().unwrap().clone();
    assert_eq!(log.len(), 1);
    assert!(matches!(
        log[0],
        AppliedMutation::Upserted { role: MarkerRole::Destination, point, .. }
            if point == GeoPoint::new(3.0, 4.0)
    ));

    let status = session.status().await;
    assert_eq!(status.destination, Some(GeoPoint::new(3.0, 4.0)));
    assert_eq!(status.latest_generation, 2);
}
