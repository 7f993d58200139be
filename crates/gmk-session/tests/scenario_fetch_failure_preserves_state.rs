use std::sync::Arc;
use std::time::Duration;

use gmk_coord::GeoPoint;
use gmk_session::{spawn_session, Notice, RecordingSurface, SessionConfig};
use gmk_sources::{
    RemoteError, RemotePayload, ScriptedFetch, SimulatedLocationSource, SimulatedRemoteSource,
};

#[tokio::test]
async fn scenario_fetch_failure_preserves_state() {
    let surface = RecordingSurface::new();
    let log = surface.mutation_log();

    let location = Arc::new(SimulatedLocationSource::scripted(vec![]));
    let remote = Arc::new(SimulatedRemoteSource::scripted(vec![
        ScriptedFetch::immediate(Ok(RemotePayload::Present("1,2".to_string()))),
        ScriptedFetch::immediate(Err(RemoteError::Transport("connection refused".to_string()))),
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

    // Transport failure notifies and leaves the prior marker in place:
    // one upsert, no removal.
    assert_eq!(log.lock().unwrap().len(), 1);
    assert_eq!(session.status().await.destination, Some(GeoPoint::new(1.0, 2.0)));

    assert_eq!(
        notices.try_recv().unwrap(),
        Notice::FetchFailed {
            detail: "remote fetch failed: connection refused".to_string(),
        }
    );
}
