use std::sync::Arc;
use std::time::Duration;

use gmk_session::{spawn_session, RecordingSurface, SessionConfig};
use gmk_sources::{RemotePayload, ScriptedFetch, SimulatedLocationSource, SimulatedRemoteSource};

#[tokio::test]
async fn scenario_teardown_discards_inflight_results() {
    let surface = RecordingSurface::new();
    let log = surface.mutation_log();

    let location = Arc::new(SimulatedLocationSource::denied());
    let remote = Arc::new(SimulatedRemoteSource::scripted(vec![
        ScriptedFetch::delayed(
            Duration::from_millis(200),
            Ok(RemotePayload::Present("1,2".to_string())),
        ),
    ]));

    let session = spawn_session(
        SessionConfig::default(),
        Box::new(surface),
        location,
        remote,
    );

    session.refresh().await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Screen torn down while the fetch is still in flight.
    drop(session);
    tokio::time::sleep(Duration::from_millis(400)).await;

    // The late result found a closed mailbox and was discarded; nothing
    // was applied to the surface after teardown.
    assert!(log.lock().unwrap().is_empty());
}
