use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use gmk_coord::{parse_wire, GeoPoint, ParseError};
use gmk_reconcile::{
    confirm_handle, report_destination, report_destination_absent, report_origin, FixReport,
    Freshness, Generation, GenerationGate, MapCommand, MarkerRole, ReconcilerState,
};
use gmk_sources::{
    LocationError, LocationSource, Permission, RemoteError, RemotePayload, RemoteTargetSource,
};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{MapSurface, Notice, SessionConfig};

const MAILBOX_DEPTH: usize = 64;
const NOTICE_BUS_DEPTH: usize = 64;

// ---------------------------------------------------------------------------
// StatusSnapshot
// ---------------------------------------------------------------------------

/// Point-in-time view of session state, readable from any task.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub session_id: Uuid,
    /// Last recorded device fix.
    pub origin: Option<GeoPoint>,
    /// Last recorded tracked-target fix.
    pub destination: Option<GeoPoint>,
    /// Newest dispatched refresh generation, 0 before the first refresh.
    pub latest_generation: u64,
    pub last_updated: Option<DateTime<Utc>>,
    pub config_digest: String,
}

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

/// The session mailbox is closed; the actor has stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SessionClosed;

impl fmt::Display for SessionClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session closed")
    }
}

impl std::error::Error for SessionClosed {}

enum SessionMsg {
    Refresh,
    OriginResult {
        gen: Generation,
        outcome: Result<Option<GeoPoint>, LocationError>,
    },
    RemoteResult {
        gen: Generation,
        outcome: Result<RemotePayload, RemoteError>,
    },
}

/// Cloneable handle to a running session.
///
/// Dropping every handle closes the mailbox and stops the actor; source
/// tasks still in flight then post into a closed queue and their results
/// are discarded.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<SessionMsg>,
    notices: broadcast::Sender<Notice>,
    status: Arc<RwLock<StatusSnapshot>>,
}

impl SessionHandle {
    /// Trigger a refresh pass. Both sources are queried independently;
    /// there is no de-duplication of concurrent refreshes.
    pub async fn refresh(&self) -> Result<(), SessionClosed> {
        self.tx
            .send(SessionMsg::Refresh)
            .await
            .map_err(|_| SessionClosed)
    }

    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    pub async fn status(&self) -> StatusSnapshot {
        self.status.read().await.clone()
    }
}

// ---------------------------------------------------------------------------
// Actor
// ---------------------------------------------------------------------------

/// Spawn a session actor onto the current tokio runtime.
///
/// The actor exclusively owns the reconciler state and the surface; every
/// mutation happens on its task, draining one queue, so no locking is
/// needed around marker state.
pub fn spawn_session(
    cfg: SessionConfig,
    surface: Box<dyn MapSurface>,
    location: Arc<dyn LocationSource>,
    remote: Arc<dyn RemoteTargetSource>,
) -> SessionHandle {
    let (tx, rx) = mpsc::channel(MAILBOX_DEPTH);
    let (notices, _) = broadcast::channel(NOTICE_BUS_DEPTH);

    let status = Arc::new(RwLock::new(StatusSnapshot {
        session_id: Uuid::new_v4(),
        origin: None,
        destination: None,
        latest_generation: 0,
        last_updated: None,
        config_digest: cfg.digest(),
    }));

    let actor = SessionActor {
        cfg,
        state: ReconcilerState::new(),
        gate: GenerationGate::new(),
        surface,
        location,
        remote,
        mailbox: tx.downgrade(),
        notices: notices.clone(),
        status: Arc::clone(&status),
    };

    tokio::spawn(actor.run(rx));

    SessionHandle {
        tx,
        notices,
        status,
    }
}

struct SessionActor {
    cfg: SessionConfig,
    state: ReconcilerState,
    gate: GenerationGate,
    surface: Box<dyn MapSurface>,
    location: Arc<dyn LocationSource>,
    remote: Arc<dyn RemoteTargetSource>,
    /// Weak so the actor does not keep its own mailbox alive: the run
    /// loop ends when the last external handle is dropped.
    mailbox: mpsc::WeakSender<SessionMsg>,
    notices: broadcast::Sender<Notice>,
    status: Arc<RwLock<StatusSnapshot>>,
}

impl SessionActor {
    async fn run(mut self, mut rx: mpsc::Receiver<SessionMsg>) {
        while let Some(msg) = rx.recv().await {
            match msg {
                SessionMsg::Refresh => self.handle_refresh().await,
                SessionMsg::OriginResult { gen, outcome } => {
                    self.handle_origin(gen, outcome).await
                }
                SessionMsg::RemoteResult { gen, outcome } => {
                    self.handle_remote(gen, outcome).await
                }
            }
        }
        debug!("session mailbox closed; actor stopping");
    }

    async fn handle_refresh(&mut self) {
        let gen = self.gate.dispatch();
        info!(generation = gen.0, "refresh dispatched");

        // Permission is a precondition, not a query failure: when denied
        // the device is never asked and the embedder prompts instead.
        match self.location.permission() {
            Permission::Denied => {
                warn!(source = self.location.name(), "location permission denied");
                let _ = self.notices.send(Notice::PermissionRequired);
            }
            Permission::Granted => {
                // Tasks hold the weak sender and upgrade only at delivery:
                // once the last session handle is dropped, results from
                // still-running queries are discarded instead of keeping
                // the mailbox alive.
                let mailbox = self.mailbox.clone();
                let location = Arc::clone(&self.location);
                tokio::spawn(async move {
                    let outcome = location.current_fix().await;
                    if let Some(tx) = mailbox.upgrade() {
                        let _ = tx.send(SessionMsg::OriginResult { gen, outcome }).await;
                    }
                });
            }
        }

        let mailbox = self.mailbox.clone();
        let remote = Arc::clone(&self.remote);
        let path = self.cfg.remote_path.clone();
        tokio::spawn(async move {
            let outcome = remote.fetch(&path).await;
            if let Some(tx) = mailbox.upgrade() {
                let _ = tx.send(SessionMsg::RemoteResult { gen, outcome }).await;
            }
        });

        self.publish_status().await;
    }

    async fn handle_origin(
        &mut self,
        gen: Generation,
        outcome: Result<Option<GeoPoint>, LocationError>,
    ) {
        if let Freshness::Stale { latest, got } = self.gate.accept(gen) {
            debug!(latest, got, "dropping stale origin result");
            return;
        }

        match outcome {
            Ok(Some(reading)) => {
                let cmds = report_origin(&mut self.state, FixReport::from_reading(reading));
                self.apply(cmds);
            }
            Ok(None) => debug!("no device fix; marker state unchanged"),
            Err(err) => warn!(%err, source = self.location.name(), "location query failed"),
        }

        self.publish_status().await;
    }

    async fn handle_remote(
        &mut self,
        gen: Generation,
        outcome: Result<RemotePayload, RemoteError>,
    ) {
        if let Freshness::Stale { latest, got } = self.gate.accept(gen) {
            debug!(latest, got, "dropping stale remote result");
            return;
        }

        match outcome {
            Ok(RemotePayload::Present(raw)) => match parse_wire(&raw) {
                Ok(point) => {
                    let cmds =
                        report_destination(&mut self.state, FixReport::from_reading(point));
                    self.apply(cmds);
                }
                Err(ParseError::BadFormat { segments }) => {
                    warn!(raw = %raw, segments, "malformed target payload");
                    let _ = self.notices.send(Notice::BadCoordinateFormat { segments });
                }
                Err(ParseError::BadValue { segment, .. }
                | ParseError::OutOfRange { segment, .. }) => {
                    warn!(raw = %raw, segment, "unparseable target coordinate");
                    let _ = self.notices.send(Notice::BadCoordinateValues {
                        segment: segment.to_string(),
                    });
                }
            },
            Ok(RemotePayload::Absent) => {
                let cmds = report_destination_absent(&mut self.state);
                self.apply(cmds);
                info!(path = %self.cfg.remote_path, "target path absent; destination cleared");
                let _ = self.notices.send(Notice::TargetAbsent {
                    path: self.cfg.remote_path.clone(),
                });
            }
            Err(err) => {
                warn!(%err, source = self.remote.name(), "remote fetch failed");
                let _ = self.notices.send(Notice::FetchFailed {
                    detail: err.to_string(),
                });
            }
        }

        self.publish_status().await;
    }

    fn apply(&mut self, cmds: Vec<MapCommand>) {
        for cmd in cmds {
            match cmd {
                MapCommand::Upsert { role, point } => {
                    let label = match role {
                        MarkerRole::Origin => self.cfg.origin_label.as_str(),
                        MarkerRole::Destination => self.cfg.destination_label.as_str(),
                    };
                    let handle = self.surface.upsert_marker(role, point, label);
                    confirm_handle(&mut self.state, role, handle);
                    info!(
                        role = role.as_str(),
                        lat = point.latitude,
                        lon = point.longitude,
                        "marker upserted"
                    );
                }
                MapCommand::Remove { role, handle } => {
                    self.surface.remove_marker(handle);
                    info!(role = role.as_str(), "marker removed");
                }
            }
        }
    }

    async fn publish_status(&mut self) {
        let mut st = self.status.write().await;
        st.origin = self.state.origin.point;
        st.destination = self.state.destination.point;
        st.latest_generation = self.gate.latest();
        st.last_updated = Some(Utc::now());
    }
}
