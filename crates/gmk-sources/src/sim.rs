//! Scripted in-process sources for demos and scenario tests.
//!
//! Both simulators pop from a response script first and fall back to a
//! steady answer when the script is exhausted. Script entries can delay
//! before responding, which is how tests stage out-of-order completions.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use gmk_coord::GeoPoint;

use crate::{
    LocationError, LocationSource, Permission, RemoteError, RemotePayload, RemoteTargetSource,
};

// ---------------------------------------------------------------------------
// Location simulator
// ---------------------------------------------------------------------------

pub struct SimulatedLocationSource {
    permission: Permission,
    script: Mutex<VecDeque<Result<Option<GeoPoint>, LocationError>>>,
    steady: Option<GeoPoint>,
}

impl SimulatedLocationSource {
    /// Always grants permission and answers with `fix`.
    pub fn steady(fix: GeoPoint) -> Self {
        Self {
            permission: Permission::Granted,
            script: Mutex::new(VecDeque::new()),
            steady: Some(fix),
        }
    }

    /// Permission denied; never queried by a well-behaved caller.
    pub fn denied() -> Self {
        Self {
            permission: Permission::Denied,
            script: Mutex::new(VecDeque::new()),
            steady: None,
        }
    }

    /// Answers from `responses` in order, then `Ok(None)`.
    pub fn scripted(responses: Vec<Result<Option<GeoPoint>, LocationError>>) -> Self {
        Self {
            permission: Permission::Granted,
            script: Mutex::new(responses.into()),
            steady: None,
        }
    }
}

#[async_trait]
impl LocationSource for SimulatedLocationSource {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn permission(&self) -> Permission {
        self.permission
    }

    async fn current_fix(&self) -> Result<Option<GeoPoint>, LocationError> {
        let scripted = self.script.lock().unwrap().pop_front();
        match scripted {
            Some(outcome) => outcome,
            None => Ok(self.steady),
        }
    }
}

// ---------------------------------------------------------------------------
// Remote simulator
// ---------------------------------------------------------------------------

/// One scripted remote response: wait `delay`, then yield `outcome`.
pub struct ScriptedFetch {
    pub delay: Duration,
    pub outcome: Result<RemotePayload, RemoteError>,
}

impl ScriptedFetch {
    pub fn immediate(outcome: Result<RemotePayload, RemoteError>) -> Self {
        Self {
            delay: Duration::ZERO,
            outcome,
        }
    }

    pub fn delayed(delay: Duration, outcome: Result<RemotePayload, RemoteError>) -> Self {
        Self { delay, outcome }
    }
}

pub struct SimulatedRemoteSource {
    script: Mutex<VecDeque<ScriptedFetch>>,
    steady: Result<RemotePayload, RemoteError>,
    paths_seen: Mutex<Vec<String>>,
}

impl SimulatedRemoteSource {
    /// Always answers with `payload`.
    pub fn steady(payload: RemotePayload) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            steady: Ok(payload),
            paths_seen: Mutex::new(Vec::new()),
        }
    }

    /// Always fails with a transport error.
    pub fn failing(msg: impl Into<String>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            steady: Err(RemoteError::Transport(msg.into())),
            paths_seen: Mutex::new(Vec::new()),
        }
    }

    /// Answers from `responses` in order, then `Absent`.
    pub fn scripted(responses: Vec<ScriptedFetch>) -> Self {
        Self {
            script: Mutex::new(responses.into()),
            steady: Ok(RemotePayload::Absent),
            paths_seen: Mutex::new(Vec::new()),
        }
    }

    /// Paths requested so far, in call order.
    pub fn paths_seen(&self) -> Vec<String> {
        self.paths_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteTargetSource for SimulatedRemoteSource {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn fetch(&self, path: &str) -> Result<RemotePayload, RemoteError> {
        self.paths_seen.lock().unwrap().push(path.to_string());

        let scripted = self.script.lock().unwrap().pop_front();
        match scripted {
            Some(entry) => {
                if !entry.delay.is_zero() {
                    tokio::time::sleep(entry.delay).await;
                }
                entry.outcome
            }
            None => self.steady.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn location_script_exhausts_to_no_fix() {
        let src = SimulatedLocationSource::scripted(vec![
            Ok(Some(GeoPoint::new(1.0, 2.0))),
            Err(LocationError::Unavailable("cold start".to_string())),
        ]);

        assert_eq!(src.current_fix().await.unwrap(), Some(GeoPoint::new(1.0, 2.0)));
        assert!(src.current_fix().await.is_err());
        assert_eq!(src.current_fix().await.unwrap(), None);
    }

    #[tokio::test]
    async fn remote_records_requested_paths() {
        let src = SimulatedRemoteSource::steady(RemotePayload::Present("1,2".to_string()));
        src.fetch("Animal/GPS").await.unwrap();
        src.fetch("Animal/GPS").await.unwrap();
        assert_eq!(src.paths_seen(), vec!["Animal/GPS", "Animal/GPS"]);
    }

    #[tokio::test]
    async fn remote_script_exhausts_to_absent() {
        let src = SimulatedRemoteSource::scripted(vec![ScriptedFetch::immediate(Ok(
            RemotePayload::Present("1,2".to_string()),
        ))]);

        assert_eq!(
            src.fetch("Animal/GPS").await.unwrap(),
            RemotePayload::Present("1,2".to_string())
        );
        assert_eq!(src.fetch("Animal/GPS").await.unwrap(), RemotePayload::Absent);
    }
}
