//! Firebase Realtime Database REST source.
//!
//! The store exposes every node over REST: `GET {base_url}/{path}.json`
//! returns the node's value as JSON, or `null` when the path does not
//! exist. The tracked target writes its position as a plain string node,
//! but any present value is stringified and handed to the parser, which
//! then classifies it.

use async_trait::async_trait;
use serde_json::Value;

use crate::{RemoteError, RemotePayload, RemoteTargetSource};

pub struct FirebaseRestSource {
    base_url: String,
    client: reqwest::Client,
}

impl FirebaseRestSource {
    /// `base_url` is the database root, e.g.
    /// `https://myproject-default-rtdb.firebaseio.com`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn node_url(&self, path: &str) -> String {
        format!("{}/{}.json", self.base_url, path.trim_matches('/'))
    }
}

#[async_trait]
impl RemoteTargetSource for FirebaseRestSource {
    fn name(&self) -> &'static str {
        "firebase-rest"
    }

    async fn fetch(&self, path: &str) -> Result<RemotePayload, RemoteError> {
        let url = self.node_url(path);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RemoteError::Transport(format!("status {status}")));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| RemoteError::Transport(format!("invalid body: {e}")))?;

        Ok(match body {
            Value::Null => RemotePayload::Absent,
            Value::String(s) => RemotePayload::Present(s),
            // Non-string nodes are stringified; the coordinate parser
            // downstream decides whether the result is usable.
            other => RemotePayload::Present(other.to_string()),
        })
    }
}
