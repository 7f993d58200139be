use serde::{Deserialize, Serialize};

/// User-visible conditions surfaced by the refresh flow.
///
/// Exact presentation text is the embedder's concern; the contract is only
/// that the conditions are distinguishable. Broadcast over the session's
/// notice bus.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notice {
    /// Remote payload did not split into exactly two segments.
    BadCoordinateFormat { segments: usize },

    /// A remote payload segment was not a parseable number.
    BadCoordinateValues { segment: String },

    /// The remote path does not exist; the destination marker, if any,
    /// was removed.
    TargetAbsent { path: String },

    /// Remote fetch failed in transport; marker state unchanged.
    FetchFailed { detail: String },

    /// Location permission is denied; the embedder should prompt the user
    /// before the next refresh.
    PermissionRequired,
}
