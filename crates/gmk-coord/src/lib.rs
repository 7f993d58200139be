//! gmk-coord
//!
//! Coordinate value type and the `"lat,lon"` wire format used by the
//! tracker's remote feed.
//!
//! Architectural decisions:
//! - `parse_wire` accepts any finite-or-not float pair (matches the feed
//!   writers in the field today); `parse_wire_strict` enforces WGS84 ranges
//! - Errors carry evidence (segment counts, offending raw text)
//!
//! Pure deterministic logic. No IO.

mod parse;
mod types;

pub use parse::{parse_wire, parse_wire_strict, ParseError};
pub use types::GeoPoint;
