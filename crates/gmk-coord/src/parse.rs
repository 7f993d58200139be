use std::fmt;

use crate::GeoPoint;

/// Errors from decoding the `"lat,lon"` wire format.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseError {
    /// Splitting on `,` did not yield exactly two segments.
    BadFormat { segments: usize },

    /// A segment could not be parsed as a floating-point number.
    /// `segment` names which one ("latitude" or "longitude"); `raw` is the
    /// offending text after trimming.
    BadValue {
        segment: &'static str,
        raw: String,
    },

    /// Strict parsing only: a component is non-finite or outside WGS84
    /// bounds. Never returned by [`parse_wire`].
    OutOfRange {
        segment: &'static str,
        value: f64,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::BadFormat { segments } => {
                write!(f, "expected 2 comma-separated segments, got {segments}")
            }
            ParseError::BadValue { segment, raw } => {
                write!(f, "{segment} is not a number: {raw:?}")
            }
            ParseError::OutOfRange { segment, value } => {
                write!(f, "{segment} out of range: {value}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Decode a `"lat,lon"` payload.
///
/// Splits on `,`, requires exactly two segments, parses each as `f64`
/// after trimming surrounding whitespace. No range validation is applied;
/// any parseable float pair is accepted (see [`parse_wire_strict`]).
pub fn parse_wire(raw: &str) -> Result<GeoPoint, ParseError> {
    let segments: Vec<&str> = raw.split(',').collect();
    if segments.len() != 2 {
        return Err(ParseError::BadFormat {
            segments: segments.len(),
        });
    }

    let latitude = parse_segment(segments[0], "latitude")?;
    let longitude = parse_segment(segments[1], "longitude")?;

    Ok(GeoPoint::new(latitude, longitude))
}

/// Decode a `"lat,lon"` payload and reject non-finite or out-of-bounds
/// components with [`ParseError::OutOfRange`].
pub fn parse_wire_strict(raw: &str) -> Result<GeoPoint, ParseError> {
    let point = parse_wire(raw)?;

    if !point.latitude.is_finite() || !(-90.0..=90.0).contains(&point.latitude) {
        return Err(ParseError::OutOfRange {
            segment: "latitude",
            value: point.latitude,
        });
    }
    if !point.longitude.is_finite() || !(-180.0..=180.0).contains(&point.longitude) {
        return Err(ParseError::OutOfRange {
            segment: "longitude",
            value: point.longitude,
        });
    }

    Ok(point)
}

fn parse_segment(raw: &str, segment: &'static str) -> Result<f64, ParseError> {
    let trimmed = raw.trim();
    trimmed.parse::<f64>().map_err(|_| ParseError::BadValue {
        segment,
        raw: trimmed.to_string(),
    })
}
