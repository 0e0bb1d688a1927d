//! Request schema and validation for distance queries.
//!
//! Payloads arrive as untyped JSON. [`parse_request`] coerces the four
//! coordinate fields and returns either a typed [`DistanceRequest`] or a
//! [`ValidationError`] naming every rejected field.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Payload keys in the order they are validated.
pub const COORDINATE_FIELDS: [&str; 4] = ["originLat", "originLng", "destLat", "destLng"];

/// Validated origin/destination pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceRequest {
    pub origin_lat: f64,
    pub origin_lng: f64,
    pub dest_lat: f64,
    pub dest_lng: f64,
}

impl DistanceRequest {
    /// Build a request from two already-parsed coordinates.
    pub fn between(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            origin_lat: origin.lat,
            origin_lng: origin.lng,
            dest_lat: destination.lat,
            dest_lng: destination.lng,
        }
    }

    pub fn origin(&self) -> Coordinate {
        Coordinate::new(self.origin_lat, self.origin_lng)
    }

    pub fn destination(&self) -> Coordinate {
        Coordinate::new(self.dest_lat, self.dest_lng)
    }
}

/// A single latitude/longitude pair.
///
/// Displays as `"<lat>,<lng>"`, the form the Distance Matrix API expects for
/// `origins` and `destinations`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Rejected payload, listing the fields that failed coercion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid coordinate fields: {}", .invalid_fields.join(", "))]
pub struct ValidationError {
    pub invalid_fields: Vec<&'static str>,
}

impl ValidationError {
    pub fn new(invalid_fields: Vec<&'static str>) -> Self {
        Self { invalid_fields }
    }
}

/// Validate an untyped payload into a [`DistanceRequest`].
///
/// Every field is checked so the error reports all offenders at once.
pub fn parse_request(payload: &Value) -> Result<DistanceRequest, ValidationError> {
    let mut values = [0.0_f64; 4];
    let mut invalid = Vec::new();

    for (slot, field) in values.iter_mut().zip(COORDINATE_FIELDS) {
        match payload.get(field).and_then(coerce_finite) {
            Some(value) => *slot = value,
            None => invalid.push(field),
        }
    }

    if !invalid.is_empty() {
        return Err(ValidationError::new(invalid));
    }

    let [origin_lat, origin_lng, dest_lat, dest_lng] = values;
    Ok(DistanceRequest {
        origin_lat,
        origin_lng,
        dest_lat,
        dest_lng,
    })
}

/// Parse a `"<lat>,<lng>"` string, as typed on a command line.
pub fn parse_coordinate(raw: &str) -> Result<Coordinate, String> {
    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG but got '{}'", raw))?;

    let lat = coerce_str(lat).ok_or_else(|| format!("invalid latitude '{}'", lat.trim()))?;
    let lng = coerce_str(lng).ok_or_else(|| format!("invalid longitude '{}'", lng.trim()))?;
    Ok(Coordinate::new(lat, lng))
}

fn coerce_finite(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|v| v.is_finite()),
        Value::String(text) => coerce_str(text),
        _ => None,
    }
}

fn coerce_str(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
