//! Helpers for the `distquery` command-line interface.

use distquery_lib::{DistanceResult, Error as LibError, ErrorKind};

/// Process exit code for a failed query.
pub fn exit_code(error: &LibError) -> u8 {
    match error.kind() {
        ErrorKind::Internal => 1,
        ErrorKind::InvalidArgument => 2,
        ErrorKind::FailedPrecondition => 3,
    }
}

/// Human-readable rendering of a result.
pub fn render_text(result: &DistanceResult) -> String {
    let mut out = format!("Distance: {:.3} km", result.distance_km);
    if let Some(text) = &result.distance_text {
        out.push_str(&format!(" ({})", text));
    }
    out.push_str(&format!("\nDuration: {:.1} min", result.duration_minutes));
    if let Some(text) = &result.duration_text {
        out.push_str(&format!(" ({})", text));
    }
    out
}
