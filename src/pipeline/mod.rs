pub mod metrics;
pub mod parse;

use crate::error::ParseError;
use crate::types::metrics::MetricsRecord;

pub use metrics::MovingConfig;

/// Parses raw GPX bytes and computes the metrics record for the first
/// track. Additional tracks in the file are ignored, matching the
/// behavior the dashboard relies on.
///
/// Pure and stateless: identical bytes always yield an identical
/// record.
pub fn extract_metrics(bytes: &[u8], config: &MovingConfig) -> Result<MetricsRecord, ParseError> {
    let gpx = parse::parse(bytes)?;

    let track = gpx.tracks.first().ok_or(ParseError::NoTracks)?;
    if track.point_count() == 0 {
        return Err(ParseError::NoPoints);
    }

    // Elapsed duration needs the endpoints of the recording.
    let first_time = track.points().next().and_then(|p| p.time);
    let last_time = track.points().last().and_then(|p| p.time);
    if first_time.is_none() || last_time.is_none() {
        return Err(ParseError::MissingTimestamps);
    }

    Ok(metrics::compute(track, config))
}
