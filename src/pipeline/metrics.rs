use crate::types::metrics::MetricsRecord;
use crate::types::track::{Track, TrackPoint};

/// Mean earth radius, meters (spherical approximation).
const EARTH_RADIUS_M: f64 = 6_371_000.0;

const DEFAULT_TRACK_NAME: &str = "Mon activité";

/// Thresholds for the moving/stationary classification of consecutive
/// point pairs.
#[derive(Debug, Clone, Copy)]
pub struct MovingConfig {
    /// Pairs slower than this are stationary, m/s.
    pub speed_threshold_ms: f64,
    /// Pairs further apart in time than this are treated as GPS
    /// dropouts and excluded from moving data, seconds.
    pub max_point_gap_s: f64,
}

impl Default for MovingConfig {
    fn default() -> Self {
        Self {
            speed_threshold_ms: 0.5,
            max_point_gap_s: 60.0,
        }
    }
}

/// Computes the full metrics record for one track. Segments are
/// concatenated in file order, so pair distances accumulate across
/// segment joins. Total over any input: degenerate tracks (single
/// point, zero elapsed time) yield zero distances and speeds.
pub fn compute(track: &Track, config: &MovingConfig) -> MetricsRecord {
    let points: Vec<&TrackPoint> = track.points().collect();

    let mut distance_m = 0.0;
    let mut moving_distance_m = 0.0;
    let mut moving_time_s = 0.0;
    let mut max_speed_ms = 0.0f64;

    for pair in points.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);

        let dist = pair_distance_m(prev, curr);
        distance_m += dist;

        let (Some(t0), Some(t1)) = (prev.time, curr.time) else {
            continue;
        };
        let dt = (t1 - t0).num_milliseconds() as f64 / 1000.0;
        if dt <= 0.0 || dt > config.max_point_gap_s {
            continue;
        }

        let speed_ms = dist / dt;
        if speed_ms < config.speed_threshold_ms {
            continue;
        }

        moving_distance_m += dist;
        moving_time_s += dt;
        max_speed_ms = max_speed_ms.max(speed_ms);
    }

    let start = points.first().and_then(|p| p.time);
    let end = points.last().and_then(|p| p.time);
    let duration_s = match (start, end) {
        (Some(a), Some(b)) => ((b - a).num_milliseconds() as f64 / 1000.0).max(0.0),
        _ => 0.0,
    };

    let distance_km = distance_m / 1000.0;
    let moving_distance_km = moving_distance_m / 1000.0;

    let avg_speed_kmh = if duration_s > 0.0 {
        distance_km / (duration_s / 3600.0)
    } else {
        0.0
    };
    let moving_avg_speed_kmh = if moving_time_s > 0.0 {
        moving_distance_km / (moving_time_s / 3600.0)
    } else {
        0.0
    };

    MetricsRecord {
        name: track
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_TRACK_NAME.to_string()),
        sport: track.sport.clone().unwrap_or_default(),
        date: start
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        distance_km: round_to(distance_km, 3),
        duration_min: round_to(duration_s / 60.0, 2),
        avg_speed_kmh: round_to(avg_speed_kmh, 2),
        max_speed_kmh: round_to(max_speed_ms * 3.6, 2),
        moving_distance_km: round_to(moving_distance_km, 3),
        moving_time_min: round_to(moving_time_s / 60.0, 2),
        moving_avg_speed_kmh: round_to(moving_avg_speed_kmh, 2),
    }
}

/// Great-circle distance between two points, combined with the
/// elevation delta when both points carry one.
fn pair_distance_m(a: &TrackPoint, b: &TrackPoint) -> f64 {
    let horizontal = haversine_m(a.lat, a.lon, b.lat, b.lon);
    match (a.elevation, b.elevation) {
        (Some(e0), Some(e1)) => {
            let vertical = e1 - e0;
            (horizontal * horizontal + vertical * vertical).sqrt()
        }
        _ => horizontal,
    }
}

fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Rounding happens once here, never during accumulation.
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
