use serde::{Deserialize, Serialize};

/// Flat record returned to the caller. The JSON field names are the wire
/// contract consumed by the dashboard, hence the French labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "type")]
    pub sport: String,
    /// Calendar date (YYYY-MM-DD, UTC) of the track's start time.
    pub date: String,
    /// Total 3D-aware distance, kilometers.
    #[serde(rename = "distance totale")]
    pub distance_km: f64,
    /// Elapsed wall-clock duration, minutes. Includes pauses.
    #[serde(rename = "durée totale")]
    pub duration_min: f64,
    /// Average speed over elapsed duration, km/h. 0.0 when duration is zero.
    #[serde(rename = "vitesse moyenne")]
    pub avg_speed_kmh: f64,
    /// Maximum instantaneous speed among moving pairs, km/h.
    #[serde(rename = "vitesse max")]
    pub max_speed_kmh: f64,
    /// Distance covered while classified as moving, kilometers.
    #[serde(rename = "distance en mvt")]
    pub moving_distance_km: f64,
    /// Time spent moving, minutes.
    #[serde(rename = "temps en mvt")]
    pub moving_time_min: f64,
    /// Average speed while moving, km/h. 0.0 when moving time is zero.
    #[serde(rename = "vitesse moyenne en mvt")]
    pub moving_avg_speed_kmh: f64,
}
