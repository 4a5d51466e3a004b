use chrono::{DateTime, Utc};

/// One recorded GPS sample. Elevation and time are optional in the file
/// format; time is required on the first and last point of a track for
/// duration-dependent metrics.
#[derive(Debug, Clone)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,
    pub elevation: Option<f64>,
    pub time: Option<DateTime<Utc>>,
}

/// One continuous recording: points in file order, timestamps
/// non-decreasing.
#[derive(Debug, Clone, Default)]
pub struct Segment {
    pub points: Vec<TrackPoint>,
}

#[derive(Debug, Clone, Default)]
pub struct Track {
    pub name: Option<String>,
    pub sport: Option<String>,
    pub segments: Vec<Segment>,
}

impl Track {
    /// Points of all segments concatenated in file order.
    pub fn points(&self) -> impl Iterator<Item = &TrackPoint> {
        self.segments.iter().flat_map(|s| s.points.iter())
    }

    pub fn point_count(&self) -> usize {
        self.segments.iter().map(|s| s.points.len()).sum()
    }
}

/// Transient parse output; discarded once metrics are computed.
#[derive(Debug, Clone, Default)]
pub struct Gpx {
    pub tracks: Vec<Track>,
}
