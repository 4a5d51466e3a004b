use crate::pipeline::MovingConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub max_file_size: usize,
    pub moving: MovingConfig,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(9876);

        let max_file_size_mb: usize = std::env::var("MAX_FILE_SIZE_MB")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(25);

        let defaults = MovingConfig::default();
        let speed_threshold_ms = std::env::var("MOVING_SPEED_THRESHOLD_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.speed_threshold_ms);
        let max_point_gap_s = std::env::var("MAX_POINT_GAP_S")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_point_gap_s);

        Self {
            port,
            max_file_size: max_file_size_mb * 1024 * 1024,
            moving: MovingConfig {
                speed_threshold_ms,
                max_point_gap_s,
            },
        }
    }
}
