use thiserror::Error;

/// Errors raised when a [`TrackerConfig`] holds an out-of-range value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("track_thresh must be within [0, 1], got {0}")]
    TrackThresh(f32),
    #[error("match_thresh must be within (0, 1], got {0}")]
    MatchThresh(f32),
    #[error("trajectory_history_length must be at least 1, got {0}")]
    TrajectoryHistoryLength(usize),
    #[error("min_box_area must be finite and non-negative, got {0}")]
    MinBoxArea(f32),
}

/// Construction time parameters of a [`crate::Tracker`].
///
/// | field                       | default | range        |
/// |-----------------------------|---------|--------------|
/// | `track_thresh`              | `0.5`   | `[0, 1]`     |
/// | `match_thresh`              | `0.8`   | `(0, 1]`     |
/// | `track_buffer`              | `30`    | `>= 0`       |
/// | `trajectory_history_length` | `30`    | `>= 1`       |
/// | `min_box_area`              | `10.0`  | `>= 0`       |
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Confidence split point between high and low confidence detections.
    pub track_thresh: f32,
    /// Minimum intersection over union for the first association. The second association uses 70% of this value.
    pub match_thresh: f32,
    /// Maximum number of consecutive unmatched frames before a track is deleted.
    /// `0` deletes a track on its first miss.
    pub track_buffer: usize,
    /// Maximum number of trajectory entries retained per track.
    pub trajectory_history_length: usize,
    /// Declared minimum box area. Validated but not applied during association.
    pub min_box_area: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            track_thresh: 0.5,
            match_thresh: 0.8,
            track_buffer: 30,
            trajectory_history_length: 30,
            min_box_area: 10.0,
        }
    }
}

impl TrackerConfig {
    /// Set track_thresh
    pub fn with_track_thresh(&mut self, track_thresh: f32) -> &mut Self {
        self.track_thresh = track_thresh;
        self
    }

    /// Set match_thresh
    pub fn with_match_thresh(&mut self, match_thresh: f32) -> &mut Self {
        self.match_thresh = match_thresh;
        self
    }

    /// Set track_buffer
    pub fn with_track_buffer(&mut self, track_buffer: usize) -> &mut Self {
        self.track_buffer = track_buffer;
        self
    }

    /// Set trajectory_history_length
    pub fn with_trajectory_history_length(
        &mut self,
        trajectory_history_length: usize,
    ) -> &mut Self {
        self.trajectory_history_length = trajectory_history_length;
        self
    }

    /// Set min_box_area
    pub fn with_min_box_area(&mut self, min_box_area: f32) -> &mut Self {
        self.min_box_area = min_box_area;
        self
    }

    /// Threshold used by the second (low confidence) association.
    pub fn low_match_thresh(&self) -> f32 {
        self.match_thresh * 0.7
    }

    /// Check every field against its documented range. Values are never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.track_thresh) {
            return Err(ConfigError::TrackThresh(self.track_thresh));
        }
        if !(self.match_thresh > 0.0 && self.match_thresh <= 1.0) {
            return Err(ConfigError::MatchThresh(self.match_thresh));
        }
        if self.trajectory_history_length < 1 {
            return Err(ConfigError::TrajectoryHistoryLength(
                self.trajectory_history_length,
            ));
        }
        if !(self.min_box_area.is_finite() && self.min_box_area >= 0.0) {
            return Err(ConfigError::MinBoxArea(self.min_box_area));
        }
        Ok(())
    }
}
