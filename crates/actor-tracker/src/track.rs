use std::collections::VecDeque;
use std::hash::{Hash, Hasher};

use crate::*;
use uuid::Uuid;

/// Number of successful matches after which a tentative track is confirmed.
pub const CONFIRMATION_HITS: usize = 3;

/// Enumeration type for the single target track state:
///
/// - Newly created tracks are classified as `Tentative` until enough evidence has been collected.
/// - Then, the track state is changed to `Confirmed`.
/// - Tracks that are no longer alive are classified as `Deleted` to mark them for removal from the set of active tracks.
///
/// A track never moves back to an earlier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    Tentative,
    Confirmed,
    Deleted,
}

/// Enumeration type for the source of the match
///
/// * `HighConfidence` means matched in the first association against a high confidence detection.
/// * `LowConfidence` means recovered in the second association against a low confidence detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchSource {
    HighConfidence { iou: f32 },
    LowConfidence { iou: f32 },
}

/// One entry of a track's position history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    pub frame_number: u64,
    pub bbox: BoundingBox,
    pub center: (f32, f32),
}

impl TrajectoryPoint {
    fn new(frame_number: u64, bbox: BoundingBox) -> TrajectoryPoint {
        TrajectoryPoint {
            frame_number,
            bbox,
            center: bbox.center(),
        }
    }
}

/// A single target track.
#[derive(Debug, Clone)]
pub struct Track {
    /// A unique track identifier.
    track_id: usize,
    /// Category label taken from the detection that spawned the track.
    actor_type: String,
    /// The current track state.
    state: TrackState,
    /// Bounding box of the latest match.
    bbox: BoundingBox,
    /// Confidence of the latest match.
    confidence: Option<f32>,
    /// Identifier of the last detection matched to this track.
    detection_id: Uuid,
    /// The latest matched detection source.
    match_source: Option<MatchSource>,
    /// Last frame at which this track was matched or aged.
    frame_number: u64,
    /// Total number of matched frames since first occurance.
    age: usize,
    /// Total number of measurement updates.
    hits: usize,
    /// Total number of frames since last measurement update.
    time_since_update: usize,
    /// Maximum number of entries kept in `trajectory`.
    trajectory_history_length: usize,
    /// Recent positions, oldest first.
    trajectory: VecDeque<TrajectoryPoint>,
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.track_id == other.track_id
    }
}

impl Eq for Track {}

impl Hash for Track {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.track_id.hash(state);
    }
}

impl Track {
    /// Returns a new tentative Track
    ///
    /// # Parameters
    ///
    /// * `track_id`: A unique track identifier.
    /// * `detection`: The detection this track originates from.
    /// * `frame_number`: The frame the track is created in.
    /// * `trajectory_history_length`: Maximum number of trajectory entries retained. Oldest entries are evicted first.
    pub fn new(
        track_id: usize,
        detection: &Detection,
        frame_number: u64,
        trajectory_history_length: usize,
    ) -> Track {
        let mut trajectory = VecDeque::with_capacity(trajectory_history_length.min(64));
        trajectory.push_back(TrajectoryPoint::new(frame_number, *detection.bbox()));

        Track {
            track_id,
            actor_type: detection.actor_type().to_owned(),
            state: TrackState::Tentative,
            bbox: *detection.bbox(),
            confidence: detection.confidence(),
            detection_id: *detection.id(),
            match_source: None,
            frame_number,
            age: 1,
            hits: 1,
            time_since_update: 0,
            trajectory_history_length,
            trajectory,
        }
    }

    /// Return the identifier of the track
    pub fn track_id(&self) -> usize {
        self.track_id
    }

    /// Return the category label of the track
    pub fn actor_type(&self) -> &str {
        &self.actor_type
    }

    /// Return the TrackState of the track
    pub fn state(&self) -> TrackState {
        self.state
    }

    /// Returns the bounding box of the latest match
    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    /// Returns the confidence of the latest match
    pub fn confidence(&self) -> Option<f32> {
        self.confidence
    }

    /// Return the identifier of the last detection matched to this track
    pub fn detection_id(&self) -> &Uuid {
        &self.detection_id
    }

    /// Return the match source of the track
    pub fn match_source(&self) -> Option<MatchSource> {
        self.match_source
    }

    /// Return the last frame at which this track was processed
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Return the number of matched frames since creation
    pub fn age(&self) -> usize {
        self.age
    }

    /// Return the number of successful matches
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Return the time since update of the track
    pub fn time_since_update(&self) -> usize {
        self.time_since_update
    }

    /// Return the position history of the track, oldest first
    pub fn trajectory(&self) -> &VecDeque<TrajectoryPoint> {
        &self.trajectory
    }

    /// Apply a matched detection.
    ///
    /// Refreshes geometry and confidence, resets `time_since_update` and appends to the trajectory. A tentative track
    /// is confirmed on the match that brings `hits` to [`CONFIRMATION_HITS`].
    ///
    /// # Parameters
    ///
    /// * `detection`: The associated detection. Its `actor_type` is ignored.
    /// * `frame_number`: The current frame.
    /// * `match_source`: Which association stage produced the match.
    pub fn update(&mut self, detection: &Detection, frame_number: u64, match_source: MatchSource) {
        self.bbox = *detection.bbox();
        self.confidence = detection.confidence();
        self.detection_id = *detection.id();
        self.match_source = Some(match_source);
        self.frame_number = frame_number;
        self.age += 1;
        self.hits += 1;
        self.time_since_update = 0;

        while self.trajectory.len() >= self.trajectory_history_length.max(1) {
            self.trajectory.pop_front();
        }
        self.trajectory
            .push_back(TrajectoryPoint::new(frame_number, self.bbox));

        if self.is_tentative() && self.hits >= CONFIRMATION_HITS {
            self.state = TrackState::Confirmed;
        }
    }

    /// Age the track by one unmatched frame. Marks the track deleted once `time_since_update` exceeds `track_buffer`.
    ///
    /// # Parameters
    ///
    /// * `frame_number`: The current frame.
    /// * `track_buffer`: The maximum number of consecutive misses tolerated.
    pub fn mark_missed(&mut self, frame_number: u64, track_buffer: usize) {
        self.frame_number = frame_number;
        self.time_since_update += 1;
        if self.time_since_update > track_buffer {
            self.state = TrackState::Deleted;
        }
    }

    /// Returns true if this track is tentative (unconfirmed).
    pub fn is_tentative(&self) -> bool {
        matches!(self.state, TrackState::Tentative)
    }

    /// Returns true if this track is confirmed.
    pub fn is_confirmed(&self) -> bool {
        matches!(self.state, TrackState::Confirmed)
    }

    /// Returns true if this track is dead and should be removed.
    pub fn is_deleted(&self) -> bool {
        matches!(self.state, TrackState::Deleted)
    }
}
