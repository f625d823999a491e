use crate::*;
use log::{debug, trace, warn};

/// This is the multi-target tracker.
///
/// Each call to [`Tracker::update`] associates one frame of detections with the live tracks using two greedy
/// intersection over union passes, spawns tracks for unmatched high confidence detections and ages out tracks that
/// have gone unmatched for longer than `track_buffer` frames.
///
/// A tracker holds the state of a single video. Independent videos need independent trackers.
///
/// # Examples
///
/// ```
/// use actor_tracker::{BoundingBox, Detection, Tracker, TrackerConfig};
///
/// // instantiate tracker with default parameters
/// let mut tracker = Tracker::new(TrackerConfig::default())?;
///
/// // create a detection
/// let detection = Detection::new(
///     None,
///     "car",
///     Some(0.9),
///     BoundingBox::new(100.0, 100.0, 150.0, 150.0),
///     0,
/// );
///
/// // add 0..n detections for the frame
/// let tracks = tracker.update(&[detection], 0);
///
/// // print tracks
/// for track in tracks {
///     println!(
///         "{} {} {:?} {:?}",
///         track.track_id(),
///         track.actor_type(),
///         track.state(),
///         track.bbox().to_tlbr(),
///     );
/// }
/// # Ok::<(), actor_tracker::ConfigError>(())
///```
#[derive(Debug)]
pub struct Tracker {
    /// Thresholds and buffer sizes.
    config: TrackerConfig,
    /// The list of live tracks in creation order.
    tracks: Vec<Track>,
    /// Used to allocate identifiers to new tracks.
    next_id: usize,
    /// The frame passed to the most recent update.
    frame_number: Option<u64>,
    /// Identifiers of the tracks deleted by the most recent update.
    removed_track_ids: Vec<usize>,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::with_valid_config(TrackerConfig::default())
    }
}

impl Tracker {
    /// Returns a new Tracker
    ///
    /// # Arguments
    ///
    /// * `config`: Tracker parameters. Out of range values are rejected, not clamped.
    pub fn new(config: TrackerConfig) -> Result<Tracker, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: TrackerConfig) -> Tracker {
        Tracker {
            config,
            tracks: Vec::new(),
            next_id: 1,
            frame_number: None,
            removed_track_ids: Vec::new(),
        }
    }

    /// Return the configuration
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Return the live tracks ordered by ascending track id
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Return the identifiers of the tracks deleted during the most recent update
    pub fn removed_track_ids(&self) -> &[usize] {
        &self.removed_track_ids
    }

    /// Return the frame number of the most recent update
    pub fn frame_number(&self) -> Option<u64> {
        self.frame_number
    }

    /// Perform association and track management for one frame.
    ///
    /// Frame numbers are expected to be non-decreasing across calls. This is not enforced: a frame number lower than
    /// the previous one is logged and processed as given.
    ///
    /// # Parameters
    ///
    /// * `detections`: A list of detections at the current time step.
    /// * `frame_number`: The current frame.
    ///
    /// # Returns
    ///
    /// All tracks that are not deleted after this frame, ordered by ascending track id.
    pub fn update(&mut self, detections: &[Detection], frame_number: u64) -> Vec<&Track> {
        if let Some(previous) = self.frame_number {
            if frame_number < previous {
                warn!(
                    "frame number went backwards from {} to {}, trajectories may be out of order",
                    previous, frame_number
                );
            }
        }
        self.frame_number = Some(frame_number);
        self.removed_track_ids.clear();

        // Step 1
        // Split detections into high and low confidence
        let track_thresh = self.config.track_thresh;
        let (high_detections, low_detections): (Vec<&Detection>, Vec<&Detection>) = detections
            .iter()
            .partition(|detection| detection.is_high_confidence(track_thresh));

        // Step 2
        // Associate high confidence detections with every live track.
        let track_pool = (0..self.tracks.len()).collect::<Vec<_>>();
        let (unmatched_high_detections, unmatched_tracks) = self.associate(
            &high_detections,
            &track_pool,
            self.config.match_thresh,
            frame_number,
            |iou| MatchSource::HighConfidence { iou },
        );

        // Step 3
        // Associate low confidence detections with the tracks left over, using a looser threshold.
        let (_unmatched_low_detections, unmatched_tracks) = self.associate(
            &low_detections,
            &unmatched_tracks,
            self.config.low_match_thresh(),
            frame_number,
            |iou| MatchSource::LowConfidence { iou },
        );

        // Step 4
        // Initialize new tracks from the remaining high confidence detections only.
        let spawned = unmatched_high_detections.len();
        unmatched_high_detections
            .into_iter()
            .for_each(|idx| self.initiate_track(high_detections[idx], frame_number));

        // Step 5
        // Age the tracks nobody claimed.
        let track_buffer = self.config.track_buffer;
        unmatched_tracks
            .iter()
            .for_each(|&idx| self.tracks[idx].mark_missed(frame_number, track_buffer));

        // Step 6
        // Drop deleted tracks.
        let removed_track_ids = &mut self.removed_track_ids;
        self.tracks.retain(|track| {
            if track.is_deleted() {
                removed_track_ids.push(track.track_id());
                false
            } else {
                true
            }
        });
        if !self.removed_track_ids.is_empty() {
            debug!(
                "frame {}: deleted tracks {:?}",
                frame_number, self.removed_track_ids
            );
        }

        debug!(
            "frame {}: {} high / {} low detections, {} spawned, {} missed, {} live",
            frame_number,
            high_detections.len(),
            low_detections.len(),
            spawned,
            unmatched_tracks.len(),
            self.tracks.len()
        );

        self.tracks.iter().collect()
    }

    /// Greedily match `detections` against the tracks at `track_indices` and update every matched track.
    ///
    /// Returns the unmatched positions into `detections` and the unmatched indices into `self.tracks`.
    fn associate(
        &mut self,
        detections: &[&Detection],
        track_indices: &[usize],
        min_iou: f32,
        frame_number: u64,
        match_source: fn(f32) -> MatchSource,
    ) -> (Vec<usize>, Vec<usize>) {
        let Assignment {
            matches,
            unmatched_detections,
            unmatched_tracks,
        } = {
            let tracks = track_indices
                .iter()
                .map(|&idx| &self.tracks[idx])
                .collect::<Vec<_>>();
            linear_assignment::greedy_matching(
                &iou_matching::iou_matrix(detections, &tracks),
                min_iou,
            )
        };

        matches.iter().for_each(|iou_match| {
            let track = &mut self.tracks[track_indices[iou_match.track_idx()]];
            track.update(
                detections[iou_match.detection_idx()],
                frame_number,
                match_source(iou_match.iou()),
            );
            trace!(
                "frame {}: track {} matched with iou {}",
                frame_number,
                track.track_id(),
                iou_match.iou()
            );
        });

        (
            unmatched_detections,
            unmatched_tracks
                .into_iter()
                .map(|idx| track_indices[idx])
                .collect(),
        )
    }

    fn initiate_track(&mut self, detection: &Detection, frame_number: u64) {
        let track = Track::new(
            self.next_id,
            detection,
            frame_number,
            self.config.trajectory_history_length,
        );
        debug!(
            "frame {}: new {} track {}",
            frame_number,
            track.actor_type(),
            track.track_id()
        );
        self.tracks.push(track);
        self.next_id += 1;
    }
}
