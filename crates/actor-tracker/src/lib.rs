//! Multi-object tracking by intersection over union.
//!
//! A [`Tracker`] turns per-frame [`Detection`]s into persistent [`Track`] identities using a two stage greedy
//! association: high confidence detections first, then low confidence detections against the tracks that are still
//! unmatched.

mod bounding_box;
mod config;
mod detection;
mod iou_matching;
mod linear_assignment;
mod track;
mod tracker;

pub use bounding_box::{center, BoundingBox};
pub use config::{ConfigError, TrackerConfig};
pub use detection::Detection;
pub use iou_matching::{intersection_over_union, iou, iou_matrix};
pub use linear_assignment::{greedy_matching, Assignment, Match};
pub use track::{MatchSource, Track, TrackState, TrajectoryPoint, CONFIRMATION_HITS};
pub use tracker::Tracker;
