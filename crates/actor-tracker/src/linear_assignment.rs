use fixedbitset::FixedBitSet;
use log::trace;
use ndarray::*;

/// A committed pairing between a row (detection) and a column (track) of an affinity matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    detection_idx: usize,
    track_idx: usize,
    iou: f32,
}

impl Match {
    /// Return a new Match
    ///
    /// # Parameters
    ///
    /// * `detection_idx`: The match detection index (matrix row).
    /// * `track_idx`: The match track index (matrix column).
    /// * `iou`: Match strength.
    pub fn new(detection_idx: usize, track_idx: usize, iou: f32) -> Match {
        Match {
            detection_idx,
            track_idx,
            iou,
        }
    }

    /// Return the detection index of the match
    pub fn detection_idx(&self) -> usize {
        self.detection_idx
    }

    /// Return the track index of the match
    pub fn track_idx(&self) -> usize {
        self.track_idx
    }

    /// Return the intersection over union of the match
    pub fn iou(&self) -> f32 {
        self.iou
    }
}

/// Result of [`greedy_matching`]. Unmatched indices are in ascending order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assignment {
    pub matches: Vec<Match>,
    pub unmatched_detections: Vec<usize>,
    pub unmatched_tracks: Vec<usize>,
}

/// Solve the assignment greedily.
///
/// Repeatedly commits the single highest remaining affinity, removing its row and column from further consideration,
/// until the matrix is exhausted or the best remaining affinity is below `min_iou`. This is not a globally optimal
/// assignment.
///
/// Ties between equal maxima are broken by scan order: lowest row first, then lowest column.
///
/// # Parameters
///
/// * `affinity_matrix`: A matrix of shape `(detections, tracks)` where higher is better.
/// * `min_iou`: Gating threshold. Pairs with affinity lower than this value are never matched.
///
/// # Returns
///
/// The matches in commit order plus the unmatched row and column indices.
pub fn greedy_matching(affinity_matrix: &Array2<f32>, min_iou: f32) -> Assignment {
    let (rows, cols) = affinity_matrix.dim();
    let mut used_rows = FixedBitSet::with_capacity(rows);
    let mut used_cols = FixedBitSet::with_capacity(cols);
    let mut matches = Vec::with_capacity(rows.min(cols));

    while matches.len() < rows.min(cols) {
        let mut best: Option<(usize, usize, f32)> = None;
        for ((row, col), &value) in affinity_matrix.indexed_iter() {
            if used_rows.contains(row) || used_cols.contains(col) {
                continue;
            }
            if best.map_or(!value.is_nan(), |(_, _, best_value)| value > best_value) {
                best = Some((row, col, value));
            }
        }

        match best {
            Some((row, col, value)) if value >= min_iou => {
                trace!("greedy match row {} col {} affinity {}", row, col, value);
                used_rows.insert(row);
                used_cols.insert(col);
                matches.push(Match::new(row, col, value));
            }
            _ => break,
        }
    }

    Assignment {
        matches,
        unmatched_detections: (0..rows).filter(|row| !used_rows.contains(*row)).collect(),
        unmatched_tracks: (0..cols).filter(|col| !used_cols.contains(*col)).collect(),
    }
}
