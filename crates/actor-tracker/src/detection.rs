use crate::BoundingBox;
use uuid::Uuid;

/// Detection represents a bounding box detection in a single image.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Unique detection identifier
    id: Uuid,
    /// Category label of the detected object, e.g. `"car"`.
    actor_type: String,
    /// Detection confidence score. Detectors that do not report one leave this empty.
    confidence: Option<f32>,
    /// Bounding box in top-left, bottom-right format.
    bbox: BoundingBox,
    /// The frame this detection was produced for.
    frame_number: u64,
}

impl Detection {
    /// Returns a new Detection
    ///
    /// # Parameters
    ///
    /// * `id`: An optional identifier. A random one is generated when `None`.
    /// * `actor_type`: Category label of the detected object.
    /// * `confidence`: Detection confidence score in `[0, 1]`. `None` is treated as high confidence by the tracker.
    /// * `bbox`: A bounding box object.
    /// * `frame_number`: The frame this detection belongs to.
    pub fn new(
        id: Option<Uuid>,
        actor_type: impl Into<String>,
        confidence: Option<f32>,
        bbox: BoundingBox,
        frame_number: u64,
    ) -> Detection {
        Detection {
            id: id.unwrap_or_else(Uuid::new_v4),
            actor_type: actor_type.into(),
            confidence,
            bbox,
            frame_number,
        }
    }

    /// Returns the unique id of the detection
    pub fn id(&self) -> &Uuid {
        &self.id
    }

    /// Returns the category label of the detection
    pub fn actor_type(&self) -> &str {
        &self.actor_type
    }

    /// Returns the confidence of the detection
    pub fn confidence(&self) -> Option<f32> {
        self.confidence
    }

    /// Returns a BoundingBox of the detection co-ordinates
    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    /// Returns the frame number of the detection
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Returns true if the detection is at or above `track_thresh`, or carries no confidence at all.
    pub fn is_high_confidence(&self, track_thresh: f32) -> bool {
        self.confidence.map_or(true, |confidence| confidence >= track_thresh)
    }
}
