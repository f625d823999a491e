use ndarray::*;

/// BoundingBox represents an axis-aligned box in pixel space stored as its two corners.
///
/// Boxes are not validated: an inverted box (`x2 < x1` or `y2 < y1`) or a zero-area box is accepted
/// and simply never overlaps anything (see [`crate::iou`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Left edge (i.e. min-x)
    x1: f32,
    /// Top edge (i.e. min-y)
    y1: f32,
    /// Right edge (i.e. max-x)
    x2: f32,
    /// Bottom edge (i.e. max-y)
    y2: f32,
}

impl BoundingBox {
    /// Returns a new BoundingBox
    ///
    /// # Parameters
    ///
    /// * `x1`: Bounding box left.
    /// * `y1`: Bounding box top.
    /// * `x2`: Bounding box right.
    /// * `y2`: Bounding box bottom.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> BoundingBox {
        BoundingBox { x1, y1, x2, y2 }
    }

    /// Returns a new BoundingBox from `(left, top, width, height)`.
    pub fn from_tlwh(left: f32, top: f32, width: f32, height: f32) -> BoundingBox {
        BoundingBox::new(left, top, left + width, top + height)
    }

    /// Returns the left edge of the bounding box
    pub fn x1(&self) -> f32 {
        self.x1
    }

    /// Returns the top edge of the bounding box
    pub fn y1(&self) -> f32 {
        self.y1
    }

    /// Returns the right edge of the bounding box
    pub fn x2(&self) -> f32 {
        self.x2
    }

    /// Returns the bottom edge of the bounding box
    pub fn y2(&self) -> f32 {
        self.y2
    }

    /// Returns the width of the bounding box. Negative for an inverted box.
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    /// Returns the height of the bounding box. Negative for an inverted box.
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Returns the area of the bounding box
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Returns the midpoint of the bounding box as `(x, y)`.
    pub fn center(&self) -> (f32, f32) {
        center(self)
    }

    /// Returns the bounding box in left, top, width, height format, i.e., `(min x, min y, width, height)`.
    pub fn to_tlwh(&self) -> Array1<f32> {
        arr1::<f32>(&[self.x1, self.y1, self.width(), self.height()])
    }

    /// Returns the bounding box in top-left, bottom-right format, i.e., `(min x, min y, max x, max y)`.
    pub fn to_tlbr(&self) -> Array1<f32> {
        arr1::<f32>(&[self.x1, self.y1, self.x2, self.y2])
    }
}

impl From<[f32; 4]> for BoundingBox {
    fn from(value: [f32; 4]) -> Self {
        BoundingBox::new(value[0], value[1], value[2], value[3])
    }
}

/// Midpoint of a box, `((x1 + x2) / 2, (y1 + y2) / 2)`.
pub fn center(bbox: &BoundingBox) -> (f32, f32) {
    ((bbox.x1 + bbox.x2) / 2.0, (bbox.y1 + bbox.y2) / 2.0)
}
