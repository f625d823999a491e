use crate::*;
use ndarray::*;

/// Compute intersection over union of two boxes.
///
/// # Parameters
///
/// * `a`: A bounding box.
/// * `b`: A bounding box.
///
/// # Returns
///
/// The intersection over union in [0.0, 1.0]. Boxes that do not overlap score `0.0`. If the union area is not
/// positive (for example both boxes have zero area) the result is `0.0` rather than a division by zero.
pub fn iou(a: &BoundingBox, b: &BoundingBox) -> f32 {
    let intersection_width = a.x2().min(b.x2()) - a.x1().max(b.x1());
    let intersection_height = a.y2().min(b.y2()) - a.y1().max(b.y1());
    if intersection_width < 0.0 || intersection_height < 0.0 {
        return 0.0;
    }

    let area_intersection = intersection_width * intersection_height;
    let area_union = a.area() + b.area() - area_intersection;
    if area_union <= 0.0 {
        return 0.0;
    }

    area_intersection / area_union
}

/// Compute intersection over union between one box and a set of candidates.
///
/// # Parameters
///
/// * `bbox`: A bounding box.
/// * `candidates`: A list of candidate bounding boxes.
///
/// # Returns
///
/// The intersection over union between the `bbox` and each candidate.
pub fn intersection_over_union(bbox: &BoundingBox, candidates: &[BoundingBox]) -> Array1<f32> {
    candidates
        .iter()
        .map(|candidate| iou(bbox, candidate))
        .collect()
}

/// Intersection over union affinity matrix.
///
/// # Parameters
///
/// * `detections`: A list of detections.
/// * `tracks`: A list of tracks.
///
/// # Returns
///
/// A matrix of shape `(detections.len(), tracks.len())` where entry (i, j) is
/// `iou(detections[i], tracks[j])`.
pub fn iou_matrix(detections: &[&Detection], tracks: &[&Track]) -> Array2<f32> {
    let track_boxes = tracks.iter().map(|track| *track.bbox()).collect::<Vec<_>>();

    let mut matrix = Array2::<f32>::zeros((detections.len(), tracks.len()));
    matrix
        .outer_iter_mut()
        .zip(detections.iter())
        .for_each(|(mut row, detection)| {
            row.assign(&intersection_over_union(detection.bbox(), &track_boxes))
        });
    matrix
}

#[cfg(test)]
mod tests {
    use crate::*;
    use assert_approx_eq::assert_approx_eq;
    use ndarray::*;

    #[test]
    fn iou_identical() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(iou(&a, &a), 1.0);
    }

    #[test]
    fn iou_disjoint() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(20.0, 20.0, 30.0, 30.0);
        assert_eq!(iou(&a, &b), 0.0);
    }

    #[test]
    fn iou_partial_overlap() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(5.0, 5.0, 15.0, 15.0);
        assert_approx_eq!(iou(&a, &b), 25.0 / 175.0);
        assert_approx_eq!(iou(&a, &b), 0.142857);
    }

    #[test]
    fn iou_symmetric() {
        let a = BoundingBox::new(3.0, 1.0, 17.0, 9.0);
        let b = BoundingBox::new(5.0, 5.0, 15.0, 15.0);
        assert_eq!(iou(&a, &b), iou(&b, &a));
    }

    #[test]
    fn iou_touching_edges() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(10.0, 0.0, 20.0, 10.0);
        assert_eq!(iou(&a, &b), 0.0);
    }

    #[test]
    fn iou_degenerate() {
        let point = BoundingBox::new(5.0, 5.0, 5.0, 5.0);
        assert_eq!(iou(&point, &point), 0.0);

        let line = BoundingBox::new(0.0, 5.0, 10.0, 5.0);
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(iou(&line, &a), 0.0);

        let inverted = BoundingBox::new(10.0, 10.0, 0.0, 0.0);
        assert_eq!(iou(&inverted, &inverted), 0.0);
        assert_eq!(iou(&inverted, &a), 0.0);
    }

    #[test]
    fn intersection_over_union() {
        let iou = iou_matching::intersection_over_union(
            &BoundingBox::from_tlwh(0.0, 0.0, 5.0, 5.0),
            &[
                BoundingBox::from_tlwh(0.0, 0.0, 5.0, 5.0),
                BoundingBox::from_tlwh(1.0, 1.0, 5.0, 5.0),
                BoundingBox::from_tlwh(2.0, 2.0, 5.0, 5.0),
                BoundingBox::from_tlwh(3.0, 3.0, 5.0, 5.0),
                BoundingBox::from_tlwh(4.0, 4.0, 5.0, 5.0),
                BoundingBox::from_tlwh(5.0, 5.0, 5.0, 5.0),
            ],
        );

        let expected = arr1::<f32>(&[
            1.0,
            0.47058824,
            0.21951219,
            0.08695652,
            0.020408163,
            0.0,
        ]);
        iou.iter()
            .zip(expected.iter())
            .for_each(|(actual, expected)| assert_approx_eq!(*actual, *expected));
    }

    fn car(x1: f32, y1: f32, x2: f32, y2: f32, frame: u64) -> Detection {
        Detection::new(None, "car", Some(0.9), BoundingBox::new(x1, y1, x2, y2), frame)
    }

    #[test]
    fn iou_matrix() {
        let t0 = Track::new(1, &car(0.0, 0.0, 10.0, 10.0, 0), 0, 30);
        let t1 = Track::new(2, &car(50.0, 50.0, 60.0, 60.0, 0), 0, 30);

        let d0 = car(50.0, 50.0, 60.0, 60.0, 1);
        let d1 = car(5.0, 5.0, 15.0, 15.0, 1);
        let d2 = car(100.0, 100.0, 110.0, 110.0, 1);

        let matrix = iou_matching::iou_matrix(&[&d0, &d1, &d2], &[&t0, &t1]);

        assert_eq!(matrix.dim(), (3, 2));
        assert_eq!(matrix[[0, 0]], 0.0);
        assert_eq!(matrix[[0, 1]], 1.0);
        assert_approx_eq!(matrix[[1, 0]], 25.0 / 175.0);
        assert_eq!(matrix[[1, 1]], 0.0);
        assert_eq!(matrix.row(2).sum(), 0.0);
    }

    #[test]
    fn iou_matrix_empty() {
        let d0 = car(0.0, 0.0, 1.0, 1.0, 0);
        assert_eq!(iou_matching::iou_matrix(&[&d0], &[]).dim(), (1, 0));
        assert_eq!(iou_matching::iou_matrix(&[], &[]).dim(), (0, 0));
    }
}
