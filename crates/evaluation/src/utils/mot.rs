use actor_tracker::{BoundingBox, Detection, Track, Tracker, TrackerConfig};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use itertools::{Itertools, MinMaxResult};
use serde::Deserialize;
use std::{
    io::{Read, Write},
    path::Path,
};

/// One row of a MOTChallenge detection file.
///
/// `<frame>, <id>, <bb_left>, <bb_top>, <bb_width>, <bb_height>, <conf>, <x>, <y>, <z>`
#[derive(Debug, Deserialize)]
struct MotRow {
    frame: u64,
    _id: f32,
    bb_left: f32,
    bb_top: f32,
    bb_width: f32,
    bb_height: f32,
    conf: f32,
    _x: f32,
    _y: f32,
    _z: f32,
}

/// Read a headerless MOTChallenge detection file and group the detections by frame, in file order.
pub fn read_detections<R: Read>(
    reader: R,
    actor_type: &str,
) -> Result<IndexMap<u64, Vec<Detection>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut frames = IndexMap::<u64, Vec<Detection>>::new();
    for (line, row) in reader.deserialize::<MotRow>().enumerate() {
        let row = row.with_context(|| format!("invalid detection on line {}", line + 1))?;
        let detection = Detection::new(
            None,
            actor_type,
            Some(row.conf),
            BoundingBox::from_tlwh(row.bb_left, row.bb_top, row.bb_width, row.bb_height),
            row.frame,
        );
        frames.entry(row.frame).or_default().push(detection);
    }

    Ok(frames)
}

/// Replay one sequence through a fresh tracker and write the confirmed tracks matched in each frame.
///
/// Every frame from the first to the last detection frame is fed to the tracker, including frames without
/// detections, so unmatched tracks keep aging across gaps.
///
/// Returns the number of frames processed and the number of result rows written.
pub fn track_sequence<R: Read, W: Write>(
    reader: R,
    writer: &mut W,
    actor_type: &str,
    config: &TrackerConfig,
) -> Result<(u64, usize)> {
    let frames = read_detections(reader, actor_type)?;

    let (first, last) = match frames.keys().copied().minmax() {
        MinMaxResult::NoElements => return Ok((0, 0)),
        MinMaxResult::OneElement(frame) => (frame, frame),
        MinMaxResult::MinMax(first, last) => (first, last),
    };

    let mut tracker = Tracker::new(config.clone())?;
    let mut rows = 0usize;
    for frame_number in first..=last {
        let detections = frames
            .get(&frame_number)
            .map(Vec::as_slice)
            .unwrap_or_default();

        // only report confirmed tracks that were matched in this frame
        for track in tracker
            .update(detections, frame_number)
            .into_iter()
            .filter(|track| track.is_confirmed() && track.time_since_update() == 0)
        {
            writer.write_all(format_track(frame_number, track).as_bytes())?;
            rows += 1;
        }
    }

    Ok((last - first + 1, rows))
}

/// Format a track as a MOTChallenge result row.
///
/// `<frame>, <id>, <bb_left>, <bb_top>, <bb_width>, <bb_height>, <conf>, <x>, <y>, <z>`
pub fn format_track(frame_number: u64, track: &Track) -> String {
    let bbox = track.bbox();
    format!(
        "{frame_number},{},{:.3},{:.3},{:.3},{:.3},1,-1,-1,-1\n",
        track.track_id(),
        bbox.x1(),
        bbox.y1(),
        bbox.width(),
        bbox.height()
    )
}

/// Name of the sequence a detection file belongs to: `<sequence>/det/det.txt` gives `<sequence>`.
pub fn sequence_name(path: &Path) -> String {
    path.parent()
        .and_then(|parent| parent.parent())
        .and_then(|sequence| sequence.file_name())
        .or_else(|| path.file_stem())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sequence".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const DETECTIONS: &str = "\
1,-1,100,100,50,50,0.9,-1,-1,-1
1,-1,400,400,50,50,0.3,-1,-1,-1
3, -1, 102, 101, 50, 50, 0.95, -1, -1, -1
";

    #[test]
    fn read_detections_groups_by_frame() -> Result<()> {
        let frames = read_detections(DETECTIONS.as_bytes(), "pedestrian")?;

        assert_eq!(frames.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(frames[&1].len(), 2);
        assert_eq!(frames[&3].len(), 1);

        let detection = &frames[&1][1];
        assert_eq!(detection.actor_type(), "pedestrian");
        assert_eq!(detection.confidence(), Some(0.3));
        assert_eq!(detection.frame_number(), 1);
        assert_eq!(
            detection.bbox(),
            &BoundingBox::new(400.0, 400.0, 450.0, 450.0)
        );

        Ok(())
    }

    #[test]
    fn read_detections_rejects_garbage() {
        let result = read_detections(
            "1,-1,abc,100,50,50,0.9,-1,-1,-1\n".as_bytes(),
            "pedestrian",
        );
        assert!(result.is_err());
    }

    #[test]
    fn format_track_row() {
        let mut tracker = Tracker::default();
        let detection = Detection::new(
            None,
            "pedestrian",
            Some(0.9),
            BoundingBox::from_tlwh(1.5, 2.0, 10.0, 20.0),
            7,
        );
        let tracks = tracker.update(&[detection], 7);

        assert_eq!(
            format_track(7, tracks[0]),
            "7,1,1.500,2.000,10.000,20.000,1,-1,-1,-1\n"
        );
    }

    #[test]
    fn track_sequence_ages_tracks_across_gaps() -> Result<()> {
        // track 1 is confirmed on frame 3, then frames 4 to 6 carry no detections
        const GAPPED: &str = "\
1,-1,100,100,50,50,0.9,-1,-1,-1
2,-1,100,100,50,50,0.9,-1,-1,-1
3,-1,100,100,50,50,0.9,-1,-1,-1
7,-1,100,100,50,50,0.9,-1,-1,-1
8,-1,100,100,50,50,0.9,-1,-1,-1
9,-1,100,100,50,50,0.9,-1,-1,-1
";
        let config = TrackerConfig::default().with_track_buffer(2).to_owned();
        let mut output = Vec::new();

        let (frames, rows) =
            track_sequence(GAPPED.as_bytes(), &mut output, "pedestrian", &config)?;

        // three missed frames exceed the buffer, so the box on frame 7 starts track 2
        assert_eq!(frames, 9);
        assert_eq!(rows, 2);
        assert_eq!(
            String::from_utf8(output)?,
            "3,1,100.000,100.000,50.000,50.000,1,-1,-1,-1\n\
             9,2,100.000,100.000,50.000,50.000,1,-1,-1,-1\n"
        );

        Ok(())
    }

    #[test]
    fn track_sequence_keeps_tracks_within_buffer() -> Result<()> {
        const GAPPED: &str = "\
1,-1,100,100,50,50,0.9,-1,-1,-1
2,-1,100,100,50,50,0.9,-1,-1,-1
3,-1,100,100,50,50,0.9,-1,-1,-1
6,-1,100,100,50,50,0.9,-1,-1,-1
";
        let config = TrackerConfig::default().with_track_buffer(2).to_owned();
        let mut output = Vec::new();

        let (frames, rows) =
            track_sequence(GAPPED.as_bytes(), &mut output, "pedestrian", &config)?;

        assert_eq!(frames, 6);
        assert_eq!(rows, 2);
        assert_eq!(
            String::from_utf8(output)?,
            "3,1,100.000,100.000,50.000,50.000,1,-1,-1,-1\n\
             6,1,100.000,100.000,50.000,50.000,1,-1,-1,-1\n"
        );

        Ok(())
    }

    #[test]
    fn track_sequence_empty() -> Result<()> {
        let mut output = Vec::new();

        let result = track_sequence(
            "".as_bytes(),
            &mut output,
            "pedestrian",
            &TrackerConfig::default(),
        )?;

        assert_eq!(result, (0, 0));
        assert!(output.is_empty());

        Ok(())
    }

    #[test]
    fn sequence_name_from_path() {
        assert_eq!(
            sequence_name(&PathBuf::from("MOT17/train/MOT17-02-SDP/det/det.txt")),
            "MOT17-02-SDP"
        );
        assert_eq!(sequence_name(&PathBuf::from("det.txt")), "det");
    }
}
