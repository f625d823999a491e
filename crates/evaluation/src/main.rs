mod utils;
use actor_tracker::TrackerConfig;
use anyhow::{Context, Ok, Result};
use clap::Parser;
use log::{info, warn};
use rayon::prelude::*;
use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};
use utils::*;

static ACTOR_TYPE: &str = "pedestrian";

/// Replay MOTChallenge detection files through the tracker and write MOTChallenge tracker results
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Glob matching the detection files, e.g. `MOT17/train/*/det/det.txt`
    #[arg(short, long)]
    input: String,

    /// Directory the tracker results are written to
    #[arg(short, long, default_value = "TrackEval/data/trackers/mot_challenge/MOT17-train")]
    output: PathBuf,

    /// Name of the tracker directory under the output directory
    #[arg(short = 'n', long, default_value = "actortrack")]
    tracker_name: String,

    /// Confidence split point between high and low confidence detections
    #[arg(long, default_value_t = 0.5)]
    track_thresh: f32,

    /// Minimum intersection over union for the first association
    #[arg(long, default_value_t = 0.8)]
    match_thresh: f32,

    /// Maximum number of consecutive unmatched frames before a track is deleted
    #[arg(long, default_value_t = 30)]
    track_buffer: usize,

    /// Maximum number of trajectory entries retained per track
    #[arg(long, default_value_t = 30)]
    trajectory_history_length: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = TrackerConfig::default()
        .with_track_thresh(args.track_thresh)
        .with_match_thresh(args.match_thresh)
        .with_track_buffer(args.track_buffer)
        .with_trajectory_history_length(args.trajectory_history_length)
        .to_owned();
    config.validate().context("invalid tracker configuration")?;

    let files = glob::glob(&args.input)
        .with_context(|| format!("invalid input pattern {}", args.input))?
        .filter_map(|path| path.ok())
        .collect::<Vec<_>>();
    if files.is_empty() {
        warn!("no detection files matched {}", args.input);
    }

    let output_dir = args.output.join(&args.tracker_name).join("data");
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("unable to create {}", output_dir.display()))?;

    // one tracker per sequence, sequences are independent
    files
        .par_iter()
        .try_for_each(|path| run_sequence(path, &output_dir, &config))
}

fn run_sequence(path: &Path, output_dir: &Path, config: &TrackerConfig) -> Result<()> {
    let sequence = mot::sequence_name(path);
    let file = File::open(path).with_context(|| format!("unable to open {}", path.display()))?;

    let output_file = output_dir.join(format!("{sequence}.txt"));
    let mut writer = BufWriter::new(
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&output_file)
            .with_context(|| format!("unable to create {}", output_file.display()))?,
    );

    let reader = BufReader::new(file);
    let (frames, rows) = mot::track_sequence(reader, &mut writer, ACTOR_TYPE, config)
        .with_context(|| format!("unable to track {}", path.display()))?;
    writer.flush()?;

    if frames == 0 {
        warn!("{}: no detections", sequence);
    } else {
        info!(
            "{}: {} frames, {} result rows written to {}",
            sequence,
            frames,
            rows,
            output_file.display()
        );
    }

    Ok(())
}
