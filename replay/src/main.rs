#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod settings;

use std::io::Write;

use anyhow::Result;
use structopt::StructOpt;

use model::{BoundsMode, Replay, Viewport};

use settings::Settings;

/// Plays back GPS tracks from a CSV file, writing one JSON line per frame to stdout
#[derive(StructOpt)]
struct Args {
    /// CSV with columns track,time,latitude,longitude,elevation
    #[structopt(long)]
    input: String,
    /// A JSON file with default settings
    #[structopt(long)]
    config: Option<String>,
    #[structopt(long)]
    width: Option<f64>,
    #[structopt(long)]
    height: Option<f64>,
    #[structopt(long)]
    padding: Option<f64>,
    /// Track milliseconds per wall-clock millisecond
    #[structopt(long)]
    speed: Option<f64>,
    /// Simulated wall-clock milliseconds between frames
    #[structopt(long)]
    tick_ms: Option<i64>,
    /// Project every track with one bounding box, instead of fitting each one separately
    #[structopt(long)]
    shared_bounds: bool,
    /// Also write the tracks as GeoJSON here
    #[structopt(long)]
    geojson: Option<String>,
    /// Stop after this many frames, even if playback hasn't reached the end
    #[structopt(long)]
    max_frames: Option<usize>,
}

impl Args {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match self.config {
            Some(ref path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(x) = self.width {
            settings.width = x;
        }
        if let Some(x) = self.height {
            settings.height = x;
        }
        if let Some(x) = self.padding {
            settings.padding = x;
        }
        if let Some(x) = self.speed {
            settings.speed = x;
        }
        if let Some(x) = self.tick_ms {
            settings.tick_ms = x;
        }
        if self.shared_bounds {
            settings.bounds = BoundsMode::Shared;
        }
        if settings.tick_ms <= 0 {
            bail!("tick_ms must be positive, not {}", settings.tick_ms);
        }
        Ok(settings)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::from_args();
    let settings = args.settings()?;
    let viewport = Viewport::new(settings.width, settings.height, settings.padding)?;

    let tracks = model::loader::load(fs_err::File::open(&args.input)?)?;
    for track in tracks.tracks() {
        let summary = track.summary();
        info!(
            "{}: {} points, {}ms, {:.0}m, {:.0}m climbing",
            track.name,
            summary.num_points,
            summary.end_ms,
            summary.length_meters,
            summary.elevation_gain_meters
        );
    }

    if let Some(ref path) = args.geojson {
        let gj = model::to_geojson(&tracks);
        fs_err::write(path, serde_json::to_string_pretty(&gj)?)?;
        info!("Wrote {path}");
    }

    let mut replay = Replay::new(tracks);
    replay.clock.set_speed(settings.speed)?;
    run(&mut replay, &settings, viewport, args.max_frames)
}

fn run(
    replay: &mut Replay,
    settings: &Settings,
    viewport: Viewport,
    max_frames: Option<usize>,
) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    replay.clock.play();
    let mut num_frames = 0;
    loop {
        let frame = replay.frame(viewport, settings.bounds);
        writeln!(out, "{}", serde_json::to_string(&frame)?)?;
        num_frames += 1;

        if !replay.clock.is_playing() {
            break;
        }
        if max_frames.map(|max| num_frames >= max).unwrap_or(false) {
            replay.clock.pause();
            break;
        }
        replay.clock.tick(settings.tick_ms);
    }

    info!(
        "Wrote {} frames, stopped at {}ms of {}ms",
        num_frames,
        replay.clock.current_time_ms(),
        replay.clock.max_duration_ms()
    );
    Ok(())
}
