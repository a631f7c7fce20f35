use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use displacement_tracker::api::{
    ControlSource, CsvFormatter, DisplacementTracker, JsonFormatter, OutputFormat,
    PlaybackController, SnapshotFormatter, TextFormatter, TrackingState,
};
use displacement_tracker::hardware::{LocationError, MockLocationSource, WalkSimulation};
use displacement_tracker::{GeoPoint, PositionSample, TrackerConfig};
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    Rate,
    Balance,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
    Csv,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::Csv => OutputFormat::Csv,
        }
    }
}

/// Replay a walk through the displacement tracker and print each snapshot
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON tracker configuration; overrides --preset
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Preset::Rate)]
    preset: Preset,

    /// JSON array of {"lat", "lon", "accuracy"} fixes; a simulated walk is used otherwise
    #[arg(short, long)]
    track: Option<PathBuf>,

    /// Fixes on the outbound leg of the simulated walk
    #[arg(long, default_value_t = 40)]
    steps: usize,

    /// Meters walked between simulated fixes
    #[arg(long, default_value_t = 1.0)]
    step_m: f64,

    /// Per-axis noise of simulated fixes (meters)
    #[arg(long, default_value_t = 1.5)]
    jitter_m: f64,

    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Deliver a "position unavailable" failure before this fix index
    #[arg(long)]
    drop_out: Option<usize>,

    /// Write the effective configuration to this file and exit
    #[arg(long)]
    write_config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

fn load_config(args: &Args) -> Result<TrackerConfig> {
    match &args.config {
        Some(path) => TrackerConfig::from_file(path)
            .with_context(|| format!("loading configuration {}", path.display())),
        None => Ok(match args.preset {
            Preset::Rate => TrackerConfig::rate_multiplier(),
            Preset::Balance => TrackerConfig::balance(),
        }),
    }
}

fn load_track(args: &Args) -> Result<Vec<PositionSample>> {
    match &args.track {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading track {}", path.display()))?;
            let samples: Vec<PositionSample> = serde_json::from_str(&content)
                .with_context(|| format!("parsing track {}", path.display()))?;
            log::info!("loaded {} fixes from {}", samples.len(), path.display());
            Ok(samples)
        }
        None => {
            let walk = WalkSimulation {
                start: GeoPoint::new(35.0, 135.0),
                steps: args.steps,
                step_m: args.step_m,
                jitter_m: args.jitter_m,
                seed: args.seed,
                ..Default::default()
            };
            Ok(walk.samples())
        }
    }
}

fn render(
    format: OutputFormat,
    formatter: &SnapshotFormatter,
    state: &TrackingState,
) -> Result<String> {
    let snapshot = formatter.format(state);
    Ok(match format {
        OutputFormat::Text => TextFormatter::new().format_text(&snapshot),
        OutputFormat::Json => JsonFormatter::new().format_json(&snapshot)?,
        OutputFormat::Csv => CsvFormatter::new().format_csv(&snapshot),
    })
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(&args)?;
    if let Some(path) = &args.write_config {
        config
            .save_to_file(path)
            .with_context(|| format!("writing configuration {}", path.display()))?;
        println!("Wrote configuration to {}", path.display());
        return Ok(());
    }

    let tracker = DisplacementTracker::new(config).context("invalid tracker configuration")?;
    let kind = tracker.config().mapping.kind;
    let samples = load_track(&args)?;

    let format = OutputFormat::from(args.format);
    let formatter = SnapshotFormatter::new(kind);
    let csv = CsvFormatter::new();
    if format == OutputFormat::Csv && csv.include_header {
        println!("{}", csv.header());
    }

    let mut player = PlaybackController::new(kind);
    player.set_source(ControlSource::Displacement);
    player.toggle();

    let states: Rc<RefCell<Vec<TrackingState>>> = Rc::new(RefCell::new(Vec::new()));
    let source = MockLocationSource::new();
    let handle = {
        let states = Rc::clone(&states);
        tracker.start(source.clone(), move |state| states.borrow_mut().push(state))
    };

    source_replay(&source, &samples, args.drop_out);
    handle.stop();

    for state in states.borrow().iter() {
        player.apply(state);
        println!("{}", render(format, &formatter, state)?);
    }

    let final_state = handle.state();
    log::info!(
        "replayed {} fixes, final smoothed distance {:.2} m, player at {}",
        final_state.sample_count,
        final_state.smoothed_distance,
        player.label()
    );

    Ok(())
}

fn source_replay(source: &MockLocationSource, samples: &[PositionSample], drop_out: Option<usize>) {
    let Some(drop_out) = drop_out else {
        source.replay(samples);
        return;
    };

    for (index, sample) in samples.iter().enumerate() {
        if index == drop_out {
            source.deliver_error(LocationError::position_unavailable("Position unavailable"));
        }
        source.deliver(*sample);
    }
}
