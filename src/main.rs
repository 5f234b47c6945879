use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use trailmap::curve::{CompositeCurve, CubicSegment};
use trailmap::input::PointerEvent;
use trailmap::waypoints::Waypoint;
use trailmap::{ConfigError, EngineConfig, EngineCore, Point};

#[derive(Debug, thiserror::Error)]
enum ReplayError {
    #[error("failed to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("output failed: {0}")]
    Output(#[from] io::Error),
    #[error("invalid scenario: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Parser, Debug)]
#[command(name = "trailmap", about = "Waypoint trail engine tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drive the engine with a recorded scenario and print actions and frames as JSON lines.
    Replay(ReplayArgs),
}

#[derive(Args, Debug)]
struct ReplayArgs {
    /// Scenario file (viewport, trail, waypoints, events, ticks).
    scenario: PathBuf,

    /// JSON engine config. Falls back to `TRAILMAP_*` environment variables.
    #[arg(long, env = "TRAILMAP_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct Scenario {
    viewport: ViewportSize,
    /// Explicit cubic segments, `[p0, p1, p2, p3]` each.
    #[serde(default)]
    segments: Vec<[Point; 4]>,
    /// Anchor points for a smooth trail, used when `segments` is empty.
    #[serde(default)]
    anchors: Vec<Point>,
    #[serde(default = "default_tension")]
    tension: f64,
    #[serde(default)]
    waypoints: Vec<Waypoint>,
    #[serde(default)]
    events: Vec<PointerEvent>,
    /// Frame tick timestamps in milliseconds.
    #[serde(default)]
    ticks: Vec<f64>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct ViewportSize {
    width: f64,
    height: f64,
}

fn default_tension() -> f64 {
    1.0
}

impl Scenario {
    fn curve(&self) -> CompositeCurve {
        if self.segments.is_empty() {
            return CompositeCurve::through(&self.anchors, self.tension);
        }
        CompositeCurve::new(self.segments.iter().map(|[p0, p1, p2, p3]| CubicSegment::new(*p0, *p1, *p2, *p3)).collect())
    }
}

/// One replay step. Events sort before ticks at the same timestamp so a
/// gesture always pre-empts the animation frame it coincides with.
enum Step {
    Event(PointerEvent),
    Tick(f64),
}

impl Step {
    fn sort_key(&self) -> (f64, u8) {
        match self {
            Self::Event(event) => (event.timestamp_ms, 0),
            Self::Tick(ms) => (*ms, 1),
        }
    }
}

fn main() -> Result<(), ReplayError> {
    let filter = EnvFilter::builder().with_default_directive(LevelFilter::INFO.into()).from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Replay(args) => run_replay(&args),
    }
}

fn read(path: &Path) -> Result<String, ReplayError> {
    fs::read_to_string(path).map_err(|source| ReplayError::Io { path: path.to_owned(), source })
}

fn run_replay(args: &ReplayArgs) -> Result<(), ReplayError> {
    let config = match &args.config {
        Some(path) => EngineConfig::from_json(&read(path)?)?,
        None => EngineConfig::from_env()?,
    };
    let scenario: Scenario = serde_json::from_str(&read(&args.scenario)?)?;

    let size = Point::new(scenario.viewport.width, scenario.viewport.height);
    let mut core = EngineCore::new(scenario.curve(), size, config);
    core.load_waypoints(scenario.waypoints);

    let mut steps: Vec<Step> = scenario.events.into_iter().map(Step::Event).collect();
    steps.extend(scenario.ticks.into_iter().map(Step::Tick));
    steps.sort_by(|a, b| {
        let (ta, ra) = a.sort_key();
        let (tb, rb) = b.sort_key();
        ta.total_cmp(&tb).then(ra.cmp(&rb))
    });
    tracing::info!(steps = steps.len(), "replay started");

    let mut out = BufWriter::new(io::stdout().lock());
    writeln!(out, "{}", json!({ "at": 0.0, "frame": core.snapshot() }))?;
    for step in steps {
        let line = match step {
            Step::Event(event) => {
                let actions = core.handle(event);
                json!({ "at": event.timestamp_ms, "event": event, "actions": actions })
            }
            Step::Tick(ms) => {
                let actions = core.tick(ms);
                json!({ "at": ms, "actions": actions, "frame": core.snapshot() })
            }
        };
        writeln!(out, "{line}")?;
    }
    out.flush()?;

    tracing::info!(waypoints = core.waypoints().len(), "replay finished");
    Ok(())
}
