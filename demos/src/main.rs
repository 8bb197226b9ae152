//! `boxnav`: run a point-to-point query against a level file.
//!
//! Usage:
//!   boxnav levels/two_rooms.json --from 2,9 --to 38,1
//!   boxnav levels/two_rooms.json --from 2,9 --to 38,1 --config configs/optimal.json --output route.json
//!   RUST_LOG=debug boxnav levels/two_rooms.json --from 2,9 --to 38,1 --algorithm astar

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use boxnav_core::{Level, Point};
use boxnav_paths::{Algorithm, MeetRule, PathFinder, RouteReport, SearchConfig};
use clap::{Parser, ValueEnum};
use log::info;

/// Find a path through a box navigation mesh.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Level file (JSON with `boxes` and `adj`)
    level: PathBuf,

    /// Source point as `X,Y`
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    from: Point,

    /// Destination point as `X,Y`
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    to: Point,

    /// Search settings file (JSON); flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Search algorithm
    #[arg(short, long, value_enum)]
    algorithm: Option<AlgorithmArg>,

    /// When the bidirectional search stops
    #[arg(short, long, value_enum)]
    meet: Option<MeetArg>,

    /// Write a JSON route report here
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum AlgorithmArg {
    Bidirectional,
    Astar,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(a: AlgorithmArg) -> Self {
        match a {
            AlgorithmArg::Bidirectional => Algorithm::Bidirectional,
            AlgorithmArg::Astar => Algorithm::Astar,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum MeetArg {
    First,
    Optimal,
}

impl From<MeetArg> for MeetRule {
    fn from(m: MeetArg) -> Self {
        match m {
            MeetArg::First => MeetRule::FirstMeeting,
            MeetArg::Optimal => MeetRule::Optimal,
        }
    }
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x {x:?}: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y {y:?}: {e}"))?;
    let p = Point::new(x, y);
    if !p.is_finite() {
        return Err(format!("point {s:?} is not finite"));
    }
    Ok(p)
}

fn load_config(args: &Args) -> Result<SearchConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SearchConfig::default(),
    };
    if let Some(a) = args.algorithm {
        config.algorithm = a.into();
    }
    if let Some(m) = args.meet {
        config.meet = m.into();
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(&args)?;
    let mesh = Level::load(&args.level)?
        .into_mesh()
        .with_context(|| format!("building mesh from {}", args.level.display()))?;
    info!("mesh has {} boxes; searching with {config:?}", mesh.len());

    let finder = PathFinder::new(config);
    let route = finder.find_path(&mesh, args.from, args.to);
    let report = RouteReport::new(&mesh, args.from, args.to, &route);

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!("wrote report to {}", path.display());
    }

    print!("{}", summary(&report, route.length(), args.output.is_some())?);
    Ok(())
}

/// Text printed for a finished query.
///
/// A failed query is an error unless its report was written to disk, in
/// which case the summary says so and the run succeeds.
fn summary(report: &RouteReport, length: f64, saved: bool) -> Result<String> {
    if !report.found() {
        if saved {
            return Ok("No path possible!\n".to_string());
        }
        bail!(
            "No path possible! ({} to {})",
            report.source,
            report.destination
        );
    }

    let mut out = format!("boxes ({}):\n", report.boxes.len());
    for (r, cost) in report.boxes.iter().zip(&report.box_costs) {
        writeln!(out, "  {r}  cost {cost:.3}")?;
    }
    writeln!(out, "waypoints ({}):", report.points.len())?;
    for p in &report.points {
        writeln!(out, "  {p}")?;
    }
    writeln!(
        out,
        "total cost {:.3}, polyline length {length:.3}",
        report.cost
    )?;
    Ok(out)
}
