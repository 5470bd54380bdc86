//! Route Planner
//!
//! Plans a single route on a built-in map and optionally walks a mover along
//! it tick by tick.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tactical_nav::core::{MobilityClass, NavConfig, NavError, Result, Vec2};
use tactical_nav::map::{build_map, Battlefield};
use tactical_nav::movement::{advance_along_path, PathFollower};
use tactical_nav::pathfinding::{PathStats, Pathfinder};

/// Route Planner - plan and simulate a route on a built-in map
#[derive(Parser, Debug)]
#[command(name = "route_planner")]
#[command(about = "Plan a terrain-aware route between two pixel positions")]
struct Args {
    /// Map layout name (urban_district, industrial_zone, riverside, open_fields)
    #[arg(long, default_value = "urban_district")]
    map: String,

    /// Start position in pixels, as x,y
    #[arg(long, value_parser = parse_point)]
    start: Vec2,

    /// Goal position in pixels, as x,y
    #[arg(long, value_parser = parse_point)]
    goal: Vec2,

    /// Mobility class: foot or vehicle
    #[arg(long, default_value = "foot")]
    mobility: MobilityClass,

    /// Search iteration cap (defaults to the configured value)
    #[arg(long)]
    max_iterations: Option<usize>,

    /// TOML file with navigation settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Walk a mover along the route and report the ticks taken
    #[arg(long)]
    simulate: bool,

    /// Mover speed in pixels per second on open ground
    #[arg(long, default_value_t = 26.0)]
    speed: f32,

    /// Simulation step in seconds
    #[arg(long, default_value_t = 0.1)]
    dt: f32,

    /// Give up the simulation after this many ticks
    #[arg(long, default_value_t = 5000)]
    max_ticks: u32,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

/// JSON output structure
#[derive(Serialize)]
struct RouteReport {
    map: String,
    mobility: MobilityClass,
    found: bool,
    /// Unobstructed sight line between start and goal
    line_of_sight: bool,
    failure: Option<String>,
    waypoints: Vec<[f32; 2]>,
    length: f32,
    simulation: Option<SimulationReport>,
    stats: PathStats,
}

#[derive(Serialize)]
struct SimulationReport {
    ticks: u32,
    arrived: bool,
    blocked_ticks: u32,
    final_position: [f32; 2],
}

fn parse_point(s: &str) -> std::result::Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{}'", s))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x '{}': {}", x, e))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y '{}': {}", y, e))?;
    Ok(Vec2::new(x, y))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tactical_nav=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => NavConfig::load(path)?,
        None => NavConfig::default(),
    };
    let max_iterations = args.max_iterations.unwrap_or(config.max_iterations);

    let battlefield = build_map(&args.map)?;
    tracing::info!(
        "Loaded map '{}' ({}x{} tiles, {} structures, {} zones)",
        battlefield.name,
        battlefield.grid().width(),
        battlefield.grid().height(),
        battlefield.structures().len(),
        battlefield.zones().len()
    );

    let mut pathfinder = Pathfinder::with_config(&config);
    let planned = pathfinder.try_find_path(
        battlefield.grid(),
        args.start,
        args.goal,
        args.mobility,
        max_iterations,
    );

    let mut report = RouteReport {
        map: battlefield.name.clone(),
        mobility: args.mobility,
        found: planned.is_ok(),
        line_of_sight: battlefield
            .grid()
            .has_clear_line_of_sight(args.start, args.goal, config.los_step),
        failure: None,
        waypoints: Vec::new(),
        length: 0.0,
        simulation: None,
        stats: PathStats::default(),
    };

    match planned {
        Ok(path) => {
            report.waypoints = path.waypoints().iter().map(|p| p.to_array()).collect();
            report.length = path.length();

            if args.simulate {
                let mut follower = PathFollower::with_threshold(config.arrival_threshold);
                follower.set_path(path);
                report.simulation = Some(simulate(&battlefield, &mut follower, &args));
            }
        }
        Err(err) if err.is_no_path() => {
            tracing::info!("No route: {}", err);
            report.failure = Some(err.to_string());
        }
        Err(err) => return Err(err),
    }
    report.stats = pathfinder.stats();

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "text" => print_text(&report),
        other => {
            return Err(NavError::InvalidConfig(format!(
                "unknown output format '{}', expected json or text",
                other
            )))
        }
    }

    Ok(())
}

fn simulate(
    battlefield: &Battlefield,
    follower: &mut PathFollower,
    args: &Args,
) -> SimulationReport {
    let mut position = args.start;
    let mut blocked_ticks = 0;
    let mut ticks = 0;
    let mut arrived = false;

    while ticks < args.max_ticks {
        ticks += 1;
        let result = advance_along_path(
            battlefield.grid(),
            follower,
            position,
            args.speed,
            args.dt,
            args.mobility,
        );
        position = result.position;
        if result.blocked {
            blocked_ticks += 1;
        }
        if result.arrived {
            arrived = true;
            break;
        }
    }

    tracing::debug!("Simulation ended after {} ticks (arrived: {})", ticks, arrived);
    SimulationReport {
        ticks,
        arrived,
        blocked_ticks,
        final_position: position.to_array(),
    }
}

fn print_text(report: &RouteReport) {
    println!("=== Route on {} ({}) ===", report.map, report.mobility.name());
    println!("Line of sight: {}", if report.line_of_sight { "clear" } else { "blocked" });

    if let Some(failure) = &report.failure {
        println!("No route: {}", failure);
        return;
    }

    println!("{} waypoints, {:.1} px", report.waypoints.len(), report.length);
    for (i, [x, y]) in report.waypoints.iter().enumerate() {
        println!("  {:>3}: ({:.1}, {:.1})", i, x, y);
    }

    if let Some(sim) = &report.simulation {
        println!();
        println!(
            "Simulation: {} ticks, arrived={}, blocked ticks={}, final=({:.1}, {:.1})",
            sim.ticks, sim.arrived, sim.blocked_ticks, sim.final_position[0], sim.final_position[1]
        );
    }

    println!();
    println!(
        "Searches run: {}, cache hits: {}",
        report.stats.searches_run, report.stats.cache_hits
    );
}
