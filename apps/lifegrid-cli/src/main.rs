use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use glam::Vec3;
use lifegrid_common::{CellCoord, LifeConfig};
use lifegrid_input::{Button, InputEvent, InputMapper, dispatch};
use lifegrid_kernel::{GridStore, LifeEngine, PATTERNS, SharedEngine, patterns};
use lifegrid_render::{CellHandles, CellMaterial, Renderer, TextRenderer};
use lifegrid_sched::TickTimer;
use lifegrid_tools::GridInspector;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lifegrid", about = "Conway's Game of Life on a fixed square grid")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions
    Info,
    /// Build a grid and run it for a number of ticks
    Run(RunArgs),
    /// Check that a glider reappears shifted by (+1, +1) after 4 ticks
    Glider {
        /// Grid side length (at least 10)
        #[arg(short, long, default_value = "10")]
        size: usize,
    },
    /// List built-in patterns
    Patterns,
}

#[derive(clap::Args)]
struct RunArgs {
    /// JSON configuration file (gridSize, tickIntervalSeconds, initialAliveProbability, seed)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Grid side length
    #[arg(long, allow_negative_numbers = true)]
    size: Option<i64>,
    /// Seed for the initial state
    #[arg(long)]
    seed: Option<u64>,
    /// Probability that each cell starts alive
    #[arg(short, long)]
    probability: Option<f64>,
    /// Seconds between ticks in realtime mode
    #[arg(short, long)]
    interval: Option<f64>,
    /// Number of ticks to run
    #[arg(short, long, default_value = "10")]
    ticks: u64,
    /// Built-in pattern to stamp before running
    #[arg(long)]
    pattern: Option<String>,
    /// Top-left cell for --pattern, as X,Y
    #[arg(long, value_parser = parse_coord, default_value = "0,0")]
    at: CellCoord,
    /// Click a cell alive before running, as X,Y (repeatable)
    #[arg(long, value_parser = parse_coord)]
    paint: Vec<CellCoord>,
    /// Print every generation
    #[arg(short, long)]
    render: bool,
    /// Tick on a timer thread at the configured interval instead of stepping
    #[arg(long)]
    realtime: bool,
    /// Print the final summary as JSON
    #[arg(long)]
    json: bool,
}

fn parse_coord(s: &str) -> Result<CellCoord, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(CellCoord::new(x, y))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("lifegrid v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", lifegrid_common::crate_info());
            println!("kernel: {}", lifegrid_kernel::crate_info());
            println!("sched: {}", lifegrid_sched::crate_info());
            println!("render: {}", lifegrid_render::crate_info());
            println!("input: {}", lifegrid_input::crate_info());
            println!("tools: {}", lifegrid_tools::crate_info());
        }
        Commands::Run(args) => run(args)?,
        Commands::Glider { size } => glider(size)?,
        Commands::Patterns => {
            for p in PATTERNS {
                let (w, h) = p.extent();
                println!(
                    "{:<8} {}x{} cells={} period={} displacement={:?}",
                    p.name,
                    w,
                    h,
                    p.cells.len(),
                    p.period,
                    p.displacement
                );
            }
        }
    }

    Ok(())
}

fn resolve_config(args: &RunArgs) -> anyhow::Result<LifeConfig> {
    let mut config = match &args.config {
        Some(path) => LifeConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => LifeConfig::default(),
    };
    if let Some(size) = args.size {
        config.grid_size = size;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(p) = args.probability {
        config.initial_alive_probability = p;
    }
    if let Some(secs) = args.interval {
        config.tick_interval_seconds = secs;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    tracing::info!(
        size = config.grid_size,
        probability = config.initial_alive_probability,
        seed = ?config.seed,
        "building grid"
    );

    let mut engine = LifeEngine::from_config(&config)?;
    if let Some(name) = &args.pattern {
        let Some(pattern) = patterns::find(name) else {
            bail!("unknown pattern {name:?}; see `lifegrid patterns`");
        };
        engine.stamp(pattern, args.at)?;
    }
    click_cells(&mut engine, &args.paint);
    engine.set_running(true);
    engine.drain_events();

    let renderer = TextRenderer::new();
    if args.render {
        print!("{}", renderer.render(&engine));
    }

    let engine = if args.realtime {
        run_realtime(engine, &config, &args, &renderer)?
    } else {
        run_stepped(engine, &args, &renderer)
    };

    let summary = GridInspector::summary(&engine);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{summary}");
    }
    Ok(())
}

/// Replay each requested cell as a left click through the input layer.
/// Off-grid clicks are reported and skipped.
fn click_cells(engine: &mut LifeEngine, cells: &[CellCoord]) {
    let mut mapper = InputMapper::new();
    for cell in cells {
        let hover = Some(Vec3::new(cell.x as f32, 0.0, cell.y as f32));
        let click = [
            InputEvent::ButtonPressed(Button::Left),
            InputEvent::ButtonReleased(Button::Left),
        ];
        for action in mapper.frame(&click, hover) {
            if let Err(e) = dispatch(engine, &action) {
                tracing::warn!("paint ignored: {e}");
            }
        }
    }
}

fn material_board(engine: &LifeEngine) -> CellHandles<CellMaterial> {
    CellHandles::build(engine.grid(), |_, alive| CellMaterial::for_state(alive))
}

/// Drain the engine's events into `board`. Returns how many cells were refreshed.
fn refresh_board(engine: &mut LifeEngine, board: &mut CellHandles<CellMaterial>) -> usize {
    let events = engine.drain_events();
    board.sync(engine.grid(), &events, |m, alive| *m = CellMaterial::for_state(alive))
}

/// Drive ticks directly, keeping a material board in sync from events.
fn run_stepped(mut engine: LifeEngine, args: &RunArgs, renderer: &TextRenderer) -> LifeEngine {
    let mut board = material_board(&engine);
    for _ in 0..args.ticks {
        engine.tick();
        let refreshed = refresh_board(&mut engine, &mut board);
        tracing::debug!(generation = engine.generation(), refreshed, "cells refreshed");
        if args.render {
            print!("{}", renderer.render(&engine));
        }
    }
    engine
}

/// Hand the engine to the timer thread and wait for the requested ticks.
///
/// Each poll drains the event log into the material board under the same
/// lock the render reads from, so the log never outgrows one poll period.
fn run_realtime(
    engine: LifeEngine,
    config: &LifeConfig,
    args: &RunArgs,
    renderer: &TextRenderer,
) -> anyhow::Result<LifeEngine> {
    let mut board = material_board(&engine);
    let shared = SharedEngine::new(engine);
    let interval = config.tick_interval()?;
    let timer = TickTimer::spawn(shared.clone(), interval).context("starting tick timer")?;

    let started = Instant::now();
    let mut last_seen = 0;
    while last_seen < args.ticks {
        std::thread::sleep((interval / 4).max(Duration::from_millis(1)));
        let (generation, refreshed, frame) = shared.with(|engine| {
            let refreshed = refresh_board(engine, &mut board);
            let generation = engine.generation();
            let frame = if args.render && generation != last_seen {
                Some(renderer.render(engine))
            } else {
                None
            };
            (generation, refreshed, frame)
        });
        if refreshed > 0 {
            tracing::trace!(generation, refreshed, "cells refreshed");
        }
        if let Some(frame) = frame {
            print!("{frame}");
        }
        last_seen = generation;
    }
    let stats = timer.stop();
    println!(
        "realtime: {} ticks in {:?}, skipped={} ({})",
        stats.advanced,
        started.elapsed(),
        stats.skipped,
        stats.timings
    );

    let refreshed = shared.with(|engine| refresh_board(engine, &mut board));
    tracing::debug!(refreshed, "final board refresh");
    Ok(shared.snapshot())
}

fn glider(size: usize) -> anyhow::Result<()> {
    if size < 10 {
        bail!("glider check needs a grid of at least 10x10, got {size}");
    }
    let Some(pattern) = patterns::find("glider") else {
        bail!("glider pattern missing");
    };
    let mut engine = LifeEngine::new(GridStore::new(size)?);
    engine.stamp(pattern, CellCoord::new(1, 1))?;
    let start = engine.grid().live_cells();

    engine.set_running(true);
    for _ in 0..pattern.period {
        engine.tick();
    }

    let (dx, dy) = pattern.displacement;
    let expected: Vec<CellCoord> = start.iter().map(|c| c.offset(dx, dy)).collect();
    let ok = engine.grid().live_cells() == expected;
    print!("{}", TextRenderer::new().render(&engine));
    println!(
        "Glider after {} ticks shifted by ({dx:+}, {dy:+}): {}",
        pattern.period,
        if ok { "OK" } else { "MISMATCH" }
    );
    if !ok {
        bail!("glider did not translate as expected");
    }
    Ok(())
}
