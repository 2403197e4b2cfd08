use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;

use pathfinder_sim::simulation::{
    AnimationState, AsciiRenderer, CommandFacade, NextAck, ProblemCatalog, RendererKind,
    SimulationLoop, StartAck, TickReport, DEFAULT_TICK_RATE,
};

#[derive(Parser)]
#[command(name = "pathfinder_sim")]
#[command(about = "Grid shortest-path animation with an optional HTTP server")]
struct Cli {
    /// Play every problem once without starting the server
    #[arg(long)]
    headless: bool,

    /// Simulation loop rate in ticks per second
    #[arg(long, default_value_t = DEFAULT_TICK_RATE)]
    tick_rate: u32,

    /// Load problems from a TOML file instead of the built-in set
    ///
    /// RGBA frames shrink cells to fit grids beyond 20x15; past 800x600 cells
    /// the grid is cut off at the frame edge.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Frame format served from /frame
    #[arg(long, value_enum, default_value_t = RendererKind::Rgba)]
    renderer: RendererKind,

    /// Address to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    #[arg(long, default_value_t = 5000)]
    port: u16,

    /// In headless mode, print every Nth frame (0 prints only the final frame)
    #[arg(long, default_value_t = 1)]
    print_every: u64,

    /// Safety limit on ticks per problem in headless mode
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let catalog = load_catalog(cli.catalog.as_ref())?;
    info!("Loaded {} problem(s)", catalog.len());

    let facade = CommandFacade::new(catalog).context("Failed to initialise simulation state")?;

    if cli.headless {
        run_headless(&facade, cli.print_every, cli.max_ticks)
    } else {
        run_server(&cli, facade)
    }
}

fn load_catalog(path: Option<&PathBuf>) -> Result<ProblemCatalog> {
    match path {
        Some(path) => ProblemCatalog::load(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display())),
        None => Ok(ProblemCatalog::builtin()),
    }
}

/// Play every problem in order, driving the loop by hand
fn run_headless(facade: &CommandFacade, print_every: u64, max_ticks: u64) -> Result<()> {
    println!("Running pathfinding simulation in headless mode...");
    println!();

    let sim = SimulationLoop::new(facade.shared_state(), Arc::new(AsciiRenderer));
    let total = facade.catalog().len();
    let mut solved = 0usize;
    let mut total_moves = 0usize;

    loop {
        let index = facade.get_state().current_problem_index;
        let label = facade
            .catalog()
            .spec(index)
            .map(|spec| spec.label())
            .unwrap_or_default();
        println!("=== Problem {}/{}: {} ===", index + 1, total, label);

        match facade.start() {
            StartAck::Started { path_length } => {
                info!("Problem {}: path of {} cells", index, path_length)
            }
            StartAck::Unreachable => warn!("Problem {}: no path to exit", index),
            other => bail!("Unexpected start result on problem {}: {:?}", index, other),
        }

        let mut ticks = 0u64;
        loop {
            let report = sim.step();
            ticks += 1;
            let snapshot = facade.get_state();
            let finished = snapshot.animation_state.is_terminal();

            let print_now = match print_every {
                0 => finished,
                n => finished || ticks % n == 0,
            };
            if print_now && !matches!(report, TickReport::Unchanged) {
                if let Some(frame) = facade.get_frame() {
                    println!("{}", String::from_utf8_lossy(frame.as_bytes()));
                }
            }

            if finished {
                match snapshot.animation_state {
                    AnimationState::Completed => {
                        solved += 1;
                        total_moves += snapshot.path_length.saturating_sub(1);
                    }
                    _ => warn!(
                        "Problem {} failed: {}",
                        index,
                        snapshot
                            .last_error
                            .map(|kind| kind.to_string())
                            .unwrap_or_else(|| "unknown".into())
                    ),
                }
                break;
            }
            if ticks >= max_ticks {
                bail!("Problem {} did not finish within {} ticks", index, max_ticks);
            }
        }

        if let NextAck::AtLastProblem { .. } = facade.next_problem() {
            break;
        }
    }

    let snapshot = facade.get_state();
    info!("=== SIMULATION COMPLETE ===");
    info!("Problems solved: {}/{}", solved, total);
    info!("Total moves: {}", total_moves);
    info!("Total ticks: {}", snapshot.ticks);
    Ok(())
}

#[cfg(feature = "server")]
fn run_server(cli: &Cli, facade: CommandFacade) -> Result<()> {
    use pathfinder_sim::server::{serve, ServerConfig};

    let handle = SimulationLoop::new(facade.shared_state(), cli.renderer.build())
        .with_tick_rate(cli.tick_rate)
        .spawn()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;
    let served = runtime.block_on(serve(ServerConfig::new(cli.host.clone(), cli.port), facade));

    handle.shutdown()?;
    served
}

#[cfg(not(feature = "server"))]
fn run_server(_cli: &Cli, _facade: CommandFacade) -> Result<()> {
    bail!("Server feature is not enabled. Rebuild with --features server, or pass --headless")
}
