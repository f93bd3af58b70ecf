use std::path::PathBuf;

use algorithms::{bubble_sort_steps, random_values, traversal_steps, Graph, TraversalOrder};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use player::{FixedSteps, RandomSortSource, StepPlayer};
use rand::{rngs::SmallRng, SeedableRng};
use shared::domain::Algorithm;
use tracing_subscriber::EnvFilter;

mod config;
mod controller;
mod render;
mod session;

use config::{load_settings, Settings};
use render::{BarRenderer, GraphRenderer, StepRenderer};

#[derive(Parser, Debug)]
#[command(name = "viewer", about = "Step through BFS, DFS and bubble sort")]
struct Cli {
    #[arg(long, default_value = "viewer.toml")]
    config: PathBuf,
    /// Delay between automatic steps in milliseconds.
    #[arg(long)]
    speed: Option<u64>,
    #[arg(long)]
    autoplay: bool,
    #[arg(long)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Bfs {
        #[arg(long)]
        start: Option<String>,
    },
    Dfs {
        #[arg(long)]
        start: Option<String>,
    },
    Sort {
        /// Sort on screen with real delays instead of stepping a recorded run.
        #[arg(long)]
        live: bool,
    },
    /// Print the derived step table.
    Steps {
        algorithm: AlgorithmArg,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum AlgorithmArg {
    Bfs,
    Dfs,
    Sort,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(&cli.config)?;
    if let Some(speed) = cli.speed {
        settings.speeds.default_ms = settings.speeds.clamp(speed);
    }
    settings.autoplay |= cli.autoplay;
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }

    match cli.command {
        Command::Bfs { start } => {
            run_traversal(&settings, start, TraversalOrder::BreadthFirst).await
        }
        Command::Dfs { start } => run_traversal(&settings, start, TraversalOrder::DepthFirst).await,
        Command::Sort { live: false } => {
            let source = RandomSortSource::with_rng(
                sort_rng(&settings),
                settings.sort_len,
                settings.sort_values.clone(),
            );
            let player = StepPlayer::new(source, settings.speeds);
            session::run_interactive(player, BarRenderer, settings.speeds, settings.autoplay)
                .await
        }
        Command::Sort { live: true } => {
            let values = random_values(
                &mut sort_rng(&settings),
                settings.sort_len,
                settings.sort_values.clone(),
            );
            session::run_live_sort(values, settings.speeds.default_delay()).await
        }
        Command::Steps {
            algorithm,
            start,
            json,
        } => print_steps(&settings, algorithm, start, json),
    }
}

async fn run_traversal(
    settings: &Settings,
    start: Option<String>,
    order: TraversalOrder,
) -> Result<()> {
    let graph = Graph::from_spec(&settings.graph).context("invalid graph definition")?;
    let start = start.unwrap_or_else(|| settings.start_node.clone());
    let source = FixedSteps::traversal(&graph, &start, order)
        .with_context(|| format!("cannot start traversal at '{start}'"))?;

    let algorithm = match order {
        TraversalOrder::BreadthFirst => Algorithm::BreadthFirst,
        TraversalOrder::DepthFirst => Algorithm::DepthFirst,
    };
    let player = StepPlayer::new(source, settings.speeds);
    session::run_interactive(
        player,
        GraphRenderer::new(graph, algorithm),
        settings.speeds,
        settings.autoplay,
    )
    .await
}

fn sort_rng(settings: &Settings) -> SmallRng {
    match settings.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    }
}

fn print_steps(
    settings: &Settings,
    algorithm: AlgorithmArg,
    start: Option<String>,
    json: bool,
) -> Result<()> {
    let start = start.unwrap_or_else(|| settings.start_node.clone());
    let order = match algorithm {
        AlgorithmArg::Bfs => TraversalOrder::BreadthFirst,
        AlgorithmArg::Dfs => TraversalOrder::DepthFirst,
        AlgorithmArg::Sort => {
            let values = random_values(
                &mut sort_rng(settings),
                settings.sort_len,
                settings.sort_values.clone(),
            );
            let steps = bubble_sort_steps(values);
            if json {
                println!("{}", serde_json::to_string_pretty(&steps)?);
            } else {
                for (index, step) in steps.iter().enumerate() {
                    println!("--- step {} of {} ---", index + 1, steps.len());
                    println!("{}", BarRenderer.body(step));
                }
            }
            return Ok(());
        }
    };

    let graph = Graph::from_spec(&settings.graph).context("invalid graph definition")?;
    let steps = traversal_steps(&graph, &start, order)
        .with_context(|| format!("cannot start traversal at '{start}'"))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&steps)?);
    } else {
        for step in &steps {
            let frontier: Vec<&str> = step.frontier.iter().map(|&id| graph.label(id)).collect();
            let visited: Vec<&str> = step.visited.iter().map(|&id| graph.label(id)).collect();
            println!(
                "{}\n    frontier=[{}] visited=[{}]",
                step.description,
                frontier.join(", "),
                visited.join(", ")
            );
        }
    }
    Ok(())
}
