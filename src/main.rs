//! Headless Brickwell runner (default binary).
//!
//! Drives the engine at a fixed frame cadence with the scripted autoplayer,
//! logs every engine event through `tracing`, and prints a summary at the end.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use brickwell::autoplay::AutoPlayer;
use brickwell::engine::{GameEngine, Snapshot};
use brickwell::types::{GameConfig, GameEvent};

#[derive(Debug, Parser)]
#[command(name = "brickwell-sim", about = "Run a headless Brickwell game")]
struct Cli {
    #[arg(long, default_value_t = 1, help = "Seed for piece selection and the autoplayer")]
    seed: u32,

    #[arg(long, default_value_t = 3600, help = "Maximum number of frames to simulate")]
    frames: u64,

    #[arg(long, default_value_t = 16, help = "Milliseconds per frame")]
    frame_ms: u64,

    #[arg(long, default_value_t = 6, help = "Frames between autoplayer inputs")]
    think_frames: u64,

    #[arg(long, help = "Load a GameConfig from this JSON file")]
    config: Option<std::path::PathBuf>,

    #[arg(long, help = "Print the final snapshot as JSON")]
    json: bool,

    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase verbosity (-v = INFO, -vv = DEBUG, -vvv = TRACE); RUST_LOG overrides")]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<GameConfig>(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => GameConfig::default(),
    };

    let mut engine = GameEngine::with_config(config, cli.seed).context("invalid game config")?;
    engine.add_listener(|event: &GameEvent| match event {
        GameEvent::LinesCleared { rows } => info!(?rows, "lines cleared"),
        GameEvent::LevelUp { level } => info!(level, "level up"),
        GameEvent::GameOver { final_score } => info!(final_score, "game over"),
        other => debug!(event = other.name()),
    });

    let result = run(&mut engine, &cli);

    println!("frames simulated: {}", result.frames);
    println!("phase:            {}", result.last.phase.as_str());
    println!("score:            {}", result.last.score);
    println!("level:            {}", result.last.level);
    println!("lines:            {}", result.last.lines_cleared);
    println!("inputs issued:    {}", result.inputs);
    println!();
    print!("{}", engine.grid());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result.last)?);
    }
    Ok(())
}

struct RunResult {
    last: Snapshot,
    frames: u64,
    inputs: u64,
}

fn run(engine: &mut GameEngine, cli: &Cli) -> RunResult {
    let mut player = AutoPlayer::new(cli.seed);
    let think_frames = cli.think_frames.max(1);

    engine.start();
    let mut now = 0;
    let mut frames = 0;

    while frames < cli.frames {
        now += cli.frame_ms;
        let snapshot = engine.update(now, cli.frame_ms);
        frames += 1;

        if snapshot.is_game_over() {
            break;
        }
        if frames % think_frames == 0 {
            player.act(engine, &snapshot);
        }
    }

    info!(frames, score = engine.score(), "simulation finished");
    RunResult {
        last: engine.snapshot(),
        frames,
        inputs: player.decisions(),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(filter)
        .init();
}
