//! # KILN Headless Runner
//!
//! Loads a level, runs it for `max_frames` frames without a window, and
//! prints what happened.
//!
//! ```bash
//! # Built-in demo level
//! kiln
//!
//! # Level file
//! RUST_LOG=debug kiln levels/tanks.toml
//! ```

use std::process::ExitCode;

use kiln::{
    init_logging, Game, GameConfig, GameResult, LogHistory, LogLevel, RecordingCanvas, RigidBody,
    RunSummary, SpawnBlueprint, Transform, Vec2,
};

/// Two moving entities and no textures.
fn demo_level() -> GameConfig {
    let moving = |x, y, vx, vy| SpawnBlueprint {
        transform: Some(Transform::at(Vec2::new(x, y))),
        rigid_body: Some(RigidBody::new(Vec2::new(vx, vy))),
        sprite: None,
    };

    GameConfig {
        spawns: vec![moving(10.0, 30.0, 40.0, 0.0), moving(50.0, 100.0, 0.0, 50.0)],
        ..GameConfig::default()
    }
}

fn run(history: &LogHistory) -> GameResult<RunSummary> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!(%path, "loading level");
            GameConfig::from_toml_file(path)?
        }
        None => demo_level(),
    };

    let mut game = Game::new(config)?;
    game.setup()?;
    let summary = game.run_headless(&mut RecordingCanvas::default())?;

    for &entity in game.spawned() {
        if let Ok(transform) = game.registry().get_component::<Transform>(entity) {
            println!(
                "  {entity}: ({:.1}, {:.1})",
                transform.position.x, transform.position.y
            );
        }
    }
    println!(
        "  warnings: {}  errors: {}",
        history.count(LogLevel::Warning),
        history.count(LogLevel::Error)
    );
    Ok(summary)
}

fn main() -> ExitCode {
    let history = LogHistory::new();
    if let Err(e) = init_logging(Some(history.clone())) {
        eprintln!("kiln: {e}");
        return ExitCode::FAILURE;
    }

    println!("===================================================================");
    println!("                         KILN v{}", env!("CARGO_PKG_VERSION"));
    println!("                         HEADLESS MODE");
    println!("===================================================================");

    match run(&history) {
        Ok(summary) => {
            println!(
                "  frames: {}  draws: {}  alive: {}",
                summary.frames, summary.draws, summary.alive
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            ExitCode::FAILURE
        }
    }
}
