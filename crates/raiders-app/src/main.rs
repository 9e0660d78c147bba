use anyhow::{Context, Result};
use clap::Parser;

use raiders_app::audio::LoggedSounds;
use raiders_app::autopilot::Autopilot;
use raiders_app::cli::Cli;
use raiders_app::game_loop;
use raiders_app::highscores::HighScoreStore;
use raiders_sim::{SessionContext, SimulationEngine};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.resolve().context("loading configuration")?;

    let mut ctx = SessionContext::default().with_sounds(LoggedSounds);
    if let Some(path) = &config.high_score_path {
        ctx = ctx.with_scores(HighScoreStore::open(path));
    }

    log::info!(
        "Cosmic Raiders: seed {}, level {}, {}",
        config.sim.seed,
        config.sim.starting_level,
        if config.realtime { "realtime" } else { "headless" }
    );

    let pilot = Autopilot::default();
    let summary = if config.realtime {
        game_loop::run_realtime(config.sim, ctx, config.tick_limit, &pilot)
            .context("running game loop")?
    } else {
        let mut engine = SimulationEngine::with_context(config.sim, ctx);
        game_loop::run_headless(&mut engine, &pilot, config.tick_limit)
    };

    log::info!(
        "Finished after {} ticks: {:?} at level {}, score {} (best {})",
        summary.ticks,
        summary.phase,
        summary.level,
        summary.score,
        summary.best_score
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
