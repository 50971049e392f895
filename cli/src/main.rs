mod config;
mod menu;
mod pacing;
mod search;
mod terminal;

use std::cell::RefCell;
use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use dinorun_core::{
    default_config, hash_seed, to_hex, train, NullSink, PlaySession, SessionOutcome,
};
use tracing::{debug, info};

use crate::config::TrainerConfig;
use crate::menu::Choice;
use crate::pacing::FramePacer;
use crate::search::HillClimber;
use crate::terminal::{KeyLatch, RawModeGuard, TerminalInput, TerminalView};

/// Endless-runner sandbox: train a population of networks or play yourself.
#[derive(Debug, Parser)]
#[command(name = "dinorun", version)]
struct Cli {
    /// Trainer configuration file (JSON).
    #[arg(long, env = "DINORUN_CONFIG", default_value = "trainer-config.json")]
    config: PathBuf,

    /// Obstacle seed; overrides the configuration file when training.
    #[arg(long)]
    seed: Option<u32>,

    /// Draw training in the terminal at the simulation tick rate.
    #[arg(long)]
    realtime: bool,

    /// Write the best network found during training to this file.
    #[arg(long)]
    out: Option<PathBuf>,
}

/// Where control goes once a menu action finishes.
#[derive(Debug, PartialEq, Eq)]
enum Next {
    Menu,
    Exit,
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}

fn main() -> Result<()> {
    init_tracing()?;
    let cli = Cli::parse();

    loop {
        let choice = {
            let mut stdin = io::stdin().lock();
            let mut stdout = io::stdout().lock();
            menu::prompt(&mut stdin, &mut stdout).context("failed to read menu choice")?
        };
        let next = match choice {
            Some(Choice::Train) => run_training(&cli)?,
            Some(Choice::Play) => run_play(&cli)?,
            Some(Choice::Exit) | None => Next::Exit,
        };
        if next == Next::Exit {
            break;
        }
    }
    Ok(())
}

fn run_training(cli: &Cli) -> Result<Next> {
    let trainer = match TrainerConfig::load(&cli.config) {
        Ok(trainer) => trainer,
        // Missing or malformed config: report it and go back to the menu.
        Err(err) => {
            println!("{err}");
            return Ok(Next::Menu);
        }
    };
    let seed = cli.seed.unwrap_or(trainer.seed);
    let config = default_config(seed);
    let mut climber =
        HillClimber::new(&trainer, seed).context("failed to build the initial network")?;
    info!(
        population = trainer.population_size,
        generations = trainer.max_generations,
        hidden = trainer.hidden_units,
        seed,
        commitment = %to_hex(&hash_seed(seed)),
        "training started"
    );

    let report = if cli.realtime {
        let _guard = RawModeGuard::enter()?;
        let keys = Rc::new(RefCell::new(KeyLatch::default()));
        let pacer = FramePacer::for_run(&config);
        debug!(interval = ?pacer.interval(), "pacing training");
        let mut view = TerminalView::new(keys, Some(pacer));
        train(&mut climber, &config, trainer.max_generations, &mut view)
    } else {
        train(&mut climber, &config, trainer.max_generations, &mut NullSink)
    };

    for g in &report.generations {
        println!(
            "Generation {:>3}  best {:>9.2}  mean {:>9.2}  ticks {:>6}",
            g.number, g.best, g.mean, g.ticks
        );
    }
    if report.aborted {
        println!("Training stopped after {} generation(s).", report.generations.len());
    }
    if let Some(best) = report.best() {
        println!("Best fitness {:.2} in generation {}.", best.best, best.number);
    }
    if let Some(fitness) = climber.best_fitness() {
        info!(fitness, "final elite");
    }

    if let Some(out) = &cli.out {
        let json = serde_json::to_string_pretty(climber.best())?;
        std::fs::write(out, json)
            .with_context(|| format!("failed to write network to {}", out.display()))?;
        println!("Best network written to {}", out.display());
    }

    // A quit during training tears the whole program down.
    Ok(if report.aborted { Next::Exit } else { Next::Menu })
}

fn run_play(cli: &Cli) -> Result<Next> {
    let seed = cli.seed.unwrap_or_else(clock_seed);
    let config = default_config(seed);
    info!(seed, "play session started");

    let keys = Rc::new(RefCell::new(KeyLatch::default()));
    let outcome = {
        let _guard = RawModeGuard::enter()?;
        let mut view = TerminalView::new(keys.clone(), Some(FramePacer::for_run(&config)));
        let mut session = PlaySession::new(TerminalInput::new(keys), &config);
        let outcome = session.run(&mut view);
        if let SessionOutcome::Crashed { score, .. } = outcome {
            view.hold(&format!("Crashed! Score: {score}. Press any key."))
                .context("failed to wait for a key")?;
        }
        outcome
    };

    io::stdout().flush()?;
    match outcome {
        SessionOutcome::Crashed { score, ticks } => {
            info!(score, ticks, "play session over");
            println!("Score: {score}");
            Ok(Next::Menu)
        }
        SessionOutcome::Quit => Ok(Next::Exit),
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_tracing_install_is_reported() {
        let _ = init_tracing();
        let err = init_tracing().unwrap_err();
        assert!(err.to_string().contains("tracing subscriber"));
    }
}
