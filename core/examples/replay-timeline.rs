//! Runs one headless generation with scripted policies and prints its
//! obstacle timeline and summary as JSON.
//!
//! Usage:
//!   cargo run -p dinorun-core --example replay-timeline -- [idle|reflex|mixed] [seed] > run.json

use dinorun_core::*;
use serde::Serialize;

#[derive(Serialize)]
struct Replay<'a> {
    mode: &'a str,
    seed: Seed,
    timeline: &'a [SpawnEvent],
    summary: GenerationSummary,
}

fn main() {
    let mut args = std::env::args().skip(1);
    let mode = args.next().unwrap_or_else(|| "mixed".to_string());
    let seed: Seed = match args.next().map(|s| s.parse()) {
        None => 42,
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            eprintln!("Bad seed: {e}");
            std::process::exit(1);
        }
    };

    let policies: Vec<Box<dyn DecisionPolicy>> = match mode.as_str() {
        "idle" => (0..4).map(|_| Box::new(IdlePolicy) as Box<dyn DecisionPolicy>).collect(),
        "reflex" => (0..4)
            .map(|_| Box::new(ReflexPolicy::default()) as Box<dyn DecisionPolicy>)
            .collect(),
        "mixed" => vec![
            Box::new(IdlePolicy),
            Box::new(ReflexPolicy::default()),
            Box::new(ReflexPolicy { reach: 0.25 }),
            Box::new(FunctionPolicy::new(|_: &Perception| [0.0, 1.0])),
        ],
        _ => {
            eprintln!("Unknown mode: {mode}. Use 'idle', 'reflex', or 'mixed'");
            std::process::exit(1);
        }
    };

    let config = default_config(seed);
    let mut generation = Generation::new(1, policies, &config);
    let summary = match generation.run(&mut NullSink) {
        GenerationOutcome::Complete(summary) => summary,
        GenerationOutcome::Quit => unreachable!("null sink never quits"),
    };

    eprintln!("=== Replay ({mode}, seed {seed}) ===");
    eprintln!("Ticks: {}", summary.ticks);
    eprintln!("Score: {}", summary.score);
    eprintln!("Spawns: {}", summary.spawns);
    for (slot, f) in summary.fitness.iter().enumerate() {
        eprintln!(
            "  agent {slot}: fitness {:.2}, eliminated at {:?}",
            f.score, f.eliminated_at
        );
    }
    eprintln!("Timeline: {}", to_hex(&summary.timeline_digest));

    let replay = Replay {
        mode: &mode,
        seed,
        timeline: &generation.world().timeline,
        summary,
    };
    println!("{}", serde_json::to_string_pretty(&replay).unwrap());
}
