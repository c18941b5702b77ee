//! Flipcount Deterministic Simulator CLI.
//!
//! This binary provides a command-line interface to drive the counter core:
//! - Run: Interactive wall-clock session with scripted user actions.
//! - Fuzz: Run many simulations with randomized configurations.
//! - Replay: Re-run a simulation with a specific seed and configuration.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use flipcount::time::SystemClock;
use flipcount::{ControlInput, ControlPanel};
use flipcount_sim::{ActionScript, CounterSimulator, ScriptedAction, SimConfig, SimError, ticker};

#[derive(Parser, Debug)]
#[command(author, version, about = "Flipcount Deterministic Simulator", long_about = None)]
struct CliArgs {
    /// Run mode: run, fuzz, or replay.
    #[arg(value_enum)]
    mode: RunMode,

    /// Seed for the simulation. Required for 'replay', used as master seed
    /// for 'fuzz' if provided.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of iterations (distinct scenario seeds) for 'fuzz' mode.
    #[arg(short = 'i', long, default_value_t = 1000)]
    iterations: usize,

    /// Number of ticks to drive per simulation run.
    #[arg(short = 't', long, default_value_t = 200)]
    ticks: usize,

    /// Output file for logging failing seeds in 'fuzz' mode.
    #[arg(short = 'o', long, default_value = "flipcount_sim_failures.log")]
    output_file: PathBuf,

    /// Number of parallel workers for fuzzing. Defaults to logical CPUs.
    #[arg(short = 'w', long, default_value_t = num_cpus::get())]
    workers: usize,

    /// Tick interval in milliseconds for interactive 'run' mode.
    #[arg(long, default_value_t = 500)]
    interval_ms: u64,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum RunMode {
    /// Interactive wall-clock session; Ctrl-C to stop.
    Run,
    /// Fuzz with many random configurations.
    Fuzz,
    /// Replay a simulation with a specific seed.
    Replay,
}

fn main() {
    let args = CliArgs::parse();

    match args.mode {
        RunMode::Run => run_interactive_mode(args),
        RunMode::Fuzz => run_fuzz_mode(args),
        RunMode::Replay => run_replay_mode(args),
    }
}

/// Generates a randomized `SimConfig` for a fuzzing iteration.
///
/// The drawn probabilities always sum below 1.0, so every scenario retains
/// a manual-press majority for the advisor to learn from.
fn randomized_config(seed: u64, num_ticks: usize) -> SimConfig {
    let mut rng = StdRng::seed_from_u64(seed);
    let modulus_min = rng.random_range(1..=4u32);
    let modulus_max = modulus_min + rng.random_range(1..=28u32);
    SimConfig {
        seed,
        num_ticks,
        action_period: rng.random_range(1..=12),
        ai_probability: rng.random_range(0.0..0.5),
        reset_probability: rng.random_range(0.0..0.1),
        modulus_change_probability: rng.random_range(0.0..0.3),
        modulus_min,
        modulus_max,
        initial_modulus: rng.random_range(1..=32),
    }
}

fn run_fuzz_mode(args: CliArgs) {
    let master_seed = args.seed.unwrap_or_else(rand::random);
    let mut seed_rng = StdRng::seed_from_u64(master_seed);
    let seeds: Vec<u64> = (0..args.iterations).map(|_| seed_rng.random()).collect();

    println!("Flipcount Deterministic Fuzzer");
    println!("==============================");
    println!("Iterations: {}", args.iterations);
    println!("Ticks per iteration: {}", args.ticks);
    println!("Workers: {}", args.workers);
    println!("Master seed: {}\n", master_seed);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.workers)
        .build()
        .expect("failed to build fuzz worker pool");

    let completed = AtomicUsize::new(0);
    let failures: Mutex<Vec<(u64, SimError)>> = Mutex::new(Vec::new());
    let start_time = Instant::now();

    pool.install(|| {
        use rayon::prelude::*;

        seeds.par_iter().for_each(|&seed| {
            let config = randomized_config(seed, args.ticks);
            let mut simulator = CounterSimulator::new(config);
            if let Err(error) = simulator.run() {
                println!("FAIL (seed {}): {:?}", seed, error);
                failures.lock().unwrap().push((seed, error));
            }

            let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
            if done % 100 == 0 {
                let rate = done as f64 / start_time.elapsed().as_secs_f64();
                println!("Progress: {}/{} ({:.0} sim/sec)", done, args.iterations, rate);
            }
        });
    });

    let failures = failures.into_inner().unwrap();
    let elapsed = start_time.elapsed();

    println!("\nFuzzing Results");
    println!("===============");
    println!(
        "Simulations: {} ({:.0}/sec)",
        args.iterations,
        args.iterations as f64 / elapsed.as_secs_f64()
    );
    println!("Failures: {}", failures.len());

    if !failures.is_empty() {
        let mut file = File::create(&args.output_file).expect("failed to create failure log");
        writeln!(
            file,
            "# flipcount-sim fuzz failures - {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )
        .expect("failed to write failure log");
        writeln!(file, "# master seed: {}", master_seed).expect("failed to write failure log");
        for (seed, error) in &failures {
            writeln!(file, "seed {}: {:?}", seed, error).expect("failed to write failure log");
        }
        println!("Failing seeds written to {}", args.output_file.display());
        std::process::exit(1);
    }
}

fn run_replay_mode(args: CliArgs) {
    let seed = args.seed.expect("--seed is required for replay mode");
    let config = randomized_config(seed, args.ticks);

    println!("Replaying seed {}", seed);
    println!("{:#?}\n", config);

    let mut simulator = CounterSimulator::new(config);
    match simulator.run() {
        Ok(report) => {
            println!("Replay Report");
            println!("=============");
            println!("Ticks applied: {}", report.ticks_applied);
            println!(
                "Presses: {} ({} AI), resets: {}, modulus changes: {} ({} rejected)",
                report.presses,
                report.ai_decisions,
                report.resets,
                report.modulus_changes,
                report.rejected_modulus_requests
            );
            println!(
                "Final state: value {} | {} | {} | running: {}",
                report.final_state.value,
                report.final_state.mode,
                report.final_state.modulus,
                report.final_state.running
            );

            let panel = simulator.panel();
            println!("\nDecision log (most recent first):");
            for decision in panel.decisions() {
                println!(
                    "  [{}] {} ({}%) - {}",
                    decision.timestamp, decision.decided_mode, decision.confidence, decision.reason
                );
            }
            println!("\nActivity tally:");
            for input in ControlInput::ALL {
                println!("  {:>6}: {}", input.to_string(), panel.tally().count(input));
            }
        }
        Err(error) => {
            eprintln!("Replay failed: {:?}", error);
            std::process::exit(1);
        }
    }
}

fn run_interactive_mode(args: CliArgs) {
    let seed = args.seed.unwrap_or_else(rand::random);
    let config = SimConfig {
        seed,
        ..Default::default()
    };
    let action_period = config.action_period;

    println!("Flipcount Interactive Session");
    println!("=============================");
    println!("Seed: {}", seed);
    println!("Tick interval: {} ms", args.interval_ms);
    println!("Press Ctrl-C to stop.\n");

    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupt_flag = interrupted.clone();
    ctrlc::set_handler(move || interrupt_flag.store(true, Ordering::SeqCst))
        .expect("failed to install Ctrl-C handler");

    let panel = Arc::new(Mutex::new(ControlPanel::new(Arc::new(SystemClock))));
    let script = Mutex::new(ActionScript::new(&config));
    let tick_counter = AtomicUsize::new(0);

    let worker_panel = panel.clone();
    let mut ticker = ticker::spawn(Duration::from_millis(args.interval_ms), move || {
        let tick = tick_counter.fetch_add(1, Ordering::SeqCst);
        let mut panel = worker_panel.lock().unwrap();

        if tick % action_period == 0 {
            match script.lock().unwrap().next_action() {
                ScriptedAction::Press(input) => {
                    let decision = panel.press(input);
                    println!("         > press {}", input);
                    if let Some(decision) = decision {
                        println!(
                            "         > AI decided {} ({}%): {}",
                            decision.decided_mode, decision.confidence, decision.reason
                        );
                    }
                }
                ScriptedAction::SetModulus(requested) => match panel.set_modulus(requested) {
                    Ok(()) => println!("         > modulus set to {}", requested),
                    Err(error) => println!("         > modulus request rejected: {}", error),
                },
                ScriptedAction::Reset => {
                    panel.reset();
                    println!("         > reset");
                }
            }
        }

        panel.tick();
        let state = panel.state();
        let q_bits: String = panel
            .circuit()
            .q_outputs()
            .iter()
            .rev()
            .map(|q| if *q { '1' } else { '0' })
            .collect();
        println!(
            "tick {:>5} | {:>5} | value {:>3} | {} | Q {}",
            tick,
            state.mode.to_string(),
            state.value.to_string(),
            state.modulus,
            q_bits
        );
    });

    while !interrupted.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(50));
    }
    ticker.cancel();

    let panel = panel.lock().unwrap();
    let state = panel.state();
    println!("\nStopped after {} applied ticks.", state.ticks);
    println!(
        "Final state: value {} | {} | {}",
        state.value, state.mode, state.modulus
    );
    println!(
        "Presses: {} total, {} via AI.",
        panel.tally().total(),
        panel.tally().count(ControlInput::Ai)
    );
}
