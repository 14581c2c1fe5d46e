//! Equity estimation command-line runner.
//!
//! Usage:
//!   cargo run --release --bin equity -- --hero AhAd [OPTIONS]
//!
//! Options:
//!   --hero <CARDS>       Hero hole cards, e.g. AhAd (required)
//!   --board <CARDS>      Known community cards, e.g. KsQd7c (default: none)
//!   --villains <N>       Number of opponents on full-deck pools (default: 1)
//!   --trials <N>         Monte Carlo trials (default: 100000)
//!   --seed <N>           Random seed (default: entropy)
//!   --deadline-ms <N>    Wall-clock budget in milliseconds (optional)
//!   --output <FILE>      Write result JSON to a file (optional)

use std::env;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;

use holdem_equity::{estimate_equity, parse_cards, EquityOptions, VillainPool};

/// Trials per progress-bar tick.
const CHUNK: usize = 5_000;

fn main() {
    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let mut hero_arg: Option<String> = None;
    let mut board_arg = String::new();
    let mut villains: usize = 1;
    let mut trials: usize = 100_000;
    let mut seed: Option<u64> = None;
    let mut deadline_ms: Option<u64> = None;
    let mut output_file: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--hero" => {
                i += 1;
                if i < args.len() {
                    hero_arg = Some(args[i].clone());
                }
            }
            "--board" | "-b" => {
                i += 1;
                if i < args.len() {
                    board_arg = args[i].clone();
                }
            }
            "--villains" | "-v" => {
                i += 1;
                if i < args.len() {
                    villains = args[i].parse().unwrap_or(1);
                }
            }
            "--trials" | "-t" => {
                i += 1;
                if i < args.len() {
                    trials = args[i].parse().unwrap_or(100_000);
                }
            }
            "--seed" | "-s" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse().ok();
                }
            }
            "--deadline-ms" | "-d" => {
                i += 1;
                if i < args.len() {
                    deadline_ms = args[i].parse().ok();
                }
            }
            "--output" | "-o" => {
                i += 1;
                if i < args.len() {
                    output_file = Some(args[i].clone());
                }
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                std::process::exit(2);
            }
        }
        i += 1;
    }

    let Some(hero_arg) = hero_arg else {
        eprintln!("Missing required --hero argument");
        print_help();
        std::process::exit(2);
    };

    if let Err(e) = run(&hero_arg, &board_arg, villains, trials, seed, deadline_ms, output_file) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(
    hero_arg: &str,
    board_arg: &str,
    villains: usize,
    trials: usize,
    seed: Option<u64>,
    deadline_ms: Option<u64>,
    output_file: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let hero_cards = parse_cards(hero_arg)?;
    if hero_cards.len() != 2 {
        return Err(format!("--hero needs exactly 2 cards, got {}", hero_cards.len()).into());
    }
    let hero = [hero_cards[0], hero_cards[1]];
    let board = parse_cards(board_arg)?;

    let dead = [&hero[..], &board[..]].concat();
    let pools = vec![VillainPool::full_deck_minus(&dead); villains];

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let deadline = deadline_ms.map(Duration::from_millis);

    println!("=================================================");
    println!("  Holdem Equity Estimator");
    println!("=================================================");
    println!();
    println!("Hero:     {}{}", hero[0], hero[1]);
    if board.is_empty() {
        println!("Board:    (preflop)");
    } else {
        let text: String = board.iter().map(|c| c.to_string()).collect();
        println!("Board:    {}", text);
    }
    println!("Villains: {} (full-deck pools)", villains);
    println!("Trials:   {}", trials);
    if let Some(s) = seed {
        println!("Seed:     {}", s);
    }
    if let Some(ms) = deadline_ms {
        println!("Deadline: {}ms", ms);
    }
    println!();

    let bar = ProgressBar::new(trials as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} trials ({eta})")?,
    );

    // Run in chunks so the bar moves and the deadline shrinks per chunk.
    // The RNG is carried across chunks, so a fixed seed stays reproducible.
    let start = Instant::now();
    let mut credit = vec![0.0f64; villains + 1];
    let mut completed = 0usize;
    let mut pool_fallbacks = 0usize;

    while completed < trials {
        let remaining_budget = match deadline {
            Some(d) => match d.checked_sub(start.elapsed()) {
                Some(left) => Some(left),
                None => break,
            },
            None => None,
        };

        let chunk = CHUNK.min(trials - completed);
        let mut options = EquityOptions::new().with_trials(chunk);
        if let Some(left) = remaining_budget {
            options = options.with_deadline(left);
        }

        let result = estimate_equity(hero, &board, &pools, &options, &mut rng)?;
        for (total, equity) in credit.iter_mut().zip(&result.equities) {
            *total += equity * result.trials as f64;
        }
        completed += result.trials;
        pool_fallbacks += result.pool_fallbacks;
        bar.set_position(completed as u64);

        // A short chunk means the deadline cut us off mid-chunk.
        if result.trials < chunk {
            break;
        }
    }
    bar.finish_and_clear();

    if completed == 0 {
        return Err("deadline expired before any trial completed".into());
    }

    let equities: Vec<f64> = credit.iter().map(|c| c / completed as f64).collect();
    let elapsed = start.elapsed().as_secs_f64();

    println!("Completed {} trials in {:.2}s ({:.0} trials/s)", completed, elapsed, completed as f64 / elapsed);
    if pool_fallbacks > 0 {
        println!("Pool fallbacks: {}", pool_fallbacks);
    }
    println!();
    println!("Hero equity:    {:.2}%", equities[0] * 100.0);
    for (seat, equity) in equities[1..].iter().enumerate() {
        println!("Villain {} equity: {:.2}%", seat + 1, equity * 100.0);
    }

    if let Some(path) = output_file {
        let json = serde_json::json!({
            "hero": format!("{}{}", hero[0], hero[1]),
            "board": board.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
            "villains": villains,
            "trials": completed,
            "pool_fallbacks": pool_fallbacks,
            "elapsed_seconds": elapsed,
            "equities": equities,
        });
        std::fs::write(&path, serde_json::to_string_pretty(&json)?)?;
        println!();
        println!("Result written to {}", path);
    }

    Ok(())
}

fn print_help() {
    println!("Holdem Equity Estimator");
    println!();
    println!("Usage: equity --hero <CARDS> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --hero <CARDS>         Hero hole cards, e.g. AhAd (required)");
    println!("  -b, --board <CARDS>    Known community cards, e.g. KsQd7c");
    println!("  -v, --villains <N>     Number of opponents (default: 1)");
    println!("  -t, --trials <N>       Monte Carlo trials (default: 100000)");
    println!("  -s, --seed <N>         Random seed (default: entropy)");
    println!("  -d, --deadline-ms <N>  Wall-clock budget in milliseconds");
    println!("  -o, --output <FILE>    Write result JSON to a file");
    println!("  -h, --help             Show this help");
    println!();
    println!("Examples:");
    println!("  # Pocket aces heads-up, preflop");
    println!("  equity --hero AhAd --trials 50000 --seed 42");
    println!();
    println!("  # Three-way on a flop, capped at 4 seconds");
    println!("  equity --hero KsQs --board Js7h2d --villains 2 --deadline-ms 4000");
}
