use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use ricochet_solver::{
    decode_game_id_sized, encode_game_id, legal_moves, solve_with, Color, DedupPolicy,
    GeneratedPuzzle, Generator, GeneratorConfig, SolveOptions,
};

#[derive(Parser, Debug)]
#[command(name = "ricochet", version, about = "Generate and solve Ricochet Robots puzzles")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate puzzles and print their Game IDs with the optimal length
    Generate {
        /// Seed for the first puzzle; puzzle i uses seed + i
        #[arg(long)]
        seed: Option<u64>,
        /// Number of puzzles, generated in parallel
        #[arg(long, default_value_t = 1)]
        count: u64,
        /// Board size (even, 4..=16)
        #[arg(long, default_value_t = 16)]
        size: u8,
        /// Shortest accepted optimal solution
        #[arg(long, default_value_t = 4)]
        min_moves: usize,
        /// Longest accepted optimal solution
        #[arg(long, default_value_t = 12)]
        max_moves: usize,
        /// Candidates to try per puzzle before giving up
        #[arg(long, default_value_t = 2000)]
        max_attempts: usize,
        /// Depth cutoff for the acceptance search, defaults to max-moves
        #[arg(long)]
        max_depth: Option<usize>,
    },
    /// Find an optimal solution for a Game ID
    Solve {
        game_id: String,
        /// Board size the Game ID was generated for
        #[arg(long, default_value_t = 16)]
        size: u8,
        /// Deduplicate on occupied cells only, ignoring which robot is where
        #[arg(long)]
        color_agnostic: bool,
        /// Give up after this many states
        #[arg(long)]
        max_states: Option<usize>,
        /// Give up on solutions longer than this
        #[arg(long)]
        max_depth: Option<usize>,
    },
    /// List the slides available to one robot
    Moves {
        game_id: String,
        color: Color,
        /// Board size the Game ID was generated for
        #[arg(long, default_value_t = 16)]
        size: u8,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Generate {
            seed,
            count,
            size,
            min_moves,
            max_moves,
            max_attempts,
            max_depth,
        } => {
            let config = GeneratorConfig {
                board_size: size,
                min_moves,
                max_moves,
                max_attempts,
                max_depth,
                ..GeneratorConfig::default()
            };
            let base = seed.unwrap_or_else(|| rand::thread_rng().gen());
            let results: Vec<_> = (0..count)
                .into_par_iter()
                .map(|i| {
                    let rng = StdRng::seed_from_u64(base.wrapping_add(i));
                    Generator::new(config.clone(), rng).generate()
                })
                .collect();

            for (i, result) in results.into_iter().enumerate() {
                let seed = base.wrapping_add(i as u64);
                let GeneratedPuzzle {
                    puzzle, solution, ..
                } = result.with_context(|| format!("puzzle {i} (seed {seed})"))?;
                println!("{}\t{}", encode_game_id(&puzzle)?, solution.len());
            }
        }
        Command::Solve {
            game_id,
            size,
            color_agnostic,
            max_states,
            max_depth,
        } => {
            let puzzle = decode_game_id_sized(&game_id, size).context("invalid Game ID")?;
            let options = SolveOptions {
                dedup: if color_agnostic {
                    DedupPolicy::ColorAgnostic
                } else {
                    DedupPolicy::ColorAware
                },
                max_depth,
                max_states,
            };

            let start = Instant::now();
            let outcome = solve_with(&puzzle.board, &puzzle.robots, &puzzle.target, &options);
            let elapsed = start.elapsed();

            match &outcome.solution {
                Some(moves) => {
                    for (i, mv) in moves.iter().enumerate() {
                        println!("{:>2}. {}", i + 1, mv);
                    }
                    println!("optimal length: {}", moves.len());
                }
                None if outcome.truncated => println!("no solution within the given limits"),
                None => println!("unsolvable"),
            }
            println!("states explored: {}", outcome.states_explored);
            println!("elapsed: {:.2} ms", elapsed.as_secs_f64() * 1000.0);
        }
        Command::Moves {
            game_id,
            color,
            size,
        } => {
            let puzzle = decode_game_id_sized(&game_id, size).context("invalid Game ID")?;
            let moves = legal_moves(&puzzle.board, &puzzle.robots, color);
            if moves.is_empty() {
                bail!("{color} has no legal moves");
            }
            for (direction, to) in moves {
                println!("{color} {direction} -> {to}");
            }
        }
    }

    Ok(())
}
