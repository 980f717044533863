//! Thin command-line front end over [`flcs_core`]: the same role
//! `astarpa-next` plays for the reference pairwise aligner it is
//! patterned on — a `clap`-driven binary that wires real input through
//! the search engine and reports what it found.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bumpalo::Bump;
use clap::{Parser, Subcommand, ValueEnum};
use flcs_core::{Engine, EqualityMatcher};
use log::info;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

#[derive(Parser)]
#[command(name = "flcs-cli", about = "Drive the flcs-core fuzzy LCS engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity; repeat for more (-v, -vv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease log verbosity; repeat for less (-q, -qq).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    quiet: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Align the contents of two files and print the matched pairs.
    Run {
        #[arg(long)]
        a: PathBuf,
        #[arg(long)]
        b: PathBuf,
        #[arg(long, value_enum, default_value_t = MatcherKind::Equal)]
        matcher: MatcherKind,
        #[arg(long, default_value_t = flcs_core::DEFAULT_BRANCH_THRESHOLD)]
        branch_threshold: f32,
        /// Compare whole lines instead of individual bytes.
        #[arg(long)]
        lines: bool,
    },
    /// Exercise the engine against a synthetic random matcher.
    Bench {
        #[arg(long, default_value_t = 200)]
        width: usize,
        #[arg(long, default_value_t = 200)]
        height: usize,
        /// Probability that any given cell matches.
        #[arg(long, default_value_t = 0.05)]
        density: f32,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MatcherKind {
    Equal,
    CaseInsensitive,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Run {
            a,
            b,
            matcher,
            branch_threshold,
            lines,
        } => run(&a, &b, matcher, branch_threshold, lines),
        Command::Bench {
            width,
            height,
            density,
            seed,
        } => bench(width, height, density, seed),
    }
}

fn init_logging(verbose: u8, quiet: u8) {
    let level = match verbose as i16 - quiet as i16 {
        i16::MIN..=-1 => log::LevelFilter::Error,
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).init();
}

fn lower(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().map(|b| b.to_ascii_lowercase()).collect()
}

fn run(a_path: &PathBuf, b_path: &PathBuf, matcher: MatcherKind, branch_threshold: f32, lines: bool) -> Result<()> {
    let a_data = fs::read(a_path).with_context(|| format!("reading {}", a_path.display()))?;
    let b_data = fs::read(b_path).with_context(|| format!("reading {}", b_path.display()))?;

    if lines {
        let mut a: Vec<Vec<u8>> = a_data.split(|&c| c == b'\n').map(<[u8]>::to_vec).collect();
        let mut b: Vec<Vec<u8>> = b_data.split(|&c| c == b'\n').map(<[u8]>::to_vec).collect();
        if matches!(matcher, MatcherKind::CaseInsensitive) {
            a.iter_mut().for_each(|l| *l = lower(l));
            b.iter_mut().for_each(|l| *l = lower(l));
        }
        align_and_print(&a, &b, branch_threshold, |elems, idx| {
            String::from_utf8_lossy(&elems[idx]).into_owned()
        })
    } else {
        let a = match matcher {
            MatcherKind::Equal => a_data.clone(),
            MatcherKind::CaseInsensitive => lower(&a_data),
        };
        let b = match matcher {
            MatcherKind::Equal => b_data.clone(),
            MatcherKind::CaseInsensitive => lower(&b_data),
        };
        align_and_print(&a, &b, branch_threshold, |elems, idx| {
            (elems[idx] as char).to_string()
        })
    }
}

fn align_and_print<T: PartialEq>(
    a: &[T],
    b: &[T],
    branch_threshold: f32,
    describe_a: impl Fn(&[T], usize) -> String,
) -> Result<()> {
    anyhow::ensure!(!a.is_empty() && !b.is_empty(), "both inputs must be non-empty");

    let arena = Bump::new();
    let matcher = EqualityMatcher::new(a, b);
    let mut engine = Engine::with_branch_threshold(&arena, a.len(), b.len(), matcher, branch_threshold);
    let result = engine.run();

    info!(
        "steps={} evals={} width={} height={}",
        engine.num_steps(),
        engine.num_evals(),
        engine.width(),
        engine.height()
    );

    for m in result.matches.iter() {
        println!("({}, {}) {:?}  [{}]", m.i, m.j, m.match_val, describe_a(a, m.i));
    }
    println!("total_match = {}", result.total_match);

    Ok(())
}

fn bench(width: usize, height: usize, density: f32, seed: u64) -> Result<()> {
    anyhow::ensure!(width > 0 && height > 0, "width and height must be positive");

    let mut rng = StdRng::seed_from_u64(seed);
    let cells: Vec<f32> = (0..width * height)
        .map(|_| if rng.gen::<f32>() < density { 1.0 } else { 0.0 })
        .collect();
    let matcher = move |i: usize, j: usize| cells[i * height + j];

    let arena = Bump::new();
    let mut engine = Engine::new(&arena, width, height, matcher);
    let result = engine.run();

    println!(
        "width={width} height={height} density={density} steps={} evals={} total_match={}",
        engine.num_steps(),
        engine.num_evals(),
        result.total_match
    );
    Ok(())
}
