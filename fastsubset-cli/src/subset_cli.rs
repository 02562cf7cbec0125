// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use fastsubset::display::{CompactDisplay, SubsetDisplay};
use fastsubset::{
    solve, Allocator, Inventory, Policy, ReachabilityTable, Solution, SubsetSumError,
};
use fastsubset_cli::input::{parse_entry, read_weights};
use serde_json::json;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Targets above this need an explicit --max-target, the table holds one cell per unit.
const DEFAULT_MAX_TARGET: u64 = 1 << 26;

/// Inventories holding more units need an explicit --max-items, every round expands them.
const DEFAULT_MAX_ITEMS: u64 = 1 << 26;

#[derive(Parser)]
#[command(name = "subset-cli")]
#[command(about = "Pick subsets of weights whose sum is nearest to a target", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Log at debug level unless RUST_LOG is set.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Reject targets larger than this.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_TARGET)]
    max_target: u64,

    /// Reject inventories holding more units than this.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_ITEMS)]
    max_items: u64,
}

/// Acceptable side when the target is unreachable.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArgument {
    /// Only a subset summing to the target.
    Exact,
    /// The largest sum not above the target.
    AtMost,
    /// The smallest sum not below the target.
    AtLeast,
}

impl From<PolicyArgument> for Policy {
    fn from(policy: PolicyArgument) -> Self {
        match policy {
            PolicyArgument::Exact => Policy::Exact,
            PolicyArgument::AtMost => Policy::AtMost,
            PolicyArgument::AtLeast => Policy::AtLeast,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Select one subset of the weights nearest to the target.
    Solve(SolveArguments),

    /// Repeatedly extract subsets from an inventory until none qualifies.
    Allocate(AllocateArguments),

    /// Print every reachable sum up to the target with its witness.
    Table(TableArguments),
}

#[derive(Args, Clone)]
struct WeightsArguments {
    /// Comma separated weights, e.g. 2,6,3,5.
    #[arg(long, value_delimiter = ',', required_unless_present = "weights_path")]
    weights: Vec<u64>,

    /// File with whitespace separated weights.
    #[arg(long, conflicts_with = "weights")]
    weights_path: Option<PathBuf>,

    /// Keep the given order instead of sorting the weights heaviest first.
    #[arg(long)]
    no_sort: bool,
}

impl WeightsArguments {
    fn load(&self) -> anyhow::Result<Vec<u64>> {
        let mut weights = match &self.weights_path {
            Some(path) => read_weights(path)?,
            None => self.weights.clone(),
        };
        // Validate before sorting so positions refer to the given order.
        if let Some(index) = weights.iter().position(|&w| w == 0) {
            return Err(SubsetSumError::ZeroWeight { index }.into());
        }
        if !self.no_sort {
            weights.sort_unstable_by(|a, b| b.cmp(a));
        }
        Ok(weights)
    }
}

#[derive(Args, Clone)]
struct SolveArguments {
    #[command(flatten)]
    weights: WeightsArguments,

    /// Target sum.
    #[arg(long)]
    target: u64,

    #[arg(long, value_enum, default_value_t = PolicyArgument::AtLeast)]
    policy: PolicyArgument,

    /// Run the solver repeatedly for this long and report the average duration.
    #[arg(long, value_parser = humantime::parse_duration, default_value = "0s")]
    measure_duration: Duration,
}

#[derive(Args, Clone)]
struct AllocateArguments {
    /// Comma separated weight:count pairs, e.g. 40:16,21:1.
    #[arg(
        long,
        value_delimiter = ',',
        value_parser = parse_entry,
        required_unless_present = "weights_path"
    )]
    inventory: Vec<(u64, u64)>,

    /// File with whitespace separated weights, one inventory unit each.
    #[arg(long, conflicts_with = "inventory")]
    weights_path: Option<PathBuf>,

    /// Target sum of every round.
    #[arg(long)]
    target: u64,

    #[arg(long, value_enum, default_value_t = PolicyArgument::AtLeast)]
    policy: PolicyArgument,

    /// Expand the inventory lightest first instead of heaviest first.
    #[arg(long)]
    no_sort: bool,

    /// Stop after this many rounds.
    #[arg(long)]
    max_rounds: Option<usize>,
}

#[derive(Args, Clone)]
struct TableArguments {
    #[command(flatten)]
    weights: WeightsArguments,

    /// Largest sum in the table.
    #[arg(long)]
    target: u64,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(cli) {
        Ok(_) => {
            std::process::exit(exitcode::OK);
        }
        Err(e) => {
            println!("Error: {:#}", e);
            std::process::exit(exitcode::DATAERR);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn check_target(target: u64, max_target: u64) -> anyhow::Result<()> {
    if target > max_target {
        bail!("target {target} exceeds --max-target {max_target}");
    }
    Ok(())
}

fn check_items(items: u64, max_items: u64) -> anyhow::Result<()> {
    if items > max_items {
        bail!("inventory of {items} units exceeds --max-items {max_items}");
    }
    Ok(())
}

fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Solve(args) => {
            check_target(args.target, cli.max_target)?;
            let weights = args.weights.load()?;
            let (solution, duration) =
                run_solve(&weights, args.target, args.policy.into(), args.measure_duration)?;
            if cli.json {
                let output = json!({
                    "target": args.target,
                    "policy": Policy::from(args.policy),
                    "total": solution.total(),
                    "subset": solution.subset,
                    "outcome": solution.outcome,
                });
                println!("{output}");
            } else {
                println!("Subset: {}", SubsetDisplay(&solution.subset));
                println!("Outcome: {}", solution.outcome);
                if !args.measure_duration.is_zero() {
                    println!("Duration: {:?}", duration);
                }
            }
            Ok(())
        }
        Command::Allocate(args) => {
            check_target(args.target, cli.max_target)?;
            let mut inventory: Inventory = match &args.weights_path {
                Some(path) => read_weights(path)?.into_iter().collect(),
                None => Inventory::from_counts(args.inventory.iter().copied())?,
            };
            check_items(inventory.total_items(), cli.max_items)?;
            let mut allocator = Allocator::new(&mut inventory, args.target)
                .with_policy(args.policy.into())
                .with_descending(!args.no_sort);
            if let Some(max_rounds) = args.max_rounds {
                allocator = allocator.with_max_rounds(max_rounds);
            }
            let allocation = allocator.run()?;
            if cli.json {
                let output = json!({
                    "target": args.target,
                    "totals": allocation.totals(),
                    "rounds": allocation.rounds,
                    "exhausted": allocation.exhausted,
                    "remaining": inventory,
                });
                println!("{output}");
            } else {
                for round in &allocation.rounds {
                    println!(
                        "Round {}: {} in {}",
                        round.index,
                        round.total,
                        CompactDisplay(&round.subset)
                    );
                }
                println!("Rounds: {}", allocation.rounds.len());
                println!("Remaining: {}", inventory);
            }
            Ok(())
        }
        Command::Table(args) => {
            check_target(args.target, cli.max_target)?;
            let weights = args.weights.load()?;
            let table = ReachabilityTable::build(&weights, args.target)
                .context("unable to build the reachability table")?;
            if cli.json {
                let output: Vec<_> = table
                    .reached_sums()
                    .map(|sum| json!({ "sum": sum, "witness": table.witness(sum) }))
                    .collect();
                println!("{}", serde_json::Value::from(output));
            } else {
                print!("{}", table.display());
            }
            Ok(())
        }
    }
}

fn run_solve(
    weights: &[u64],
    target: u64,
    policy: Policy,
    measure_duration: Duration,
) -> anyhow::Result<(Solution, Duration)> {
    let start = Instant::now();
    let mut count = 0;
    loop {
        let solution = solve(weights, target, policy)?;
        count += 1;

        let duration = start.elapsed();
        if duration >= measure_duration {
            debug!(runs = count, ?duration, "solver timing done");
            return Ok((solution, duration / count));
        }
    }
}
