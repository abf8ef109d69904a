use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use log::info;
use num_format::{Locale, ToFormattedString};

use bitgraph::prelude::*;
use graph_solvers::prelude::*;

mod runner;

use runner::TimeoutWatcher;

/// Solve maximum clique exactly.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Algorithm name from the registry.
    algorithm: String,

    /// Initial vertex order.
    order: String,

    /// Input graph file.
    input_file: String,

    /// Number of threads to use (where relevant).
    #[arg(long, default_value_t = num_cpus::get())]
    threads: usize,

    /// Stop after finding a clique of this size.
    #[arg(long)]
    stop_after_finding: Option<u32>,

    /// Specify an initial bound.
    #[arg(long, default_value_t = 0)]
    initial_bound: u32,

    /// Count maximum cliques instead of stopping at the first.
    #[arg(long)]
    enumerate: bool,

    /// Print new incumbents as they are found.
    #[arg(long)]
    print_incumbents: bool,

    /// Depth at which to perform work splitting (where relevant).
    #[arg(long, default_value_t = 5)]
    split_depth: usize,

    /// Abort after this many seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Take the complement of the graph (to solve independent set).
    #[arg(long)]
    complement: bool,

    /// Raise the graph to this power (to solve s-clique).
    #[arg(long, default_value_t = 1)]
    power: u32,

    /// Check that the members form a clique of the reported size.
    #[arg(long)]
    verify: bool,

    /// Input format.
    #[arg(long, default_value = "dimacs")]
    format: String,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let algorithm = match runner::resolve("algorithm", MAX_CLIQUE_ALGORITHMS, &args.algorithm) {
        Ok(algorithm) => algorithm,
        Err(code) => return code,
    };
    let ordering = match runner::resolve_order(&args.order) {
        Ok(ordering) => ordering,
        Err(code) => return code,
    };
    let format = match runner::resolve_format(&args.format) {
        Ok(format) => format,
        Err(code) => return code,
    };
    if args.power == 0 {
        eprintln!("power must be at least 1");
        return ExitCode::FAILURE;
    }

    let mut graph = match runner::load_graph(&args.input_file, format) {
        Ok(graph) => graph,
        Err(code) => return code,
    };
    if args.complement {
        graph = complement(&graph);
    }
    if args.power > 1 {
        let power_start = Instant::now();
        graph = power(&graph, args.power);
        info!("powered graph in {:?}", power_start.elapsed());
    }

    let start_time = Instant::now();
    let params = MaxCliqueParams {
        initial_bound: args.initial_bound,
        stop_after_finding: args.stop_after_finding.unwrap_or(u32::MAX),
        enumerate: args.enumerate,
        n_threads: args.threads,
        split_depth: args.split_depth,
        ordering,
        start_time,
        on_incumbent: args.print_incumbents.then(|| {
            let callback: IncumbentCallback = Arc::new(move |size, position| {
                println!(
                    "incumbent {size} at {} ms, position {position:?}",
                    start_time.elapsed().as_millis()
                );
            });
            callback
        }),
        ..MaxCliqueParams::default()
    };

    let watcher = TimeoutWatcher::start(Arc::clone(&params.abort), args.timeout);
    let result = match algorithm(&graph, &params) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };
    watcher.cancel();
    let total = start_time.elapsed();

    info!(
        "searched {} nodes",
        result.nodes.to_formatted_string(&Locale::en)
    );

    print!("{} {}", result.size, result.nodes);
    if args.enumerate {
        print!(" {}", result.result_count);
    }
    if result.aborted {
        print!(" aborted");
    }
    println!();

    runner::print_members(&graph, result.members.iter().copied());
    runner::print_times(total, &result.times);

    if args.verify {
        let members: Vec<usize> = result.members.iter().copied().collect();
        let consistent = members.len() as u32 == result.size || result.members.is_empty();
        if !consistent || !is_clique(&graph, &members) {
            eprintln!("verification failed: result is not a clique of the reported size");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
