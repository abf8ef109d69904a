use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;

use bitgraph::prelude::*;
use graph_solvers::prelude::*;

mod runner;

use runner::TimeoutWatcher;

/// Solve maximum labelled clique exactly: largest clique first, fewest
/// distinct labels second.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Algorithm name from the registry.
    algorithm: String,

    /// Initial vertex order.
    order: String,

    /// Input graph file.
    input_file: String,

    /// Assign labels deterministically as vertex id modulo this count.
    #[arg(long, default_value_t = 4)]
    label_count: u8,

    /// Number of threads to use (where relevant).
    #[arg(long, default_value_t = num_cpus::get())]
    threads: usize,

    /// Print new incumbents as they are found.
    #[arg(long)]
    print_incumbents: bool,

    /// Abort after this many seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Check that the members form a clique with the reported label cost.
    #[arg(long)]
    verify: bool,

    /// Input format.
    #[arg(long, default_value = "dimacs")]
    format: String,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let algorithm = match runner::resolve(
        "algorithm",
        MAX_LABELLED_CLIQUE_ALGORITHMS,
        &args.algorithm,
    ) {
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
    if args.label_count == 0 || args.label_count > 64 {
        eprintln!("label count must be between 1 and 64");
        return ExitCode::FAILURE;
    }

    let graph = match runner::load_graph(&args.input_file, format) {
        Ok(graph) => graph,
        Err(code) => return code,
    };
    let labels: Vec<u8> = (0..graph.size())
        .map(|v| (v % args.label_count as usize) as u8)
        .collect();

    let start_time = Instant::now();
    let mut params = MaxLabelledCliqueParams::new(labels.clone());
    params.n_threads = args.threads;
    params.ordering = ordering;
    params.start_time = start_time;
    if args.print_incumbents {
        params.on_incumbent = Some(Arc::new(move |size, cost| {
            println!(
                "incumbent {size} at cost {cost}, {} ms",
                start_time.elapsed().as_millis()
            );
        }));
    }

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

    print!("{} {} {}", result.size, result.cost, result.nodes);
    if result.aborted {
        print!(" aborted");
    }
    println!();

    runner::print_members(&graph, result.members.iter().copied());
    runner::print_times(total, &result.times);

    if args.verify {
        let members: Vec<usize> = result.members.iter().copied().collect();
        let distinct: std::collections::BTreeSet<u8> =
            members.iter().map(|&v| labels[v]).collect();
        let consistent = members.len() as u32 == result.size || result.members.is_empty();
        if !consistent || !is_clique(&graph, &members) || distinct.len() as u32 != result.cost {
            eprintln!("verification failed: result is not a clique with the reported cost");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
