use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;

use bitgraph::prelude::*;
use graph_solvers::prelude::*;

#[allow(dead_code)]
mod runner;

use runner::TimeoutWatcher;

/// Solve maximum balanced biclique exactly.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Algorithm name from the registry.
    algorithm: String,

    /// Initial vertex order.
    order: String,

    /// Input graph file.
    input_file: String,

    /// Specify an initial bound.
    #[arg(long, default_value_t = 0)]
    initial_bound: u32,

    /// Stop after finding a biclique of this side size.
    #[arg(long)]
    stop_after_finding: Option<u32>,

    /// Do not generate both orientations of each biclique.
    #[arg(long)]
    break_ab_symmetry: bool,

    /// Print new incumbents as they are found.
    #[arg(long)]
    print_incumbents: bool,

    /// Abort after this many seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Check that the result is a biclique with independent sides.
    #[arg(long)]
    verify: bool,

    /// Input format.
    #[arg(long, default_value = "dimacs")]
    format: String,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let algorithm = match runner::resolve("algorithm", MAX_BICLIQUE_ALGORITHMS, &args.algorithm) {
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

    let graph = match runner::load_graph(&args.input_file, format) {
        Ok(graph) => graph,
        Err(code) => return code,
    };

    let start_time = Instant::now();
    let params = MaxBicliqueParams {
        initial_bound: args.initial_bound,
        stop_after_finding: args.stop_after_finding.unwrap_or(u32::MAX),
        symmetry: if args.break_ab_symmetry {
            BicliqueSymmetryRemoval::Remove
        } else {
            BicliqueSymmetryRemoval::None
        },
        ordering,
        start_time,
        on_incumbent: args.print_incumbents.then(|| {
            let callback: graph_solvers::biclique::BicliqueIncumbentCallback =
                Arc::new(move |size| {
                    println!(
                        "incumbent {size} at {} ms",
                        start_time.elapsed().as_millis()
                    );
                });
            callback
        }),
        ..MaxBicliqueParams::default()
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

    print!("{} {}", result.size, result.nodes);
    if result.aborted {
        print!(" aborted");
    }
    println!();

    // both sides on the members line, separated by a slash
    let side_a: Vec<String> = result
        .members_a
        .iter()
        .map(|&v| graph.vertex_name(v))
        .collect();
    let side_b: Vec<String> = result
        .members_b
        .iter()
        .map(|&v| graph.vertex_name(v))
        .collect();
    println!("{} / {}", side_a.join(" "), side_b.join(" "));

    runner::print_times(total, &result.times);

    if args.verify {
        let a: Vec<usize> = result.members_a.iter().copied().collect();
        let b: Vec<usize> = result.members_b.iter().copied().collect();
        let sizes_ok = a.len() == b.len() && (a.len() as u32 == result.size || a.is_empty());
        if !sizes_ok || (!a.is_empty() && !is_biclique(&graph, &a, &b)) {
            eprintln!("verification failed: result is not a balanced biclique");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
