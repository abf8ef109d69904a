use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;

use bitgraph::prelude::*;
use graph_solvers::prelude::*;

#[allow(dead_code)]
mod runner;

use runner::TimeoutWatcher;

/// Decide subgraph isomorphism and print a witness mapping.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Algorithm name from the registry.
    algorithm: String,

    /// Pattern graph file.
    pattern_file: String,

    /// Target graph file.
    target_file: String,

    /// Require non-edges of the pattern to map to non-edges.
    #[arg(long)]
    induced: bool,

    /// Abort after this many seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Check that the mapping is an isomorphism.
    #[arg(long)]
    verify: bool,

    /// Input format for both files.
    #[arg(long, default_value = "lad")]
    format: String,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let algorithm = match runner::resolve(
        "algorithm",
        SUBGRAPH_ISOMORPHISM_ALGORITHMS,
        &args.algorithm,
    ) {
        Ok(algorithm) => algorithm,
        Err(code) => return code,
    };
    let format = match runner::resolve_format(&args.format) {
        Ok(format) => format,
        Err(code) => return code,
    };

    let pattern = match runner::load_graph(&args.pattern_file, format) {
        Ok(graph) => graph,
        Err(code) => return code,
    };
    let target = match runner::load_graph(&args.target_file, format) {
        Ok(graph) => graph,
        Err(code) => return code,
    };

    let start_time = Instant::now();
    let params = SubgraphIsomorphismParams {
        induced: args.induced,
        ..SubgraphIsomorphismParams::default()
    };

    let watcher = TimeoutWatcher::start(Arc::clone(&params.abort), args.timeout);
    let result = match algorithm((&pattern, &target), &params) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };
    watcher.cancel();
    let total = start_time.elapsed();

    print!(
        "{} {}",
        if result.isomorphism.is_empty() {
            "unsat"
        } else {
            "sat"
        },
        result.nodes
    );
    if result.aborted {
        print!(" aborted");
    }
    println!();

    let pairs: Vec<String> = result
        .isomorphism
        .iter()
        .map(|(&v, &f)| format!("({}, {})", pattern.vertex_name(v), target.vertex_name(f)))
        .collect();
    println!("{}", pairs.join(" "));

    runner::print_times(total, &[]);

    if args.verify && !result.isomorphism.is_empty() {
        let map = &result.isomorphism;
        let mut images: Vec<usize> = map.values().copied().collect();
        images.sort_unstable();
        images.dedup();
        let injective = images.len() == pattern.size();
        let preserved = (0..pattern.size()).all(|u| {
            (0..pattern.size()).all(|v| {
                if u == v || !pattern.adjacent(u, v) {
                    true
                } else {
                    target.adjacent(map[&u], map[&v])
                }
            })
        });
        let induced_ok = !args.induced
            || (0..pattern.size()).all(|u| {
                (0..pattern.size()).all(|v| {
                    u == v || pattern.adjacent(u, v) || !target.adjacent(map[&u], map[&v])
                })
            });
        if map.len() != pattern.size() || !injective || !preserved || !induced_ok {
            eprintln!("verification failed: mapping is not an isomorphism");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
