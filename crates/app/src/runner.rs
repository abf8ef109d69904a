//! Bits shared by the solver binaries: the timeout watcher, name resolution
//! with helpful failure output, and the three-line result footer.

use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use bitgraph::prelude::*;

/// Sets the shared abort flag once the deadline passes, unless cancelled
/// first. The solvers poll the flag at every node, so a fired timeout stops
/// the search within one node expansion.
pub struct TimeoutWatcher {
    state: Option<(Arc<(Mutex<bool>, Condvar)>, JoinHandle<()>)>,
}

impl TimeoutWatcher {
    pub fn start(abort: Arc<AtomicBool>, seconds: Option<u64>) -> Self {
        let Some(seconds) = seconds else {
            return Self { state: None };
        };
        let signal = Arc::new((Mutex::new(false), Condvar::new()));
        let watcher_signal = Arc::clone(&signal);
        let handle = std::thread::spawn(move || {
            let deadline = Instant::now() + Duration::from_secs(seconds);
            let (lock, condvar) = &*watcher_signal;
            let mut cancelled = lock.lock();
            while !*cancelled {
                if condvar.wait_until(&mut cancelled, deadline).timed_out() {
                    if !*cancelled {
                        log::info!("timeout after {seconds}s, aborting");
                        abort.store(true, Ordering::SeqCst);
                    }
                    break;
                }
            }
        });
        Self {
            state: Some((signal, handle)),
        }
    }

    pub fn cancel(mut self) {
        if let Some((signal, handle)) = self.state.take() {
            let (lock, condvar) = &*signal;
            *lock.lock() = true;
            condvar.notify_all();
            let _ = handle.join();
        }
    }
}

/// Looks `name` up in a registry table; on failure lists what would have
/// worked.
pub fn resolve<F: Copy>(kind: &str, table: &[(&str, F)], name: &str) -> Result<F, ExitCode> {
    match graph_solvers::registry::lookup(table, name) {
        Some(f) => Ok(f),
        None => {
            let known: Vec<&str> = table.iter().map(|(n, _)| *n).collect();
            eprintln!("unknown {kind} '{name}', choose from: {}", known.join(" "));
            Err(ExitCode::FAILURE)
        }
    }
}

pub fn resolve_order(name: &str) -> Result<VertexOrdering, ExitCode> {
    match VertexOrdering::from_name(name) {
        Some(order) => Ok(order),
        None => {
            let known: Vec<&str> = VertexOrdering::NAMES.iter().map(|(n, _)| *n).collect();
            eprintln!("unknown order '{name}', choose from: {}", known.join(" "));
            Err(ExitCode::FAILURE)
        }
    }
}

pub fn resolve_format(name: &str) -> Result<GraphFormat, ExitCode> {
    match GraphFormat::from_name(name) {
        Some(format) => Ok(format),
        None => {
            let known: Vec<&str> = GraphFormat::NAMES.iter().map(|(n, _)| *n).collect();
            eprintln!("unknown format '{name}', choose from: {}", known.join(" "));
            Err(ExitCode::FAILURE)
        }
    }
}

pub fn load_graph(path: &str, format: GraphFormat) -> Result<Graph, ExitCode> {
    match read_graph(path, format) {
        Ok(graph) => Ok(graph),
        Err(error) => {
            eprintln!("{error}");
            Err(ExitCode::FAILURE)
        }
    }
}

/// The last output line: total wall-clock milliseconds, then per-worker
/// busy times.
pub fn print_times(total: Duration, times: &[Duration]) {
    print!("{}", total.as_millis());
    for time in times {
        print!(" {}", time.as_millis());
    }
    println!();
}

pub fn print_members(graph: &Graph, members: impl IntoIterator<Item = usize>) {
    let names: Vec<String> = members.into_iter().map(|v| graph.vertex_name(v)).collect();
    println!("{}", names.join(" "));
}
