use std::time::{Duration, Instant};

use log::debug;

use super::queue::Queue;
use super::steal::StealPoints;

/// A unit of distributable work: a forced prefix through the branch
/// positions of the search tree. The first `offsets.len()` branching choices
/// are fixed; the sequential search explores the subtree below them and
/// returns without visiting siblings at the forced depths.
pub struct Subproblem {
    pub offsets: Vec<i32>,
}

/// Runs `job` across `n_threads` workers with depth-stratified work queues
/// and steal points over the first `depths` levels of the search tree.
///
/// Workers walk the depths in order. At each depth, one worker claims the
/// queue's producer slot, seeds it by stealing the published position of
/// every other worker at the previous depth (each steal expands into one
/// subproblem per unexplored sibling), and releases the slot; then everybody
/// drains the queue, running `job` per subproblem against their local result.
/// A worker leaving a depth marks its own steal point finished so thieves
/// never wait on it again.
///
/// Returns each worker's `(local result, busy time)`; merging is the
/// caller's business.
pub fn run_work_stealing<L, F>(
    n_threads: usize,
    depths: usize,
    graph_size: usize,
    job: F,
) -> Vec<(L, Duration)>
where
    L: Default + Send,
    F: Fn(&Subproblem, &mut L, &StealPoints) + Sync,
{
    let n_threads = n_threads.max(1);
    let depths = depths.max(1);

    let steal_points: Vec<StealPoints> =
        (0..n_threads).map(|_| StealPoints::new(depths - 1)).collect();
    let queues: Vec<Queue<Subproblem>> = (0..depths).map(|_| Queue::bounded(n_threads)).collect();

    // the root job; its producer slot opens and closes immediately
    queues[0].enqueue(Subproblem {
        offsets: Vec::new(),
    });
    if queues[0].want_producer() {
        queues[0].initial_producer_done();
    }

    std::thread::scope(|scope| {
        let mut handles = Vec::with_capacity(n_threads);
        for i in 0..n_threads {
            let queues = &queues;
            let steal_points = &steal_points;
            let job = &job;
            handles.push(scope.spawn(move || {
                let start_time = Instant::now();
                let mut busy_until = Duration::default();
                let mut local = L::default();

                for depth in 0..depths {
                    if queues[depth].want_producer() {
                        if depth > 0 {
                            for j in 0..n_threads {
                                if j == i {
                                    continue;
                                }
                                match steal_points[j].points[depth - 1].steal() {
                                    Some(mut stolen) => {
                                        debug!("worker {i} stole after {stolen:?}");
                                        // turn the claimed position into one
                                        // subproblem per unexplored sibling
                                        stolen.pop();
                                        for offset in &mut stolen {
                                            *offset -= 1;
                                        }
                                        loop {
                                            let last = stolen.last_mut().unwrap();
                                            *last += 1;
                                            if *last as usize >= graph_size {
                                                break;
                                            }
                                            queues[depth].enqueue(Subproblem {
                                                offsets: stolen.clone(),
                                            });
                                        }
                                    }
                                    None => debug!("worker {i} found nothing at {j}/{depth}"),
                                }
                            }
                        }
                        queues[depth].initial_producer_done();
                    }

                    while let Some(subproblem) = queues[depth].dequeue_blocking() {
                        debug!("worker {i} dequeued {:?}", subproblem.offsets);
                        job(&subproblem, &mut local, &steal_points[i]);
                        busy_until = start_time.elapsed();
                    }

                    if depth + 1 < depths {
                        steal_points[i].points[depth].finished();
                    }
                }

                (local, busy_until)
            }));
        }

        handles
            .into_iter()
            .map(|handle| handle.join().expect("worker panicked"))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn every_worker_reports_and_root_job_runs_once() {
        let jobs = AtomicUsize::new(0);
        let results: Vec<(u64, Duration)> = run_work_stealing(4, 3, 10, |subproblem, local, _| {
            jobs.fetch_add(1, Ordering::SeqCst);
            assert!(subproblem.offsets.len() < 3);
            *local += 1;
        });
        assert_eq!(results.len(), 4);
        // only the root subproblem exists: the job never publishes positions,
        // so there is nothing to steal
        assert_eq!(jobs.load(Ordering::SeqCst), 1);
        let total: u64 = results.iter().map(|(jobs, _)| jobs).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn published_positions_become_stolen_subproblems() {
        // the root job publishes a position at depth 0 and lingers until it
        // is stolen; thieves then run the sibling subproblems
        let results: Vec<(Vec<Vec<i32>>, Duration)> =
            run_work_stealing(2, 2, 4, |subproblem, local: &mut Vec<Vec<i32>>, my_points| {
                if subproblem.offsets.is_empty() {
                    my_points.points[0].publish(&[1, 0]);
                    while my_points.points[0].unpublish_and_keep_going() {
                        my_points.points[0].publish(&[1, 0]);
                        std::thread::yield_now();
                    }
                }
                local.push(subproblem.offsets.clone());
            });

        let all: Vec<Vec<i32>> = results.into_iter().flat_map(|(local, _)| local).collect();
        // root plus the siblings after position 1: offsets 1, 2, 3
        assert_eq!(all.len(), 4);
        for offsets in [vec![1], vec![2], vec![3]] {
            assert!(all.contains(&offsets), "{offsets:?} missing from {all:?}");
        }
    }

    #[test]
    fn single_thread_degenerates_to_sequential() {
        let results: Vec<(u64, Duration)> =
            run_work_stealing(1, 5, 100, |_, local, _| *local += 1);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0, 1);
    }
}
