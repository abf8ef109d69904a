use std::collections::VecDeque;

use parking_lot::{Condvar, Mutex};

/// A bounded multi-producer multi-consumer FIFO with a single initial
/// producer slot per queue.
///
/// The driver dedicates one queue to each distributable depth. Whichever
/// worker claims the producer slot first seeds the queue (by stealing from
/// the other workers), then releases it; `dequeue_blocking` drains remaining
/// items and reports exhaustion once the producer is done and the queue is
/// empty.
pub struct Queue<T> {
    state: Mutex<State<T>>,
    not_empty: Condvar,
    not_full: Condvar,
}

struct State<T> {
    items: VecDeque<T>,
    capacity: usize,
    producer_claimed: bool,
    producing: bool,
}

impl<T> Queue<T> {
    pub fn bounded(capacity: usize) -> Self {
        Self {
            state: Mutex::new(State {
                items: VecDeque::new(),
                capacity: capacity.max(1),
                producer_claimed: false,
                producing: true,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    /// Claims the initial producer slot. Returns `true` for the first caller
    /// only.
    pub fn want_producer(&self) -> bool {
        let mut state = self.state.lock();
        if state.producer_claimed {
            false
        } else {
            state.producer_claimed = true;
            true
        }
    }

    /// Releases the producer slot; consumers drain whatever is left.
    pub fn initial_producer_done(&self) {
        let mut state = self.state.lock();
        state.producing = false;
        drop(state);
        self.not_empty.notify_all();
    }

    /// Blocks while the queue is full.
    pub fn enqueue(&self, item: T) {
        let mut state = self.state.lock();
        while state.items.len() >= state.capacity {
            self.not_full.wait(&mut state);
        }
        state.items.push_back(item);
        drop(state);
        self.not_empty.notify_one();
    }

    /// Takes the next item, blocking until one is available or production has
    /// finished and the queue has drained.
    pub fn dequeue_blocking(&self) -> Option<T> {
        let mut state = self.state.lock();
        loop {
            if let Some(item) = state.items.pop_front() {
                drop(state);
                self.not_full.notify_one();
                return Some(item);
            }
            if !state.producing {
                return None;
            }
            self.not_empty.wait(&mut state);
        }
    }
}
