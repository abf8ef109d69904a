use parking_lot::{Condvar, Mutex};

/// The rendezvous a worker keeps at one prefix depth of its current
/// subproblem.
///
/// The owning worker publishes its branching position on the way into a
/// recursion at that depth and unpublishes on the way out; an idle worker
/// blocks in [`steal`](Self::steal) until a position is available (or the
/// owner has left the depth for good), then claims the unexplored sibling
/// branches. Once stolen, the owner abandons its remaining siblings at that
/// depth; responsibility has moved to the thief.
pub struct StealPoint {
    state: Mutex<State>,
    cond: Condvar,
}

#[derive(Default)]
struct State {
    is_finished: bool,
    has_data: bool,
    was_stolen: bool,
    data: Vec<i32>,
}

impl StealPoint {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            cond: Condvar::new(),
        }
    }

    /// Makes the current position available to thieves. Called only by the
    /// owning worker.
    pub fn publish(&self, position: &[i32]) {
        let mut state = self.state.lock();
        if state.is_finished {
            return;
        }
        state.data.clear();
        state.data.extend_from_slice(position);
        state.has_data = true;
        self.cond.notify_all();
    }

    /// Waits for a published position and claims it. Returns `None` once the
    /// owner has finished with this depth.
    pub fn steal(&self) -> Option<Vec<i32>> {
        let mut state = self.state.lock();
        while !state.has_data && !state.is_finished {
            self.cond.wait(&mut state);
        }
        if !state.is_finished && state.has_data {
            state.was_stolen = true;
            Some(state.data.clone())
        } else {
            None
        }
    }

    /// Withdraws the published position. Returns `false` if it was stolen,
    /// in which case the owner must not explore its remaining siblings at
    /// this depth.
    pub fn unpublish_and_keep_going(&self) -> bool {
        let mut state = self.state.lock();
        if state.is_finished {
            return true;
        }
        state.has_data = false;
        !state.was_stolen
    }

    /// The owner is done producing work at this depth; pending and future
    /// thieves leave empty-handed.
    pub fn finished(&self) {
        let mut state = self.state.lock();
        state.is_finished = true;
        state.has_data = false;
        self.cond.notify_all();
    }
}

impl Default for StealPoint {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StealPoint {
    fn drop(&mut self) {
        // a point dropped while live means a worker exited without running
        // its depth loop to completion
        debug_assert!(self.state.get_mut().is_finished, "steal point still live");
    }
}

/// One steal point per distributable depth, owned by a single worker.
pub struct StealPoints {
    pub points: Vec<StealPoint>,
}

impl StealPoints {
    pub fn new(count: usize) -> Self {
        Self {
            points: (0..count).map(|_| StealPoint::new()).collect(),
        }
    }
}
