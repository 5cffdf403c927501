//! Simulated-time deferred work.
//!
//! Replaces fire-and-forget wall-clock timers: every pending task advances
//! only when the owner feeds it `dt`, so delayed work pauses, fast-forwards,
//! and replays deterministically with the rest of the simulation.

/// Remaining time within this tolerance of zero counts as due, so a delay
/// accumulated from many small `dt` steps still fires on its boundary tick
/// despite float residue.
const DUE_TOLERANCE: f64 = 1e-9;

/// One pending task.
#[derive(Debug, Clone)]
struct Pending<T> {
    remaining: f64,
    payload: T,
}

/// A list of payloads scheduled to come due after simulated delays.
#[derive(Debug, Clone)]
pub struct TaskList<T> {
    pending: Vec<Pending<T>>,
}

impl<T> TaskList<T> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Schedule `payload` to come due after `delay` simulated seconds.
    ///
    /// A non-positive delay comes due on the next `advance`.
    pub fn schedule(&mut self, delay: f64, payload: T) {
        self.pending.push(Pending {
            remaining: delay,
            payload,
        });
    }

    /// Advance all pending tasks by `dt` and return the payloads that came
    /// due, in the order they were scheduled.
    pub fn advance(&mut self, dt: f64) -> Vec<T> {
        for task in &mut self.pending {
            task.remaining -= dt;
        }
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].remaining <= DUE_TOLERANCE {
                due.push(self.pending.remove(i).payload);
            } else {
                i += 1;
            }
        }
        due
    }

    /// Discard every pending task.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for TaskList<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_comes_due_once_delay_elapses() {
        let mut tasks = TaskList::new();
        tasks.schedule(1.0, "flash");
        assert!(tasks.advance(0.5).is_empty());
        assert_eq!(tasks.advance(0.5), vec!["flash"]);
        assert!(tasks.is_empty());
    }

    #[test]
    fn due_tasks_keep_schedule_order() {
        let mut tasks = TaskList::new();
        tasks.schedule(0.2, 1);
        tasks.schedule(0.1, 2);
        tasks.schedule(0.3, 3);
        assert_eq!(tasks.advance(0.25), vec![1, 2]);
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn many_small_steps_hit_the_exact_boundary() {
        let mut tasks = TaskList::new();
        tasks.schedule(5.0, "revert");
        // 49 * 0.1 leaves ~0.1 remaining; the 50th step lands on the
        // boundary with only float residue left.
        for _ in 0..49 {
            assert!(tasks.advance(0.1).is_empty());
        }
        assert_eq!(tasks.advance(0.1), vec!["revert"]);
    }

    #[test]
    fn cancel_all_drops_everything() {
        let mut tasks = TaskList::new();
        tasks.schedule(5.0, ());
        tasks.cancel_all();
        assert!(tasks.advance(10.0).is_empty());
    }
}
