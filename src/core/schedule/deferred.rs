use std::time::Duration;

/// Handle returned by [`Scheduler::schedule`]; pass it to [`Scheduler::cancel`]
/// to drop the task before it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct ScheduledTask<A> {
    handle: TaskHandle,
    due: Duration,
    action: A,
}

/// Delayed actions on a private clock advanced by the caller.
///
/// Tasks fire in `(due time, schedule order)` order, so two tasks scheduled
/// with the same delay always fire in the order they were scheduled.
#[derive(Debug, Clone)]
pub struct Scheduler<A> {
    now: Duration,
    next_id: u64,
    pending: Vec<ScheduledTask<A>>,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<A> Scheduler<A> {
    pub fn schedule(&mut self, delay: Duration, action: A) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(ScheduledTask {
            handle,
            due: self.now.saturating_add(delay),
            action,
        });
        handle
    }

    /// Returns `true` when the task was still pending.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.handle != handle);
        self.pending.len() != before
    }

    /// Cancels every pending task whose action matches; returns how many were dropped.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&A) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|t| !pred(&t.action));
        before - self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|t| t.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Moves the clock forward and hands back every task that came due.
    pub fn advance(&mut self, delta: Duration) -> Vec<A> {
        self.now = self.now.saturating_add(delta);
        let now = self.now;
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|t| t.due <= now);
        self.pending = rest;
        // handle ids grow monotonically, so they double as schedule order
        due.sort_by_key(|t| (t.due, t.handle.0));
        due.into_iter().map(|t| t.action).collect()
    }
}

/// Seconds from config as a delay. Negative and NaN read as zero; values too
/// large to represent (including infinity) saturate to [`Duration::MAX`].
pub fn delay_secs(secs: f32) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f32(secs).unwrap_or(Duration::MAX)
}
