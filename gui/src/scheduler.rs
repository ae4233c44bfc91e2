//! Single-threaded delayed task queue, the redraw driver's clock.
//!
//! The scheduler never reads a clock itself. The host passes the current
//! time to [`Scheduler::run_due`], which keeps it deterministic under test.

use std::{cell::Cell, rc::Rc, time::Duration};

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Cancels a posted task. Dropping the handle does not cancel it.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    cancelled: Rc<Cell<bool>>,
}

impl TaskHandle {
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

struct Task {
    id: u64,
    deadline: Duration,
    interval: Option<Duration>,
    callback: Box<dyn FnMut()>,
    cancelled: Rc<Cell<bool>>,
}

#[derive(Default)]
pub struct Scheduler {
    queue: Vec<Task>,
    now: Duration,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `callback` on the next [`run_due`](Self::run_due).
    pub fn post<F>(&mut self, callback: F) -> TaskHandle
    where
        F: FnMut() + 'static,
    {
        self.push(Duration::ZERO, None, Box::new(callback))
    }

    /// Runs `callback` once, `delay` after the last observed time.
    pub fn post_delayed<F>(&mut self, delay: Duration, callback: F) -> TaskHandle
    where
        F: FnMut() + 'static,
    {
        self.push(delay, None, Box::new(callback))
    }

    /// Runs `callback` right away and then again `interval` after each run.
    ///
    /// The next run is measured from when the previous one actually ran, so
    /// a late host loop pushes every following tick back as well.
    pub fn every<F>(&mut self, interval: Duration, callback: F) -> TaskHandle
    where
        F: FnMut() + 'static,
    {
        let interval = interval.max(MIN_INTERVAL);
        self.push(Duration::ZERO, Some(interval), Box::new(callback))
    }

    fn push(
        &mut self,
        delay: Duration,
        interval: Option<Duration>,
        callback: Box<dyn FnMut()>,
    ) -> TaskHandle {
        let cancelled = Rc::new(Cell::new(false));
        let id = self.next_id;
        self.next_id += 1;

        self.queue.push(Task {
            id,
            deadline: self.now + delay,
            interval,
            callback,
            cancelled: cancelled.clone(),
        });

        TaskHandle { cancelled }
    }

    /// Runs every task due at `now`, each at most once. Returns how many ran.
    ///
    /// Time never goes backwards: an earlier `now` than previously seen is
    /// treated as the previous one.
    pub fn run_due(&mut self, now: Duration) -> usize {
        self.now = self.now.max(now);
        let now = self.now;

        let (mut due, waiting): (Vec<Task>, Vec<Task>) = std::mem::take(&mut self.queue)
            .into_iter()
            .filter(|task| !task.cancelled.get())
            .partition(|task| task.deadline <= now);
        self.queue = waiting;

        due.sort_by_key(|task| (task.deadline, task.id));

        let mut ran = 0;
        for mut task in due {
            if task.cancelled.get() {
                continue;
            }

            (task.callback)();
            ran += 1;
            log::trace!("ran task {} at {:?}", task.id, now);

            if let Some(interval) = task.interval {
                if !task.cancelled.get() {
                    task.deadline = now + interval;
                    self.queue.push(task);
                }
            }
        }

        ran
    }

    /// Earliest deadline among live tasks.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue
            .iter()
            .filter(|task| !task.cancelled.get())
            .map(|task| task.deadline)
            .min()
    }

    /// Number of live tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.queue
            .iter()
            .filter(|task| !task.cancelled.get())
            .count()
    }

    pub fn now(&self) -> Duration {
        self.now
    }
}
