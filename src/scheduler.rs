use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Identifies a scheduled callback so it can be cancelled before it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

/// One-shot timer facility. Everything runs on a single thread, so tasks are
/// neither `Send` nor `Sync`.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskId;
    fn cancel(&self, id: TaskId);
}

struct Pending {
    due: Duration,
    id: TaskId,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Clock {
    now: Duration,
    next_id: u64,
    queue: Vec<Pending>,
}

/// Deterministic scheduler driven by a virtual clock.
///
/// Time only moves when [`VirtualScheduler::advance`] or
/// [`VirtualScheduler::run_next`] is called. Clones share the same clock.
#[derive(Clone, Default)]
pub struct VirtualScheduler {
    clock: Rc<RefCell<Clock>>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.clock.borrow().queue.len()
    }

    /// Due time of the earliest pending task.
    pub fn next_due(&self) -> Option<Duration> {
        self.clock.borrow().queue.iter().map(|p| p.due).min()
    }

    /// Jumps to the earliest pending task and runs it. Returns false when
    /// nothing is scheduled.
    pub fn run_next(&self) -> bool {
        let pending = {
            let mut clock = self.clock.borrow_mut();
            let Some(pos) = Self::earliest(&clock.queue) else {
                return false;
            };
            let pending = clock.queue.remove(pos);
            clock.now = clock.now.max(pending.due);
            pending
        };
        // the borrow is released so the task can schedule follow-ups
        (pending.task)();
        true
    }

    /// Moves the clock forward, running every task that falls due inside the
    /// window, including ones scheduled by tasks run along the way.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        while let Some(due) = self.next_due() {
            if due > target {
                break;
            }
            self.run_next();
        }
        self.clock.borrow_mut().now = target;
    }

    fn earliest(queue: &[Pending]) -> Option<usize> {
        queue
            .iter()
            .enumerate()
            .min_by_key(|(_, p)| (p.due, p.id))
            .map(|(i, _)| i)
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskId {
        let mut clock = self.clock.borrow_mut();
        let id = TaskId(clock.next_id);
        clock.next_id += 1;
        let due = clock.now + delay;
        clock.queue.push(Pending { due, id, task });
        id
    }

    fn cancel(&self, id: TaskId) {
        self.clock.borrow_mut().queue.retain(|p| p.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (
        Rc<RefCell<Vec<&'static str>>>,
        impl Fn(&'static str) -> Box<dyn FnOnce()>,
    ) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = log.clone();
        let make = move |name: &'static str| {
            let log = log_clone.clone();
            Box::new(move || log.borrow_mut().push(name)) as Box<dyn FnOnce()>
        };
        (log, make)
    }

    #[test]
    fn test_runs_in_due_order() {
        let sched = VirtualScheduler::new();
        let (log, make) = recorder();
        sched.schedule(Duration::from_millis(30), make("c"));
        sched.schedule(Duration::from_millis(10), make("a"));
        sched.schedule(Duration::from_millis(20), make("b"));

        sched.advance(Duration::from_millis(25));
        assert_eq!(*log.borrow(), vec!["a", "b"]);
        assert_eq!(sched.now(), Duration::from_millis(25));
        assert_eq!(sched.pending(), 1);

        sched.advance(Duration::from_millis(5));
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_ties_keep_scheduling_order() {
        let sched = VirtualScheduler::new();
        let (log, make) = recorder();
        sched.schedule(Duration::ZERO, make("first"));
        sched.schedule(Duration::ZERO, make("second"));
        assert!(sched.run_next());
        assert!(sched.run_next());
        assert!(!sched.run_next());
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_cancelled_task_never_runs() {
        let sched = VirtualScheduler::new();
        let (log, make) = recorder();
        let id = sched.schedule(Duration::from_millis(5), make("gone"));
        sched.schedule(Duration::from_millis(6), make("kept"));
        sched.cancel(id);
        sched.advance(Duration::from_secs(1));
        assert_eq!(*log.borrow(), vec!["kept"]);
    }

    #[test]
    fn test_tasks_can_schedule_followups() {
        let sched = VirtualScheduler::new();
        let hits = Rc::new(RefCell::new(0));
        let inner_sched = sched.clone();
        let inner_hits = hits.clone();
        sched.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                *inner_hits.borrow_mut() += 1;
                let hits = inner_hits.clone();
                inner_sched.schedule(
                    Duration::from_millis(10),
                    Box::new(move || *hits.borrow_mut() += 1),
                );
            }),
        );
        sched.advance(Duration::from_millis(20));
        assert_eq!(*hits.borrow(), 2);
        assert_eq!(sched.pending(), 0);
    }
}
