//! Cancellable timers and debouncing over an abstract scheduler.
//!
//! Everything here runs on a single event thread, so scheduled tasks are plain
//! `FnOnce` boxes without `Send` bounds.
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

/// Deferred work queued by a [`Scheduler`].
pub type Task = Box<dyn FnOnce()>;

/// Source of delayed callbacks (`setTimeout` in the browser, a virtual clock in tests).
pub trait Scheduler {
    type Handle;

    /// Run `task` once after `delay`.
    fn schedule(&self, delay: Duration, task: Task) -> Self::Handle;

    /// Prevent a scheduled task from running. Cancelling a task that already
    /// ran is a no-op.
    fn cancel(&self, handle: Self::Handle);

    /// Give up ownership of a handle while letting the task run.
    fn detach(&self, handle: Self::Handle) {
        let _ = handle;
    }

    /// Run `task` once after `delay` with no handle to cancel it. Whatever the
    /// task holds is released once it has run.
    fn schedule_detached(&self, delay: Duration, task: Task) {
        let handle = self.schedule(delay, task);
        self.detach(handle);
    }
}

/// A timer slot holding at most one pending task.
pub struct CancellableTimer<S: Scheduler> {
    scheduler: S,
    pending: Option<S::Handle>,
}

impl<S: Scheduler> CancellableTimer<S> {
    pub const fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
        }
    }

    /// Cancel whatever is pending, then schedule `task`.
    pub fn schedule(&mut self, delay: Duration, task: Task) {
        self.cancel();
        self.pending = Some(self.scheduler.schedule(delay, task));
    }

    /// Schedule `task` without touching the pending slot; it cannot be cancelled.
    pub fn schedule_detached(&mut self, delay: Duration, task: Task) {
        self.scheduler.schedule_detached(delay, task);
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}

/// Coalesces bursts of triggers into one call of `action`, `delay` after the last trigger.
pub struct Debouncer<S: Scheduler> {
    timer: CancellableTimer<S>,
    delay: Duration,
    action: Rc<dyn Fn()>,
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new(scheduler: S, delay: Duration, action: impl Fn() + 'static) -> Self {
        Self {
            timer: CancellableTimer::new(scheduler),
            delay,
            action: Rc::new(action),
        }
    }

    pub fn trigger(&mut self) {
        let action = Rc::clone(&self.action);
        self.timer.schedule(self.delay, Box::new(move || action()));
    }

    pub fn cancel(&mut self) {
        self.timer.cancel();
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Default)]
struct ManualClock {
    now: Duration,
    next_id: u64,
    tasks: BTreeMap<(Duration, u64), Task>,
}

/// Virtual-time scheduler. Time only moves when [`ManualScheduler::advance`] is called.
///
/// Clones share the same clock.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<ManualClock>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    /// Number of tasks still waiting to run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.clock.borrow().tasks.len()
    }

    /// Move the clock forward, running every task that falls due in order.
    /// Tasks scheduled by running tasks are honoured if they fall inside the window.
    pub fn advance(&self, by: Duration) {
        let target = self.clock.borrow().now + by;
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                let due = clock
                    .tasks
                    .keys()
                    .next()
                    .copied()
                    .filter(|(at, _)| *at <= target);
                due.and_then(|key| {
                    clock.now = key.0;
                    clock.tasks.remove(&key)
                })
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
        self.clock.borrow_mut().now = target;
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Scheduler for ManualScheduler {
    type Handle = TimerId;

    fn schedule(&self, delay: Duration, task: Task) -> TimerId {
        let mut clock = self.clock.borrow_mut();
        let id = clock.next_id;
        clock.next_id += 1;
        let due = clock.now + delay;
        clock.tasks.insert((due, id), task);
        TimerId(id)
    }

    fn cancel(&self, handle: TimerId) {
        self.clock
            .borrow_mut()
            .tasks
            .retain(|(_, id), _| *id != handle.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, impl Fn() + 'static) {
        let count = Rc::new(Cell::new(0));
        let inner = Rc::clone(&count);
        (count, move || inner.set(inner.get() + 1))
    }

    #[test]
    fn manual_scheduler_runs_tasks_in_due_order() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for (delay, label) in [(30, "c"), (10, "a"), (20, "b")] {
            let log = Rc::clone(&log);
            scheduler.schedule(
                Duration::from_millis(delay),
                Box::new(move || log.borrow_mut().push(label)),
            );
        }
        scheduler.advance_ms(25);
        assert_eq!(*log.borrow(), vec!["a", "b"]);
        assert_eq!(scheduler.pending(), 1);
        scheduler.advance_ms(5);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(scheduler.now(), Duration::from_millis(30));
    }

    #[test]
    fn cancelled_task_never_runs() {
        let scheduler = ManualScheduler::new();
        let (count, bump) = counter();
        let id = scheduler.schedule(Duration::from_millis(5), Box::new(bump));
        scheduler.cancel(id);
        scheduler.advance_ms(10);
        assert_eq!(count.get(), 0);
        scheduler.cancel(id);
    }

    #[test]
    fn cancellable_timer_keeps_only_latest_task() {
        let scheduler = ManualScheduler::new();
        let mut timer = CancellableTimer::new(scheduler.clone());
        let (count, bump) = counter();
        let bump = Rc::new(bump);
        for _ in 0..3 {
            let bump = Rc::clone(&bump);
            timer.schedule(Duration::from_millis(50), Box::new(move || bump()));
        }
        assert_eq!(scheduler.pending(), 1);
        scheduler.advance_ms(50);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn detached_tasks_survive_rescheduling() {
        let scheduler = ManualScheduler::new();
        let mut timer = CancellableTimer::new(scheduler.clone());
        let (count, bump) = counter();
        let bump = Rc::new(bump);
        for _ in 0..3 {
            let bump = Rc::clone(&bump);
            timer.schedule_detached(Duration::from_millis(50), Box::new(move || bump()));
        }
        timer.cancel();
        scheduler.advance_ms(50);
        assert_eq!(count.get(), 3);
        assert_eq!(Rc::strong_count(&bump), 1, "ran tasks must release captures");
    }

    #[test]
    fn debouncer_fires_once_after_last_trigger() {
        let scheduler = ManualScheduler::new();
        let (count, bump) = counter();
        let mut debouncer = Debouncer::new(scheduler.clone(), Duration::from_millis(250), bump);

        for _ in 0..10 {
            debouncer.trigger();
            scheduler.advance_ms(90);
        }
        // last trigger at t=810, so nothing may have fired yet
        assert_eq!(count.get(), 0);
        scheduler.advance_ms(159);
        assert_eq!(count.get(), 0);
        scheduler.advance_ms(1);
        assert_eq!(count.get(), 1);
        scheduler.advance_ms(1_000);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn debouncer_cancel_drops_pending_action() {
        let scheduler = ManualScheduler::new();
        let (count, bump) = counter();
        let mut debouncer = Debouncer::new(scheduler.clone(), Duration::from_millis(250), bump);
        debouncer.trigger();
        debouncer.cancel();
        scheduler.advance_ms(500);
        assert_eq!(count.get(), 0);
        assert_eq!(debouncer.delay(), Duration::from_millis(250));
    }
}
