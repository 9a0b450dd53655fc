//! Screen reader announcements through a polite, atomic live region.
//!
//! Screen readers only speak a live region when its content changes, so every
//! message is cleared shortly after it is written. Repeating the same message
//! later is then announced again.
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::timer::{CancellableTimer, Scheduler};

/// The assistive-technology-visible text sink.
pub trait LiveRegion {
    fn set_text(&self, text: &str);
    fn text(&self) -> String;
}

/// What happens to an earlier pending clear when a new message arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClearPolicy {
    /// Cancel the earlier clear; the newest message always stays up for the full delay.
    #[default]
    CancelPending,
    /// Every clear fires at its own time and may cut a newer message short.
    Overlap,
}

pub struct Announcer<R: LiveRegion + 'static, S: Scheduler> {
    region: Rc<R>,
    timer: CancellableTimer<S>,
    clear_after: Duration,
    policy: ClearPolicy,
}

impl<R: LiveRegion + 'static, S: Scheduler> Announcer<R, S> {
    pub fn new(region: Rc<R>, scheduler: S, clear_after: Duration, policy: ClearPolicy) -> Self {
        Self {
            region,
            timer: CancellableTimer::new(scheduler),
            clear_after,
            policy,
        }
    }

    pub fn announce(&mut self, message: &str) {
        log::debug!("announce: {message}");
        self.region.set_text(message);
        let region = Rc::clone(&self.region);
        let clear = Box::new(move || region.set_text(""));
        match self.policy {
            ClearPolicy::CancelPending => self.timer.schedule(self.clear_after, clear),
            ClearPolicy::Overlap => self.timer.schedule_detached(self.clear_after, clear),
        }
    }

    #[must_use]
    pub fn region(&self) -> &R {
        &self.region
    }

    #[must_use]
    pub const fn policy(&self) -> ClearPolicy {
        self.policy
    }
}

/// Region that remembers every non-empty message it was given.
#[derive(Debug, Default)]
pub struct RecordingRegion {
    text: RefCell<String>,
    history: RefCell<Vec<String>>,
}

impl RecordingRegion {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }

    #[must_use]
    pub fn last_message(&self) -> Option<String> {
        self.history.borrow().last().cloned()
    }
}

impl LiveRegion for RecordingRegion {
    fn set_text(&self, text: &str) {
        if !text.is_empty() {
            self.history.borrow_mut().push(text.to_string());
        }
        text.clone_into(&mut self.text.borrow_mut());
    }

    fn text(&self) -> String {
        self.text.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualScheduler;

    fn announcer(
        policy: ClearPolicy,
    ) -> (Announcer<RecordingRegion, ManualScheduler>, ManualScheduler) {
        let scheduler = ManualScheduler::new();
        let announcer = Announcer::new(
            Rc::new(RecordingRegion::new()),
            scheduler.clone(),
            Duration::from_millis(100),
            policy,
        );
        (announcer, scheduler)
    }

    #[test]
    fn message_is_visible_then_cleared() {
        let (mut announcer, scheduler) = announcer(ClearPolicy::CancelPending);
        announcer.announce("Saved");
        assert_eq!(announcer.region().text(), "Saved");
        scheduler.advance_ms(99);
        assert_eq!(announcer.region().text(), "Saved");
        scheduler.advance_ms(1);
        assert_eq!(announcer.region().text(), "");
    }

    #[test]
    fn repeated_message_is_written_again() {
        let (mut announcer, scheduler) = announcer(ClearPolicy::CancelPending);
        announcer.announce("Large text mode enabled");
        scheduler.advance_ms(150);
        announcer.announce("Large text mode enabled");
        assert_eq!(announcer.region().history().len(), 2);
        assert_eq!(announcer.region().text(), "Large text mode enabled");
    }

    #[test]
    fn cancel_pending_keeps_newer_message_for_full_delay() {
        let (mut announcer, scheduler) = announcer(ClearPolicy::CancelPending);
        announcer.announce("first");
        scheduler.advance_ms(60);
        announcer.announce("second");
        scheduler.advance_ms(60);
        assert_eq!(announcer.region().text(), "second");
        scheduler.advance_ms(40);
        assert_eq!(announcer.region().text(), "");
    }

    #[test]
    fn overlap_policy_lets_stale_clear_cut_newer_message() {
        let (mut announcer, scheduler) = announcer(ClearPolicy::Overlap);
        announcer.announce("first");
        scheduler.advance_ms(60);
        announcer.announce("second");
        scheduler.advance_ms(40);
        assert_eq!(announcer.region().text(), "");
        assert_eq!(announcer.policy(), ClearPolicy::Overlap);
    }
}
