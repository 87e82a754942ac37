#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    Running,
    Completed,
}

/// A resumable unit of per-step work. Progress lives in the implementor's own
/// fields; `resume` does one step's worth and returns.
pub trait Action<C> {
    fn resume(&mut self, ctx: &mut C) -> ActionStatus;

    fn label(&self) -> &'static str {
        "action"
    }
}

/// Cooperative, single-threaded scheduler: at most one primary action plus any
/// number of ancillary ones. Completed actions are evicted in the same call
/// that observed completion, so nothing is resumed after it finished.
pub struct ActionScheduler<C> {
    primary: Option<Box<dyn Action<C>>>,
    ancillary: Vec<Box<dyn Action<C>>>,
}

impl<C> Default for ActionScheduler<C> {
    fn default() -> Self {
        Self {
            primary: None,
            ancillary: Vec::new(),
        }
    }
}

impl<C> ActionScheduler<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `action` as the primary. Any previous primary is dropped
    /// without further resumption. Returns whether one was replaced.
    pub fn set_primary(&mut self, action: Box<dyn Action<C>>) -> bool {
        self.primary.replace(action).is_some()
    }

    pub fn cancel_primary(&mut self) -> bool {
        self.primary.take().is_some()
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    pub fn primary_label(&self) -> Option<&'static str> {
        self.primary.as_ref().map(|action| action.label())
    }

    /// Resumes the primary once. With no primary this reports `Completed`.
    pub fn resume_primary(&mut self, ctx: &mut C) -> ActionStatus {
        let Some(action) = self.primary.as_mut() else {
            return ActionStatus::Completed;
        };
        let status = action.resume(ctx);
        if status == ActionStatus::Completed {
            self.primary = None;
        }
        status
    }

    pub fn spawn_ancillary(&mut self, action: Box<dyn Action<C>>) {
        self.ancillary.push(action);
    }

    /// Resumes every live ancillary action exactly once and drops the ones
    /// that completed. Returns how many were dropped.
    pub fn resume_ancillary(&mut self, ctx: &mut C) -> usize {
        let before = self.ancillary.len();
        self.ancillary
            .retain_mut(|action| action.resume(ctx) == ActionStatus::Running);
        before - self.ancillary.len()
    }

    pub fn ancillary_len(&self) -> usize {
        self.ancillary.len()
    }

    pub fn clear(&mut self) {
        self.primary = None;
        self.ancillary.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Log {
        resumed: Vec<&'static str>,
    }

    struct Countdown {
        name: &'static str,
        remaining: u32,
    }

    impl Action<Log> for Countdown {
        fn resume(&mut self, ctx: &mut Log) -> ActionStatus {
            ctx.resumed.push(self.name);
            if self.remaining == 0 {
                return ActionStatus::Completed;
            }
            self.remaining -= 1;
            ActionStatus::Running
        }

        fn label(&self) -> &'static str {
            self.name
        }
    }

    fn countdown(name: &'static str, remaining: u32) -> Box<dyn Action<Log>> {
        Box::new(Countdown { name, remaining })
    }

    #[test]
    fn missing_primary_reports_completed() {
        let mut scheduler = ActionScheduler::<Log>::new();
        let mut log = Log::default();
        assert_eq!(scheduler.resume_primary(&mut log), ActionStatus::Completed);
        assert!(log.resumed.is_empty());
    }

    #[test]
    fn completed_primary_is_evicted() {
        let mut scheduler = ActionScheduler::new();
        let mut log = Log::default();
        assert!(!scheduler.set_primary(countdown("walk", 1)));
        assert_eq!(scheduler.resume_primary(&mut log), ActionStatus::Running);
        assert_eq!(scheduler.resume_primary(&mut log), ActionStatus::Completed);
        assert!(!scheduler.has_primary());
        assert_eq!(scheduler.resume_primary(&mut log), ActionStatus::Completed);
        assert_eq!(log.resumed, vec!["walk", "walk"]);
    }

    #[test]
    fn replacing_primary_drops_previous_without_resuming_it() {
        let mut scheduler = ActionScheduler::new();
        let mut log = Log::default();
        scheduler.set_primary(countdown("first", 10));
        scheduler.resume_primary(&mut log);
        assert!(scheduler.set_primary(countdown("second", 10)));
        assert_eq!(scheduler.primary_label(), Some("second"));
        scheduler.resume_primary(&mut log);
        assert_eq!(log.resumed, vec!["first", "second"]);
    }

    #[test]
    fn ancillary_resumed_once_each_and_completed_removed_same_pass() {
        let mut scheduler = ActionScheduler::new();
        let mut log = Log::default();
        scheduler.spawn_ancillary(countdown("a", 0));
        scheduler.spawn_ancillary(countdown("b", 2));
        scheduler.spawn_ancillary(countdown("c", 0));
        scheduler.spawn_ancillary(countdown("d", 1));

        assert_eq!(scheduler.resume_ancillary(&mut log), 2);
        assert_eq!(log.resumed, vec!["a", "b", "c", "d"]);
        assert_eq!(scheduler.ancillary_len(), 2);

        log.resumed.clear();
        assert_eq!(scheduler.resume_ancillary(&mut log), 1);
        assert_eq!(log.resumed, vec!["b", "d"]);
        assert_eq!(scheduler.ancillary_len(), 1);
    }

    #[test]
    fn cancel_and_clear_drop_actions() {
        let mut scheduler = ActionScheduler::new();
        scheduler.set_primary(countdown("walk", 3));
        scheduler.spawn_ancillary(countdown("fx", 3));
        assert!(scheduler.cancel_primary());
        assert!(!scheduler.cancel_primary());
        scheduler.clear();
        assert_eq!(scheduler.ancillary_len(), 0);
    }
}
