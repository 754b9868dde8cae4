use super::scheduler::{Scheduler, TimerHandle};

/// Holds at most one outstanding timer for a single purpose.
#[derive(Debug)]
pub struct TimerSlot<T> {
    task: T,
    armed: Option<TimerHandle>,
}

impl<T: Copy> TimerSlot<T> {
    pub fn new(task: T) -> Self {
        Self { task, armed: None }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn handle(&self) -> Option<TimerHandle> {
        self.armed
    }

    /// Cancels whatever is pending, then schedules a fresh timer.
    pub fn rearm<S: Scheduler<T>>(&mut self, scheduler: &mut S, delay_ms: u32) {
        self.cancel(scheduler);
        self.armed = Some(scheduler.schedule_once(delay_ms, self.task));
    }

    pub fn cancel<S: Scheduler<T>>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.armed.take() {
            scheduler.cancel(handle);
        }
    }

    /// Accepts a fired callback. Returns `false` for stale handles, which the
    /// caller must ignore.
    pub fn fired<S: Scheduler<T>>(&mut self, scheduler: &mut S, handle: TimerHandle) -> bool {
        if self.armed != Some(handle) {
            return false;
        }
        self.armed = None;
        // Lets the host release its bookkeeping for the spent timer.
        scheduler.cancel(handle);
        true
    }
}

/// In-flight guard around next-frame scheduling: at most one frame callback
/// is pending, no matter how many requests arrive before it runs.
#[derive(Debug)]
pub struct FrameGate<T> {
    task: T,
    in_flight: Option<TimerHandle>,
}

impl<T: Copy> FrameGate<T> {
    pub fn new(task: T) -> Self {
        Self {
            task,
            in_flight: None,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns `true` when a new frame callback was scheduled.
    pub fn request<S: Scheduler<T>>(&mut self, scheduler: &mut S) -> bool {
        if self.in_flight.is_some() {
            return false;
        }
        self.in_flight = Some(scheduler.schedule_next_frame(self.task));
        true
    }

    pub fn fired<S: Scheduler<T>>(&mut self, scheduler: &mut S, handle: TimerHandle) -> bool {
        if self.in_flight != Some(handle) {
            return false;
        }
        self.in_flight = None;
        scheduler.cancel(handle);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::scheduler::ManualScheduler;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Task {
        Hide,
        Tick,
        Evaluate,
    }

    #[test]
    fn rearm_leaves_a_single_timer() {
        let mut scheduler: ManualScheduler<Task> = ManualScheduler::new();
        let mut slot = TimerSlot::new(Task::Hide);

        slot.rearm(&mut scheduler, 300);
        let first = slot.handle();
        slot.rearm(&mut scheduler, 300);

        assert_eq!(scheduler.pending_timers(), 1);
        assert_ne!(slot.handle(), first);
    }

    #[test]
    fn stale_handle_is_rejected() {
        let mut scheduler: ManualScheduler<Task> = ManualScheduler::new();
        let mut slot = TimerSlot::new(Task::Tick);

        slot.rearm(&mut scheduler, 10);
        let Some(old) = slot.handle() else {
            panic!("slot should be armed");
        };
        slot.rearm(&mut scheduler, 10);

        assert!(!slot.fired(&mut scheduler, old));
        assert!(slot.is_armed());
    }

    #[test]
    fn frame_gate_coalesces_requests() {
        let mut scheduler: ManualScheduler<Task> = ManualScheduler::new();
        let mut gate = FrameGate::new(Task::Evaluate);

        assert!(gate.request(&mut scheduler));
        assert!(!gate.request(&mut scheduler));
        assert!(!gate.request(&mut scheduler));
        assert_eq!(scheduler.pending_frames(), 1);

        let (handle, _) = scheduler.pop_frame().expect("one frame pending");
        assert!(gate.fired(&mut scheduler, handle));
        assert!(!gate.is_in_flight());
        assert!(gate.request(&mut scheduler));
    }
}
