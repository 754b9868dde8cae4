/// Opaque id of a scheduled timer or frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

/// Timer collaborator used by the controllers.
///
/// `T` is the owning controller's own task type; the host hands it back
/// together with the handle when the callback fires. Implementations never
/// invoke the controller synchronously from inside `schedule_*`.
pub trait Scheduler<T> {
    /// Run `task` once after `delay_ms` milliseconds.
    fn schedule_once(&mut self, delay_ms: u32, task: T) -> TimerHandle;

    /// Run `task` before the next repaint.
    fn schedule_next_frame(&mut self, task: T) -> TimerHandle;

    /// Drop a pending callback. Unknown or already fired handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Debug, Clone, Copy)]
struct Pending<T> {
    handle: TimerHandle,
    due_ms: u64,
    task: T,
}

/// Virtual-time scheduler.
///
/// Nothing fires by itself: the host pulls due callbacks with
/// [`ManualScheduler::pop_due`] and [`ManualScheduler::pop_frame`] and feeds
/// them back to the controller that owns this scheduler.
#[derive(Debug)]
pub struct ManualScheduler<T> {
    now_ms: u64,
    next_id: u64,
    timers: Vec<Pending<T>>,
    frames: Vec<(TimerHandle, T)>,
}

impl<T> Default for ManualScheduler<T> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            timers: Vec::new(),
            frames: Vec::new(),
        }
    }
}

impl<T> ManualScheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Moves the clock forward without firing anything. Time never goes back.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Number of timers still waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Number of frame callbacks waiting for the next repaint.
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Due time of a pending timer, if it is still scheduled.
    pub fn due_at(&self, handle: TimerHandle) -> Option<u64> {
        self.timers
            .iter()
            .find(|p| p.handle == handle)
            .map(|p| p.due_ms)
    }

    /// Removes and returns the earliest timer due at or before `until_ms`,
    /// advancing the clock to its due time. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TimerHandle, T)> {
        let position = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due_ms <= until_ms)
            .min_by_key(|(_, p)| (p.due_ms, p.handle))
            .map(|(i, _)| i)?;
        let pending = self.timers.remove(position);
        self.set_now(pending.due_ms);
        Some((pending.handle, pending.task))
    }

    /// Removes and returns the oldest pending frame callback.
    pub fn pop_frame(&mut self) -> Option<(TimerHandle, T)> {
        if self.frames.is_empty() {
            None
        } else {
            Some(self.frames.remove(0))
        }
    }

    fn next_handle(&mut self) -> TimerHandle {
        self.next_id += 1;
        TimerHandle(self.next_id)
    }
}

impl<T> Scheduler<T> for ManualScheduler<T> {
    fn schedule_once(&mut self, delay_ms: u32, task: T) -> TimerHandle {
        let handle = self.next_handle();
        self.timers.push(Pending {
            handle,
            due_ms: self.now_ms + u64::from(delay_ms),
            task,
        });
        handle
    }

    fn schedule_next_frame(&mut self, task: T) -> TimerHandle {
        let handle = self.next_handle();
        self.frames.push((handle, task));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|p| p.handle != handle);
        self.frames.retain(|(h, _)| *h != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Task {
        HideHeader,
        EvaluateScroll,
        AutoplayTick,
    }

    #[test]
    fn timers_fire_in_due_order() {
        let mut scheduler: ManualScheduler<Task> = ManualScheduler::new();
        let late = scheduler.schedule_once(500, Task::AutoplayTick);
        let early = scheduler.schedule_once(100, Task::HideHeader);

        assert_eq!(scheduler.pop_due(1_000), Some((early, Task::HideHeader)));
        assert_eq!(scheduler.now_ms(), 100);
        assert_eq!(scheduler.pop_due(1_000), Some((late, Task::AutoplayTick)));
        assert_eq!(scheduler.now_ms(), 500);
        assert_eq!(scheduler.pop_due(1_000), None);
    }

    #[test]
    fn nothing_fires_before_due_time() {
        let mut scheduler: ManualScheduler<Task> = ManualScheduler::new();
        scheduler.schedule_once(300, Task::HideHeader);

        assert_eq!(scheduler.pop_due(299), None);
        assert_eq!(scheduler.pending_timers(), 1);
    }

    #[test]
    fn cancelled_callbacks_never_fire() {
        let mut scheduler: ManualScheduler<Task> = ManualScheduler::new();
        let timer = scheduler.schedule_once(10, Task::HideHeader);
        let frame = scheduler.schedule_next_frame(Task::EvaluateScroll);

        scheduler.cancel(timer);
        scheduler.cancel(frame);

        assert_eq!(scheduler.pop_due(u64::MAX), None);
        assert_eq!(scheduler.pop_frame(), None);
    }

    #[test]
    fn delays_are_relative_to_virtual_now() {
        let mut scheduler: ManualScheduler<Task> = ManualScheduler::new();
        scheduler.set_now(4_100);
        let handle = scheduler.schedule_once(4_000, Task::AutoplayTick);

        assert_eq!(scheduler.due_at(handle), Some(8_100));
    }
}
