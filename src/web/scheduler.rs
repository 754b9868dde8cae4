use std::collections::HashMap;
use std::rc::Rc;

use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Timeout;

use crate::utils::scheduler::{Scheduler, TimerHandle};

/// `setTimeout` / `requestAnimationFrame` backed scheduler.
///
/// Fired callbacks are routed through `dispatch`, which hands them back to
/// the controller owning this scheduler. Dropping a gloo handle cancels it,
/// so removing it from the maps is the cancellation.
pub struct BrowserScheduler<T> {
    next_id: u64,
    timeouts: HashMap<TimerHandle, Timeout>,
    frames: HashMap<TimerHandle, AnimationFrame>,
    dispatch: Rc<dyn Fn(TimerHandle, T)>,
}

impl<T> BrowserScheduler<T> {
    pub fn new(dispatch: impl Fn(TimerHandle, T) + 'static) -> Self {
        Self {
            next_id: 0,
            timeouts: HashMap::new(),
            frames: HashMap::new(),
            dispatch: Rc::new(dispatch),
        }
    }

    fn next_handle(&mut self) -> TimerHandle {
        self.next_id += 1;
        TimerHandle(self.next_id)
    }
}

impl<T> std::fmt::Debug for BrowserScheduler<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserScheduler")
            .field("timeouts", &self.timeouts.len())
            .field("frames", &self.frames.len())
            .finish()
    }
}

impl<T: Copy + 'static> Scheduler<T> for BrowserScheduler<T> {
    fn schedule_once(&mut self, delay_ms: u32, task: T) -> TimerHandle {
        let handle = self.next_handle();
        let dispatch = Rc::clone(&self.dispatch);
        let timeout = Timeout::new(delay_ms, move || dispatch(handle, task));
        self.timeouts.insert(handle, timeout);
        handle
    }

    fn schedule_next_frame(&mut self, task: T) -> TimerHandle {
        let handle = self.next_handle();
        let dispatch = Rc::clone(&self.dispatch);
        let frame = request_animation_frame(move |_timestamp| dispatch(handle, task));
        self.frames.insert(handle, frame);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timeouts.remove(&handle);
        self.frames.remove(&handle);
    }
}
