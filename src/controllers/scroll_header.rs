//! Auto-hiding page header.
//!
//! The header is always shown inside the hero region (the first viewport
//! height of the page). Below it, any real scroll reveals the header and a
//! quiet period without scrolling hides it again.

use crate::config::HeaderConfig;
use crate::utils::scheduler::{Scheduler, TimerHandle};
use crate::utils::timer_slot::{FrameGate, TimerSlot};

/// Deferred work owned by the header controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderTask {
    /// Quiet period after the last qualifying scroll sample ran out.
    Hide,
    /// Next rendering frame after a burst of scroll events.
    EvaluateScroll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Presentation side of the header.
#[cfg_attr(test, mockall::automock)]
pub trait HeaderView {
    fn set_visibility(&mut self, visibility: Visibility);
}

/// Read-only view of the window scroll state.
pub trait Viewport {
    /// Vertical scroll offset in CSS pixels.
    fn scroll_offset(&self) -> i32;
    /// Current viewport height, which is also the hero region height.
    fn viewport_height(&self) -> i32;
}

#[derive(Debug)]
pub struct ScrollHeader<S, V, H> {
    scheduler: S,
    viewport: V,
    view: H,
    last_scroll_offset: i32,
    visibility: Visibility,
    hide_timer: TimerSlot<HeaderTask>,
    frame: FrameGate<HeaderTask>,
    scroll_threshold_px: u32,
    hide_delay_ms: u32,
}

impl<S: Scheduler<HeaderTask>, V: Viewport, H: HeaderView> ScrollHeader<S, V, H> {
    pub fn new(scheduler: S, viewport: V, mut view: H, config: &HeaderConfig) -> Self {
        view.set_visibility(Visibility::Visible);
        let last_scroll_offset = viewport.scroll_offset();
        Self {
            scheduler,
            viewport,
            view,
            last_scroll_offset,
            visibility: Visibility::Visible,
            hide_timer: TimerSlot::new(HeaderTask::Hide),
            frame: FrameGate::new(HeaderTask::EvaluateScroll),
            scroll_threshold_px: config.scroll_threshold_px,
            hide_delay_ms: config.hide_delay_ms,
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn last_scroll_offset(&self) -> i32 {
        self.last_scroll_offset
    }

    pub fn hide_pending(&self) -> bool {
        self.hide_timer.is_armed()
    }

    pub fn hide_timer(&self) -> Option<TimerHandle> {
        self.hide_timer.handle()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Raw `scroll` event. Bursts collapse into one evaluation per frame.
    pub fn on_scroll_event(&mut self) {
        self.frame.request(&mut self.scheduler);
    }

    /// Evaluates one scroll position sample. Samples closer than the jitter
    /// threshold to the last accepted one are dropped before the hero check.
    pub fn on_scroll_sample(&mut self, current_offset: i32) {
        let delta = (i64::from(current_offset) - i64::from(self.last_scroll_offset)).unsigned_abs();
        if delta < u64::from(self.scroll_threshold_px) {
            return;
        }

        let hero_height = self.viewport.viewport_height();
        self.show();
        if current_offset <= hero_height {
            self.hide_timer.cancel(&mut self.scheduler);
        } else {
            self.hide_timer.rearm(&mut self.scheduler, self.hide_delay_ms);
        }
        self.last_scroll_offset = current_offset;
    }

    pub fn on_timer(&mut self, handle: TimerHandle, task: HeaderTask) {
        match task {
            HeaderTask::EvaluateScroll => {
                if self.frame.fired(&mut self.scheduler, handle) {
                    let offset = self.viewport.scroll_offset();
                    self.on_scroll_sample(offset);
                }
            }
            HeaderTask::Hide => {
                if !self.hide_timer.fired(&mut self.scheduler, handle) {
                    return;
                }
                if self.viewport.scroll_offset() > self.viewport.viewport_height() {
                    self.set_visibility(Visibility::Hidden);
                }
            }
        }
    }

    fn show(&mut self) {
        self.set_visibility(Visibility::Visible);
    }

    fn set_visibility(&mut self, visibility: Visibility) {
        if self.visibility == visibility {
            return;
        }
        log::debug!("header {:?} -> {:?}", self.visibility, visibility);
        self.visibility = visibility;
        self.view.set_visibility(visibility);
    }
}

/// Header controller, or nothing when the page has no header element.
#[derive(Debug)]
pub enum ScrollHeaderController<S, V, H> {
    Active(ScrollHeader<S, V, H>),
    Disabled,
}

impl<S: Scheduler<HeaderTask>, V: Viewport, H: HeaderView> ScrollHeaderController<S, V, H> {
    pub fn new(header: Option<H>, viewport: V, scheduler: S, config: &HeaderConfig) -> Self {
        match header {
            Some(view) => Self::Active(ScrollHeader::new(scheduler, viewport, view, config)),
            None => {
                log::debug!("no header element, auto-hide disabled");
                Self::Disabled
            }
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    pub fn active(&self) -> Option<&ScrollHeader<S, V, H>> {
        match self {
            Self::Active(header) => Some(header),
            Self::Disabled => None,
        }
    }

    pub fn active_mut(&mut self) -> Option<&mut ScrollHeader<S, V, H>> {
        match self {
            Self::Active(header) => Some(header),
            Self::Disabled => None,
        }
    }

    pub fn visibility(&self) -> Option<Visibility> {
        self.active().map(ScrollHeader::visibility)
    }

    pub fn on_scroll_event(&mut self) {
        if let Self::Active(header) = self {
            header.on_scroll_event();
        }
    }

    pub fn on_scroll_sample(&mut self, current_offset: i32) {
        if let Self::Active(header) = self {
            header.on_scroll_sample(current_offset);
        }
    }

    pub fn on_timer(&mut self, handle: TimerHandle, task: HeaderTask) {
        if let Self::Active(header) = self {
            header.on_timer(handle, task);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use mockall::predicate::eq;

    use super::*;
    use crate::utils::scheduler::ManualScheduler;

    const HERO: i32 = 800;

    type Header = ScrollHeader<ManualScheduler<HeaderTask>, StubViewport, MockHeaderView>;

    #[derive(Clone)]
    struct StubViewport {
        offset: Rc<Cell<i32>>,
        height: Rc<Cell<i32>>,
    }

    impl StubViewport {
        fn at(offset: i32) -> Self {
            Self {
                offset: Rc::new(Cell::new(offset)),
                height: Rc::new(Cell::new(HERO)),
            }
        }
    }

    impl Viewport for StubViewport {
        fn scroll_offset(&self) -> i32 {
            self.offset.get()
        }

        fn viewport_height(&self) -> i32 {
            self.height.get()
        }
    }

    fn lenient_view() -> MockHeaderView {
        let mut view = MockHeaderView::new();
        view.expect_set_visibility().returning(|_| ());
        view
    }

    fn header(viewport: StubViewport, view: MockHeaderView) -> Header {
        ScrollHeader::new(ManualScheduler::new(), viewport, view, &HeaderConfig::default())
    }

    fn run_until(header: &mut Header, until_ms: u64) {
        while let Some((handle, task)) = header.scheduler_mut().pop_due(until_ms) {
            header.on_timer(handle, task);
        }
        header.scheduler_mut().set_now(until_ms);
    }

    /// Moves the page and feeds the sample, as a frame callback would.
    fn scroll_to(header: &mut Header, viewport: &StubViewport, offset: i32) {
        viewport.offset.set(offset);
        header.on_scroll_sample(offset);
    }

    #[test]
    fn hero_region_always_shows_header() {
        let viewport = StubViewport::at(0);
        let mut header = header(viewport.clone(), lenient_view());

        scroll_to(&mut header, &viewport, 2_000);
        run_until(&mut header, 1_000);
        assert_eq!(header.visibility(), Visibility::Hidden);

        for offset in [HERO, 400, 0] {
            scroll_to(&mut header, &viewport, offset);
            assert_eq!(header.visibility(), Visibility::Visible);
            assert!(!header.hide_pending());
        }
    }

    #[test]
    fn jitter_check_runs_before_hero_check() {
        let viewport = StubViewport::at(0);
        let mut header = header(viewport.clone(), lenient_view());

        scroll_to(&mut header, &viewport, HERO + 5);
        run_until(&mut header, 300);
        assert_eq!(header.visibility(), Visibility::Hidden);

        // Back inside the hero, but only 7 px away from the last sample.
        scroll_to(&mut header, &viewport, HERO - 2);
        assert_eq!(header.visibility(), Visibility::Hidden);
        assert_eq!(header.last_scroll_offset(), HERO + 5);

        // The next real scroll restores the hero invariant.
        scroll_to(&mut header, &viewport, HERO - 20);
        assert_eq!(header.visibility(), Visibility::Visible);
        assert!(!header.hide_pending());
    }

    #[test]
    fn jitter_below_threshold_changes_nothing() {
        let viewport = StubViewport::at(1_000);
        let mut header = header(viewport.clone(), lenient_view());

        scroll_to(&mut header, &viewport, 1_200);
        let armed = header.hide_timer();
        let due = armed.and_then(|h| header.scheduler().due_at(h));

        scroll_to(&mut header, &viewport, 1_209);

        assert_eq!(header.last_scroll_offset(), 1_200);
        assert_eq!(header.hide_timer(), armed);
        assert_eq!(armed.and_then(|h| header.scheduler().due_at(h)), due);
        assert_eq!(header.visibility(), Visibility::Visible);
    }

    #[test]
    fn hides_once_after_quiet_period() {
        let viewport = StubViewport::at(0);
        let mut view = MockHeaderView::new();
        view.expect_set_visibility()
            .with(eq(Visibility::Visible))
            .returning(|_| ());
        view.expect_set_visibility()
            .with(eq(Visibility::Hidden))
            .times(1)
            .returning(|_| ());
        let mut header = header(viewport.clone(), view);

        scroll_to(&mut header, &viewport, 1_500);
        run_until(&mut header, 299);
        assert_eq!(header.visibility(), Visibility::Visible);

        run_until(&mut header, 300);
        assert_eq!(header.visibility(), Visibility::Hidden);

        run_until(&mut header, 10_000);
        assert_eq!(header.visibility(), Visibility::Hidden);
    }

    #[test]
    fn second_scroll_restarts_the_hide_timer() {
        let viewport = StubViewport::at(0);
        let mut header = header(viewport.clone(), lenient_view());

        scroll_to(&mut header, &viewport, 1_500);
        run_until(&mut header, 200);
        scroll_to(&mut header, &viewport, 1_600);
        assert_eq!(header.scheduler().pending_timers(), 1);

        run_until(&mut header, 499);
        assert_eq!(header.visibility(), Visibility::Visible);
        run_until(&mut header, 500);
        assert_eq!(header.visibility(), Visibility::Hidden);
    }

    #[test]
    fn scrolling_reveals_a_hidden_header() {
        let viewport = StubViewport::at(0);
        let mut header = header(viewport.clone(), lenient_view());

        scroll_to(&mut header, &viewport, 3_000);
        run_until(&mut header, 300);
        assert_eq!(header.visibility(), Visibility::Hidden);

        scroll_to(&mut header, &viewport, 2_900);
        assert_eq!(header.visibility(), Visibility::Visible);
        assert!(header.hide_pending());
    }

    #[test]
    fn hide_is_skipped_when_page_is_back_in_hero_at_fire_time() {
        let viewport = StubViewport::at(0);
        let mut header = header(viewport.clone(), lenient_view());

        scroll_to(&mut header, &viewport, 1_500);
        // Jumped back without a sample being processed.
        viewport.offset.set(100);
        run_until(&mut header, 1_000);

        assert_eq!(header.visibility(), Visibility::Visible);
    }

    #[test]
    fn hero_height_is_resampled() {
        let viewport = StubViewport::at(0);
        let mut header = header(viewport.clone(), lenient_view());

        viewport.height.set(2_000);
        scroll_to(&mut header, &viewport, 1_500);
        assert!(!header.hide_pending());
    }

    #[test]
    fn scroll_bursts_evaluate_once_per_frame() {
        let viewport = StubViewport::at(0);
        let mut header = header(viewport.clone(), lenient_view());

        for offset in [900, 1_000, 1_100] {
            viewport.offset.set(offset);
            header.on_scroll_event();
        }
        assert_eq!(header.scheduler().pending_frames(), 1);
        assert_eq!(header.last_scroll_offset(), 0);

        let (handle, task) = header.scheduler_mut().pop_frame().expect("frame pending");
        header.on_timer(handle, task);

        assert_eq!(header.last_scroll_offset(), 1_100);
        assert!(header.hide_pending());
        header.on_scroll_event();
        assert_eq!(header.scheduler().pending_frames(), 1);
    }

    #[test]
    fn missing_header_disables_controller() {
        let mut controller: ScrollHeaderController<ManualScheduler<HeaderTask>, _, MockHeaderView> =
            ScrollHeaderController::new(
                None,
                StubViewport::at(0),
                ManualScheduler::new(),
                &HeaderConfig::default(),
            );

        controller.on_scroll_event();
        controller.on_scroll_sample(5_000);

        assert!(!controller.is_active());
        assert_eq!(controller.visibility(), None);
    }
}
