//! Auto-playing image gallery.
//!
//! Exactly one slide is active at a time. Autoplay advances one slide per
//! `autoplay_delay_ms`; any manual navigation restarts that cadence, and the
//! pointer hovering the gallery pauses it.

use crate::config::GalleryConfig;
use crate::utils::scheduler::{Scheduler, TimerHandle};
use crate::utils::timer_slot::TimerSlot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub image: String,
}

impl Slide {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
        }
    }
}

/// The only deferred work of the gallery: advance one slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AutoplayTick;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Playing,
    Paused,
}

/// Keyboard navigation keys understood by the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Advance,
    Retreat,
}

impl NavKey {
    /// Maps a `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" => Some(Self::Advance),
            "ArrowLeft" => Some(Self::Retreat),
            _ => None,
        }
    }
}

/// Presentation side of the gallery.
#[cfg_attr(test, mockall::automock)]
pub trait CarouselView {
    /// Shifts the slide track by `percent` of its own width.
    fn set_track_offset(&mut self, percent: i64);
    /// Hides or exposes a slide's image to assistive technology.
    fn set_slide_hidden(&mut self, index: usize, hidden: bool);
}

#[derive(Debug)]
pub struct Carousel<S, V> {
    scheduler: S,
    view: V,
    slides: Vec<Slide>,
    active_index: usize,
    playback: Playback,
    autoplay: TimerSlot<AutoplayTick>,
    autoplay_delay_ms: u32,
    swipe_origin: Option<i32>,
    swipe_threshold_px: u32,
}

impl<S: Scheduler<AutoplayTick>, V: CarouselView> Carousel<S, V> {
    /// Returns `None` for an empty slide set.
    pub fn new(scheduler: S, view: V, slides: Vec<Slide>, config: &GalleryConfig) -> Option<Self> {
        if slides.is_empty() {
            return None;
        }
        let mut carousel = Self {
            scheduler,
            view,
            slides,
            active_index: 0,
            playback: Playback::Playing,
            autoplay: TimerSlot::new(AutoplayTick),
            autoplay_delay_ms: config.autoplay_delay_ms,
            swipe_origin: None,
            swipe_threshold_px: config.swipe_threshold_px,
        };
        carousel.render();
        carousel.restart_autoplay();
        Some(carousel)
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_slide(&self) -> &Slide {
        &self.slides[self.active_index]
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    pub fn autoplay_timer(&self) -> Option<TimerHandle> {
        self.autoplay.handle()
    }

    pub fn swipe_origin(&self) -> Option<i32> {
        self.swipe_origin
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn next(&mut self) {
        self.step(1);
    }

    pub fn previous(&mut self) {
        self.step(-1);
    }

    pub fn on_key(&mut self, key: &str) {
        match NavKey::from_key(key) {
            Some(NavKey::Advance) => self.next(),
            Some(NavKey::Retreat) => self.previous(),
            None => {}
        }
    }

    pub fn on_pointer_enter(&mut self) {
        if self.playback == Playback::Paused {
            return;
        }
        log::debug!("gallery paused at slide {}", self.active_index);
        self.playback = Playback::Paused;
        self.autoplay.cancel(&mut self.scheduler);
    }

    pub fn on_pointer_leave(&mut self) {
        if self.playback == Playback::Playing {
            return;
        }
        log::debug!("gallery resumed at slide {}", self.active_index);
        self.playback = Playback::Playing;
        self.restart_autoplay();
    }

    pub fn on_gesture_start(&mut self, x: i32) {
        self.swipe_origin = Some(x);
    }

    /// Right-to-left swipes advance, left-to-right swipes go back.
    pub fn on_gesture_end(&mut self, x: i32) {
        let Some(origin) = self.swipe_origin.take() else {
            return;
        };
        let diff = i64::from(origin) - i64::from(x);
        if diff.unsigned_abs() <= u64::from(self.swipe_threshold_px) {
            return;
        }
        if diff > 0 {
            self.next();
        } else {
            self.previous();
        }
    }

    pub fn on_timer(&mut self, handle: TimerHandle, _: AutoplayTick) {
        if !self.autoplay.fired(&mut self.scheduler, handle) {
            return;
        }
        if self.playback == Playback::Playing {
            self.next();
        }
    }

    fn step(&mut self, delta: isize) {
        let len = self.slides.len() as isize;
        self.active_index = (self.active_index as isize + delta).rem_euclid(len) as usize;
        self.render();
        self.restart_autoplay();
    }

    fn restart_autoplay(&mut self) {
        match self.playback {
            Playback::Playing => self.autoplay.rearm(&mut self.scheduler, self.autoplay_delay_ms),
            Playback::Paused => self.autoplay.cancel(&mut self.scheduler),
        }
    }

    fn render(&mut self) {
        // Slides are equal width and laid out side by side in the track.
        self.view.set_track_offset(-(self.active_index as i64) * 100);
        for index in 0..self.slides.len() {
            self.view.set_slide_hidden(index, index != self.active_index);
        }
    }
}

/// Gallery controller, or nothing when the page has no usable gallery.
#[derive(Debug)]
pub enum CarouselController<S, V> {
    Active(Carousel<S, V>),
    Disabled,
}

impl<S: Scheduler<AutoplayTick>, V: CarouselView> CarouselController<S, V> {
    pub fn new(view: Option<V>, slides: Vec<Slide>, scheduler: S, config: &GalleryConfig) -> Self {
        let carousel = view.and_then(|view| Carousel::new(scheduler, view, slides, config));
        match carousel {
            Some(carousel) => {
                log::debug!("gallery ready with {} slides", carousel.len());
                Self::Active(carousel)
            }
            None => {
                log::debug!("no gallery track or slides, carousel disabled");
                Self::Disabled
            }
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    pub fn active(&self) -> Option<&Carousel<S, V>> {
        match self {
            Self::Active(carousel) => Some(carousel),
            Self::Disabled => None,
        }
    }

    pub fn active_mut(&mut self) -> Option<&mut Carousel<S, V>> {
        match self {
            Self::Active(carousel) => Some(carousel),
            Self::Disabled => None,
        }
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active().map(Carousel::active_index)
    }

    pub fn next(&mut self) {
        if let Self::Active(carousel) = self {
            carousel.next();
        }
    }

    pub fn previous(&mut self) {
        if let Self::Active(carousel) = self {
            carousel.previous();
        }
    }

    pub fn on_key(&mut self, key: &str) {
        if let Self::Active(carousel) = self {
            carousel.on_key(key);
        }
    }

    pub fn on_pointer_enter(&mut self) {
        if let Self::Active(carousel) = self {
            carousel.on_pointer_enter();
        }
    }

    pub fn on_pointer_leave(&mut self) {
        if let Self::Active(carousel) = self {
            carousel.on_pointer_leave();
        }
    }

    pub fn on_gesture_start(&mut self, x: i32) {
        if let Self::Active(carousel) = self {
            carousel.on_gesture_start(x);
        }
    }

    pub fn on_gesture_end(&mut self, x: i32) {
        if let Self::Active(carousel) = self {
            carousel.on_gesture_end(x);
        }
    }

    pub fn on_timer(&mut self, handle: TimerHandle, tick: AutoplayTick) {
        if let Self::Active(carousel) = self {
            carousel.on_timer(handle, tick);
        }
    }
}
