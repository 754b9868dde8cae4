use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent, TouchEvent};

use super::dom;
use super::scheduler::BrowserScheduler;
use crate::config::GalleryConfig;
use crate::controllers::{AutoplayTick, CarouselController, CarouselView, Slide};
use crate::error::BehaviorError;

pub struct TrackView {
    track: HtmlElement,
    images: Vec<Option<Element>>,
}

impl CarouselView for TrackView {
    fn set_track_offset(&mut self, percent: i64) {
        dom::set_style(&self.track, "transform", &format!("translateX({}%)", percent));
    }

    fn set_slide_hidden(&mut self, index: usize, hidden: bool) {
        if let Some(Some(image)) = self.images.get(index) {
            let value = if hidden { "true" } else { "false" };
            if let Err(e) = image.set_attribute("aria-hidden", value) {
                log::debug!("aria-hidden not set on slide {}: {:?}", index, e);
            }
        }
    }
}

type BrowserCarousel = CarouselController<BrowserScheduler<AutoplayTick>, TrackView>;

type Shared = Rc<RefCell<BrowserCarousel>>;

fn first_touch_x(event: &web_sys::Event, changed: bool) -> Option<i32> {
    let event = event.dyn_ref::<TouchEvent>()?;
    let touches = if changed {
        event.changed_touches()
    } else {
        event.touches()
    };
    touches.get(0).map(|touch| touch.client_x())
}

fn on_click(target: &Element, controller: &Shared, action: fn(&mut BrowserCarousel)) {
    let controller = Rc::clone(controller);
    EventListener::new(target, "click", move |_| action(&mut controller.borrow_mut())).forget();
}

/// Builds the gallery controller and wires buttons, keys, hover and swipe.
pub fn install(config: &GalleryConfig) -> Result<(), BehaviorError> {
    let document = dom::document()?;
    let track = dom::query_html(&document, &config.track_selector);
    let images: Vec<Option<Element>> = dom::query_all(&document, &config.slide_selector)?
        .iter()
        .map(|slide| slide.query_selector("img").ok().flatten())
        .collect();
    let slides = images
        .iter()
        .map(|image| {
            Slide::new(
                image
                    .as_ref()
                    .and_then(|img| img.get_attribute("src"))
                    .unwrap_or_default(),
            )
        })
        .collect();
    let view = track.map(|track| TrackView { track, images });

    let controller: Shared = Rc::new_cyclic(|weak: &Weak<RefCell<BrowserCarousel>>| {
        let weak = weak.clone();
        let scheduler = BrowserScheduler::new(move |handle, tick| {
            if let Some(controller) = weak.upgrade() {
                controller.borrow_mut().on_timer(handle, tick);
            }
        });
        RefCell::new(CarouselController::new(view, slides, scheduler, config))
    });
    if !controller.borrow().is_active() {
        return Ok(());
    }

    if let Some(prev) = dom::query(&document, &config.prev_selector) {
        on_click(&prev, &controller, BrowserCarousel::previous);
    }
    if let Some(next) = dom::query(&document, &config.next_selector) {
        on_click(&next, &controller, BrowserCarousel::next);
    }

    {
        let controller = Rc::clone(&controller);
        EventListener::new(&document, "keydown", move |event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                controller.borrow_mut().on_key(&event.key());
            }
        })
        .forget();
    }

    if let Some(container) = dom::query(&document, &config.container_selector) {
        let hover = Rc::clone(&controller);
        EventListener::new(&container, "mouseenter", move |_| hover.borrow_mut().on_pointer_enter())
            .forget();
        let hover = Rc::clone(&controller);
        EventListener::new(&container, "mouseleave", move |_| hover.borrow_mut().on_pointer_leave())
            .forget();

        let swipe = Rc::clone(&controller);
        EventListener::new(&container, "touchstart", move |event| {
            if let Some(x) = first_touch_x(event, false) {
                swipe.borrow_mut().on_gesture_start(x);
            }
        })
        .forget();
        let swipe = Rc::clone(&controller);
        EventListener::new(&container, "touchend", move |event| {
            if let Some(x) = first_touch_x(event, true) {
                swipe.borrow_mut().on_gesture_end(x);
            }
        })
        .forget();
    }

    log::debug!("gallery slider installed");
    Ok(())
}
