use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_events::EventListener;
use web_sys::{Element, Window};

use super::dom;
use super::scheduler::BrowserScheduler;
use crate::behaviors::scroll_effects::header_is_scrolled;
use crate::config::HeaderConfig;
use crate::controllers::{HeaderTask, HeaderView, ScrollHeaderController, Viewport, Visibility};
use crate::error::BehaviorError;

/// Header shown/hidden through its `visible` / `hidden` classes.
pub struct ClassListHeader {
    element: Element,
}

impl HeaderView for ClassListHeader {
    fn set_visibility(&mut self, visibility: Visibility) {
        let hidden = visibility == Visibility::Hidden;
        dom::set_class(&self.element, "hidden", hidden);
        dom::set_class(&self.element, "visible", !hidden);
    }
}

pub struct WindowViewport {
    window: Window,
}

impl Viewport for WindowViewport {
    fn scroll_offset(&self) -> i32 {
        dom::scroll_y(&self.window).round() as i32
    }

    fn viewport_height(&self) -> i32 {
        self.window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .map(|h| h.round() as i32)
            .unwrap_or(0)
    }
}

type BrowserHeader =
    ScrollHeaderController<BrowserScheduler<HeaderTask>, WindowViewport, ClassListHeader>;

/// Wires the auto-hide controller to window scroll events.
pub fn install(config: &HeaderConfig) -> Result<(), BehaviorError> {
    let window = dom::window()?;
    let document = dom::document()?;
    let header = dom::query(&document, &config.selector).map(|element| ClassListHeader { element });
    let viewport = WindowViewport {
        window: window.clone(),
    };

    let controller: Rc<RefCell<BrowserHeader>> = Rc::new_cyclic(|weak: &Weak<RefCell<BrowserHeader>>| {
        let weak = weak.clone();
        let scheduler = BrowserScheduler::new(move |handle, task| {
            if let Some(controller) = weak.upgrade() {
                controller.borrow_mut().on_timer(handle, task);
            }
        });
        RefCell::new(ScrollHeaderController::new(header, viewport, scheduler, config))
    });
    if !controller.borrow().is_active() {
        return Ok(());
    }

    EventListener::new(&window, "scroll", move |_| {
        controller.borrow_mut().on_scroll_event();
    })
    .forget();
    log::debug!("auto-hide header installed");
    Ok(())
}

/// Toggles the `scrolled` style class. Independent of the auto-hide state.
pub fn install_scrolled_style(config: &HeaderConfig) -> Result<(), BehaviorError> {
    let window = dom::window()?;
    let document = dom::document()?;
    let Some(header) = dom::query(&document, &config.selector) else {
        return Ok(());
    };
    let threshold = config.scrolled_offset_px;
    let source = window.clone();
    EventListener::new(&window, "scroll", move |_| {
        let scrolled = header_is_scrolled(dom::scroll_y(&source), threshold);
        dom::set_class(&header, "scrolled", scrolled);
    })
    .forget();
    Ok(())
}
