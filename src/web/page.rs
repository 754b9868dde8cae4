use std::cell::Cell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlTextAreaElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Node,
};

use super::dom;
use crate::behaviors::menu::{ClickTarget, MobileMenu};
use crate::behaviors::scroll_effects::{
    active_section, anchor_href, anchor_target, parallax_offset, scroll_to_top_visible,
    SectionBounds,
};
use crate::behaviors::validation::{validate_field, FieldKind};
use crate::config::{HeaderConfig, PageConfig};
use crate::error::BehaviorError;

const INJECTED_CSS: &str = r#"
    .form-group input.error,
    .form-group textarea.error {
        border-color: #e53e3e;
        box-shadow: 0 0 0 3px rgba(229, 62, 62, 0.1);
    }

    .scroll-to-top:hover {
        background-color: var(--dark-green) !important;
        transform: translateY(-2px);
    }

    .nav-link.active {
        color: var(--primary-green);
    }

    .nav-link.active::after {
        width: 100%;
    }

    .header.scrolled {
        background: rgba(255, 255, 255, 0.98);
        box-shadow: 0 2px 20px rgba(0, 0, 0, 0.1);
    }
"#;

const SCROLL_TO_TOP_CSS: &str = "
    position: fixed;
    bottom: 20px;
    right: 20px;
    width: 50px;
    height: 50px;
    border-radius: 50%;
    background-color: var(--primary-green);
    color: white;
    border: none;
    font-size: 20px;
    cursor: pointer;
    opacity: 0;
    visibility: hidden;
    transition: all 0.3s ease;
    z-index: 1000;
    box-shadow: 0 4px 12px rgba(0,0,0,0.15);
";

const ERROR_MESSAGE_CSS: &str = "color: #e53e3e; font-size: 0.875rem; margin-top: 0.25rem; display: block;";

pub fn install_styles() -> Result<(), BehaviorError> {
    let document = dom::document()?;
    let Some(head) = document.head() else {
        return Ok(());
    };
    let style = document.create_element("style")?;
    style.set_text_content(Some(INJECTED_CSS));
    head.append_child(&style)?;
    Ok(())
}

pub fn install_mobile_menu() -> Result<(), BehaviorError> {
    let document = dom::document()?;
    let (Some(toggle), Some(nav)) = (
        document.get_element_by_id("mobile-menu-toggle"),
        document.get_element_by_id("nav"),
    ) else {
        return Ok(());
    };

    let menu = Rc::new(Cell::new(MobileMenu::default()));
    EventListener::new(&document, "click", move |event| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
            return;
        };
        let click = if toggle.contains(Some(&target)) {
            ClickTarget::Toggle
        } else if nav.contains(Some(&target)) {
            let on_link = target
                .dyn_ref::<Element>()
                .and_then(|el| el.closest(".nav-link").ok().flatten())
                .is_some();
            if on_link {
                ClickTarget::NavLink
            } else {
                ClickTarget::InsideNav
            }
        } else {
            ClickTarget::Outside
        };

        let mut state = menu.get();
        if state.on_click(click) {
            menu.set(state);
            dom::set_class(&nav, "active", state.is_open());
            dom::set_class(&toggle, "active", state.is_open());
        }
    })
    .forget();
    Ok(())
}

/// Smooth scrolling for in-page `#anchor` links, clearing the fixed header.
pub fn install_anchor_links(header: &HeaderConfig, page: &PageConfig) -> Result<(), BehaviorError> {
    let document = dom::document()?;
    for link in dom::query_all(&document, r##"a[href^="#"]"##)? {
        let document = document.clone();
        let header_selector = header.selector.clone();
        let gap = page.anchor_gap_px;
        let source = link.clone();
        EventListener::new_with_options(
            &link,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                let Some(href) = source.get_attribute("href") else {
                    return;
                };
                let Some(section) = dom::query_html(&document, &href) else {
                    return;
                };
                let header_height = dom::query_html(&document, &header_selector)
                    .map(|h| f64::from(h.offset_height()))
                    .unwrap_or(0.0);
                let top = anchor_target(f64::from(section.offset_top()), header_height, gap);
                if let Ok(window) = dom::window() {
                    dom::smooth_scroll_to(&window, top);
                }
            },
        )
        .forget();
    }
    Ok(())
}

pub fn install_nav_highlight(page: &PageConfig) -> Result<(), BehaviorError> {
    let window = dom::window()?;
    let document = dom::document()?;
    let sections: Vec<HtmlElement> = dom::query_all(&document, "section[id]")?
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect();
    if sections.is_empty() {
        return Ok(());
    }
    let links = dom::query_all(&document, ".nav-link")?;
    let probe = page.nav_probe_offset_px;
    let source = window.clone();

    EventListener::new(&window, "scroll", move |_| {
        let bounds: Vec<SectionBounds> = sections
            .iter()
            .map(|section| SectionBounds {
                id: section.id(),
                top: f64::from(section.offset_top()),
                height: f64::from(section.offset_height()),
            })
            .collect();
        let Some(id) = active_section(&bounds, dom::scroll_y(&source), probe) else {
            return;
        };
        let href = anchor_href(id);
        for link in &links {
            let current = link.get_attribute("href").as_deref() == Some(href.as_str());
            dom::set_class(link, "active", current);
        }
    })
    .forget();
    Ok(())
}

pub fn install_parallax(page: &PageConfig) -> Result<(), BehaviorError> {
    let window = dom::window()?;
    let document = dom::document()?;
    let (Some(hero), Some(background)) = (
        dom::query_html(&document, ".hero"),
        dom::query_html(&document, ".hero-background"),
    ) else {
        return Ok(());
    };
    let rate = page.parallax_rate;
    let source = window.clone();
    EventListener::new(&window, "scroll", move |_| {
        let scrolled = dom::scroll_y(&source);
        if let Some(shift) = parallax_offset(scrolled, f64::from(hero.offset_height()), rate) {
            dom::set_style(&background, "transform", &format!("translateY({}px)", shift));
        }
    })
    .forget();
    Ok(())
}

pub fn install_scroll_to_top(page: &PageConfig) -> Result<(), BehaviorError> {
    let window = dom::window()?;
    let document = dom::document()?;
    let Some(body) = document.body() else {
        return Ok(());
    };

    let button = document
        .create_element("button")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| BehaviorError::Js("created button is not an HtmlElement".to_string()))?;
    button.set_inner_html("↑");
    button.set_class_name("scroll-to-top");
    button.style().set_css_text(SCROLL_TO_TOP_CSS);
    body.append_child(&button)?;

    let click_window = window.clone();
    EventListener::new(&button, "click", move |_| {
        dom::smooth_scroll_to(&click_window, 0.0);
    })
    .forget();

    let threshold = page.scroll_to_top_offset_px;
    let source = window.clone();
    EventListener::new(&window, "scroll", move |_| {
        let (opacity, visibility) = if scroll_to_top_visible(dom::scroll_y(&source), threshold) {
            ("1", "visible")
        } else {
            ("0", "hidden")
        };
        dom::set_style(&button, "opacity", opacity);
        dom::set_style(&button, "visibility", visibility);
    })
    .forget();
    Ok(())
}

/// Adds `animate` to each watched element the first time it comes into view.
pub fn install_reveal(page: &PageConfig) -> Result<(), BehaviorError> {
    let document = dom::document()?;
    let targets = dom::query_all(&document, &page.reveal_selector)?;
    if targets.is_empty() {
        return Ok(());
    }

    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                    if entry.is_intersecting() {
                        dom::set_class(&entry.target(), "animate", true);
                    }
                }
            }
        },
    );
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(page.reveal_threshold));
    options.set_root_margin(&page.reveal_root_margin);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for target in &targets {
        observer.observe(target);
    }
    callback.forget();
    Ok(())
}

/// Shows a busy label on the submit button while the form posts.
pub fn install_contact_form(page: &PageConfig) -> Result<(), BehaviorError> {
    let document = dom::document()?;
    let Some(form) = dom::query(&document, ".contact-form") else {
        return Ok(());
    };
    let label = page.submitting_label.clone();
    let delay = page.form_reset_delay_ms;
    let source = form.clone();
    EventListener::new(&form, "submit", move |_| {
        let Some(button) = source
            .query_selector(".submit-button")
            .ok()
            .flatten()
            .and_then(|b| b.dyn_into::<HtmlButtonElement>().ok())
        else {
            return;
        };
        let original = button.text_content().unwrap_or_default();
        button.set_text_content(Some(&label));
        button.set_disabled(true);
        Timeout::new(delay, move || {
            button.set_text_content(Some(&original));
            button.set_disabled(false);
        })
        .forget();
    })
    .forget();
    Ok(())
}

pub fn install_field_validation() -> Result<(), BehaviorError> {
    let document = dom::document()?;
    let fields = dom::query_all(&document, ".contact-form input, .contact-form textarea")?;
    for field in fields {
        let on_blur = field.clone();
        EventListener::new(&field, "blur", move |_| {
            validate_element(&on_blur);
        })
        .forget();

        // Typing only rechecks a field that already shows an error.
        let on_input = field.clone();
        EventListener::new(&field, "input", move |_| {
            if on_input.class_list().contains("error") {
                validate_element(&on_input);
            }
        })
        .forget();
    }
    Ok(())
}

fn field_value(field: &Element) -> String {
    if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = field.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

fn validate_element(field: &Element) {
    dom::set_class(field, "error", false);
    let parent = field.parent_element();
    if let Some(existing) = parent
        .as_ref()
        .and_then(|p| p.query_selector(".error-message").ok().flatten())
    {
        existing.remove();
    }

    let kind = FieldKind::from_type_attr(&field.get_attribute("type").unwrap_or_default());
    if let Err(err) = validate_field(kind, field.has_attribute("required"), &field_value(field)) {
        dom::set_class(field, "error", true);
        if let Some(parent) = &parent {
            if let Err(e) = show_field_error(parent, &err.to_string()) {
                log::debug!("field error not shown: {}", e);
            }
        }
    }
}

fn show_field_error(parent: &Element, message: &str) -> Result<(), BehaviorError> {
    let document = dom::document()?;
    let span = document.create_element("span")?;
    span.set_class_name("error-message");
    span.set_text_content(Some(message));
    span.set_attribute("style", ERROR_MESSAGE_CSS)?;
    parent.append_child(&span)?;
    Ok(())
}
