//! Browser bindings: DOM lookups, event wiring and the wasm entry point.

mod dom;
mod gallery;
mod header;
mod page;
mod scheduler;

pub use scheduler::BrowserScheduler;

use anyhow::Context;
use gloo_events::EventListener;
use wasm_bindgen::prelude::*;

use crate::config::{SiteConfig, CONFIG_ELEMENT_ID};
use crate::error::BehaviorError;

/// Reads the inline config block. Only meaningful once the document has
/// been parsed, since the block may sit after this script.
fn load_config(document: &web_sys::Document) -> (SiteConfig, Option<BehaviorError>) {
    let raw = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content());
    SiteConfig::resolve(raw.as_deref())
}

fn boot(config: &SiteConfig) {
    let results = [
        page::install_styles().context("style injection"),
        gallery::install(&config.gallery).context("gallery slider"),
        header::install(&config.header).context("auto-hide header"),
        header::install_scrolled_style(&config.header).context("header scrolled style"),
        page::install_mobile_menu().context("mobile menu"),
        page::install_anchor_links(&config.header, &config.page).context("anchor links"),
        page::install_nav_highlight(&config.page).context("nav highlight"),
        page::install_parallax(&config.page).context("hero parallax"),
        page::install_scroll_to_top(&config.page).context("scroll to top"),
        page::install_reveal(&config.page).context("entrance animations"),
        page::install_contact_form(&config.page).context("contact form"),
        page::install_field_validation().context("field validation"),
    ];

    let mut failed = 0;
    for result in &results {
        if let Err(e) = result {
            failed += 1;
            log::error!("Failed to install {:#}", e);
        }
    }
    log::info!("site behaviours ready ({} of {} failed)", failed, results.len());
}

fn ready(document: &web_sys::Document) {
    let (config, problem) = load_config(document);
    wasm_logger::init(wasm_logger::Config::new(config.log_level()));
    if let Some(e) = problem {
        log::warn!("{}, using defaults", e);
    }
    boot(&config);
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let document = match dom::document() {
        Ok(document) => document,
        Err(e) => {
            gloo_console::error!(format!("site behaviours not started: {}", e));
            return;
        }
    };
    if document.ready_state() == "loading" {
        let loaded = document.clone();
        EventListener::once(&document, "DOMContentLoaded", move |_| ready(&loaded)).forget();
    } else {
        ready(&document);
    }
}
