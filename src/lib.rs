//! Client-side behaviours for the marketing site: auto-hiding header,
//! image gallery slider, mobile menu, smooth anchors, scroll effects,
//! entrance animations and contact form validation.
//!
//! The controllers and decision logic are platform-neutral and run against
//! the [`utils::scheduler::Scheduler`] and view traits. The `web` module
//! binds them to the browser and is only built for `wasm32`.

pub mod behaviors;
pub mod config;
pub mod controllers;
pub mod error;
pub mod utils;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::SiteConfig;
pub use error::BehaviorError;
