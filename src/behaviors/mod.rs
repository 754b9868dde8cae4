//! DOM-free decision logic for the page-level behaviours.

pub mod menu;
pub mod scroll_effects;
pub mod validation;
