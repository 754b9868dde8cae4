use serde::Deserialize;

use crate::error::BehaviorError;

/// Id of the optional inline JSON block carrying page overrides.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

/// Compile-time log level override, e.g. `SITE_LOG_LEVEL=debug`.
pub fn get_log_level_override() -> Option<&'static str> {
    option_env!("SITE_LOG_LEVEL")
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub selector: String,
    /// Smaller scroll deltas are treated as jitter.
    pub scroll_threshold_px: u32,
    pub hide_delay_ms: u32,
    /// Offset past which the header gets the `scrolled` style.
    pub scrolled_offset_px: f64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            selector: ".header".to_string(),
            scroll_threshold_px: 10,
            hide_delay_ms: 300,
            scrolled_offset_px: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub container_selector: String,
    pub track_selector: String,
    pub slide_selector: String,
    pub prev_selector: String,
    pub next_selector: String,
    pub autoplay_delay_ms: u32,
    pub swipe_threshold_px: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            container_selector: ".gallery-slider".to_string(),
            track_selector: ".gallery-track".to_string(),
            slide_selector: ".gallery-slide".to_string(),
            prev_selector: ".gallery-prev".to_string(),
            next_selector: ".gallery-next".to_string(),
            autoplay_delay_ms: 4000,
            swipe_threshold_px: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Extra space left above a section when jumping to an anchor.
    pub anchor_gap_px: f64,
    pub nav_probe_offset_px: f64,
    pub parallax_rate: f64,
    pub scroll_to_top_offset_px: f64,
    pub reveal_selector: String,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub form_reset_delay_ms: u32,
    pub submitting_label: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            anchor_gap_px: 20.0,
            nav_probe_offset_px: 100.0,
            parallax_rate: -0.5,
            scroll_to_top_offset_px: 300.0,
            reveal_selector: ".service-category, .differential-card".to_string(),
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
            form_reset_delay_ms: 2000,
            submitting_label: "Enviando...".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub header: HeaderConfig,
    pub gallery: GalleryConfig,
    pub page: PageConfig,
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            header: HeaderConfig::default(),
            gallery: GalleryConfig::default(),
            page: PageConfig::default(),
            log_level: get_log_level_override().unwrap_or("info").to_string(),
        }
    }
}

impl SiteConfig {
    /// Parses and validates an inline JSON config block. Missing keys keep
    /// their defaults.
    pub fn from_json(raw: &str) -> Result<Self, BehaviorError> {
        let config: SiteConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Config for the page's inline block, if it has one. A block that fails
    /// to parse or validate yields the defaults plus the reason.
    pub fn resolve(raw: Option<&str>) -> (Self, Option<BehaviorError>) {
        match raw.map(Self::from_json) {
            None => (Self::default(), None),
            Some(Ok(config)) => (config, None),
            Some(Err(e)) => (Self::default(), Some(e)),
        }
    }

    pub fn validate(&self) -> Result<(), BehaviorError> {
        if self.header.hide_delay_ms == 0 {
            return Err(BehaviorError::InvalidConfig(
                "header.hide_delay_ms must be positive".to_string(),
            ));
        }
        if self.gallery.autoplay_delay_ms == 0 {
            return Err(BehaviorError::InvalidConfig(
                "gallery.autoplay_delay_ms must be positive".to_string(),
            ));
        }
        let selectors = [
            ("header.selector", &self.header.selector),
            ("gallery.container_selector", &self.gallery.container_selector),
            ("gallery.track_selector", &self.gallery.track_selector),
            ("gallery.slide_selector", &self.gallery.slide_selector),
            ("page.reveal_selector", &self.page.reveal_selector),
        ];
        if let Some((name, _)) = selectors.iter().find(|(_, s)| s.trim().is_empty()) {
            return Err(BehaviorError::InvalidConfig(format!("{} must not be empty", name)));
        }
        if !(0.0..=1.0).contains(&self.page.reveal_threshold) {
            return Err(BehaviorError::InvalidConfig(
                "page.reveal_threshold must be within [0, 1]".to_string(),
            ));
        }
        Ok(())
    }

    /// Falls back to `Info` for unknown level names.
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
