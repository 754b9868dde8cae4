//! Scroll-position arithmetic for the page-level effects.

/// Vertical extent of a page section that has an id.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

pub fn header_is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

pub fn scroll_to_top_visible(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Background shift for the hero while it is still on screen.
pub fn parallax_offset(scroll_y: f64, hero_height: f64, rate: f64) -> Option<f64> {
    (scroll_y < hero_height).then(|| scroll_y * rate)
}

/// Scroll position that puts a section just below the fixed header.
pub fn anchor_target(section_top: f64, header_height: f64, gap: f64) -> f64 {
    section_top - header_height - gap
}

/// Section containing the probe line `scroll_y + probe_offset`. Sections
/// don't overlap; if they do, the last one wins.
pub fn active_section(sections: &[SectionBounds], scroll_y: f64, probe_offset: f64) -> Option<&str> {
    let probe = scroll_y + probe_offset;
    sections
        .iter()
        .filter(|s| probe >= s.top && probe < s.top + s.height)
        .last()
        .map(|s| s.id.as_str())
}

pub fn anchor_href(section_id: &str) -> String {
    format!("#{}", section_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, top: f64, height: f64) -> SectionBounds {
        SectionBounds {
            id: id.to_string(),
            top,
            height,
        }
    }

    #[test]
    fn thresholds_are_strict() {
        assert!(!header_is_scrolled(100.0, 100.0));
        assert!(header_is_scrolled(100.5, 100.0));
        assert!(!scroll_to_top_visible(300.0, 300.0));
        assert!(scroll_to_top_visible(301.0, 300.0));
    }

    #[test]
    fn parallax_only_inside_hero() {
        assert_eq!(parallax_offset(200.0, 800.0, -0.5), Some(-100.0));
        assert_eq!(parallax_offset(800.0, 800.0, -0.5), None);
    }

    #[test]
    fn anchor_target_clears_header_and_gap() {
        assert_eq!(anchor_target(1_200.0, 80.0, 20.0), 1_100.0);
    }

    #[test]
    fn probe_line_selects_section() {
        let sections = vec![
            section("inicio", 0.0, 800.0),
            section("servicos", 800.0, 600.0),
            section("contato", 1_400.0, 500.0),
        ];
        assert_eq!(active_section(&sections, 0.0, 100.0), Some("inicio"));
        assert_eq!(active_section(&sections, 700.0, 100.0), Some("servicos"));
        assert_eq!(active_section(&sections, 1_299.0, 100.0), Some("servicos"));
        assert_eq!(active_section(&sections, 1_300.0, 100.0), Some("contato"));
        assert_eq!(active_section(&sections, 5_000.0, 100.0), None);
    }

    #[test]
    fn href_matches_section_id() {
        assert_eq!(anchor_href("contato"), "#contato");
    }
}
