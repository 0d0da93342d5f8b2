use crate::config::toml_config::ScrollConfig;

/// Result of feeding one scroll position through [`ScrollEffects`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollUpdate {
    /// `Some` only when the navbar's `scrolled` class flipped.
    pub navbar_changed: Option<bool>,
    pub hero_translate_y: f64,
}

/// Navbar compaction and hero parallax, driven by the page's scroll offset.
#[derive(Debug, Clone)]
pub struct ScrollEffects {
    settings: ScrollConfig,
    navbar_scrolled: bool,
    hero_translate_y: f64,
}

impl ScrollEffects {
    pub fn new(settings: ScrollConfig) -> Self {
        Self {
            settings,
            navbar_scrolled: false,
            hero_translate_y: 0.0,
        }
    }

    pub fn navbar_scrolled(&self) -> bool {
        self.navbar_scrolled
    }

    pub fn hero_translate_y(&self) -> f64 {
        self.hero_translate_y
    }

    pub fn on_scroll(&mut self, scroll_y: f64) -> ScrollUpdate {
        let scrolled = scroll_y > self.settings.navbar_threshold;
        let navbar_changed = (scrolled != self.navbar_scrolled).then_some(scrolled);
        if let Some(state) = navbar_changed {
            tracing::debug!(scroll_y, scrolled = state, "navbar style changed");
        }
        self.navbar_scrolled = scrolled;
        self.hero_translate_y = scroll_y * self.settings.parallax_factor;

        ScrollUpdate {
            navbar_changed,
            hero_translate_y: self.hero_translate_y,
        }
    }

    /// Where a smooth anchor jump should land, leaving room for the fixed
    /// header. Anchors with no target on the page produce no scroll.
    pub fn anchor_target(&self, target_offset_top: Option<f64>) -> Option<f64> {
        target_offset_top.map(|top| top - self.settings.header_offset)
    }

    pub fn contact_anchor(&self) -> &str {
        &self.settings.contact_anchor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navbar_threshold_is_strict() {
        let mut effects = ScrollEffects::new(ScrollConfig::default());
        assert_eq!(effects.on_scroll(50.0).navbar_changed, None);
        assert_eq!(effects.on_scroll(50.5).navbar_changed, Some(true));
        assert_eq!(effects.on_scroll(400.0).navbar_changed, None);
        assert_eq!(effects.on_scroll(0.0).navbar_changed, Some(false));
    }

    #[test]
    fn test_parallax_follows_factor() {
        let mut effects = ScrollEffects::new(ScrollConfig::default());
        assert_eq!(effects.on_scroll(300.0).hero_translate_y, 150.0);
        assert_eq!(effects.hero_translate_y(), 150.0);
    }

    #[test]
    fn test_anchor_target_leaves_header_room() {
        let effects = ScrollEffects::new(ScrollConfig::default());
        assert_eq!(effects.anchor_target(Some(1200.0)), Some(1120.0));
        assert_eq!(effects.anchor_target(None), None);
    }
}
