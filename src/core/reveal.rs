//! Fade-and-rise entrance animation for cards as they scroll into view.

use crate::config::toml_config::RevealConfig;
use crate::domain::model::{Rect, RevealStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserveMode {
    /// Animated card: starts hidden, uses the configured threshold and
    /// bottom margin, stays observed after revealing.
    Persistent,
    /// Lazy image: default options (any overlap with the full viewport),
    /// style untouched, unobserved after the first intersection.
    Once,
}

#[derive(Debug, Clone)]
struct Observed {
    id: String,
    rect: Rect,
    mode: ObserveMode,
    style: Option<RevealStyle>,
    loaded: bool,
    observing: bool,
}

#[derive(Debug, Clone)]
pub struct RevealObserver {
    settings: RevealConfig,
    elements: Vec<Observed>,
}

impl RevealObserver {
    pub fn new(settings: RevealConfig) -> Self {
        Self {
            settings,
            elements: Vec::new(),
        }
    }

    /// Registers an element. Animated cards are put in their hidden starting
    /// style; lazy images keep whatever style they have.
    pub fn observe(&mut self, id: impl Into<String>, rect: Rect, mode: ObserveMode) {
        let style = match mode {
            ObserveMode::Persistent => Some(RevealStyle::HIDDEN),
            ObserveMode::Once => None,
        };
        self.elements.push(Observed {
            id: id.into(),
            rect,
            mode,
            style,
            loaded: false,
            observing: true,
        });
    }

    pub fn style_of(&self, id: &str) -> Option<RevealStyle> {
        self.elements.iter().find(|e| e.id == id).and_then(|e| e.style)
    }

    pub fn is_observing(&self, id: &str) -> bool {
        self.elements.iter().any(|e| e.id == id && e.observing)
    }

    pub fn revealed(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter(|e| e.style == Some(RevealStyle::SHOWN))
            .map(|e| e.id.as_str())
            .collect()
    }

    /// Lazy images that have intersected at least once.
    pub fn loaded(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter(|e| e.loaded)
            .map(|e| e.id.as_str())
            .collect()
    }

    /// Fraction of `rect` inside the viewport after the bottom margin is applied.
    pub fn visible_ratio(&self, rect: Rect, scroll_y: f64, viewport_height: f64) -> f64 {
        ratio_within(rect, scroll_y, viewport_height - self.settings.bottom_margin)
    }

    /// Re-evaluates every observed element; returns ids revealed or loaded by this pass.
    pub fn check(&mut self, scroll_y: f64, viewport_height: f64) -> Vec<String> {
        let mut newly_shown = Vec::new();
        for index in 0..self.elements.len() {
            if !self.elements[index].observing {
                continue;
            }
            let rect = self.elements[index].rect;
            let intersecting = match self.elements[index].mode {
                ObserveMode::Persistent => {
                    let ratio = self.visible_ratio(rect, scroll_y, viewport_height);
                    ratio > 0.0 && ratio >= self.settings.threshold
                }
                ObserveMode::Once => ratio_within(rect, scroll_y, viewport_height) > 0.0,
            };
            if !intersecting {
                continue;
            }

            let element = &mut self.elements[index];
            match element.mode {
                ObserveMode::Persistent => {
                    if element.style != Some(RevealStyle::SHOWN) {
                        element.style = Some(RevealStyle::SHOWN);
                        tracing::debug!(id = %element.id, "element revealed");
                        newly_shown.push(element.id.clone());
                    }
                }
                ObserveMode::Once => {
                    element.loaded = true;
                    element.observing = false;
                    tracing::debug!(id = %element.id, "lazy image loaded");
                    newly_shown.push(element.id.clone());
                }
            }
        }
        newly_shown
    }
}

fn ratio_within(rect: Rect, scroll_y: f64, root_bottom: f64) -> f64 {
    let root_bottom = root_bottom.max(0.0);
    let top = rect.top - scroll_y;
    let bottom = top + rect.height;

    if rect.height <= 0.0 {
        return if (0.0..=root_bottom).contains(&top) { 1.0 } else { 0.0 };
    }

    let overlap = (bottom.min(root_bottom) - top.max(0.0)).max(0.0);
    overlap / rect.height
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(top: f64, height: f64) -> Rect {
        Rect { top, height }
    }

    #[test]
    fn test_starts_hidden() {
        let mut observer = RevealObserver::new(RevealConfig::default());
        observer.observe("tour-1", rect(2000.0, 300.0), ObserveMode::Persistent);
        assert_eq!(observer.style_of("tour-1"), Some(RevealStyle::HIDDEN));
        assert!(observer.check(0.0, 800.0).is_empty());
    }

    #[test]
    fn test_bottom_margin_shrinks_viewport() {
        let observer = RevealObserver::new(RevealConfig::default());
        // 視窗 800px，扣掉 50px 後底部在 750
        assert_eq!(observer.visible_ratio(rect(760.0, 100.0), 0.0, 800.0), 0.0);
        assert_eq!(observer.visible_ratio(rect(700.0, 100.0), 0.0, 800.0), 0.5);
        assert_eq!(observer.visible_ratio(rect(100.0, 100.0), 0.0, 800.0), 1.0);
    }

    #[test]
    fn test_threshold_gate() {
        let mut observer = RevealObserver::new(RevealConfig::default());
        observer.observe("card", rect(745.0, 100.0), ObserveMode::Persistent);
        // 只露出 5px
        assert!(observer.check(0.0, 800.0).is_empty());
        // 露出 15px
        assert_eq!(observer.check(10.0, 800.0), vec!["card".to_string()]);
    }

    #[test]
    fn test_reveal_is_one_way() {
        let mut observer = RevealObserver::new(RevealConfig::default());
        observer.observe("card", rect(100.0, 200.0), ObserveMode::Persistent);
        assert_eq!(observer.check(0.0, 800.0).len(), 1);
        assert!(observer.check(5000.0, 800.0).is_empty());
        assert_eq!(observer.style_of("card"), Some(RevealStyle::SHOWN));
        assert!(observer.is_observing("card"));
        assert!(observer.check(0.0, 800.0).is_empty());
    }

    #[test]
    fn test_once_mode_unobserves() {
        let mut observer = RevealObserver::new(RevealConfig::default());
        observer.observe("img-hero", rect(0.0, 400.0), ObserveMode::Once);
        assert_eq!(observer.check(0.0, 800.0), vec!["img-hero".to_string()]);
        assert!(!observer.is_observing("img-hero"));
        assert_eq!(observer.loaded(), vec!["img-hero"]);
        assert!(observer.revealed().is_empty());
        assert!(observer.check(0.0, 800.0).is_empty());
    }

    #[test]
    fn test_lazy_image_ignores_margin_threshold_and_style() {
        let mut observer = RevealObserver::new(RevealConfig::default());
        observer.observe("card", rect(790.0, 100.0), ObserveMode::Persistent);
        observer.observe("card-img", rect(790.0, 100.0), ObserveMode::Once);
        assert_eq!(observer.style_of("card-img"), None);

        // 只露出 10px，且落在底部 50px 邊界內
        assert_eq!(observer.check(0.0, 800.0), vec!["card-img".to_string()]);
        assert_eq!(observer.style_of("card"), Some(RevealStyle::HIDDEN));
        assert_eq!(observer.style_of("card-img"), None);
        assert_eq!(observer.loaded(), vec!["card-img"]);
    }
}
