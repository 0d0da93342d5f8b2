use crate::domain::ports::DisplayUnit;
use serde::{Deserialize, Serialize};

/// A review card in the testimonials slider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewCard {
    pub author: String,
    pub quote: String,
    #[serde(default)]
    pub active: bool,
}

impl ReviewCard {
    pub fn new(author: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            quote: quote.into(),
            active: false,
        }
    }
}

impl DisplayUnit for ReviewCard {
    fn set_active(&mut self, active: bool) {
        if self.active != active {
            tracing::trace!(author = %self.author, active, "review card visibility changed");
        }
        self.active = active;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: u64,
    pub kind: AlertKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyOverflow {
    Auto,
    Hidden,
}

/// Vertical extent of an element in document coordinates (px).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

/// Inline style the reveal animation toggles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealStyle {
    pub opacity: f64,
    pub translate_y: f64,
}

impl RevealStyle {
    pub const HIDDEN: RevealStyle = RevealStyle {
        opacity: 0.0,
        translate_y: 30.0,
    };
    pub const SHOWN: RevealStyle = RevealStyle {
        opacity: 1.0,
        translate_y: 0.0,
    };
}

/// Transform applied to the floating chat button.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ButtonTransform {
    pub scale: f64,
    pub rotate_deg: f64,
}

impl ButtonTransform {
    pub const REST: ButtonTransform = ButtonTransform {
        scale: 1.0,
        rotate_deg: 0.0,
    };
    pub const HOVER: ButtonTransform = ButtonTransform {
        scale: 1.1,
        rotate_deg: 5.0,
    };
}
