use crate::domain::model::ButtonTransform;

/// Hamburger menu on small screens. The hamburger icon and the menu share one
/// flag, so they can never disagree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileNav {
    open: bool,
}

impl MobileNav {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn hamburger_active(&self) -> bool {
        self.open
    }

    pub fn menu_active(&self) -> bool {
        self.open
    }

    /// Hamburger click.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        tracing::debug!(open = self.open, "mobile nav toggled");
        self.open
    }

    /// Nav link click.
    pub fn close(&mut self) {
        self.open = false;
    }
}

/// Floating WhatsApp button: grows and tilts while the pointer is over it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FloatButton {
    hovered: bool,
}

impl FloatButton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn pointer_enter(&mut self) -> ButtonTransform {
        self.hovered = true;
        self.transform()
    }

    pub fn pointer_leave(&mut self) -> ButtonTransform {
        self.hovered = false;
        self.transform()
    }

    pub fn transform(&self) -> ButtonTransform {
        if self.hovered {
            ButtonTransform::HOVER
        } else {
            ButtonTransform::REST
        }
    }
}
