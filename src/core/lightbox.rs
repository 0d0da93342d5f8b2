use crate::domain::model::BodyOverflow;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LightboxState {
    #[default]
    Closed,
    Open { src: String },
}

/// What a click inside the lightbox overlay landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Backdrop,
    Image,
    CloseButton,
}

/// Full-screen gallery viewer. While open, page scrolling is locked.
#[derive(Debug, Clone, Default)]
pub struct Lightbox {
    state: LightboxState,
}

impl Lightbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LightboxState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, LightboxState::Open { .. })
    }

    pub fn current_src(&self) -> Option<&str> {
        match &self.state {
            LightboxState::Open { src } => Some(src.as_str()),
            LightboxState::Closed => None,
        }
    }

    pub fn body_overflow(&self) -> BodyOverflow {
        if self.is_open() {
            BodyOverflow::Hidden
        } else {
            BodyOverflow::Auto
        }
    }

    /// Gallery item click. Opening over an open lightbox swaps the image.
    pub fn open(&mut self, src: impl Into<String>) {
        let src = src.into();
        tracing::debug!(%src, "lightbox opened");
        self.state = LightboxState::Open { src };
    }

    /// Returns whether the lightbox was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        self.state = LightboxState::Closed;
        was_open
    }

    /// Returns whether the click closed the lightbox.
    pub fn click(&mut self, target: ClickTarget) -> bool {
        match target {
            ClickTarget::Backdrop | ClickTarget::CloseButton => self.close(),
            ClickTarget::Image => false,
        }
    }
}
