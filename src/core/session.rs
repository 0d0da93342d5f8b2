//! One page view: every interactive piece wired to a shared scheduler.

use crate::config::toml_config::SiteConfig;
use crate::core::carousel::CarouselController;
use crate::core::contact::{AlertCenter, ContactDesk, TourInquiry};
use crate::core::debounce::Debouncer;
use crate::core::lightbox::{ClickTarget, Lightbox};
use crate::core::lock_state;
use crate::core::navigation::{FloatButton, MobileNav};
use crate::core::reveal::{ObserveMode, RevealObserver};
use crate::core::scroll::{ScrollEffects, ScrollUpdate};
use crate::domain::model::{Alert, BodyOverflow, ButtonTransform, ContactForm, Rect};
use crate::domain::ports::{DisplayUnit, FormSubmitter, Scheduler, TimerHandle};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Something the visitor does on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    NextReview,
    PrevReview,
    HamburgerClick,
    NavLinkClick,
    Scroll { y: f64 },
    AnchorClick { target_top: Option<f64> },
    GalleryClick { src: String },
    LightboxClick { target: LightboxTarget },
    SubmitContact { form: ContactForm },
    TourClick { name: String, price: String },
    FloatButtonEnter,
    FloatButtonLeave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightboxTarget {
    Backdrop,
    Image,
    CloseButton,
}

impl From<LightboxTarget> for ClickTarget {
    fn from(target: LightboxTarget) -> Self {
        match target {
            LightboxTarget::Backdrop => ClickTarget::Backdrop,
            LightboxTarget::Image => ClickTarget::Image,
            LightboxTarget::CloseButton => ClickTarget::CloseButton,
        }
    }
}

/// An element the page animates in when it scrolls into view. With
/// `lazy_image` set it also holds a lazily loaded image, observed separately
/// as `<id>/img`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealTarget {
    pub id: String,
    pub rect: Rect,
    #[serde(default)]
    pub lazy_image: bool,
}

impl RevealTarget {
    pub fn image_id(&self) -> String {
        format!("{}/img", self.id)
    }
}

/// What the host should do after an event, beyond state the session keeps.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventOutcome {
    pub scroll: Option<ScrollUpdate>,
    pub scroll_to: Option<f64>,
    pub scroll_to_anchor: Option<String>,
    pub alert: Option<Alert>,
}

/// Snapshot of the page's visual state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub review_index: usize,
    pub review_count: usize,
    pub nav_open: bool,
    pub navbar_scrolled: bool,
    pub hero_translate_y: f64,
    pub lightbox_src: Option<String>,
    pub body_overflow: BodyOverflow,
    pub alert: Option<Alert>,
    pub revealed: Vec<String>,
    pub loaded_images: Vec<String>,
    pub float_button: ButtonTransform,
}

pub struct PageSession<U: DisplayUnit + 'static, F: FormSubmitter> {
    config: SiteConfig,
    viewport_height: f64,
    carousel: CarouselController<U>,
    rotation: TimerHandle,
    nav: MobileNav,
    scroll: ScrollEffects,
    settled_scroll: Debouncer<f64>,
    settled_y: Arc<Mutex<Option<f64>>>,
    reveal: Arc<Mutex<RevealObserver>>,
    float_button: FloatButton,
    lightbox: Lightbox,
    contact: ContactDesk<F>,
}

impl<U: DisplayUnit + 'static, F: FormSubmitter> PageSession<U, F> {
    /// Builds the page and starts review auto-rotation.
    pub fn new(
        config: SiteConfig,
        scheduler: Arc<dyn Scheduler>,
        reviews: Vec<U>,
        reveal_targets: Vec<RevealTarget>,
        submitter: F,
        viewport_height: f64,
    ) -> Result<Self> {
        let carousel = CarouselController::new(reviews)?;
        let rotation = carousel.start_auto_rotate(&scheduler, config.rotate_interval());

        let mut observer = RevealObserver::new(config.reveal.clone());
        for target in reveal_targets {
            if target.lazy_image {
                observer.observe(target.image_id(), target.rect, ObserveMode::Once);
            }
            observer.observe(target.id, target.rect, ObserveMode::Persistent);
        }
        let reveal = Arc::new(Mutex::new(observer));

        let settled_y = Arc::new(Mutex::new(None));
        let settled = Arc::clone(&settled_y);
        let settled_scroll = Debouncer::new(
            Arc::clone(&scheduler),
            config.scroll_debounce(),
            move |y: f64| {
                *lock_state(&settled) = Some(y);
                tracing::debug!(scroll_y = y, "scroll settled");
            },
        );

        let alerts = AlertCenter::new(Arc::clone(&scheduler), config.alert_dismiss_after());
        let contact = ContactDesk::new(config.contact.clone(), submitter, alerts);
        let scroll = ScrollEffects::new(config.scroll.clone());

        // 頁面載入時先檢查一次首屏元素
        lock_state(&reveal).check(0.0, viewport_height);

        Ok(Self {
            config,
            viewport_height,
            carousel,
            rotation,
            nav: MobileNav::new(),
            scroll,
            settled_scroll,
            settled_y,
            reveal,
            float_button: FloatButton::new(),
            lightbox: Lightbox::new(),
            contact,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn carousel(&self) -> &CarouselController<U> {
        &self.carousel
    }

    pub fn rotation(&self) -> &TimerHandle {
        &self.rotation
    }

    pub fn nav(&self) -> &MobileNav {
        &self.nav
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn contact(&self) -> &ContactDesk<F> {
        &self.contact
    }

    pub fn float_button(&self) -> &FloatButton {
        &self.float_button
    }

    pub fn scroll_pending(&self) -> bool {
        self.settled_scroll.is_pending()
    }

    /// Scroll position after the last quiet period, if scrolling has settled once.
    pub fn settled_scroll_y(&self) -> Option<f64> {
        *lock_state(&self.settled_y)
    }

    pub async fn dispatch(&mut self, event: PageEvent) -> Result<EventOutcome> {
        tracing::debug!(?event, "page event");
        let mut outcome = EventOutcome::default();
        match event {
            PageEvent::NextReview => {
                self.carousel.advance();
            }
            PageEvent::PrevReview => {
                self.carousel.retreat();
            }
            PageEvent::HamburgerClick => {
                self.nav.toggle();
            }
            PageEvent::NavLinkClick => self.nav.close(),
            PageEvent::Scroll { y } => {
                outcome.scroll = Some(self.scroll.on_scroll(y));
                // 進場動畫不等防抖，每次捲動都檢查
                let shown = lock_state(&self.reveal).check(y, self.viewport_height);
                if !shown.is_empty() {
                    tracing::debug!(scroll_y = y, count = shown.len(), "elements scrolled into view");
                }
                self.settled_scroll.call(y);
            }
            PageEvent::AnchorClick { target_top } => {
                outcome.scroll_to = self.scroll.anchor_target(target_top);
            }
            PageEvent::GalleryClick { src } => self.lightbox.open(src),
            PageEvent::LightboxClick { target } => {
                self.lightbox.click(target.into());
            }
            PageEvent::SubmitContact { mut form } => {
                outcome.alert = match self.contact.submit(&mut form).await {
                    Ok(alert) => Some(alert),
                    // 驗證失敗只是提示使用者，不中斷整個頁面
                    Err(e) => match self.contact.alerts().current() {
                        Some(alert) => Some(alert),
                        None => return Err(e),
                    },
                };
            }
            PageEvent::TourClick { name, price } => {
                let TourInquiry { alert, scroll_to } =
                    self.contact
                        .tour_inquiry(&name, &price, self.scroll.contact_anchor());
                tracing::debug!(%scroll_to, "scrolling to contact section");
                outcome.alert = Some(alert);
                outcome.scroll_to_anchor = Some(scroll_to);
            }
            PageEvent::FloatButtonEnter => {
                self.float_button.pointer_enter();
            }
            PageEvent::FloatButtonLeave => {
                self.float_button.pointer_leave();
            }
        }
        Ok(outcome)
    }

    pub fn report(&self) -> SessionReport {
        let reveal = lock_state(&self.reveal);
        SessionReport {
            review_index: self.carousel.current_index(),
            review_count: self.carousel.item_count(),
            nav_open: self.nav.is_open(),
            navbar_scrolled: self.scroll.navbar_scrolled(),
            hero_translate_y: self.scroll.hero_translate_y(),
            lightbox_src: self.lightbox.current_src().map(str::to_string),
            body_overflow: self.lightbox.body_overflow(),
            alert: self.contact.alerts().current(),
            revealed: reveal.revealed().into_iter().map(str::to_string).collect(),
            loaded_images: reveal.loaded().into_iter().map(str::to_string).collect(),
            float_button: self.float_button.transform(),
        }
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }
}

impl<U: DisplayUnit + 'static, F: FormSubmitter> std::fmt::Debug for PageSession<U, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageSession")
            .field("report", &self.report())
            .finish()
    }
}
