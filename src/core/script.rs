//! Scripted page visits: a page layout plus timed visitor events, replayed
//! against a [`PageSession`].

use crate::adapters::clock::ManualScheduler;
use crate::core::session::{LightboxTarget, PageEvent, PageSession, RevealTarget};
use crate::domain::model::{ContactForm, Rect, ReviewCard};
use crate::domain::ports::{DisplayUnit, FormSubmitter};
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    pub at_ms: u64,
    pub event: PageEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitScript {
    pub viewport_height: f64,
    pub reviews: Vec<ReviewCard>,
    #[serde(default)]
    pub reveal_targets: Vec<RevealTarget>,
    #[serde(default)]
    pub events: Vec<TimedEvent>,
}

impl VisitScript {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let mut script: VisitScript =
            serde_json::from_str(content).map_err(|e| SiteError::ConfigValidationError {
                field: "script".to_string(),
                message: format!("JSON parsing error: {}", e),
            })?;
        // 事件依時間排序，同一時間保持原順序
        script.events.sort_by_key(|e| e.at_ms);
        Ok(script)
    }

    /// A short visit to the travel landing page: three reviews, a scroll
    /// down the page, a gallery peek, a bad then a good contact form, a hover
    /// over the chat button.
    pub fn travel_demo() -> Self {
        let reviews = vec![
            ReviewCard::new("Amaya P.", "The Ella train ride was unforgettable."),
            ReviewCard::new("Tom R.", "Our guide in Sigiriya knew every story."),
            ReviewCard::new("Keiko S.", "Whale watching in Mirissa, booked in minutes."),
        ];

        let reveal_targets = vec![
            RevealTarget {
                id: "destination-kandy".to_string(),
                rect: Rect { top: 600.0, height: 320.0 },
                lazy_image: false,
            },
            RevealTarget {
                id: "tour-cultural-triangle".to_string(),
                rect: Rect { top: 1400.0, height: 420.0 },
                lazy_image: false,
            },
            RevealTarget {
                id: "feature-guides".to_string(),
                rect: Rect { top: 2200.0, height: 260.0 },
                lazy_image: false,
            },
            RevealTarget {
                id: "gallery-galle-fort".to_string(),
                rect: Rect { top: 3000.0, height: 300.0 },
                lazy_image: true,
            },
        ];

        let at = |at_ms: u64, event: PageEvent| TimedEvent { at_ms, event };
        let events = vec![
            at(800, PageEvent::HamburgerClick),
            at(1500, PageEvent::NavLinkClick),
            at(2000, PageEvent::Scroll { y: 40.0 }),
            at(2004, PageEvent::Scroll { y: 420.0 }),
            at(2008, PageEvent::Scroll { y: 1100.0 }),
            at(4900, PageEvent::NextReview),
            at(6000, PageEvent::Scroll { y: 2600.0 }),
            at(7000, PageEvent::GalleryClick { src: "images/galle-fort.jpg".to_string() }),
            at(7500, PageEvent::LightboxClick { target: LightboxTarget::Image }),
            at(8000, PageEvent::LightboxClick { target: LightboxTarget::Backdrop }),
            at(
                9000,
                PageEvent::SubmitContact {
                    form: ContactForm {
                        name: "A".to_string(),
                        email: "amaya@example.lk".to_string(),
                        phone: String::new(),
                        message: "Do you run tours in July?".to_string(),
                    },
                },
            ),
            at(
                10000,
                PageEvent::SubmitContact {
                    form: ContactForm {
                        name: "Amaya".to_string(),
                        email: "amaya@example.lk".to_string(),
                        phone: "+94 77 123 4567".to_string(),
                        message: "Do you run tours in July?".to_string(),
                    },
                },
            ),
            at(11000, PageEvent::FloatButtonEnter),
            at(11400, PageEvent::FloatButtonLeave),
            at(
                12000,
                PageEvent::TourClick {
                    name: "Cultural Triangle".to_string(),
                    price: "$899".to_string(),
                },
            ),
        ];

        Self {
            viewport_height: 800.0,
            reviews,
            reveal_targets,
            events,
        }
    }
}

impl Validate for VisitScript {
    fn validate(&self) -> Result<()> {
        if self.reviews.is_empty() {
            return Err(SiteError::MissingConfigError {
                field: "reviews".to_string(),
            });
        }
        validation::validate_range("viewport_height", self.viewport_height, 1.0, f64::MAX)?;
        Ok(())
    }
}

/// Replays `events` on a virtual clock, then lets time run to `until`.
/// Events past `until` are skipped. Returns how many events were dispatched.
pub async fn replay_on_clock<U, F>(
    session: &mut PageSession<U, F>,
    clock: &ManualScheduler,
    events: &[TimedEvent],
    until: Duration,
) -> Result<usize>
where
    U: DisplayUnit + 'static,
    F: FormSubmitter,
{
    let mut dispatched = 0;
    for timed in events {
        let at = Duration::from_millis(timed.at_ms);
        if at > until {
            tracing::debug!(at_ms = timed.at_ms, "event after end of visit, skipped");
            continue;
        }
        clock.advance_to(at);
        session.dispatch(timed.event.clone()).await?;
        dispatched += 1;
    }
    clock.advance_to(until);
    Ok(dispatched)
}

/// Same as [`replay_on_clock`] but on wall-clock time; the session must be
/// driven by a [`crate::adapters::TokioScheduler`] on the current runtime.
pub async fn replay_realtime<U, F>(
    session: &mut PageSession<U, F>,
    events: &[TimedEvent],
    until: Duration,
) -> Result<usize>
where
    U: DisplayUnit + 'static,
    F: FormSubmitter,
{
    let start = tokio::time::Instant::now();
    let mut dispatched = 0;
    for timed in events {
        let at = Duration::from_millis(timed.at_ms);
        if at > until {
            continue;
        }
        tokio::time::sleep_until(start + at).await;
        session.dispatch(timed.event.clone()).await?;
        dispatched += 1;
    }
    tokio::time::sleep_until(start + until).await;
    Ok(dispatched)
}
