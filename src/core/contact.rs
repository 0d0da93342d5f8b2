//! Contact form checks, tour inquiries and the toast alerts they raise.

use crate::config::toml_config::ContactConfig;
use crate::core::lock_state;
use crate::domain::model::{Alert, AlertKind, ContactForm};
use crate::domain::ports::{FormSubmitter, Scheduler, TimerHandle};
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{self, Validate};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const NAME_MESSAGE: &str = "Please enter a valid name (at least 2 characters)";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const MESSAGE_MESSAGE: &str = "Please enter a message (at least 10 characters)";
pub const THANK_YOU_MESSAGE: &str = "Thank you for your message! We will get back to you soon.";
pub const SUBMIT_FAILED_MESSAGE: &str =
    "Sorry, your message could not be sent. Please try again later.";

impl ContactForm {
    pub fn trimmed(&self) -> ContactForm {
        ContactForm {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }

    /// Checks name, email and message in that order; the first failure wins.
    /// Phone is optional and never checked.
    pub fn check(&self, rules: &ContactConfig) -> Result<()> {
        let form = self.trimmed();
        validation::validate_min_length("name", &form.name, rules.min_name_len, &name_message(rules))?;
        validation::validate_email("email", &form.email, EMAIL_MESSAGE)?;
        validation::validate_min_length(
            "message",
            &form.message,
            rules.min_message_len,
            &message_message(rules),
        )?;
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = ContactForm::default();
    }
}

impl Validate for ContactForm {
    fn validate(&self) -> Result<()> {
        self.check(&ContactConfig::default())
    }
}

fn name_message(rules: &ContactConfig) -> String {
    format!("Please enter a valid name (at least {} characters)", rules.min_name_len)
}

fn message_message(rules: &ContactConfig) -> String {
    format!("Please enter a message (at least {} characters)", rules.min_message_len)
}

pub fn tour_inquiry_message(tour_name: &str, tour_price: &str) -> String {
    format!(
        "Thank you for your interest in \"{}\" ({}). Please contact us to book this tour.",
        tour_name.trim(),
        tour_price.trim()
    )
}

#[derive(Debug, Default)]
struct AlertSlot {
    next_id: u64,
    current: Option<Alert>,
    timer: Option<TimerHandle>,
}

/// Toast area: at most one alert on screen, each removed after `dismiss_after`.
#[derive(Clone)]
pub struct AlertCenter {
    scheduler: Arc<dyn Scheduler>,
    dismiss_after: Duration,
    slot: Arc<Mutex<AlertSlot>>,
}

impl std::fmt::Debug for AlertCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertCenter")
            .field("dismiss_after", &self.dismiss_after)
            .field("current", &self.current())
            .finish()
    }
}

impl AlertCenter {
    pub fn new(scheduler: Arc<dyn Scheduler>, dismiss_after: Duration) -> Self {
        Self {
            scheduler,
            dismiss_after,
            slot: Arc::new(Mutex::new(AlertSlot::default())),
        }
    }

    pub fn current(&self) -> Option<Alert> {
        lock_state(&self.slot).current.clone()
    }

    /// Replaces whatever alert is showing.
    pub fn show(&self, kind: AlertKind, message: impl Into<String>) -> Alert {
        let mut slot = lock_state(&self.slot);
        if let Some(previous) = slot.timer.take() {
            previous.cancel();
        }
        slot.next_id += 1;
        let alert = Alert {
            id: slot.next_id,
            kind,
            message: message.into(),
        };
        tracing::info!(id = alert.id, kind = ?alert.kind, "🔔 {}", alert.message);

        let id = alert.id;
        let target = Arc::clone(&self.slot);
        let timer = self.scheduler.schedule_once(
            self.dismiss_after,
            Box::new(move || {
                let mut slot = lock_state(&target);
                // 只移除自己顯示的那一則
                if slot.current.as_ref().map(|a| a.id) == Some(id) {
                    slot.current = None;
                    slot.timer = None;
                    tracing::debug!(id, "alert dismissed");
                }
            }),
        );

        slot.current = Some(alert.clone());
        slot.timer = Some(timer);
        alert
    }

    pub fn dismiss(&self) {
        let mut slot = lock_state(&self.slot);
        if let Some(timer) = slot.timer.take() {
            timer.cancel();
        }
        slot.current = None;
    }
}

/// A tour "Book now" click: the alert to show and the anchor to scroll to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourInquiry {
    pub alert: Alert,
    pub scroll_to: String,
}

/// Handles the contact section: form submission and tour inquiries.
pub struct ContactDesk<F: FormSubmitter> {
    rules: ContactConfig,
    submitter: F,
    alerts: AlertCenter,
}

impl<F: FormSubmitter> ContactDesk<F> {
    pub fn new(rules: ContactConfig, submitter: F, alerts: AlertCenter) -> Self {
        Self {
            rules,
            submitter,
            alerts,
        }
    }

    pub fn alerts(&self) -> &AlertCenter {
        &self.alerts
    }

    pub fn submitter(&self) -> &F {
        &self.submitter
    }

    /// Validates and sends the form. Either way an alert is shown; on success
    /// the form is cleared, on failure it is left as typed.
    pub async fn submit(&self, form: &mut ContactForm) -> Result<Alert> {
        if let Err(e) = form.check(&self.rules) {
            tracing::warn!("❌ contact form rejected: {}", e);
            self.alerts.show(AlertKind::Error, e.user_friendly_message());
            return Err(e);
        }

        if let Err(e) = self.submitter.submit(&form.trimmed()).await {
            tracing::error!("❌ contact form submission failed: {}", e);
            self.alerts.show(AlertKind::Error, SUBMIT_FAILED_MESSAGE);
            return Err(e);
        }

        let alert = self.alerts.show(AlertKind::Success, THANK_YOU_MESSAGE);
        form.reset();
        Ok(alert)
    }

    pub fn tour_inquiry(&self, tour_name: &str, tour_price: &str, contact_anchor: &str) -> TourInquiry {
        let alert = self
            .alerts
            .show(AlertKind::Success, tour_inquiry_message(tour_name, tour_price));
        TourInquiry {
            alert,
            scroll_to: contact_anchor.to_string(),
        }
    }
}

impl<F: FormSubmitter> std::fmt::Debug for ContactDesk<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactDesk")
            .field("rules", &self.rules)
            .field("alerts", &self.alerts)
            .finish()
    }
}

/// Turns a submit error into the field it points at, if any.
pub fn rejected_field(err: &SiteError) -> Option<&str> {
    match err {
        SiteError::ValidationError { field, .. } => Some(field.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::ManualScheduler;
    use crate::adapters::submit::SimulatedSubmitter;
    use async_trait::async_trait;

    struct DownBackend;

    #[async_trait]
    impl FormSubmitter for DownBackend {
        async fn submit(&self, _form: &ContactForm) -> Result<()> {
            Err(SiteError::SubmissionError {
                message: "backend unavailable".to_string(),
            })
        }
    }

    fn desk<F: FormSubmitter>(submitter: F) -> ContactDesk<F> {
        let alerts = AlertCenter::new(
            Arc::new(ManualScheduler::new()),
            Duration::from_millis(3000),
        );
        ContactDesk::new(ContactConfig::default(), submitter, alerts)
    }

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            phone: String::new(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_first_failure_wins() {
        let rules = ContactConfig::default();
        let err = form("J", "bad", "short").check(&rules).unwrap_err();
        assert_eq!(rejected_field(&err), Some("name"));
        assert_eq!(err.user_friendly_message(), NAME_MESSAGE);

        let err = form("Jo", "bad", "short").check(&rules).unwrap_err();
        assert_eq!(rejected_field(&err), Some("email"));

        let err = form("Jo", "jo@example.com", "short").check(&rules).unwrap_err();
        assert_eq!(rejected_field(&err), Some("message"));
        assert_eq!(err.user_friendly_message(), MESSAGE_MESSAGE);
    }

    #[test]
    fn test_fields_are_trimmed() {
        let f = form("  A  ", " jo@example.com ", "   hello world   ");
        assert!(f.validate().is_err());

        let f = form(" Ann ", " ann@example.com ", "  I'd like to visit Kandy  ");
        assert!(f.validate().is_ok());
        assert_eq!(f.trimmed().email, "ann@example.com");
    }

    #[test]
    fn test_custom_minimums_in_message() {
        let rules = ContactConfig {
            min_name_len: 3,
            min_message_len: 20,
        };
        let err = form("Jo", "jo@example.com", "a long enough message").check(&rules).unwrap_err();
        assert_eq!(
            err.user_friendly_message(),
            "Please enter a valid name (at least 3 characters)"
        );
    }

    #[test]
    fn test_tour_inquiry_text() {
        assert_eq!(
            tour_inquiry_message("Cultural Triangle ", "$899"),
            "Thank you for your interest in \"Cultural Triangle\" ($899). Please contact us to book this tour."
        );
    }

    #[test]
    fn test_alert_auto_dismisses() {
        let clock = ManualScheduler::new();
        let alerts = AlertCenter::new(Arc::new(clock.clone()), Duration::from_millis(3000));

        alerts.show(AlertKind::Success, "hello");
        clock.advance(Duration::from_millis(2999));
        assert!(alerts.current().is_some());
        clock.advance(Duration::from_millis(1));
        assert!(alerts.current().is_none());
    }

    #[test]
    fn test_new_alert_replaces_old_and_keeps_its_own_timer() {
        let clock = ManualScheduler::new();
        let alerts = AlertCenter::new(Arc::new(clock.clone()), Duration::from_millis(3000));

        let first = alerts.show(AlertKind::Error, "first");
        clock.advance(Duration::from_millis(2000));
        let second = alerts.show(AlertKind::Success, "second");
        assert_ne!(first.id, second.id);

        // 第一則的計時器不能把第二則移除
        clock.advance(Duration::from_millis(1500));
        assert_eq!(alerts.current(), Some(second));
        clock.advance(Duration::from_millis(1500));
        assert!(alerts.current().is_none());
    }

    #[tokio::test]
    async fn test_successful_submit_resets_form() {
        let desk = desk(SimulatedSubmitter::new());
        let mut typed = form(" Ruwan ", "ruwan@example.lk", "Is the Kandy tour running in August?");

        let alert = desk.submit(&mut typed).await.unwrap();
        assert_eq!(alert.kind, AlertKind::Success);
        assert_eq!(alert.message, THANK_YOU_MESSAGE);
        assert_eq!(typed, ContactForm::default());
        assert_eq!(desk.submitter().sent()[0].name, "Ruwan");
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_form_and_apologises() {
        let desk = desk(DownBackend);
        let mut typed = form("Ruwan", "ruwan@example.lk", "Is the Kandy tour running in August?");
        let before = typed.clone();

        let err = desk.submit(&mut typed).await.unwrap_err();
        assert!(matches!(err, SiteError::SubmissionError { .. }));
        assert_eq!(typed, before);

        let alert = desk.alerts().current().unwrap();
        assert_eq!(alert.kind, AlertKind::Error);
        assert_eq!(alert.message, SUBMIT_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_rejected_form_is_not_sent_or_cleared() {
        let desk = desk(SimulatedSubmitter::new());
        let mut typed = form("Ruwan", "ruwan@", "Is the Kandy tour running in August?");
        let before = typed.clone();

        let err = desk.submit(&mut typed).await.unwrap_err();
        assert_eq!(rejected_field(&err), Some("email"));
        assert_eq!(typed, before);
        assert!(desk.submitter().sent().is_empty());
        assert_eq!(desk.alerts().current().unwrap().message, EMAIL_MESSAGE);
    }
}
