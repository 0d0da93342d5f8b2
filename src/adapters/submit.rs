use crate::core::lock_state;
use crate::domain::model::ContactForm;
use crate::domain::ports::FormSubmitter;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// Stand-in for a real backend: logs the form and keeps a copy.
#[derive(Debug, Default)]
pub struct SimulatedSubmitter {
    latency: Duration,
    sent: Mutex<Vec<ContactForm>>,
}

impl SimulatedSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<ContactForm> {
        lock_state(&self.sent).clone()
    }
}

#[async_trait]
impl FormSubmitter for SimulatedSubmitter {
    async fn submit(&self, form: &ContactForm) -> Result<()> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        tracing::info!(name = %form.name, email = %form.email, "📨 contact form submitted (simulated)");
        lock_state(&self.sent).push(form.clone());
        Ok(())
    }
}
