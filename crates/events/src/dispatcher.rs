//! Best-effort, bounded-concurrency notification fan-out.
//!
//! [`NotificationDispatcher`] sends a batch of emails concurrently through a
//! shared [`Mailer`]. A semaphore caps in-flight sends across the whole
//! process and every send is bounded by a timeout. Failures are logged and
//! counted, never returned: a notification must not fail the operation that
//! triggered it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::email::EmailError;
use crate::mailer::{Mailer, OutgoingEmail};

/// Default number of concurrent sends.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Default per-send timeout.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of one [`NotificationDispatcher::dispatch`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub sent: usize,
    pub failed: usize,
}

pub struct NotificationDispatcher {
    mailer: Arc<dyn Mailer>,
    permits: Arc<Semaphore>,
    send_timeout: Duration,
}

impl NotificationDispatcher {
    /// A zero `concurrency` is raised to one.
    pub fn new(mailer: Arc<dyn Mailer>, concurrency: usize, send_timeout: Duration) -> Self {
        Self {
            mailer,
            permits: Arc::new(Semaphore::new(concurrency.max(1))),
            send_timeout,
        }
    }

    /// The mailer behind this dispatcher, for sends whose failure matters.
    pub fn mailer(&self) -> &Arc<dyn Mailer> {
        &self.mailer
    }

    /// Send every email concurrently and wait for all of them to finish.
    pub async fn dispatch(&self, emails: Vec<OutgoingEmail>) -> DispatchReport {
        let sends = emails.into_iter().map(|email| self.send_one(email));
        let results = futures::future::join_all(sends).await;

        let mut report = DispatchReport::default();
        for result in results {
            match result {
                Ok(()) => report.sent += 1,
                Err(_) => report.failed += 1,
            }
        }
        report
    }

    async fn send_one(&self, email: OutgoingEmail) -> Result<(), EmailError> {
        let to = email.to.clone();
        let subject = email.subject.clone();

        let result = match self.permits.acquire().await {
            Ok(_permit) => match tokio::time::timeout(self.send_timeout, self.mailer.send(email))
                .await
            {
                Ok(res) => res,
                Err(_) => Err(EmailError::Timeout(self.send_timeout.as_secs())),
            },
            Err(_) => Err(EmailError::Build("dispatcher is shut down".to_string())),
        };

        if let Err(ref e) = result {
            tracing::warn!(to = %to, subject = %subject, error = %e, "Notification email failed");
        }
        result
    }
}
