//! Outbound email for the Belva backend.
//!
//! - [`Mailer`] is the seam every email goes through, with an SMTP
//!   implementation ([`SmtpMailer`]) and a log-only fallback ([`LogMailer`])
//!   used when no relay is configured.
//! - [`NotificationDispatcher`] fans out best-effort notifications with a
//!   process-wide concurrency bound and a per-send timeout.

pub mod dispatcher;
pub mod email;
pub mod mailer;

pub use dispatcher::{DispatchReport, NotificationDispatcher};
pub use email::{EmailConfig, EmailError, SmtpMailer};
pub use mailer::{LogMailer, Mailer, OutgoingEmail};
