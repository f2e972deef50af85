use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use thiserror::Error;

/// Notification transport failure. Always non-fatal: the sweep logs it and
/// moves on to the next contract.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("SMTP transport failure: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Outbound notification channel used by the expiry sweep.
pub trait Notifier: Send + Sync {
    fn notify(&self, recipient: &str, subject: &str, body: &str) -> Result<(), DeliveryError>;
}

/// Sends reminders and expiry notices over SMTP.
pub struct SmtpNotifier {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpNotifier {
    /// Build from `SMTP_HOST`, `SMTP_USERNAME`, `SMTP_PASSWORD` and
    /// `SMTP_FROM`. Returns `None` when SMTP is not configured.
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("SMTP_HOST").ok()?;
        let username = std::env::var("SMTP_USERNAME").ok()?;
        let password = std::env::var("SMTP_PASSWORD").ok()?;
        let from = std::env::var("SMTP_FROM").ok()?;

        let from: Mailbox = match from.parse() {
            Ok(mailbox) => mailbox,
            Err(e) => {
                tracing::warn!("Invalid SMTP_FROM address: {e}");
                return None;
            }
        };

        let transport = match SmtpTransport::relay(&host) {
            Ok(builder) => builder
                .credentials(Credentials::new(username, password))
                .build(),
            Err(e) => {
                tracing::warn!("Failed to configure SMTP relay {host}: {e}");
                return None;
            }
        };

        Some(SmtpNotifier { transport, from })
    }
}

impl Notifier for SmtpNotifier {
    fn notify(&self, recipient: &str, subject: &str, body: &str) -> Result<(), DeliveryError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient.parse()?)
            .subject(subject)
            .body(body.to_string())?;

        self.transport.send(&message)?;
        Ok(())
    }
}

/// Fallback when SMTP is not configured: logs the notification instead of
/// sending it, so sweeps still run in development.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, recipient: &str, subject: &str, _body: &str) -> Result<(), DeliveryError> {
        tracing::info!(%recipient, %subject, "notification (SMTP not configured)");
        Ok(())
    }
}
