//! Admissions-team notification for new enquiries.
//!
//! Delivery is best-effort: [`EnquiryNotifier::notify`] runs on a detached
//! task and only logs failures, so a broken mail server never fails the
//! enquiry request. Without SMTP settings the message is written to the log.

pub mod email;

use std::sync::Arc;

use imi_db::models::enquiry::Enquiry;

use self::email::{EmailConfig, EmailDelivery, EmailError};

/// Default recipient when `ENQUIRY_NOTIFY_TO` is not set.
pub const DEFAULT_NOTIFY_TO: &str = "admissions@innovativeminds.lk";

/// Subject and plain-text body of an enquiry notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnquiryEmail {
    pub subject: String,
    pub body: String,
}

pub struct EnquiryNotifier {
    delivery: Option<EmailDelivery>,
    recipient: String,
}

impl EnquiryNotifier {
    pub fn new(config: Option<EmailConfig>, recipient: impl Into<String>) -> Self {
        Self {
            delivery: config.map(EmailDelivery::new),
            recipient: recipient.into(),
        }
    }

    /// SMTP settings from [`EmailConfig::from_env`], recipient from
    /// `ENQUIRY_NOTIFY_TO`.
    pub fn from_env() -> Self {
        let recipient =
            std::env::var("ENQUIRY_NOTIFY_TO").unwrap_or_else(|_| DEFAULT_NOTIFY_TO.to_string());
        let config = EmailConfig::from_env();
        if config.is_none() {
            tracing::info!("SMTP_HOST not set, enquiry notifications will be logged only");
        }
        Self::new(config, recipient)
    }

    /// Log-only notifier.
    pub fn log_only() -> Self {
        Self::new(None, DEFAULT_NOTIFY_TO)
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn compose(enquiry: &Enquiry) -> EnquiryEmail {
        let mut body = format!(
            "New Enquiry Received - Institute of Innovative Minds\n\n\
             Name: {}\n\
             Email: {}\n\
             Phone: {}\n\
             Interested Program: {}\n",
            enquiry.name, enquiry.email, enquiry.phone, enquiry.program
        );
        if let Some(message) = &enquiry.message {
            body.push_str(&format!("Message: {message}\n"));
        }
        body.push_str("\nPlease respond to this enquiry as soon as possible.\n");

        EnquiryEmail {
            subject: format!("New Enquiry: {}", enquiry.program),
            body,
        }
    }

    /// Send (or log) the notification for one enquiry.
    pub async fn send(&self, enquiry: &Enquiry) -> Result<(), EmailError> {
        let EnquiryEmail { subject, body } = Self::compose(enquiry);

        match &self.delivery {
            Some(delivery) => {
                delivery
                    .deliver(&self.recipient, Some(&enquiry.email), &subject, body)
                    .await
            }
            None => {
                tracing::info!(
                    to = %self.recipient,
                    from = %email::from_address_from_env(),
                    subject = %subject,
                    body = %body,
                    "Email preview (SMTP not configured)"
                );
                Ok(())
            }
        }
    }

    /// Fire-and-forget [`send`](Self::send) on a detached task.
    pub fn notify(self: &Arc<Self>, enquiry: Enquiry) {
        let notifier = Arc::clone(self);
        tokio::spawn(async move {
            match notifier.send(&enquiry).await {
                Ok(()) => {
                    tracing::debug!(enquiry_id = enquiry.id, "Enquiry notification dispatched");
                }
                Err(e) => {
                    tracing::error!(
                        enquiry_id = enquiry.id,
                        error = %e,
                        "Failed to send enquiry notification"
                    );
                }
            }
        });
    }
}
