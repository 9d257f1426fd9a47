//! Composing and sending an email to a contact.

use anyhow::Result;
use phonebook_core::validation::validate_not_blank;
use phonebook_core::{OutgoingMessage, SmtpCredentials, send_message};
use tracing::{error, warn};

use crate::console::Console;
use crate::strings;

/// Sends emails through the configured SMTP server.
#[derive(Debug, Clone)]
pub struct EmailSender {
    credentials: Option<SmtpCredentials>,
}

impl EmailSender {
    /// Creates a sender; without credentials every send fails.
    #[must_use]
    pub const fn new(credentials: Option<SmtpCredentials>) -> Self {
        Self { credentials }
    }

    /// Asks for a subject and body and sends them to `destination`.
    ///
    /// Returns whether the message was delivered. Delivery failures are
    /// logged and shown, never returned.
    ///
    /// # Errors
    ///
    /// Returns an error only if the console itself fails.
    pub async fn send_email(
        &self,
        console: &mut dyn Console,
        destination: &str,
    ) -> Result<bool> {
        let Some(credentials) = &self.credentials else {
            warn!("No SMTP credentials configured");
            console.print(strings::EMAIL_NOT_CONFIGURED)?;
            return Ok(false);
        };

        let subject = console.input(strings::EMAIL_SUBJECT, None, &validate_not_blank)?;
        let body = console.input(strings::EMAIL_BODY, None, &validate_not_blank)?;

        let message = match OutgoingMessage::new(&credentials.from, destination, subject, body) {
            Ok(message) => message,
            Err(e) => {
                error!("Cannot compose email to {destination}: {e}");
                console.print(&e.to_string())?;
                return Ok(false);
            }
        };

        match send_message(credentials, &message).await {
            Ok(()) => Ok(true),
            Err(e) => {
                error!("Failed to send email to {destination}: {e}");
                console.print(&e.to_string())?;
                Ok(false)
            }
        }
    }
}
