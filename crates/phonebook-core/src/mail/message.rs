//! Outgoing message composition.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use super::error::{MailError, MailResult};
use crate::validation::is_email_address;

/// A single plain-text email to one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    /// Sender address.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain text body.
    pub body: String,
}

impl OutgoingMessage {
    /// Creates a message, checking both addresses.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::InvalidAddress`] if either address is malformed.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> MailResult<Self> {
        let from = from.into().trim().to_string();
        let to = to.into().trim().to_string();

        for address in [&from, &to] {
            if !is_email_address(address) {
                return Err(MailError::InvalidAddress(address.clone()));
            }
        }

        Ok(Self {
            from,
            to,
            subject: subject.into(),
            body: body.into(),
        })
    }

    /// Builds the RFC 5322 formatted message.
    #[must_use]
    pub fn to_rfc5322(&self, date: DateTime<Utc>) -> String {
        let mut message = String::new();

        let _ = write!(message, "From: {}\r\n", self.from);
        let _ = write!(message, "To: {}\r\n", self.to);
        // Header values must stay on one line.
        let subject = self.subject.replace(['\r', '\n'], " ");
        let _ = write!(message, "Subject: {subject}\r\n");
        let _ = write!(message, "Date: {}\r\n", date.to_rfc2822());
        message.push_str("MIME-Version: 1.0\r\n");
        message.push_str("Content-Type: text/plain; charset=utf-8\r\n");
        message.push_str("Content-Transfer-Encoding: 8bit\r\n");
        message.push_str("\r\n");
        message.push_str(&self.body);

        message
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_rejects_bad_addresses() {
        assert!(matches!(
            OutgoingMessage::new("me@example.com", "not-an-address", "Hi", "Body"),
            Err(MailError::InvalidAddress(addr)) if addr == "not-an-address"
        ));
        assert!(OutgoingMessage::new("", "ana@example.com", "Hi", "Body").is_err());
    }

    #[test]
    fn test_long_sender_address() {
        let from = "notifications.department.of.contacts@mail.long-company-name.example.com";
        assert!(from.len() > crate::validation::MAX_FIELD_LEN);
        assert!(OutgoingMessage::new(from, "ana@example.com", "Hi", "Body").is_ok());
    }

    #[test]
    fn test_rfc5322_layout() {
        let message =
            OutgoingMessage::new("me@example.com", " ana@example.com ", "Hello\nthere", "Hi Ana")
                .unwrap();
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let text = message.to_rfc5322(date);

        assert!(text.starts_with("From: me@example.com\r\nTo: ana@example.com\r\n"));
        assert!(text.contains("Subject: Hello there\r\n"));
        assert!(text.contains("Date: Fri, "));
        assert!(text.contains("Mar 2024 09:30:00 +0000\r\n"));
        assert!(text.ends_with("\r\n\r\nHi Ana"));
    }
}
