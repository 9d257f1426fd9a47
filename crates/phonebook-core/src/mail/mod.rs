//! Mail delivery for contacting people in the phonebook.
//!
//! [`send_message`] opens one SMTP session per message using the
//! configured [`SmtpCredentials`], authenticates and delivers.

mod error;
mod message;
mod reply;
mod transport;

pub use error::{MailError, MailResult};
pub use message::OutgoingMessage;
pub use reply::Reply;
pub use transport::SmtpSession;

use chrono::Utc;
use tracing::info;

use crate::config::SmtpCredentials;

/// Send `message` through the server described by `credentials`.
///
/// Authentication is skipped when no username is configured.
///
/// # Errors
///
/// Returns an error if connecting, authenticating or delivering fails.
pub async fn send_message(
    credentials: &SmtpCredentials,
    message: &OutgoingMessage,
) -> MailResult<()> {
    let mut session =
        SmtpSession::open(&credentials.host, credentials.port, credentials.security()).await?;

    if !credentials.username.is_empty() {
        session
            .authenticate(&credentials.username, &credentials.password)
            .await?;
    }

    session
        .deliver(&message.from, &message.to, &message.to_rfc5322(Utc::now()))
        .await?;
    session.quit().await?;

    info!("Sent email to {}", message.to);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::Security;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use tokio::net::TcpListener;

    const AUTH_PLAIN_LOGIN: &[u8] = b"250-test.local\r\n250-SIZE 1000000\r\n250 AUTH PLAIN LOGIN\r\n";
    const AUTH_LOGIN_ONLY: &[u8] = b"250-test.local\r\n250 AUTH LOGIN\r\n";

    /// Plays the server side of one conversation, returning what the client sent.
    async fn scripted_server(
        listener: TcpListener,
        ehlo: &'static [u8],
        reject_rcpt: bool,
    ) -> Vec<String> {
        let (socket, _) = listener.accept().await.unwrap();
        let (read, mut write) = socket.into_split();
        let mut reader = BufReader::new(read);
        let mut received = Vec::new();

        write.write_all(b"220 test.local ESMTP\r\n").await.unwrap();
        let mut in_data = false;
        let mut login_lines = 0;
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).await.unwrap() == 0 {
                break;
            }
            let line = line.trim_end().to_string();
            received.push(line.clone());

            if in_data {
                if line == "." {
                    in_data = false;
                    write.write_all(b"250 Queued\r\n").await.unwrap();
                }
                continue;
            }

            if login_lines > 0 {
                login_lines -= 1;
                let reply: &[u8] = if login_lines > 0 {
                    b"334 UGFzc3dvcmQ6\r\n"
                } else {
                    b"235 Authenticated\r\n"
                };
                write.write_all(reply).await.unwrap();
                continue;
            }

            let reply: &[u8] = match line.split_whitespace().next().unwrap_or_default() {
                "EHLO" => ehlo,
                "AUTH" if line == "AUTH LOGIN" => {
                    login_lines = 2;
                    b"334 VXNlcm5hbWU6\r\n"
                }
                "AUTH" => b"235 Authenticated\r\n",
                "MAIL" => b"250 OK\r\n",
                "RCPT" if reject_rcpt => b"550 No such user\r\n",
                "RCPT" => b"250 OK\r\n",
                "DATA" => {
                    in_data = true;
                    b"354 Go ahead\r\n"
                }
                "QUIT" => {
                    write.write_all(b"221 Bye\r\n").await.unwrap();
                    break;
                }
                _ => b"500 Unknown\r\n",
            };
            write.write_all(reply).await.unwrap();
        }
        received
    }

    fn credentials(port: u16) -> SmtpCredentials {
        SmtpCredentials {
            host: "127.0.0.1".to_string(),
            port,
            username: "ana".to_string(),
            password: "secret".to_string(),
            from: "ana@example.com".to_string(),
            security: Some(Security::None),
        }
    }

    #[tokio::test]
    async fn test_send_message_conversation() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(scripted_server(listener, AUTH_PLAIN_LOGIN, false));

        let message =
            OutgoingMessage::new("ana@example.com", "ivan@example.com", "Hello", "Hi Ivan\n.")
                .unwrap();
        send_message(&credentials(port), &message).await.unwrap();

        let received = server.await.unwrap();
        assert_eq!(received[0], "EHLO localhost");
        assert!(received[1].starts_with("AUTH PLAIN "));
        assert!(received.contains(&"MAIL FROM:<ana@example.com>".to_string()));
        assert!(received.contains(&"RCPT TO:<ivan@example.com>".to_string()));
        assert!(received.contains(&"Subject: Hello".to_string()));
        assert!(received.contains(&"..".to_string()));
        assert_eq!(received.last().map(String::as_str), Some("QUIT"));
    }

    #[tokio::test]
    async fn test_auth_login_when_plain_not_offered() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(scripted_server(listener, AUTH_LOGIN_ONLY, false));

        let message =
            OutgoingMessage::new("ana@example.com", "ivan@example.com", "Hello", "Hi").unwrap();
        send_message(&credentials(port), &message).await.unwrap();

        let received = server.await.unwrap();
        assert_eq!(
            &received[..4],
            ["EHLO localhost", "AUTH LOGIN", "YW5h", "c2VjcmV0"]
        );
        assert!(received.contains(&"RCPT TO:<ivan@example.com>".to_string()));
        assert_eq!(received.last().map(String::as_str), Some("QUIT"));
    }

    #[tokio::test]
    async fn test_rejected_recipient_is_an_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(scripted_server(listener, AUTH_PLAIN_LOGIN, true));

        let message =
            OutgoingMessage::new("ana@example.com", "ghost@example.com", "Hello", "Hi").unwrap();
        let err = send_message(&credentials(port), &message).await.unwrap_err();
        assert!(matches!(err, MailError::Smtp { code: 550, .. }));

        drop(server);
    }

    #[tokio::test]
    async fn test_starttls_required_but_not_offered() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(scripted_server(listener, AUTH_PLAIN_LOGIN, false));

        let err = SmtpSession::open("127.0.0.1", port, Security::StartTls)
            .await
            .unwrap_err();
        assert!(matches!(err, MailError::NotSupported(_)));

        drop(server);
    }
}
