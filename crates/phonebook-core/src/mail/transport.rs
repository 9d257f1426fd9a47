//! Minimal SMTP client session: connect, authenticate, deliver one message.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use rustls::pki_types::ServerName;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tracing::debug;

use super::error::{MailError, MailResult};
use super::reply::{Reply, is_last_line, parse_reply};
use crate::config::Security;

/// Name announced in EHLO.
const CLIENT_NAME: &str = "localhost";

/// SMTP stream (TCP or TLS).
#[derive(Debug)]
enum SmtpStream {
    Tcp(BufReader<TcpStream>),
    Tls(Box<BufReader<TlsStream<TcpStream>>>),
}

impl SmtpStream {
    async fn read_line(&mut self) -> MailResult<String> {
        let mut line = String::new();
        let read = match self {
            Self::Tcp(reader) => reader.read_line(&mut line).await?,
            Self::Tls(reader) => reader.read_line(&mut line).await?,
        };
        if read == 0 {
            return Err(MailError::Protocol("Connection closed by server".into()));
        }
        Ok(line.trim_end().to_string())
    }

    async fn write_all(&mut self, data: &[u8]) -> MailResult<()> {
        match self {
            Self::Tcp(reader) => {
                reader.get_mut().write_all(data).await?;
                reader.get_mut().flush().await?;
            }
            Self::Tls(reader) => {
                reader.get_mut().write_all(data).await?;
                reader.get_mut().flush().await?;
            }
        }
        Ok(())
    }

    async fn into_tls(self, host: &str) -> MailResult<Self> {
        match self {
            Self::Tcp(reader) => Ok(Self::Tls(Box::new(BufReader::new(
                tls_handshake(host, reader.into_inner()).await?,
            )))),
            Self::Tls(_) => Err(MailError::Protocol("Already using TLS".into())),
        }
    }
}

async fn tls_handshake(host: &str, tcp: TcpStream) -> MailResult<TlsStream<TcpStream>> {
    let root_store = RootCertStore {
        roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
    };
    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    let server_name = ServerName::try_from(host.to_string())
        .map_err(|_| MailError::Protocol(format!("Invalid hostname: {host}")))?;

    Ok(TlsConnector::from(Arc::new(config))
        .connect(server_name, tcp)
        .await?)
}

/// An open, greeted SMTP connection.
#[derive(Debug)]
pub struct SmtpSession {
    stream: SmtpStream,
    extensions: Vec<String>,
}

impl SmtpSession {
    /// Connects, reads the greeting and says EHLO, upgrading with STARTTLS
    /// when `security` asks for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection, TLS handshake or greeting fails,
    /// or if STARTTLS is required but not offered.
    pub async fn open(host: &str, port: u16, security: Security) -> MailResult<Self> {
        let tcp = TcpStream::connect((host, port)).await?;
        let stream = if security == Security::Tls {
            SmtpStream::Tls(Box::new(BufReader::new(tls_handshake(host, tcp).await?)))
        } else {
            SmtpStream::Tcp(BufReader::new(tcp))
        };

        let mut session = Self {
            stream,
            extensions: Vec::new(),
        };
        session.read_reply().await?.expect(220)?;
        session.ehlo().await?;

        if security == Security::StartTls {
            if !session.supports("STARTTLS") {
                return Err(MailError::NotSupported("STARTTLS".into()));
            }
            session.command("STARTTLS").await?.expect(220)?;
            session.stream = session.stream.into_tls(host).await?;
            session.ehlo().await?;
        }

        debug!("SMTP session open with {host}:{port} ({security:?})");
        Ok(session)
    }

    async fn ehlo(&mut self) -> MailResult<()> {
        let reply = self
            .command(&format!("EHLO {CLIENT_NAME}"))
            .await?
            .expect_success()?;
        // First line is the server greeting, the rest are extensions.
        self.extensions = reply
            .lines
            .iter()
            .skip(1)
            .map(|l| l.to_ascii_uppercase())
            .collect();
        Ok(())
    }

    /// Whether the server advertised an extension keyword (e.g. `STARTTLS`).
    #[must_use]
    pub fn supports(&self, keyword: &str) -> bool {
        self.extensions
            .iter()
            .any(|ext| ext.split_whitespace().next() == Some(keyword))
    }

    /// Whether the server's AUTH extension lists `mechanism`.
    fn supports_auth(&self, mechanism: &str) -> bool {
        self.extensions.iter().any(|ext| {
            let mut words = ext.split_whitespace();
            words.next() == Some("AUTH") && words.any(|m| m == mechanism)
        })
    }

    /// Authenticates with PLAIN, or LOGIN when only that is offered.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the credentials.
    pub async fn authenticate(&mut self, username: &str, password: &str) -> MailResult<()> {
        if !self.supports_auth("PLAIN") && self.supports_auth("LOGIN") {
            self.command("AUTH LOGIN").await?.expect(334)?;
            self.command(&BASE64.encode(username)).await?.expect(334)?;
            self.command(&BASE64.encode(password)).await?.expect(235)?;
            return Ok(());
        }

        let token = BASE64.encode(format!("\0{username}\0{password}"));
        self.command(&format!("AUTH PLAIN {token}"))
            .await?
            .expect(235)?;
        Ok(())
    }

    /// Runs one mail transaction for `data` from `from` to `to`.
    ///
    /// `data` is normalized to CRLF line endings and dot-stuffed.
    ///
    /// # Errors
    ///
    /// Returns an error if the server refuses the sender, the recipient or
    /// the message.
    pub async fn deliver(&mut self, from: &str, to: &str, data: &str) -> MailResult<()> {
        self.command(&format!("MAIL FROM:<{from}>"))
            .await?
            .expect_success()?;
        self.command(&format!("RCPT TO:<{to}>"))
            .await?
            .expect_success()?;
        self.command("DATA").await?.expect(354)?;

        self.stream.write_all(&dot_stuff(data)).await?;
        self.read_reply().await?.expect_success()?;
        Ok(())
    }

    /// Sends QUIT and closes the connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the QUIT command fails.
    pub async fn quit(mut self) -> MailResult<()> {
        self.command("QUIT").await?.expect(221)?;
        Ok(())
    }

    async fn command(&mut self, line: &str) -> MailResult<Reply> {
        self.stream.write_all(format!("{line}\r\n").as_bytes()).await?;
        self.read_reply().await
    }

    async fn read_reply(&mut self) -> MailResult<Reply> {
        let mut lines = Vec::new();
        loop {
            let line = self.stream.read_line().await?;
            if line.is_empty() {
                continue;
            }
            let last = is_last_line(&line);
            lines.push(line);
            if last {
                break;
            }
        }
        parse_reply(&lines)
    }
}

/// Message body as sent after DATA, terminated by `CRLF.CRLF`.
fn dot_stuff(data: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + 8);
    for line in data.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.starts_with('.') {
            out.push(b'.');
        }
        out.extend_from_slice(line.as_bytes());
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(b".\r\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_stuff() {
        let data = dot_stuff("Hi\n.hidden\r\nbye");
        assert_eq!(data, b"Hi\r\n..hidden\r\nbye\r\n.\r\n");
    }
}
