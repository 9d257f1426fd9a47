//! SMTP server replies.

use super::error::{MailError, MailResult};

/// A complete (possibly multi-line) server reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Three-digit reply code.
    pub code: u16,
    /// Text of each reply line, without code and separator.
    pub lines: Vec<String>,
}

impl Reply {
    /// 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code >= 200 && self.code < 300
    }

    /// Returns the full message as a single string.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Turns any reply other than `expected` into an error.
    pub(crate) fn expect(self, expected: u16) -> MailResult<Self> {
        if self.code == expected {
            Ok(self)
        } else {
            Err(MailError::smtp(self.code, self.text()))
        }
    }

    /// Turns a non-2xx reply into an error.
    pub(crate) fn expect_success(self) -> MailResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(MailError::smtp(self.code, self.text()))
        }
    }
}

/// Whether `line` ends a reply (`250 OK`) rather than continuing it (`250-SIZE`).
#[must_use]
pub fn is_last_line(line: &str) -> bool {
    line.as_bytes().get(3).is_none_or(|b| *b == b' ')
}

/// Parses the collected lines of one reply.
///
/// # Errors
///
/// Returns [`MailError::Protocol`] if a line is malformed or the codes of
/// the lines disagree.
pub fn parse_reply(lines: &[String]) -> MailResult<Reply> {
    let first = lines
        .first()
        .ok_or_else(|| MailError::Protocol("Empty reply".into()))?;

    let code = parse_code(first)?;
    let mut text = Vec::with_capacity(lines.len());
    for line in lines {
        if parse_code(line)? != code {
            return Err(MailError::Protocol(format!("Mixed reply codes: {line}")));
        }
        text.push(line.get(4..).unwrap_or_default().to_string());
    }

    Ok(Reply { code, lines: text })
}

fn parse_code(line: &str) -> MailResult<u16> {
    line.get(..3)
        .filter(|c| c.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|c| c.parse().ok())
        .ok_or_else(|| MailError::Protocol(format!("Invalid reply line: {line}")))
}
