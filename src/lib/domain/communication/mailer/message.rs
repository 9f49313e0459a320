//! Email message

use std::{fs, path::Path};

use crate::domain::communication::{email_addresses::EmailAddress, mailer::MailerError};

/// Content type given to every attachment, whatever the file holds
pub const ATTACHMENT_CONTENT_TYPE: &str = "video/x-matroska";

/// A file attached to an outbound message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    file_name: String,
    content: Vec<u8>,
}

impl Attachment {
    /// Create an attachment from a name and its raw content
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content,
        }
    }

    /// Read the whole file at `path` into an attachment named after its last
    /// path component.
    pub fn from_path(path: &Path) -> Result<Self, MailerError> {
        let content = fs::read(path).map_err(|source| MailerError::Attachment {
            file_name: path.display().to_string(),
            source,
        })?;

        Ok(Self::new(attachment_file_name(path), content))
    }

    /// The name given in the `Content-Disposition` header
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The raw file content
    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

/// Strips any directory components from `path`.
///
/// `/tmp/reports/out.mkv` becomes `out.mkv`.
pub fn attachment_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Email message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundMessage {
    /// The recipient of the email
    pub to: EmailAddress,

    /// The subject of the email
    pub subject: String,

    /// The plain text body of the email
    pub body: String,

    /// The single attached file, if any
    pub attachment: Option<Attachment>,
}

impl OutboundMessage {
    /// A plain text message
    pub fn plain(to: EmailAddress, subject: &str, body: &str) -> Self {
        Self {
            to,
            subject: subject.to_string(),
            body: body.to_string(),
            attachment: None,
        }
    }

    /// A plain text message carrying one attachment
    pub fn with_attachment(
        to: EmailAddress,
        subject: &str,
        body: &str,
        attachment: Attachment,
    ) -> Self {
        Self {
            attachment: Some(attachment),
            ..Self::plain(to, subject, body)
        }
    }
}
