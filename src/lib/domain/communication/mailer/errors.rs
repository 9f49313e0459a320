//! Mailer errors

use std::io;

use lettre::address::AddressError;
use thiserror::Error;

use crate::domain::communication::email_addresses::EmailAddressError;

/// Mailer errors
///
/// Relay failures carry the transport error that caused them.
#[derive(Debug, Error)]
pub enum MailerError {
    /// A sender or recipient address, or a header, was rejected
    #[error("Invalid email address")]
    InvalidEmail,

    /// The attachment could not be read
    #[error("could not read attachment {file_name}")]
    Attachment {
        /// The path that was given for the attachment
        file_name: String,

        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The session with the relay could not be established
    #[error("could not connect to the SMTP server: {0}")]
    Connection(anyhow::Error),

    /// The relay rejected the account credentials
    #[error("could not log into the SMTP server: {0}")]
    Authentication(anyhow::Error),

    /// The relay rejected the envelope or the message data
    #[error("the SMTP server rejected the message: {0}")]
    Submission(anyhow::Error),

    /// The session could not be closed cleanly
    #[error("could not close the SMTP session: {0}")]
    Close(anyhow::Error),

    /// Unknown error
    #[error(transparent)]
    UnknownError(anyhow::Error),
}

impl MailerError {
    /// The delivery step that failed, for log messages
    pub fn step(&self) -> &'static str {
        match self {
            MailerError::InvalidEmail => "building message",
            MailerError::Attachment { .. } => "reading attachment",
            MailerError::Connection(_) => "connecting",
            MailerError::Authentication(_) => "logging in",
            MailerError::Submission(_) => "sending",
            MailerError::Close(_) => "closing",
            MailerError::UnknownError(_) => "unknown",
        }
    }
}

impl From<anyhow::Error> for MailerError {
    fn from(err: anyhow::Error) -> Self {
        MailerError::UnknownError(err)
    }
}

impl From<AddressError> for MailerError {
    fn from(_err: AddressError) -> Self {
        MailerError::InvalidEmail
    }
}

impl From<EmailAddressError> for MailerError {
    fn from(_err: EmailAddressError) -> Self {
        MailerError::InvalidEmail
    }
}

impl From<lettre::error::Error> for MailerError {
    fn from(err: lettre::error::Error) -> Self {
        MailerError::UnknownError(err.into())
    }
}
