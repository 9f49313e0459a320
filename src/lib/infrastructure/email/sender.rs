//! Mail sender
//!
//! Builds messages for a fixed sender and delivers each one over its own
//! relay session: connect, log in, send, close.

use std::{path::Path, sync::Arc};

use anyhow::anyhow;
use lettre::{
    message::{
        header::{ContentTransferEncoding, ContentType},
        Attachment as AttachmentPart, Body, Mailbox, Message, MultiPart, SinglePart,
    },
    Address,
};

use crate::{
    domain::communication::{
        email_addresses::EmailAddress,
        log::MailLog,
        mailer::{Attachment, Mailer, MailerError, OutboundMessage, ATTACHMENT_CONTENT_TYPE},
    },
    infrastructure::{
        email::{
            config::{ConfigError, MailerConfig},
            smtp::{Relay, RelaySession, SmtpRelay},
        },
        logging::TracingLog,
    },
};

/// Sends mail from one sender through one SMTP account
#[derive(Debug, Clone)]
pub struct MailSender<R = SmtpRelay, L = TracingLog>
where
    R: Relay,
    L: MailLog,
{
    config: MailerConfig,
    sender_display_name: String,
    sender_address: String,
    relay: Arc<R>,
    log: Arc<L>,
}

impl MailSender {
    /// Create a new mail sender from a JSON settings file.
    ///
    /// # Arguments
    /// * `config_path` - Path of the file holding `SMTP_ACCOUNT`,
    ///   `SMTP_PASSWORD`, `SMTP_SERVER` and `SMTP_PORT`.
    /// * `sender_display_name` - The name shown in the `From` header.
    /// * `sender_address` - The address shown in the `From` header and used
    ///   as the envelope sender.
    ///
    /// # Returns
    /// A [`Result`] which is [`Err`] containing a [`ConfigError`] if the
    /// settings file is missing, unreadable or incomplete.
    pub fn new(
        config_path: impl AsRef<Path>,
        sender_display_name: &str,
        sender_address: &str,
    ) -> Result<Self, ConfigError> {
        let config = MailerConfig::from_file(config_path)?;

        Ok(Self::with_parts(
            config,
            sender_display_name,
            sender_address,
            SmtpRelay::new(),
            TracingLog,
        ))
    }
}

impl<R, L> MailSender<R, L>
where
    R: Relay,
    L: MailLog,
{
    /// Create a new mail sender from a loaded configuration, a relay and a log
    pub fn with_parts(
        config: MailerConfig,
        sender_display_name: &str,
        sender_address: &str,
        relay: R,
        log: L,
    ) -> Self {
        Self {
            config,
            sender_display_name: sender_display_name.to_string(),
            sender_address: sender_address.to_string(),
            relay: Arc::new(relay),
            log: Arc::new(log),
        }
    }

    /// The `From` header value, `"<name>" <address>`
    pub fn from_header(&self) -> String {
        format!("\"{}\" <{}>", self.sender_display_name, self.sender_address)
    }

    fn send(&self, outbound: &OutboundMessage) -> Result<(), MailerError> {
        let message = self.build_message(outbound)?;

        self.deliver(&outbound.to, &message)
    }

    fn build_message(&self, outbound: &OutboundMessage) -> Result<Message, MailerError> {
        let from = Mailbox::new(
            Some(self.sender_display_name.clone()),
            self.sender_address.parse::<Address>()?,
        );
        let to: Mailbox = outbound.to.as_str().parse()?;

        let builder = Message::builder()
            .from(from)
            .to(to)
            .subject(outbound.subject.clone());

        let message = match &outbound.attachment {
            None => builder
                .header(ContentType::TEXT_PLAIN)
                .body(outbound.body.clone())?,
            Some(attachment) => builder.multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(outbound.body.clone()))
                    .singlepart(attachment_part(attachment)?),
            )?,
        };

        Ok(message)
    }

    fn deliver(&self, to: &EmailAddress, message: &Message) -> Result<(), MailerError> {
        self.log.info(&format!(
            "Sending email from {} to {}",
            self.config.smtp_account_name, to
        ));

        self.log.info(&format!(
            "Connecting to SMTP server {}:{}",
            self.config.smtp_server_host, self.config.smtp_server_port
        ));

        let mut session = self
            .relay
            .connect(&self.config.smtp_server_host, self.config.smtp_server_port)?;

        let result = self.authenticate_and_submit(session.as_mut(), to, message);

        self.log.info("Closing connection to SMTP server");

        match (result, session.close()) {
            (Err(err), Err(close_err)) => {
                self.log.error(&format!(
                    "Could not close connection after failed delivery to {}: {}",
                    to, close_err
                ));

                Err(err)
            }
            (Err(err), Ok(())) => Err(err),
            (Ok(()), closed) => closed,
        }
    }

    fn authenticate_and_submit(
        &self,
        session: &mut dyn RelaySession,
        to: &EmailAddress,
        message: &Message,
    ) -> Result<(), MailerError> {
        self.log.info(&format!(
            "Logging into SMTP server as {}",
            self.config.smtp_account_name
        ));

        session.authenticate(
            &self.config.smtp_account_name,
            &self.config.smtp_account_password,
        )?;

        self.log.info(&format!("Sending email to {}", to));

        session.submit(message.envelope(), &message.formatted())
    }

    fn log_failure(&self, to: &str, file_name: Option<&Path>, err: &MailerError) {
        let message = match file_name {
            Some(file_name) => format!(
                "Could not send email with attachment {} to {} while {}: {}",
                file_name.display(),
                to,
                err.step(),
                err
            ),
            None => format!(
                "Could not send email to {} while {}: {}",
                to,
                err.step(),
                err
            ),
        };

        self.log.error(&message);
    }
}

impl<R, L> Mailer for MailSender<R, L>
where
    R: Relay,
    L: MailLog,
{
    fn try_send_mail(&self, to: &str, subject: &str, message: &str) -> Result<(), MailerError> {
        let result = EmailAddress::new(to)
            .map_err(MailerError::from)
            .and_then(|recipient| self.send(&OutboundMessage::plain(recipient, subject, message)));

        if let Err(err) = &result {
            self.log_failure(to, None, err);
        }

        result
    }

    fn try_send_mail_with_attachment(
        &self,
        to: &str,
        subject: &str,
        message: &str,
        file_name: &Path,
    ) -> Result<(), MailerError> {
        let result = EmailAddress::new(to)
            .map_err(MailerError::from)
            .and_then(|recipient| {
                let attachment = Attachment::from_path(file_name)?;

                self.send(&OutboundMessage::with_attachment(
                    recipient, subject, message, attachment,
                ))
            });

        if let Err(err) = &result {
            self.log_failure(to, Some(file_name), err);
        }

        result
    }
}

fn attachment_part(attachment: &Attachment) -> Result<SinglePart, MailerError> {
    let content_type = ContentType::parse(ATTACHMENT_CONTENT_TYPE)
        .map_err(|err| anyhow!("invalid attachment content type: {}", err))?;

    let body = Body::new_with_encoding(
        attachment.content().to_vec(),
        ContentTransferEncoding::Base64,
    )
    .map_err(|_| anyhow!("could not encode attachment {}", attachment.file_name()))?;

    Ok(AttachmentPart::new(attachment.file_name().to_string()).body(body, content_type))
}
