//! Mailer module

mod errors;
mod message;

use std::path::Path;

#[cfg(test)]
use mockall::mock;

pub use errors::MailerError;
pub use message::{attachment_file_name, Attachment, OutboundMessage, ATTACHMENT_CONTENT_TYPE};

/// Mailer
///
/// The boolean operations never fail: every error is logged and reported as
/// `false`. The `try_` variants return the reason instead.
pub trait Mailer: Send + Sync + 'static {
    /// Send a plain text email
    ///
    /// # Arguments
    /// * `to` - The address to send the email to.
    /// * `subject` - The subject of the email.
    /// * `message` - The plain text body of the email.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] once the relay has accepted the message,
    /// or an [`Err`] containing the [`MailerError`] that stopped delivery.
    fn try_send_mail(&self, to: &str, subject: &str, message: &str) -> Result<(), MailerError>;

    /// Send an email with a single file attached
    ///
    /// # Arguments
    /// * `to` - The address to send the email to.
    /// * `subject` - The subject of the email.
    /// * `message` - The plain text body of the email.
    /// * `file_name` - Path of the file to attach. Only its last component is
    ///   used as the attachment's name.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] once the relay has accepted the message,
    /// or an [`Err`] containing the [`MailerError`] that stopped delivery.
    fn try_send_mail_with_attachment(
        &self,
        to: &str,
        subject: &str,
        message: &str,
        file_name: &Path,
    ) -> Result<(), MailerError>;

    /// Send a plain text email, returning `true` if the relay accepted it.
    fn send_mail(&self, to: &str, subject: &str, message: &str) -> bool {
        self.try_send_mail(to, subject, message).is_ok()
    }

    /// Send an email with a single file attached, returning `true` if the
    /// relay accepted it.
    fn send_mail_with_attachment(
        &self,
        to: &str,
        subject: &str,
        message: &str,
        file_name: &Path,
    ) -> bool {
        self.try_send_mail_with_attachment(to, subject, message, file_name)
            .is_ok()
    }
}

#[cfg(test)]
mock! {
    pub Mailer {}

    impl Mailer for Mailer {
        fn try_send_mail(&self, to: &str, subject: &str, message: &str) -> Result<(), MailerError>;
        fn try_send_mail_with_attachment(
            &self,
            to: &str,
            subject: &str,
            message: &str,
            file_name: &Path,
        ) -> Result<(), MailerError>;
    }
}


#[cfg(test)]
mod mailer_tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_send_mail_is_true_when_delivered() {
        let mut mailer = MockMailer::new();

        mailer
            .expect_try_send_mail()
            .times(1)
            .withf(|to, subject, message| {
                to == "user@example.com"
                    && subject == "Daily Report"
                    && message == "See attached summary."
            })
            .returning(|_, _, _| Ok(()));

        assert!(mailer.send_mail("user@example.com", "Daily Report", "See attached summary."));
    }

    #[test]
    fn test_send_mail_is_false_on_error() {
        let mut mailer = MockMailer::new();

        mailer
            .expect_try_send_mail()
            .times(1)
            .returning(|_, _, _| Err(MailerError::InvalidEmail));

        assert!(!mailer.send_mail("user", "Daily Report", "See attached summary."));
    }

    #[test]
    fn test_send_mail_with_attachment_is_false_on_error() {
        let mut mailer = MockMailer::new();
        let path = PathBuf::from("/tmp/reports/out.mkv");

        mailer
            .expect_try_send_mail_with_attachment()
            .times(1)
            .withf(|_, _, _, file_name| file_name == Path::new("/tmp/reports/out.mkv"))
            .returning(|_, _, _, file_name| {
                Err(MailerError::Attachment {
                    file_name: file_name.display().to_string(),
                    source: std::io::ErrorKind::NotFound.into(),
                })
            });

        assert!(!mailer.send_mail_with_attachment("user@example.com", "Report", "", &path));
    }
}
