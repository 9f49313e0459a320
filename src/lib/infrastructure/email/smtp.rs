//! SMTP relay sessions

use std::time::Duration;

use lettre::{
    address::Envelope,
    transport::smtp::{
        authentication::{Credentials, Mechanism},
        client::{SmtpConnection, TlsParameters},
        extension::ClientId,
    },
};

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::mailer::MailerError;

/// Timeout applied to every read and write on the relay connection
pub const SMTP_TIMEOUT: Duration = Duration::from_secs(60);

/// Authentication mechanisms offered to the relay, in order of preference
const AUTH_MECHANISMS: &[Mechanism] = &[Mechanism::Plain, Mechanism::Login];

/// An open, encrypted session with a mail relay
pub trait RelaySession {
    /// Log into the relay
    fn authenticate(&mut self, account: &str, password: &str) -> Result<(), MailerError>;

    /// Submit a serialized message for the given envelope
    fn submit(&mut self, envelope: &Envelope, message: &[u8]) -> Result<(), MailerError>;

    /// End the session
    fn close(&mut self) -> Result<(), MailerError>;
}

/// Opens sessions with a mail relay
pub trait Relay: Send + Sync + 'static {
    /// Connect to `host:port` and complete the greeting, returning a session
    /// ready for authentication.
    fn connect(&self, host: &str, port: u16) -> Result<Box<dyn RelaySession>, MailerError>;
}

#[cfg(test)]
mock! {
    pub RelaySession {}

    impl RelaySession for RelaySession {
        fn authenticate(&mut self, account: &str, password: &str) -> Result<(), MailerError>;
        fn submit(&mut self, envelope: &Envelope, message: &[u8]) -> Result<(), MailerError>;
        fn close(&mut self) -> Result<(), MailerError>;
    }
}

#[cfg(test)]
mock! {
    pub Relay {}

    impl Relay for Relay {
        fn connect(&self, host: &str, port: u16) -> Result<Box<dyn RelaySession>, MailerError>;
    }
}


/// SMTP relay reached over implicit TLS
#[derive(Debug, Clone)]
pub struct SmtpRelay {
    timeout: Option<Duration>,
    hello_name: ClientId,
}

impl SmtpRelay {
    /// Create a new SMTP relay
    pub fn new() -> Self {
        Self {
            timeout: Some(SMTP_TIMEOUT),
            hello_name: ClientId::default(),
        }
    }

    /// Set the network timeout, or `None` to block indefinitely
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for SmtpRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl Relay for SmtpRelay {
    #[mutants::skip]
    fn connect(&self, host: &str, port: u16) -> Result<Box<dyn RelaySession>, MailerError> {
        let tls = TlsParameters::new(host.to_string())
            .map_err(|err| MailerError::Connection(err.into()))?;

        let connection =
            SmtpConnection::connect((host, port), self.timeout, &self.hello_name, Some(&tls), None)
                .map_err(|err| MailerError::Connection(err.into()))?;

        Ok(Box::new(SmtpSession { connection }))
    }
}

/// A live SMTP connection
struct SmtpSession {
    connection: SmtpConnection,
}

impl RelaySession for SmtpSession {
    #[mutants::skip]
    fn authenticate(&mut self, account: &str, password: &str) -> Result<(), MailerError> {
        let credentials = Credentials::new(account.to_string(), password.to_string());

        self.connection
            .auth(AUTH_MECHANISMS, &credentials)
            .map(drop)
            .map_err(|err| MailerError::Authentication(err.into()))
    }

    #[mutants::skip]
    fn submit(&mut self, envelope: &Envelope, message: &[u8]) -> Result<(), MailerError> {
        self.connection
            .send(envelope, message)
            .map(drop)
            .map_err(|err| MailerError::Submission(err.into()))
    }

    #[mutants::skip]
    fn close(&mut self) -> Result<(), MailerError> {
        let result = self
            .connection
            .quit()
            .map(drop)
            .map_err(|err| MailerError::Close(err.into()));

        if result.is_err() {
            self.connection.abort();
        }

        result
    }
}

#[cfg(test)]
mod smtp_tests {
    use std::net::TcpListener;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_connect_refused_is_a_connection_error() -> TestResult {
        // Bind then drop to find a local port nothing listens on.
        let port = TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();

        let relay = SmtpRelay::new().timeout(Some(Duration::from_secs(5)));

        let result = relay.connect("127.0.0.1", port);

        assert!(matches!(result, Err(MailerError::Connection(_))));

        Ok(())
    }
}
