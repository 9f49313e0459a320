//! Delivery log

#[cfg(test)]
use mockall::mock;

/// Receives progress and failure messages from a mailer.
///
/// Mailers report through this trait instead of a global logger so that
/// callers can route, capture or silence delivery messages.
pub trait MailLog: Send + Sync + 'static {
    /// Records a delivery step.
    fn info(&self, message: &str);

    /// Records a delivery failure.
    fn error(&self, message: &str);
}

#[cfg(test)]
mock! {
    pub MailLog {}

    impl MailLog for MailLog {
        fn info(&self, message: &str);
        fn error(&self, message: &str);
    }
}

/// Mail log doubles for tests
#[cfg(test)]
pub mod tests {
    pub use super::MockMailLog;
}
