//! Delivery logging backed by `tracing`

use tracing::{error, info};

use crate::domain::communication::log::MailLog;

/// [`MailLog`] that forwards to the `tracing` macros under the
/// `mail_dispatch` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl MailLog for TracingLog {
    fn info(&self, message: &str) {
        info!(target: "mail_dispatch", "{}", message);
    }

    fn error(&self, message: &str) {
        error!(target: "mail_dispatch", "{}", message);
    }
}
