//! Outbound communication

pub mod email_addresses;
pub mod log;
pub mod mailer;
