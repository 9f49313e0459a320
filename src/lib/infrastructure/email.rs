//! SMTP email delivery

pub mod config;
pub mod sender;
pub mod smtp;
