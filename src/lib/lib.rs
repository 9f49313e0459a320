#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Mail dispatch library
//!
//! Sends plain-text notifications, optionally with a single file attached,
//! through an authenticated SMTP relay.

pub mod domain;
pub mod infrastructure;
