//! Infrastructure adapters

pub mod email;
pub mod logging;
