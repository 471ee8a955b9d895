//! Adapters for the outside world

pub mod cache;
pub mod email;
pub mod http;
