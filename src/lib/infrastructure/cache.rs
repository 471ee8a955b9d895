//! Rate-limit store adapters

pub mod memory;
