//! Domain model and ports

pub mod communication;
pub mod contact;
pub mod rate_limiting;
