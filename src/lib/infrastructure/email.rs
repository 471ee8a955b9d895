//! Email provider adapters

pub mod resend;
