//! Contact form intake

pub mod errors;
pub mod service;
pub mod submission;

pub use errors::ContactError;
pub use submission::Submission;
