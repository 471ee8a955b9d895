//! Mailer errors

use thiserror::Error;

/// Mailer errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// The provider answered with a non-success status
    #[error("email provider rejected the message")]
    Rejected {
        /// The provider's error body, verbatim
        detail: String,
    },

    /// The provider could not be reached at all
    #[error("email provider unreachable")]
    Unreachable(#[source] anyhow::Error),
}
