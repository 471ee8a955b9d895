//! Mailer port

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

mod errors;
mod message;

pub use errors::MailerError;
pub use message::OutboundEmail;

/// Transactional email delivery service
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Send a single email
    ///
    /// # Arguments
    /// * `email` - The [`OutboundEmail`] to deliver.
    ///
    /// # Returns
    /// A [`Result`] indicating success or failure. There is no retry; a
    /// failed send is terminal for the request that produced it.
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    #[async_trait]
    impl Mailer for Mailer {
        async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError>;
    }
}
