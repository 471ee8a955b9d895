//! Contact intake service
//!
//! Runs one submission through the whole pipeline: rate limiting,
//! honeypot, validation, composition, dispatch. Each step short-circuits;
//! nothing is retried.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

#[cfg(test)]
use mockall::mock;

use crate::domain::{
    communication::mailer::{Mailer, OutboundEmail},
    contact::{errors::ContactError, submission::Submission},
    rate_limiting::RateLimitStore,
};

/// How long a client must wait between submissions
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(30);

/// Placeholder for fields the visitor left blank
const NOT_PROVIDED: &str = "(미기재)";

/// Site identity used when composing the outbound email
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteSettings {
    /// Display name of the site, shown in the subject and body
    pub site_name: String,

    /// Fixed recipient of contact messages
    pub to_email: String,

    /// Sender address registered with the email provider
    pub from_email: String,
}

/// What became of an accepted submission
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// The message was forwarded to the site recipient
    Sent,

    /// The honeypot tripped; the message was silently dropped
    Discarded,
}

/// Contact intake service
#[async_trait]
pub trait ContactIntake: Send + Sync + 'static {
    /// Process one submission from `client_ip`
    ///
    /// # Arguments
    /// * `submission` - The normalized form fields, or [`None`] when the
    ///   request body could not be parsed. The rate-limit marker is still
    ///   written in that case.
    /// * `client_ip` - The client identity used for rate limiting and
    ///   recorded in the email body.
    ///
    /// # Returns
    /// - [`Ok`] with a [`Disposition`] when the caller should see success.
    /// - [`Err`] with a [`ContactError`] otherwise.
    async fn submit(
        &self,
        submission: Option<Submission>,
        client_ip: &str,
    ) -> Result<Disposition, ContactError>;
}

#[cfg(test)]
mock! {
    pub ContactIntake {}

    #[async_trait]
    impl ContactIntake for ContactIntake {
        async fn submit(
            &self,
            submission: Option<Submission>,
            client_ip: &str,
        ) -> Result<Disposition, ContactError>;
    }
}

/// Contact intake service implementation
pub struct ContactIntakeImpl<M, R>
where
    M: Mailer,
    R: RateLimitStore,
{
    mailer: Arc<M>,
    rate_limits: Arc<R>,
    settings: SiteSettings,
}

impl<M, R> ContactIntakeImpl<M, R>
where
    M: Mailer,
    R: RateLimitStore,
{
    /// Creates a new contact intake service
    pub fn new(mailer: Arc<M>, rate_limits: Arc<R>, settings: SiteSettings) -> Self {
        Self {
            mailer,
            rate_limits,
            settings,
        }
    }

    /// One read and, when no marker is found, one write per invocation.
    /// Store failures are swallowed: throttling is advisory, never a
    /// source of hard failure.
    async fn check_rate_limit(&self, client_ip: &str) -> Result<(), ContactError> {
        let key = format!("contact/{client_ip}");

        match self.rate_limits.get(&key).await {
            Ok(true) => return Err(ContactError::RateLimited),
            Ok(false) => {
                if let Err(err) = self.rate_limits.put(&key, RATE_LIMIT_WINDOW).await {
                    debug!(error = ?err, "rate-limit marker write failed, continuing");
                }
            }
            Err(err) => {
                debug!(error = ?err, "rate-limit lookup failed, continuing");
            }
        }

        Ok(())
    }

    fn compose(&self, submission: &Submission, client_ip: &str) -> OutboundEmail {
        let name = submission.name();
        let email = submission.email();

        let subject = if name.is_empty() {
            format!("[{}] 문의", self.settings.site_name)
        } else {
            format!("[{}] 문의 ({})", self.settings.site_name, name)
        };

        let text = format!(
            "사이트: {}\n보낸이: {}\n회신 이메일: {}\nIP: {}\n\n--- 문의 내용 ---\n{}\n",
            self.settings.site_name,
            if name.is_empty() { NOT_PROVIDED } else { name },
            if email.is_empty() { NOT_PROVIDED } else { email },
            client_ip,
            submission.message(),
        );

        OutboundEmail {
            from: self.settings.from_email.clone(),
            to: self.settings.to_email.clone(),
            subject,
            text,
            reply_to: (!email.is_empty()).then(|| email.to_string()),
        }
    }
}

#[async_trait]
impl<M, R> ContactIntake for ContactIntakeImpl<M, R>
where
    M: Mailer,
    R: RateLimitStore,
{
    async fn submit(
        &self,
        submission: Option<Submission>,
        client_ip: &str,
    ) -> Result<Disposition, ContactError> {
        self.check_rate_limit(client_ip).await?;

        let submission = submission.ok_or(ContactError::InvalidBody)?;

        if submission.is_spam() {
            // Report success so automated senders learn nothing.
            debug!(client_ip, "honeypot tripped, discarding submission");
            return Ok(Disposition::Discarded);
        }

        submission.validate()?;

        let email = self.compose(&submission, client_ip);

        match self.mailer.send(&email).await {
            Ok(()) => Ok(Disposition::Sent),
            Err(err) => {
                warn!(error = ?err, "contact email dispatch failed");
                Err(err.into())
            }
        }
    }
}

impl<M, R> fmt::Debug for ContactIntakeImpl<M, R>
where
    M: Mailer,
    R: RateLimitStore,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactIntakeImpl")
            .field("settings", &self.settings)
            .field("mailer", &"Mailer")
            .field("rate_limits", &"RateLimitStore")
            .finish()
    }
}
