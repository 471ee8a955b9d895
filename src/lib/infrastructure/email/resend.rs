//! Resend email service implementation

use anyhow::anyhow;
use async_trait::async_trait;
use clap::Parser;
use serde::Serialize;

use crate::domain::{
    communication::mailer::{Mailer, MailerError, OutboundEmail},
    contact::service::SiteSettings,
};

/// Resend configuration
#[derive(Clone, Debug, Parser)]
pub struct ResendConfig {
    /// The recipient of contact messages
    #[clap(long, env = "CONTACT_TO_EMAIL", default_value = "hongseok223@naver.com")]
    pub to_email: String,

    /// The sender address registered with the provider
    #[clap(long, env = "CONTACT_FROM_EMAIL", default_value = "onboarding@resend.dev")]
    pub from_email: String,

    /// The site's display name
    #[clap(long, env = "CONTACT_SITE_NAME", default_value = "EDU TOOLS")]
    pub site_name: String,

    /// The provider API key. Optional at startup; submissions are
    /// rejected with a server error while it is absent.
    #[clap(long, env = "RESEND_API_KEY")]
    pub api_key: Option<String>,

    /// The provider API base URL
    #[clap(long, env = "RESEND_BASE_URL", default_value = "https://api.resend.com")]
    pub base_url: String,
}

impl From<&ResendConfig> for SiteSettings {
    fn from(config: &ResendConfig) -> Self {
        Self {
            site_name: config.site_name.clone(),
            to_email: config.to_email.clone(),
            from_email: config.from_email.clone(),
        }
    }
}

/// Resend mailer
#[derive(Debug)]
pub struct ResendMailer {
    config: ResendConfig,
    client: reqwest::Client,
}

/// Wire shape of the provider's send endpoint
#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

impl ResendMailer {
    /// Creates a new Resend mailer
    pub fn new(config: ResendConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/emails", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| MailerError::Unreachable(anyhow!("RESEND_API_KEY not configured")))?;

        let payload = SendEmailRequest {
            from: &email.from,
            to: [email.to.as_str()],
            subject: &email.subject,
            text: &email.text,
            reply_to: email.reply_to.as_deref(),
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|err| MailerError::Unreachable(err.into()))?;

        if !response.status().is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(MailerError::Rejected { detail });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, routing::post, Router};
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn config(api_key: Option<&str>, base_url: &str) -> ResendConfig {
        ResendConfig {
            to_email: "owner@example.com".to_string(),
            from_email: "onboarding@resend.dev".to_string(),
            site_name: "EDU TOOLS".to_string(),
            api_key: api_key.map(str::to_string),
            base_url: base_url.to_string(),
        }
    }

    fn email() -> OutboundEmail {
        OutboundEmail {
            from: "onboarding@resend.dev".to_string(),
            to: "owner@example.com".to_string(),
            subject: "[EDU TOOLS] 문의 (Kim)".to_string(),
            text: "hello there".to_string(),
            reply_to: Some("kim@example.com".to_string()),
        }
    }

    /// Serve `/emails` with a fixed response on an ephemeral port.
    async fn fake_provider(status: StatusCode, body: &'static str) -> String {
        let app = Router::new().route("/emails", post(move || async move { (status, body) }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake provider");
        let address = listener.local_addr().expect("fake provider address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake provider");
        });

        format!("http://{address}")
    }

    #[test]
    fn test_payload_serialization_includes_reply_to() -> TestResult {
        let email = email();
        let payload = SendEmailRequest {
            from: &email.from,
            to: [email.to.as_str()],
            subject: &email.subject,
            text: &email.text,
            reply_to: email.reply_to.as_deref(),
        };

        assert_eq!(
            serde_json::to_value(&payload)?,
            json!({
                "from": "onboarding@resend.dev",
                "to": ["owner@example.com"],
                "subject": "[EDU TOOLS] 문의 (Kim)",
                "text": "hello there",
                "reply_to": "kim@example.com",
            })
        );

        Ok(())
    }

    #[test]
    fn test_payload_serialization_omits_absent_reply_to() -> TestResult {
        let payload = SendEmailRequest {
            from: "onboarding@resend.dev",
            to: ["owner@example.com"],
            subject: "[EDU TOOLS] 문의",
            text: "hello there",
            reply_to: None,
        };

        let value = serde_json::to_value(&payload)?;

        assert!(value.get("reply_to").is_none());

        Ok(())
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let mailer = ResendMailer::new(config(Some("re_key"), "https://api.resend.com/"));

        assert_eq!(mailer.endpoint(), "https://api.resend.com/emails");
    }

    #[tokio::test]
    async fn test_send_success() -> TestResult {
        let base_url = fake_provider(StatusCode::OK, r#"{"id":"1"}"#).await;
        let mailer = ResendMailer::new(config(Some("re_key"), &base_url));

        mailer.send(&email()).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_send_rejection_captures_provider_body() {
        let base_url = fake_provider(StatusCode::UNPROCESSABLE_ENTITY, "from address not verified").await;
        let mailer = ResendMailer::new(config(Some("re_key"), &base_url));

        let result = mailer.send(&email()).await;

        match result {
            Err(MailerError::Rejected { detail }) => {
                assert_eq!(detail, "from address not verified");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_without_api_key_is_unreachable() {
        let mailer = ResendMailer::new(config(None, "https://api.resend.com"));

        let result = mailer.send(&email()).await;

        assert!(matches!(result, Err(MailerError::Unreachable(_))));
    }

    #[tokio::test]
    async fn test_send_to_unreachable_host() {
        // Port 9 on localhost is not listening.
        let mailer = ResendMailer::new(config(Some("re_key"), "http://127.0.0.1:9"));

        let result = mailer.send(&email()).await;

        assert!(matches!(result, Err(MailerError::Unreachable(_))));
    }
}
