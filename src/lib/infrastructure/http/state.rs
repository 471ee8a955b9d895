//! Application state module

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::contact::service::ContactIntake;
use crate::infrastructure::email::resend::ResendConfig;

/// Global application state
pub struct AppState<C: ContactIntake> {
    /// The time the server started
    pub start_time: DateTime<Utc>,

    /// The contact pipeline configuration
    pub config: ResendConfig,

    /// Contact intake service
    pub contact: Arc<C>,
}

impl<C: ContactIntake> AppState<C> {
    /// Create a new application state
    pub fn new(config: ResendConfig, contact: C) -> Self {
        Self {
            start_time: Utc::now(),
            config,
            contact: Arc::new(contact),
        }
    }
}

impl<C: ContactIntake> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            start_time: self.start_time,
            config: self.config.clone(),
            contact: Arc::clone(&self.contact),
        }
    }
}

impl<C: ContactIntake> fmt::Debug for AppState<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("start_time", &self.start_time)
            .field("config", &self.config)
            .field("contact", &"ContactIntake")
            .finish()
    }
}

#[cfg(test)]
use crate::domain::contact::service::MockContactIntake;

#[cfg(test)]
pub fn test_state(contact: Option<MockContactIntake>) -> AppState<MockContactIntake> {
    let contact = contact
        .map(Arc::new)
        .unwrap_or_else(|| Arc::new(MockContactIntake::new()));

    let config = ResendConfig {
        to_email: "owner@example.com".to_string(),
        from_email: "onboarding@resend.dev".to_string(),
        site_name: "EDU TOOLS".to_string(),
        api_key: Some("re_test_key".to_string()),
        base_url: "https://api.resend.com".to_string(),
    };

    AppState {
        start_time: Utc::now(),
        config,
        contact,
    }
}
