//! Contact intake errors

use thiserror::Error;

use crate::domain::communication::mailer::MailerError;

/// Everything that can go wrong with one submission
///
/// Display strings are the visitor-facing messages, localized for the
/// site's audience. Every variant is terminal for the request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    /// The request body was not a JSON object we could read
    #[error("Invalid JSON")]
    InvalidBody,

    /// A marker for this client is still live in the rate-limit store
    #[error("잠시 후 다시 시도해 주세요.")]
    RateLimited,

    /// Trimmed message shorter than the minimum
    #[error("문의 내용을 5자 이상 입력해 주세요.")]
    MessageTooShort,

    /// Trimmed message longer than the maximum
    #[error("문의 내용이 너무 깁니다.")]
    MessageTooLong,

    /// A reply address was given but does not look like an email
    #[error("이메일 형식이 올바르지 않습니다.")]
    InvalidEmail,

    /// The provider rejected the message or was unreachable
    #[error("메일 전송에 실패했습니다.")]
    SendFailed {
        /// Provider error body, present only when the provider responded
        detail: Option<String>,
    },
}

impl From<MailerError> for ContactError {
    fn from(err: MailerError) -> Self {
        match err {
            MailerError::Rejected { detail } => ContactError::SendFailed {
                detail: Some(detail),
            },
            MailerError::Unreachable(_) => ContactError::SendFailed { detail: None },
        }
    }
}
