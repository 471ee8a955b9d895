//! Contact form submission

use lazy_static::lazy_static;
use regex::Regex;

use crate::domain::contact::errors::ContactError;

/// Minimum trimmed message length, in characters
pub const MESSAGE_MIN_CHARS: usize = 5;

/// Maximum trimmed message length, in characters
pub const MESSAGE_MAX_CHARS: usize = 4000;

lazy_static! {
    // Practical shape check, not RFC 5322: local part, "@", domain with a dot.
    static ref EMAIL_SHAPE: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex");
}

/// One visitor submission, normalized
///
/// All fields have carriage returns stripped and surrounding whitespace
/// trimmed; absent fields are the empty string. Lives only for the
/// duration of one request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Submission {
    name: String,
    email: String,
    message: String,
    company: String,
}

impl Submission {
    /// Normalizes the raw form fields into a [`Submission`]
    pub fn new(
        name: Option<String>,
        email: Option<String>,
        message: Option<String>,
        company: Option<String>,
    ) -> Self {
        Self {
            name: normalize(name),
            email: normalize(email),
            message: normalize(message),
            company: normalize(company),
        }
    }

    /// The visitor's name; empty when not given
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The visitor's reply address; empty when not given
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The message body
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the honeypot field was filled in
    ///
    /// The `company` input is invisible to humans; any value means the
    /// submission came from an automated sender.
    pub fn is_spam(&self) -> bool {
        !self.company.is_empty()
    }

    /// Checks message length and email shape
    pub fn validate(&self) -> Result<(), ContactError> {
        let length = self.message.chars().count();

        if length < MESSAGE_MIN_CHARS {
            return Err(ContactError::MessageTooShort);
        }

        if length > MESSAGE_MAX_CHARS {
            return Err(ContactError::MessageTooLong);
        }

        if !self.email.is_empty() && !EMAIL_SHAPE.is_match(&self.email) {
            return Err(ContactError::InvalidEmail);
        }

        Ok(())
    }
}

fn normalize(value: Option<String>) -> String {
    value
        .unwrap_or_default()
        .replace('\r', "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_message(message: &str) -> Submission {
        Submission::new(None, None, Some(message.to_string()), None)
    }

    fn with_email(email: &str) -> Submission {
        Submission::new(
            None,
            Some(email.to_string()),
            Some("valid message".to_string()),
            None,
        )
    }

    #[test]
    fn test_normalization_strips_carriage_returns_and_trims() {
        let submission = Submission::new(
            Some("  Kim \r".to_string()),
            None,
            Some("\r\n hello there \r\n".to_string()),
            None,
        );

        assert_eq!(submission.name(), "Kim");
        assert_eq!(submission.email(), "");
        assert_eq!(submission.message(), "hello there");
    }

    #[test]
    fn test_absent_fields_normalize_to_empty() {
        let submission = Submission::new(None, None, None, None);

        assert_eq!(submission.name(), "");
        assert_eq!(submission.email(), "");
        assert_eq!(submission.message(), "");
        assert!(!submission.is_spam());
    }

    #[test]
    fn test_honeypot_detection() {
        let submission = Submission::new(
            None,
            None,
            Some("hi".to_string()),
            Some("bot-fill".to_string()),
        );

        assert!(submission.is_spam());
    }

    #[test]
    fn test_whitespace_only_honeypot_is_not_spam() {
        let submission = Submission::new(None, None, None, Some("  \r ".to_string()));

        assert!(!submission.is_spam());
    }

    #[test]
    fn test_message_length_boundaries() {
        assert_eq!(
            with_message("hi").validate(),
            Err(ContactError::MessageTooShort)
        );
        assert_eq!(
            with_message("1234").validate(),
            Err(ContactError::MessageTooShort)
        );
        assert_eq!(with_message("12345").validate(), Ok(()));
        assert_eq!(with_message(&"a".repeat(4000)).validate(), Ok(()));
        assert_eq!(
            with_message(&"a".repeat(4001)).validate(),
            Err(ContactError::MessageTooLong)
        );
    }

    #[test]
    fn test_message_length_counts_characters_not_bytes() {
        // Five hangul syllables are fifteen UTF-8 bytes but five characters.
        assert_eq!(with_message("안녕하세요").validate(), Ok(()));
    }

    #[test]
    fn test_trimmed_length_is_what_counts() {
        assert_eq!(
            with_message("  hi  ").validate(),
            Err(ContactError::MessageTooShort)
        );
    }

    #[test]
    fn test_email_shapes() {
        assert_eq!(with_email("kim@example.com").validate(), Ok(()));
        assert_eq!(with_email("a@b.co").validate(), Ok(()));
        assert_eq!(
            with_email("not-an-email").validate(),
            Err(ContactError::InvalidEmail)
        );
        assert_eq!(
            with_email("kim@example").validate(),
            Err(ContactError::InvalidEmail)
        );
        assert_eq!(
            with_email("kim@@example.com").validate(),
            Err(ContactError::InvalidEmail)
        );
        assert_eq!(
            with_email("kim smith@example.com").validate(),
            Err(ContactError::InvalidEmail)
        );
    }

    #[test]
    fn test_empty_email_is_not_validated() {
        assert_eq!(with_email("").validate(), Ok(()));
    }
}
