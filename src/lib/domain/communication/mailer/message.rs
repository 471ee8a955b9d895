//! Outbound email message

/// A contact email ready to hand to the provider
///
/// Built fresh for each accepted submission and discarded after one
/// delivery attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundEmail {
    /// The configured sender address
    pub from: String,

    /// The configured site recipient
    pub to: String,

    /// The subject line
    pub subject: String,

    /// The plain text body
    pub text: String,

    /// The visitor's address, when they provided one
    pub reply_to: Option<String>,
}
