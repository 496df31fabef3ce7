use serde_json::{Map, Value};
use thiserror::Error;

/// A raw payload could not be turned into a domain object.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    /// `key` is the path from the payload root, e.g. `declinations[1].company.id`.
    #[error("malformed payload at `{key}`: {reason}")]
    MalformedPayload { key: String, reason: String },
}

impl NormalizeError {
    pub(crate) fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// The payload path that failed to normalize.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::MalformedPayload { key, .. } => key,
        }
    }
}

/// Marketplace rule violations, raised either by client-side validation of a
/// command or decoded from a server error envelope.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("some parameters are invalid: {0}")]
    SomeParametersAreInvalid(String),

    #[error("invalid promotion rule: {message}")]
    InvalidPromotionRule {
        message: String,
        context: Map<String, Value>,
    },

    #[error("sender is also recipient: {message}")]
    SenderIsAlsoRecipient {
        message: String,
        context: Map<String, Value>,
    },
}

/// Error code the marketplace puts in its envelope for a sender who is also a
/// recipient.
pub const SENDER_IS_ALSO_RECIPIENT_CODE: i64 = 6;
/// Error code the marketplace puts in its envelope for an invalid promotion
/// rule.
pub const INVALID_PROMOTION_RULE_CODE: i64 = 11;

impl DomainError {
    pub(crate) fn invalid_parameters(msg: impl Into<String>) -> Self {
        Self::SomeParametersAreInvalid(msg.into())
    }

    /// Maps a server error envelope (`{"code", "message", "context"}`) onto
    /// a domain error. Unknown codes yield `None`.
    #[must_use]
    pub fn from_error_code(code: i64, message: String, context: Map<String, Value>) -> Option<Self> {
        match code {
            SENDER_IS_ALSO_RECIPIENT_CODE => Some(Self::SenderIsAlsoRecipient { message, context }),
            INVALID_PROMOTION_RULE_CODE => Some(Self::InvalidPromotionRule { message, context }),
            _ => None,
        }
    }

    /// Structured context attached by the server or the validator, if any.
    #[must_use]
    pub fn context(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::SomeParametersAreInvalid(_) => None,
            Self::InvalidPromotionRule { context, .. }
            | Self::SenderIsAlsoRecipient { context, .. } => Some(context),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
