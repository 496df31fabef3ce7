use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::DomainError;

static EMAIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

/// Checks an address against a permissive `local@domain.tld` shape.
pub(crate) fn looks_like_email(candidate: &str) -> bool {
    EMAIL.as_ref().is_some_and(|re| re.is_match(candidate))
}

/// A report of a suspicious product, sent to the marketplace administrator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReport {
    product_id: String,
    #[serde(rename = "name")]
    reporter_name: String,
    #[serde(rename = "email")]
    reporter_email: String,
    message: String,
}

impl ProductReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = product_id.into();
        self
    }

    #[must_use]
    pub fn with_reporter_name(mut self, name: impl Into<String>) -> Self {
        self.reporter_name = name.into();
        self
    }

    #[must_use]
    pub fn with_reporter_email(mut self, email: impl Into<String>) -> Self {
        self.reporter_email = email.into();
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    #[must_use]
    pub fn reporter_name(&self) -> &str {
        &self.reporter_name
    }

    #[must_use]
    pub fn reporter_email(&self) -> &str {
        &self.reporter_email
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// # Errors
    ///
    /// Returns [`DomainError::SomeParametersAreInvalid`] listing every field
    /// that is empty or, for the email, not an address.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut problems = Vec::new();
        if self.product_id.trim().is_empty() {
            problems.push("productId is required");
        }
        if self.reporter_name.trim().is_empty() {
            problems.push("name is required");
        }
        if !looks_like_email(&self.reporter_email) {
            problems.push("email is invalid");
        }
        if self.message.trim().is_empty() {
            problems.push("message is required");
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(DomainError::invalid_parameters(problems.join(", ")))
        }
    }
}
