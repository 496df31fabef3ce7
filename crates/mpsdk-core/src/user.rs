use chrono::NaiveDate;
use serde::Serialize;

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserTitle {
    Mr,
    Mrs,
}

/// Changes to a customer's profile, sent with `PUT users/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserCommand {
    user_id: Option<i64>,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    title: Option<UserTitle>,
    birthday: Option<NaiveDate>,
}

impl UpdateUserCommand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_user_id(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    #[must_use]
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: UserTitle) -> Self {
        self.title = Some(title);
        self
    }

    #[must_use]
    pub fn with_birthday(mut self, birthday: NaiveDate) -> Self {
        self.birthday = Some(birthday);
        self
    }

    #[must_use]
    pub fn user_id(&self) -> Option<i64> {
        self.user_id
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    #[must_use]
    pub fn title(&self) -> Option<UserTitle> {
        self.title
    }

    #[must_use]
    pub fn birthday(&self) -> Option<NaiveDate> {
        self.birthday
    }

    /// Checks the mandatory fields in order and reports the first missing
    /// one.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::SomeParametersAreInvalid`].
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.user_id.is_none() {
            return Err(DomainError::invalid_parameters("Missing customer ID"));
        }
        if self.email.is_none() {
            return Err(DomainError::invalid_parameters("Missing customer's email"));
        }
        if self.first_name.is_none() {
            return Err(DomainError::invalid_parameters("Missing customer's first name"));
        }
        if self.last_name.is_none() {
            return Err(DomainError::invalid_parameters("Missing customer's last name"));
        }
        Ok(())
    }

    /// Request body for the update.
    #[must_use]
    pub fn payload(&self) -> UpdateUserPayload<'_> {
        UpdateUserPayload {
            email: self.email.as_deref(),
            first_name: self.first_name.as_deref(),
            last_name: self.last_name.as_deref(),
            title: self.title,
            birthday: self.birthday.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload<'a> {
    email: Option<&'a str>,
    first_name: Option<&'a str>,
    last_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<UserTitle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    birthday: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn complete() -> UpdateUserCommand {
        UpdateUserCommand::new()
            .with_user_id(7)
            .with_email("customer-1@world-company.com")
            .with_first_name("Paul")
            .with_last_name("Martin")
    }

    #[test]
    fn first_missing_field_is_reported() {
        let cases = [
            (UpdateUserCommand::new(), "Missing customer ID"),
            (UpdateUserCommand::new().with_user_id(7), "Missing customer's email"),
            (
                UpdateUserCommand::new().with_user_id(7).with_email("a@b.c"),
                "Missing customer's first name",
            ),
            (
                UpdateUserCommand::new()
                    .with_user_id(7)
                    .with_email("a@b.c")
                    .with_first_name("Paul"),
                "Missing customer's last name",
            ),
        ];
        for (command, expected) in cases {
            assert_eq!(
                command.validate(),
                Err(DomainError::SomeParametersAreInvalid(expected.to_owned()))
            );
        }
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn payload_formats_birthday_and_title() {
        let command = complete()
            .with_title(UserTitle::Mrs)
            .with_birthday(NaiveDate::from_ymd_opt(1990, 5, 17).unwrap());
        assert_eq!(
            serde_json::to_value(command.payload()).unwrap(),
            json!({
                "email": "customer-1@world-company.com",
                "firstName": "Paul",
                "lastName": "Martin",
                "title": "mrs",
                "birthday": "1990-05-17"
            })
        );
    }
}
