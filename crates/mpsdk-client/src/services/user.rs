//! Marketplace user profiles (`users/{id}`).

use mpsdk_core::{DomainError, UpdateUserCommand};

use crate::error::ClientError;
use crate::http::{HttpClient, RequestOptions};
use crate::services::{to_json, RemapStatus};

pub struct UserService<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> UserService<'a, C> {
    #[must_use]
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// - [`ClientError::AuthenticationRequired`] without a session.
    /// - [`DomainError::SomeParametersAreInvalid`] (as [`ClientError::Domain`])
    ///   when a mandatory field is missing; nothing is sent in that case.
    /// - [`ClientError::NotFound`] for an unknown user.
    pub async fn update_user(&self, command: &UpdateUserCommand) -> Result<(), ClientError> {
        self.client.require_authentication()?;
        command.validate()?;
        let user_id = command.user_id().ok_or_else(|| {
            DomainError::SomeParametersAreInvalid("Missing customer ID".to_owned())
        })?;

        let options = RequestOptions::new().with_json(to_json(&command.payload(), "user update")?);
        self.client
            .put(&format!("users/{user_id}"), options)
            .await
            .or_not_found(|| format!("user #{user_id} not found"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mpsdk_core::UserTitle;
    use serde_json::{json, Value};

    use super::*;
    use crate::http::Method;
    use crate::services::fake::FakeClient;

    fn command() -> UpdateUserCommand {
        UpdateUserCommand::new()
            .with_user_id(7)
            .with_email("paul@example.com")
            .with_first_name("Paul")
            .with_last_name("Martin")
            .with_title(UserTitle::Mr)
    }

    #[tokio::test]
    async fn update_puts_camel_case_payload() {
        let client = FakeClient::authenticated().reply(Value::Null);
        let users = UserService::new(&client);

        users.update_user(&command()).await.unwrap();

        let request = client.single_request();
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.path, "users/7");
        assert_eq!(
            request.options.json,
            Some(json!({
                "email": "paul@example.com",
                "firstName": "Paul",
                "lastName": "Martin",
                "title": "mr"
            }))
        );
    }

    #[tokio::test]
    async fn incomplete_command_is_not_sent() {
        let client = FakeClient::authenticated();
        let users = UserService::new(&client);

        let err = users
            .update_user(&UpdateUserCommand::new().with_user_id(7))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ClientError::Domain(DomainError::SomeParametersAreInvalid(ref m)) if m == "Missing customer's email"
        ));
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let client = FakeClient::authenticated().reply_status(404, "");
        let users = UserService::new(&client);

        let err = users.update_user(&command()).await.unwrap_err();

        assert!(matches!(err, ClientError::NotFound(ref m) if m == "user #7 not found"));
    }
}
