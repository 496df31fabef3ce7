//! The request-issuing collaborator every service façade is built on.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a request carries besides its method and path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub json: Option<Value>,
    /// `application/x-www-form-urlencoded` body pairs. Ignored when `json` is set.
    pub form: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }

    #[must_use]
    pub fn with_form(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Whether a header named `name` (case-insensitive) was set.
    #[must_use]
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|(n, _)| n.eq_ignore_ascii_case(name))
    }
}

/// Issues one request/response cycle against the marketplace API and decodes
/// the JSON body.
///
/// Implementations return [`ClientError::Status`] for non-2xx responses so
/// that façades can remap specific codes. An empty body decodes to
/// [`Value::Null`].
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, ClientError>;

    /// Id of the signed-in user, if any.
    fn session_user_id(&self) -> Option<i64>;

    fn is_authenticated(&self) -> bool {
        self.session_user_id().is_some()
    }

    async fn get(&self, path: &str, options: RequestOptions) -> Result<Value, ClientError> {
        self.request(Method::Get, path, options).await
    }

    async fn post(&self, path: &str, options: RequestOptions) -> Result<Value, ClientError> {
        self.request(Method::Post, path, options).await
    }

    async fn put(&self, path: &str, options: RequestOptions) -> Result<Value, ClientError> {
        self.request(Method::Put, path, options).await
    }

    async fn delete(&self, path: &str, options: RequestOptions) -> Result<Value, ClientError> {
        self.request(Method::Delete, path, options).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::AuthenticationRequired`] when no session is
    /// established.
    fn require_authentication(&self) -> Result<(), ClientError> {
        self.require_user_id()?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ClientError::AuthenticationRequired`] when no session is
    /// established.
    fn require_user_id(&self) -> Result<i64, ClientError> {
        self.session_user_id().ok_or(ClientError::AuthenticationRequired)
    }
}
