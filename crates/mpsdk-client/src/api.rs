//! `reqwest`-backed [`HttpClient`] for the marketplace REST API.
//!
//! Handles base URL normalisation, the `Authorization: token <key>` header,
//! the optional `Accept-Language` header, and decoding of the server's error
//! envelope into [`DomainError`]s.

use std::time::Duration;

use async_trait::async_trait;
use mpsdk_core::{
    normalize, ApiCredentials, DomainError, FromRecord, NormalizeError, Record, SdkConfig,
};
use reqwest::{header, Client, Response, Url};
use serde_json::Value;

use crate::error::ClientError;
use crate::http::{HttpClient, Method, RequestOptions};

const DEFAULT_USER_AGENT: &str = "mpsdk/0.1 (marketplace-client)";

/// Client for one marketplace API root.
///
/// Use [`ApiClient::new`] with a loaded [`SdkConfig`], or
/// [`ApiClient::with_base_url`] to point at a mock server in tests.
pub struct ApiClient {
    client: Client,
    base_url: Url,
    credentials: Option<ApiCredentials>,
    language: Option<String>,
}

impl ApiClient {
    /// Builds a client from configuration, including any API credentials and
    /// default language.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if the
    /// configured base URL does not parse.
    pub fn new(config: &SdkConfig) -> Result<Self, ClientError> {
        let mut client = Self::build(
            &config.base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?;
        client.credentials.clone_from(&config.credentials);
        client.language.clone_from(&config.language);
        Ok(client)
    }

    /// Creates an anonymous client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, ClientError> {
        Self::build(base_url, timeout_secs, DEFAULT_USER_AGENT)
    }

    fn build(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so that joining a relative path appends
        // to the API root instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: parsed,
            credentials: None,
            language: None,
        })
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: ApiCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sends `Accept-Language: <language>` on every request that does not set
    /// its own.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn credentials(&self) -> Option<&ApiCredentials> {
        self.credentials.as_ref()
    }

    /// Exchanges an email and password for API credentials and keeps them for
    /// subsequent requests.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Status`] if the marketplace rejects the credentials.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Normalize`] if the response lacks `id` or `apiKey`.
    pub async fn authenticate(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<&ApiCredentials, ClientError> {
        let url = self.endpoint("users/authenticate")?;
        let response = self
            .client
            .get(url.clone())
            .header(header::ACCEPT, "application/json")
            .basic_auth(email, Some(password))
            .send()
            .await?;
        let body = read_body(Method::Get, &url, response).await?;
        let IssuedApiKey(credentials) = normalize(&body)?;

        tracing::debug!(user_id = credentials.user_id, "authenticated marketplace session");
        Ok(self.credentials.insert(credentials))
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot append path \"{path}\": {e}"),
            })
    }
}

#[async_trait]
impl HttpClient for ApiClient {
    async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, ClientError> {
        let url = self.endpoint(path)?;
        let mut request = self
            .client
            .request(method.into(), url.clone())
            .header(header::ACCEPT, "application/json");

        if let Some(credentials) = &self.credentials {
            request = request.header(
                header::AUTHORIZATION,
                format!("token {}", credentials.api_key),
            );
        }
        if let Some(language) = &self.language {
            if !options.has_header(header::ACCEPT_LANGUAGE.as_str()) {
                request = request.header(header::ACCEPT_LANGUAGE, language.as_str());
            }
        }
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(body) = &options.json {
            request = request.json(body);
        } else if !options.form.is_empty() {
            request = request.form(&options.form);
        }

        let response = request.send().await?;
        read_body(method, &url, response).await
    }

    fn session_user_id(&self) -> Option<i64> {
        self.credentials.as_ref().map(|c| c.user_id)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
        }
    }
}

async fn read_body(method: Method, url: &Url, response: Response) -> Result<Value, ClientError> {
    let status = response.status();
    let body = response.text().await?;
    tracing::debug!(%method, path = url.path(), status = status.as_u16(), "marketplace request");

    if !status.is_success() {
        return Err(decode_error(status.as_u16(), url, body));
    }
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
        context: format!("{method} {}", url.path()),
        source: e,
    })
}

/// Turns a non-2xx response into a [`ClientError`].
///
/// Bodies shaped `{"error": {"code", "message", "context"}}` with a known code
/// become [`ClientError::Domain`]; everything else stays a
/// [`ClientError::Status`] carrying the raw body.
fn decode_error(status: u16, url: &Url, body: String) -> ClientError {
    let envelope = serde_json::from_str::<Value>(&body).ok();
    let domain = envelope
        .as_ref()
        .and_then(|v| v.get("error"))
        .and_then(|error| {
            let code = error.get("code")?.as_i64()?;
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned();
            let context = error
                .get("context")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default();
            DomainError::from_error_code(code, message, context)
        });

    match domain {
        Some(err) => ClientError::Domain(err),
        None => ClientError::Status {
            status,
            url: url.to_string(),
            body,
        },
    }
}

/// Response of `users/authenticate`.
struct IssuedApiKey(ApiCredentials);

impl FromRecord for IssuedApiKey {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self(ApiCredentials {
            user_id: record.int("id")?,
            api_key: record.string("apiKey")?,
        }))
    }
}
