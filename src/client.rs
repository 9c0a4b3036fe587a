use std::time::Duration;

use reqwest::Url;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use tracing::debug;

use crate::session::{Session, interpret_response};
use crate::{ClientConfig, ClientError, Diagnostic, HttpMethod, PreparedRequest};

/// Generic async JSON REST client.
///
/// This client is transport-focused: it knows nothing about SS12000 resources.
/// For typed resource operations use [`crate::Ss12000Client`].
///
/// Cloning is cheap and clones share one connection pool. The client holds no
/// mutable state, so one instance can serve any number of concurrent tasks.
#[derive(Clone, Debug)]
pub struct ApiClient {
    session: Session,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a new client with the given base URL and no access token.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::from_config(&ClientConfig::new(base_url))
    }

    /// Creates a client from a full configuration.
    ///
    /// Fails when the base URL is missing or invalid. A missing token or a
    /// non-`https` URL only produces a [`Diagnostic`].
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let session = Session::from_config(config)?;
        let mut builder = reqwest::Client::builder().user_agent(session.user_agent());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            session,
            http: builder.build()?,
        })
    }

    /// Normalized base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        self.session.base_url()
    }

    /// Non-fatal findings from construction.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.session.diagnostics()
    }

    /// Sends a `GET` request with query parameters and parses the response as JSON.
    pub async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, ClientError> {
        self.request_json_with_query(HttpMethod::Get, path, query, None)
            .await
    }

    /// Sends a `POST` request with a JSON body and parses the response as JSON.
    pub async fn post_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &Value,
    ) -> Result<Value, ClientError> {
        self.request_json_with_query(HttpMethod::Post, path, query, Some(body))
            .await
    }

    /// Sends a `PATCH` request with a JSON body and parses the response as JSON.
    pub async fn patch_json(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.request_json_with_query(HttpMethod::Patch, path, &[], Some(body))
            .await
    }

    /// Sends a `DELETE` request.
    ///
    /// `204 No Content` resolves to [`Value::Null`].
    pub async fn delete_json(&self, path: &str) -> Result<Value, ClientError> {
        self.request_json_with_query(HttpMethod::Delete, path, &[], None)
            .await
    }

    /// Sends a prepared request.
    pub async fn send(&self, request: &PreparedRequest) -> Result<Value, ClientError> {
        self.execute(
            request.method,
            &request.path,
            &request.borrowed_query(),
            request.body.as_ref(),
            None,
        )
        .await
    }

    /// Sends a prepared request, failing with a transport error after `timeout`.
    pub async fn send_with_timeout(
        &self,
        request: &PreparedRequest,
        timeout: Duration,
    ) -> Result<Value, ClientError> {
        self.execute(
            request.method,
            &request.path,
            &request.borrowed_query(),
            request.body.as_ref(),
            Some(timeout),
        )
        .await
    }

    /// Sends a request with query parameters and parses the response as JSON.
    ///
    /// Returns [`Value::Null`] for successful responses with an empty body.
    pub async fn request_json_with_query(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        self.execute(method, path, query, body, None).await
    }

    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
        timeout: Option<Duration>,
    ) -> Result<Value, ClientError> {
        let url = self.session.build_url(path)?;
        debug!(%method, %url, params = query.len(), "Sending SS12000 request.");

        let mut request = self
            .http
            .request(method.to_reqwest(), url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Some(token) = self.session.authorization_token() {
            request = request.bearer_auth(token);
        }

        if let Some(json_body) = body {
            request = request.json(json_body);
        }

        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.inspect_err(|err| {
            debug!(error = %err, %method, path, "SS12000 request failed before a response.");
        })?;
        let status = response.status();
        let payload = response.text().await?;
        debug!(%status, %method, path, "Received SS12000 response.");

        interpret_response(status, &payload)
    }
}

#[cfg(test)]
mod tests {
    use super::ApiClient;
    use crate::{ClientConfig, Diagnostic};

    #[test]
    fn exposes_normalized_base_url_and_diagnostics() {
        let client = ApiClient::from_config(
            &ClientConfig::new("https://example.com/api/v2").with_access_token("t"),
        )
        .expect("valid url");
        assert_eq!(client.base_url().as_str(), "https://example.com/api/v2/");
        assert!(client.diagnostics().is_empty());

        let client = ApiClient::new("https://example.com").expect("valid url");
        assert_eq!(client.diagnostics(), [Diagnostic::MissingAccessToken]);
    }
}
