use std::time::Duration;

use reqwest::Url;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use tracing::debug;

use crate::session::{Session, interpret_response};
use crate::{ClientConfig, ClientError, Diagnostic, HttpMethod, PreparedRequest};

/// Generic blocking JSON REST client.
///
/// This is the synchronous counterpart of [`crate::ApiClient`]. Do not create
/// or drop it from inside an async runtime.
#[derive(Debug)]
pub struct BlockingApiClient {
    session: Session,
    http: reqwest::blocking::Client,
}

impl BlockingApiClient {
    /// Creates a new client with the given base URL and no access token.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::from_config(&ClientConfig::new(base_url))
    }

    /// Creates a client from a full configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let session = Session::from_config(config)?;
        // reqwest's blocking client defaults to a 30 s timeout; keep "none" unless configured.
        let http = reqwest::blocking::Client::builder()
            .user_agent(session.user_agent())
            .timeout(config.timeout())
            .build()?;

        Ok(Self { session, http })
    }

    pub fn base_url(&self) -> &Url {
        self.session.base_url()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.session.diagnostics()
    }

    /// Sends a `GET` request with query parameters and parses the response as JSON.
    pub fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, ClientError> {
        self.request_json_with_query(HttpMethod::Get, path, query, None)
    }

    /// Sends a `POST` request with a JSON body and parses the response as JSON.
    pub fn post_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &Value,
    ) -> Result<Value, ClientError> {
        self.request_json_with_query(HttpMethod::Post, path, query, Some(body))
    }

    /// Sends a `PATCH` request with a JSON body and parses the response as JSON.
    pub fn patch_json(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.request_json_with_query(HttpMethod::Patch, path, &[], Some(body))
    }

    /// Sends a `DELETE` request. `204 No Content` resolves to [`Value::Null`].
    pub fn delete_json(&self, path: &str) -> Result<Value, ClientError> {
        self.request_json_with_query(HttpMethod::Delete, path, &[], None)
    }

    /// Sends a prepared request.
    pub fn send(&self, request: &PreparedRequest) -> Result<Value, ClientError> {
        self.execute(
            request.method,
            &request.path,
            &request.borrowed_query(),
            request.body.as_ref(),
            None,
        )
    }

    /// Sends a prepared request, failing with a transport error after `timeout`.
    pub fn send_with_timeout(
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
    }

    /// Sends a request with query parameters and parses the response as JSON.
    ///
    /// Returns [`Value::Null`] for successful responses with an empty body.
    pub fn request_json_with_query(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        self.execute(method, path, query, body, None)
    }

    fn execute(
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

        let response = request.send()?;
        let status = response.status();
        let payload = response.text()?;
        debug!(%status, %method, path, "Received SS12000 response.");

        interpret_response(status, &payload)
    }
}
