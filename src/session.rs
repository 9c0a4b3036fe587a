use reqwest::{StatusCode, Url};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::{ClientConfig, ClientError, Diagnostic};

/// Immutable connection settings shared by every request of one client.
#[derive(Clone, Debug)]
pub(crate) struct Session {
    base_url: Url,
    authorization_token: Option<String>,
    user_agent: String,
    diagnostics: Vec<Diagnostic>,
}

impl Session {
    pub(crate) fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let (base_url, diagnostics) = config.validate()?;

        for diagnostic in &diagnostics {
            warn!(base_url = %base_url, "{diagnostic}");
        }

        Ok(Self {
            base_url,
            authorization_token: config
                .access_token()
                .filter(|token| !token.is_empty())
                .map(str::to_owned),
            user_agent: config.user_agent().to_owned(),
            diagnostics,
        })
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn authorization_token(&self) -> Option<&str> {
        self.authorization_token.as_deref()
    }

    pub(crate) fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub(crate) fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub(crate) fn build_url(&self, path: &str) -> Result<Url, ClientError> {
        let relative = path.trim_start_matches('/');
        self.base_url
            .join(relative)
            .map_err(|_| ClientError::InvalidPath(path.to_owned()))
    }
}

/// Turns a received status and body into the call result.
///
/// Success with an empty body (including `204 No Content`) yields
/// [`Value::Null`]. Any other status becomes [`ClientError::HttpStatus`] with
/// the parsed error payload, or `{"message": <status text>}` when the payload
/// is not JSON.
pub(crate) fn interpret_response(status: StatusCode, payload: &str) -> Result<Value, ClientError> {
    let status_text = status.canonical_reason().unwrap_or_default().to_owned();

    if !status.is_success() {
        let body =
            serde_json::from_str(payload).unwrap_or_else(|_| json!({ "message": status_text }));
        debug!(%status, "API returned an error response.");
        return Err(ClientError::HttpStatus {
            status,
            status_text,
            body,
        });
    }

    if status == StatusCode::NO_CONTENT || payload.trim().is_empty() {
        Ok(Value::Null)
    } else {
        Ok(serde_json::from_str(payload)?)
    }
}
