use std::fmt;
use std::time::Duration;

use reqwest::Url;

use crate::ClientError;

pub const BASE_URL_ENV: &str = "SS12000_BASE_URL";
pub const ACCESS_TOKEN_ENV: &str = "SS12000_ACCESS_TOKEN";
pub const TIMEOUT_ENV: &str = "SS12000_TIMEOUT_SECS";

/// Default `User-Agent` header value.
pub const USER_AGENT: &str = concat!("ss12000-client/", env!("CARGO_PKG_VERSION"));

/// Non-fatal findings produced while constructing a client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// No access token was configured. Calls will likely fail with 401/403.
    MissingAccessToken,
    /// The base URL does not use `https`.
    InsecureScheme { scheme: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAccessToken => {
                f.write_str("no access token configured, requests are sent unauthenticated")
            }
            Self::InsecureScheme { scheme } => {
                write!(f, "base URL uses '{scheme}' instead of 'https'")
            }
        }
    }
}

/// Settings used to construct an SS12000 client.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    base_url: String,
    access_token: Option<String>,
    timeout: Option<Duration>,
    user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: None,
            timeout: None,
            user_agent: USER_AGENT.to_owned(),
        }
    }

    /// Reads `SS12000_BASE_URL`, `SS12000_ACCESS_TOKEN` and `SS12000_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let base_url = lookup(BASE_URL_ENV).ok_or(ClientError::MissingBaseUrl)?;
        let mut config = Self::new(base_url);

        if let Some(token) = lookup(ACCESS_TOKEN_ENV).filter(|token| !token.is_empty()) {
            config = config.with_access_token(token);
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let seconds = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ClientError::InvalidSetting {
                    name: TIMEOUT_ENV.to_owned(),
                    value: raw.clone(),
                })?;
            config = config.with_timeout(Duration::from_secs(seconds));
        }

        Ok(config)
    }

    /// Sends `Authorization: Bearer <token>` on every request.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Default timeout applied to every request. Unset means no timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Parses the base URL and collects construction diagnostics.
    ///
    /// The URL is normalized to include a trailing slash, so relative endpoint
    /// paths join correctly beneath any path prefix.
    pub fn validate(&self) -> Result<(Url, Vec<Diagnostic>), ClientError> {
        let raw = self.base_url.trim();
        if raw.is_empty() {
            return Err(ClientError::MissingBaseUrl);
        }

        let parsed =
            Url::parse(raw).map_err(|_| ClientError::InvalidBaseUrl(self.base_url.clone()))?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(self.base_url.clone()));
        }

        let mut diagnostics = Vec::new();
        if parsed.scheme() != "https" {
            diagnostics.push(Diagnostic::InsecureScheme {
                scheme: parsed.scheme().to_owned(),
            });
        }
        if self.access_token.as_deref().is_none_or(str::is_empty) {
            diagnostics.push(Diagnostic::MissingAccessToken);
        }

        Ok((ensure_trailing_slash(parsed), diagnostics))
    }
}

fn ensure_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let mut path = url.path().to_owned();
        path.push('/');
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::{ACCESS_TOKEN_ENV, BASE_URL_ENV, ClientConfig, Diagnostic, TIMEOUT_ENV};
    use crate::ClientError;

    #[test]
    fn empty_base_url_is_fatal() {
        let error = ClientConfig::new("  ").validate().expect_err("must fail");
        assert!(matches!(error, ClientError::MissingBaseUrl));
    }

    #[test]
    fn unparsable_base_url_is_rejected() {
        let error = ClientConfig::new("not a url").validate().expect_err("must fail");
        assert!(matches!(error, ClientError::InvalidBaseUrl(_)));
    }

    #[test]
    fn https_with_token_has_no_diagnostics() {
        let (url, diagnostics) = ClientConfig::new("https://skola.example/ss12000/v2")
            .with_access_token("secret")
            .validate()
            .expect("valid config");
        assert_eq!(url.as_str(), "https://skola.example/ss12000/v2/");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn plain_http_and_missing_token_are_reported() {
        let (_, diagnostics) = ClientConfig::new("http://localhost:8080")
            .validate()
            .expect("valid config");
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::InsecureScheme {
                    scheme: "http".to_owned()
                },
                Diagnostic::MissingAccessToken,
            ]
        );
    }

    #[test]
    fn loads_settings_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (BASE_URL_ENV, "https://skola.example"),
            (ACCESS_TOKEN_ENV, "token-1"),
            (TIMEOUT_ENV, "30"),
        ]);
        let config = ClientConfig::from_lookup(|name| vars.get(name).map(|v| (*v).to_owned()))
            .expect("config loads");
        assert_eq!(config.base_url(), "https://skola.example");
        assert_eq!(config.access_token(), Some("token-1"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn lookup_requires_base_url_and_numeric_timeout() {
        let error = ClientConfig::from_lookup(|_| None).expect_err("missing base url");
        assert!(matches!(error, ClientError::MissingBaseUrl));

        let error = ClientConfig::from_lookup(|name| match name {
            BASE_URL_ENV => Some("https://skola.example".to_owned()),
            TIMEOUT_ENV => Some("soon".to_owned()),
            _ => None,
        })
        .expect_err("bad timeout");
        assert!(matches!(error, ClientError::InvalidSetting { .. }));
    }
}
