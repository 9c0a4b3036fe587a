use std::fmt;

use reqwest::Method;
use serde_json::Value;
use url::form_urlencoded;

/// HTTP verbs used by the SS12000 API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    pub(crate) fn to_reqwest(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
            Self::Patch => Method::PATCH,
            Self::Delete => Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully constructed request, ready to be sent by either transport.
///
/// Built by [`crate::prepare`] without touching the network, so the exact wire
/// shape can be inspected before sending.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    /// Rendered path relative to the base URL, for example `/persons/lookup`.
    pub path: String,
    /// Wire-level query pairs. Repeated keys encode sequences.
    pub query: Vec<(String, String)>,
    /// JSON body for POST/PATCH operations.
    pub body: Option<Value>,
}

impl PreparedRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// All values sent under `key`, in order.
    pub fn query_values(&self, key: &str) -> Vec<&str> {
        self.query
            .iter()
            .filter(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// The query string as it appears on the wire (without the leading `?`).
    pub fn encoded_query(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish()
    }

    pub(crate) fn borrowed_query(&self) -> Vec<(&str, &str)> {
        self.query
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{HttpMethod, PreparedRequest};

    #[test]
    fn encoded_query_keeps_dots_and_repeats_keys() {
        let request = PreparedRequest::new(HttpMethod::Get, "/persons").with_query(vec![
            ("nameContains".to_owned(), "Anna".to_owned()),
            ("nameContains".to_owned(), "Per Olof".to_owned()),
            ("meta.modified.after".to_owned(), "2024-01-01".to_owned()),
        ]);
        assert_eq!(
            request.encoded_query(),
            "nameContains=Anna&nameContains=Per+Olof&meta.modified.after=2024-01-01"
        );
        assert_eq!(request.query_values("nameContains"), ["Anna", "Per Olof"]);
    }
}
