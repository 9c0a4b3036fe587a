use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::{OperationKind, Resource};

/// Errors returned by SS12000 client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No base URL was configured; the client cannot be constructed.
    #[error("base URL is required")]
    MissingBaseUrl,

    /// Base URL is not a valid absolute URL.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// A configuration value could not be interpreted.
    #[error("invalid value '{value}' for setting '{name}'")]
    InvalidSetting { name: String, value: String },

    /// Endpoint path could not be joined to the base URL.
    #[error("invalid endpoint path '{0}'")]
    InvalidPath(String),

    /// The requested operation id is not present in the operation table.
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    /// The resource has no operation of the requested kind.
    #[error("resource '{resource}' does not support {kind} operations")]
    UnsupportedOperation {
        resource: Resource,
        kind: OperationKind,
    },

    /// A required path template parameter was not provided or was empty.
    #[error("missing required path parameter '{parameter}' for operation '{operation_id}'")]
    MissingPathParameter {
        operation_id: String,
        parameter: String,
    },

    /// A caller parameter is not declared for the operation.
    #[error("unknown parameter '{parameter}' for operation '{operation_id}'")]
    UnknownParameter {
        operation_id: String,
        parameter: String,
    },

    /// A caller parameter has a value that cannot be placed in a query string.
    #[error("invalid parameter '{parameter}' for operation '{operation_id}': {reason}")]
    InvalidParameter {
        operation_id: String,
        parameter: String,
        reason: String,
    },

    /// The operation requires a JSON body and none was supplied.
    #[error("operation '{operation_id}' requires a request body")]
    MissingBody { operation_id: String },

    /// A JSON body was supplied to an operation that does not take one.
    #[error("operation '{operation_id}' does not accept a request body")]
    UnexpectedBody { operation_id: String },

    /// HTTP transport-layer request failure (DNS, connect, timeout, ...).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A body could not be serialized or a response could not be parsed as JSON.
    #[error("failed to process JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success HTTP status returned by the API.
    ///
    /// `body` holds the parsed JSON error payload, or `{"message": status_text}`
    /// when the response body was not valid JSON.
    #[error("server returned status {status}: {body}")]
    HttpStatus {
        status: StatusCode,
        status_text: String,
        body: Value,
    },
}

impl ClientError {
    /// HTTP status of an API error. `None` for transport and local failures.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Parsed error payload of an API error.
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::HttpStatus { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns `true` for network-level failures that never produced a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Request(_))
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;

    use super::ClientError;

    #[test]
    fn status_and_body_only_exposed_for_api_errors() {
        let api = ClientError::HttpStatus {
            status: StatusCode::NOT_FOUND,
            status_text: "Not Found".to_owned(),
            body: json!({"error": "not_found"}),
        };
        assert_eq!(api.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(api.body(), Some(&json!({"error": "not_found"})));

        let local = ClientError::MissingBaseUrl;
        assert_eq!(local.status(), None);
        assert!(local.body().is_none());
        assert!(!local.is_transport());
    }
}
