//! Caller-facing parameter names and their wire-level query keys.
//!
//! Every operation declares its query parameters as an ordered list of
//! [`ParamGroup`]s. Callers always use the flat camelCase name
//! (`metaModifiedAfter`); the encoder emits the wire key verbatim
//! (`meta.modified.after`), dots included.

use serde_json::{Number, Value};

use crate::ClientError;

/// One query parameter: caller-facing name and wire key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Param {
    /// Flat camelCase name used by callers.
    pub name: &'static str,
    /// Exact query key sent to the server.
    pub wire: &'static str,
}

impl Param {
    pub const fn new(name: &'static str, wire: &'static str) -> Self {
        Self { name, wire }
    }

    /// A parameter whose caller name and wire key are identical.
    pub const fn same(name: &'static str) -> Self {
        Self { name, wire: name }
    }
}

/// Ordered run of parameters shared between operations.
pub type ParamGroup = &'static [Param];

pub const META: ParamGroup = &[
    Param::new("metaCreatedBefore", "meta.created.before"),
    Param::new("metaCreatedAfter", "meta.created.after"),
    Param::new("metaModifiedBefore", "meta.modified.before"),
    Param::new("metaModifiedAfter", "meta.modified.after"),
];

pub const DATE_RANGE: ParamGroup = &[
    Param::new("startDateOnOrBefore", "startDate.onOrBefore"),
    Param::new("startDateOnOrAfter", "startDate.onOrAfter"),
    Param::new("endDateOnOrBefore", "endDate.onOrBefore"),
    Param::new("endDateOnOrAfter", "endDate.onOrAfter"),
];

pub const TIME_RANGE: ParamGroup = &[
    Param::new("startTimeOnOrBefore", "startTime.onOrBefore"),
    Param::new("startTimeOnOrAfter", "startTime.onOrAfter"),
    Param::new("endTimeOnOrBefore", "endTime.onOrBefore"),
    Param::new("endTimeOnOrAfter", "endTime.onOrAfter"),
];

pub const EXPAND: ParamGroup = &[Param::same("expand")];

pub const REFERENCE_NAMES: ParamGroup = &[Param::same("expandReferenceNames")];

pub const SORTKEY: ParamGroup = &[Param::same("sortkey")];

pub const PAGING: ParamGroup = &[Param::same("limit"), Param::same("pageToken")];

/// A single query value after JSON-to-wire normalization.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryValue {
    Text(String),
    Number(Number),
    Bool(bool),
    /// Encoded as one repeated key per element, in order.
    List(Vec<String>),
}

impl QueryValue {
    /// Interprets a caller-supplied JSON value.
    ///
    /// `null` means "not set" and yields `Ok(None)`. Objects are rejected:
    /// nested filters must be spelled with their flat name.
    pub fn from_json(value: &Value) -> Result<Option<Self>, String> {
        match value {
            Value::Null => Ok(None),
            Value::String(text) => Ok(Some(Self::Text(text.clone()))),
            Value::Number(number) => Ok(Some(Self::Number(number.clone()))),
            Value::Bool(flag) => Ok(Some(Self::Bool(*flag))),
            Value::Array(items) => items
                .iter()
                .map(scalar_text)
                .collect::<Result<Vec<_>, _>>()
                .map(|items| Some(Self::List(items))),
            Value::Object(_) => {
                Err("nested objects are not accepted, use the flat parameter name".to_owned())
            }
        }
    }

    /// Appends this value under `wire` to the outgoing pair list.
    pub fn append_to(&self, wire: &str, pairs: &mut Vec<(String, String)>) {
        match self {
            Self::Text(text) => pairs.push((wire.to_owned(), text.clone())),
            Self::Number(number) => pairs.push((wire.to_owned(), number.to_string())),
            Self::Bool(flag) => pairs.push((wire.to_owned(), flag.to_string())),
            Self::List(items) => {
                pairs.extend(items.iter().map(|item| (wire.to_owned(), item.clone())));
            }
        }
    }
}

fn scalar_text(value: &Value) -> Result<String, String> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        other => Err(format!("sequence elements must be scalars, got {other}")),
    }
}

/// Iterates all parameters of an operation in declaration order.
pub fn flatten(groups: &'static [ParamGroup]) -> impl Iterator<Item = &'static Param> {
    groups.iter().flat_map(|group| group.iter())
}

/// Encodes a flat JSON object of caller parameters into wire query pairs.
///
/// Pairs are emitted in the declaration order of `groups`, so identical input
/// always yields identical output. Unset (`null` or absent) parameters produce
/// no key at all.
pub(crate) fn encode_query(
    operation_id: &str,
    groups: &'static [ParamGroup],
    params: &Value,
) -> Result<Vec<(String, String)>, ClientError> {
    let map = match params {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        other => {
            return Err(ClientError::InvalidParameter {
                operation_id: operation_id.to_owned(),
                parameter: String::new(),
                reason: format!("parameters must be a JSON object, got {other}"),
            });
        }
    };

    // Null is "not set", so an undeclared key is only an error when it carries a value.
    if let Some((unknown, _)) = map.iter().find(|(key, value)| {
        !value.is_null() && !flatten(groups).any(|param| param.name == key.as_str())
    }) {
        return Err(ClientError::UnknownParameter {
            operation_id: operation_id.to_owned(),
            parameter: unknown.clone(),
        });
    }

    let mut pairs = Vec::new();
    for param in flatten(groups) {
        let Some(raw) = map.get(param.name) else {
            continue;
        };
        let value = QueryValue::from_json(raw).map_err(|reason| ClientError::InvalidParameter {
            operation_id: operation_id.to_owned(),
            parameter: param.name.to_owned(),
            reason,
        })?;
        if let Some(value) = value {
            value.append_to(param.wire, &mut pairs);
        }
    }

    Ok(pairs)
}
