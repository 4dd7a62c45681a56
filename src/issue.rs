//! The uniform finding record produced by every checker.
//!
//! The serialized shape is a contract shared with external reporting tools:
//!
//! ```json
//! {"type": "AttributeMissing", "identifiers": {"frame": 0, "attribute": "color"}, "reason": "..."}
//! ```
//!
//! `identifiers` is either a sparse object (absent fields omitted) or, for
//! schema findings, a raw path list. `reason` is omitted when absent.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// General classification of an issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    #[serde(rename = "SchemaIssue")]
    Schema,
    AttributeMissing,
    AttributeScope,
    AttributeType,
    AttributeUndefined,
    AttributeValue,
    #[serde(rename = "EmptyFramesIssue")]
    EmptyFrames,
    ObjectTypeUndefined,
    RailSide,
    SensorIdUnknown,
    SensorTypeWrong,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Schema => "SchemaIssue",
            IssueKind::AttributeMissing => "AttributeMissing",
            IssueKind::AttributeScope => "AttributeScope",
            IssueKind::AttributeType => "AttributeType",
            IssueKind::AttributeUndefined => "AttributeUndefined",
            IssueKind::AttributeValue => "AttributeValue",
            IssueKind::EmptyFrames => "EmptyFramesIssue",
            IssueKind::ObjectTypeUndefined => "ObjectTypeUndefined",
            IssueKind::RailSide => "RailSide",
            IssueKind::SensorIdUnknown => "SensorIdUnknown",
            IssueKind::SensorTypeWrong => "SensorTypeWrong",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Information for locating an issue inside a scene. Only populated fields
/// are meaningful.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IssueIdentifiers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor: Option<String>,
}

impl IssueIdentifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn annotation(mut self, id: impl Into<String>) -> Self {
        self.annotation = Some(id.into());
        self
    }

    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        self.attribute = Some(name.into());
        self
    }

    pub fn frame(mut self, id: u64) -> Self {
        self.frame = Some(id);
        self
    }

    pub fn object(mut self, id: impl Into<String>) -> Self {
        self.object = Some(id.into());
        self
    }

    pub fn object_type(mut self, name: impl Into<String>) -> Self {
        self.object_type = Some(name.into());
        self
    }

    pub fn sensor(mut self, id: impl Into<String>) -> Self {
        self.sensor = Some(id.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One element of a raw schema path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(u64),
    Key(String),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(u64::try_from(index).unwrap_or(u64::MAX))
    }
}

/// Where an issue is located: structured identifiers, or a raw path for
/// issues coming from schema validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum IssueLocation {
    Identifiers(IssueIdentifiers),
    RawPath(Vec<PathSegment>),
}

// Dispatch on the JSON shape: a derived struct deserializer would also
// accept short sequences as positional identifiers.
impl<'de> Deserialize<'de> for IssueLocation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Object(_) => serde_json::from_value(value)
                .map(IssueLocation::Identifiers)
                .map_err(serde::de::Error::custom),
            Value::Array(_) => serde_json::from_value(value)
                .map(IssueLocation::RawPath)
                .map_err(serde::de::Error::custom),
            other => Err(serde::de::Error::custom(format!(
                "identifiers must be an object or a list, got {}",
                other
            ))),
        }
    }
}

impl From<IssueIdentifiers> for IssueLocation {
    fn from(identifiers: IssueIdentifiers) -> Self {
        IssueLocation::Identifiers(identifiers)
    }
}

impl From<Vec<PathSegment>> for IssueLocation {
    fn from(path: Vec<PathSegment>) -> Self {
        IssueLocation::RawPath(path)
    }
}

/// A validation finding. Value object: created by checkers, never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub identifiers: IssueLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Issue {
    pub fn new(kind: IssueKind, identifiers: impl Into<IssueLocation>) -> Self {
        Issue {
            kind,
            identifiers: identifiers.into(),
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Structured identifiers, if this issue has them.
    pub fn identifiers(&self) -> Option<&IssueIdentifiers> {
        match &self.identifiers {
            IssueLocation::Identifiers(ids) => Some(ids),
            IssueLocation::RawPath(_) => None,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(reason) = &self.reason {
            write!(f, ": {}", reason)?;
        }
        Ok(())
    }
}
