use thiserror::Error;

/// Produced while building an [`Ontology`](crate::ontology::Ontology) from its
/// configuration. Halts construction; never reported as an issue.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unsupported attribute type in fragment {fragment}")]
    UnsupportedAttributeType { fragment: String },

    #[error("attribute fragment matches more than one attribute type: {}", candidates.join(", "))]
    AmbiguousAttributeType { candidates: Vec<String> },

    #[error("invalid scope '{scope}' (expected annotation, frame or object)")]
    InvalidScope { scope: String },

    #[error("invalid sensor type '{sensor_type}'")]
    InvalidSensorType { sensor_type: String },

    #[error("attribute type '{attribute_type}' requires an 'options' list")]
    MissingOptions { attribute_type: String },

    #[error("invalid ontology at {path}: {message}")]
    InvalidOntology { path: String, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(path: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidOntology {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Produced when configuration or scene text cannot be read or decoded.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("empty input")]
    EmptyInput,

    #[error("document root must be a mapping")]
    NotAMapping,

    #[error("syntax error: {message}")]
    Syntax { message: String },

    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}

/// Combined error type for the [`validate`](crate::validate::validate) entry points.
#[derive(Clone, Debug, Error)]
pub enum ValidateError {
    #[error("ontology error: {0}")]
    Config(#[from] ConfigError),

    #[error("load error: {0}")]
    Load(#[from] LoadError),
}

/// Serialization error for issue reports.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SerializeError {
    pub message: String,
}
