//! Text → decoded document value, for scenes, ontologies and options.
//!
//! YAML is a superset of JSON, so both formats go through the same parser.
//! Nothing here interprets the document; that is left to
//! [`Scene::from_value`](crate::scene::Scene::from_value) and
//! [`Ontology::from_value`](crate::ontology::Ontology::from_value).

use crate::error::LoadError;
use serde_json::Value;
use std::path::Path;

/// Parse a YAML or JSON document whose root must be a mapping.
pub fn parse_document(input: &str) -> Result<Value, LoadError> {
    if input.trim().is_empty() {
        return Err(LoadError::EmptyInput);
    }

    check_multi_document(input)?;

    let value: Value = serde_saphyr::from_str(input).map_err(|e| LoadError::Syntax {
        message: e.to_string(),
    })?;

    if !value.is_object() {
        return Err(LoadError::NotAMapping);
    }

    Ok(value)
}

/// Read and parse a document from disk.
pub fn read_document(path: &Path) -> Result<Value, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_document(&text)
}

/// Only one YAML document per input. Markers count at column 0 only, so
/// `---` inside block scalars is ignored.
fn check_multi_document(input: &str) -> Result<(), LoadError> {
    let markers = input
        .lines()
        .filter(|line| line.starts_with("---") && line[3..].trim().is_empty())
        .count();
    if markers > 1 {
        return Err(LoadError::Syntax {
            message: "multi-document YAML is not supported".to_string(),
        });
    }
    Ok(())
}
