//! Top-level validation: schema pre-check, then the independent checkers.
//!
//! ```text
//! raw scene ─ schema ─┬─ issues? → return them alone
//!                     └─ Scene ─ ontology ─ rail side ─ empty frames ─ sensors → issues
//! ```

use crate::empty_frames::validate_empty_frames;
use crate::error::ValidateError;
use crate::issue::Issue;
use crate::load::read_document;
use crate::ontology::Ontology;
use crate::rail_side::validate_rail_side;
use crate::scene::Scene;
use crate::schema::{SchemaValidator, StructuralSchema, decode_scene};
use crate::sensors::validate_sensors;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Where the ontology configuration comes from.
#[derive(Clone, Debug)]
pub enum OntologySource {
    /// Already decoded configuration.
    Value(Value),
    /// YAML or JSON file, read by the orchestrator.
    Path(PathBuf),
}

impl From<Value> for OntologySource {
    fn from(value: Value) -> Self {
        OntologySource::Value(value)
    }
}

impl From<PathBuf> for OntologySource {
    fn from(path: PathBuf) -> Self {
        OntologySource::Path(path)
    }
}

impl From<&Path> for OntologySource {
    fn from(path: &Path) -> Self {
        OntologySource::Path(path.to_path_buf())
    }
}

impl OntologySource {
    pub fn resolve(&self) -> Result<Ontology, ValidateError> {
        let ontology = match self {
            OntologySource::Value(value) => Ontology::from_value(value)?,
            OntologySource::Path(path) => Ontology::from_value(&read_document(path)?)?,
        };
        Ok(ontology)
    }
}

/// Which checkers run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidateOptions {
    pub ontology: bool,
    pub rail_side: bool,
    pub empty_frames: bool,
    pub sensors: bool,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        ValidateOptions {
            ontology: true,
            rail_side: true,
            empty_frames: true,
            sensors: false,
        }
    }
}

impl ValidateOptions {
    pub fn from_value(value: &Value) -> Result<ValidateOptions, serde_json::Error> {
        ValidateOptions::deserialize(value)
    }
}

/// Validate a raw scene document with default options and the structural
/// schema pre-check.
///
/// # Errors
///
/// Returns `Err` when the ontology cannot be read or built. Scene problems
/// are always returned as issues.
pub fn validate(scene: &Value, ontology: &OntologySource) -> Result<Vec<Issue>, ValidateError> {
    validate_with(scene, ontology, &ValidateOptions::default(), &StructuralSchema)
}

pub fn validate_with(
    scene: &Value,
    ontology: &OntologySource,
    options: &ValidateOptions,
    schema: &dyn SchemaValidator,
) -> Result<Vec<Issue>, ValidateError> {
    let schema_issues = schema.validate(scene);
    if !schema_issues.is_empty() {
        warn!(issues = schema_issues.len(), "schema_check_failed");
        return Ok(schema_issues);
    }

    let scene = match decode_scene(scene) {
        Ok(scene) => scene,
        Err(issues) => {
            warn!("scene_decode_failed");
            return Ok(issues);
        }
    };

    let ontology = if options.ontology {
        ontology.resolve()?
    } else {
        Ontology::default()
    };

    Ok(validate_scene(&scene, &ontology, options))
}

/// Run the enabled checkers over an already decoded scene. Issues are
/// concatenated in checker order.
pub fn validate_scene(scene: &Scene, ontology: &Ontology, options: &ValidateOptions) -> Vec<Issue> {
    let mut issues = Vec::new();

    if options.ontology {
        let found = ontology.check(scene);
        debug!(issues = found.len(), "ontology_checked");
        issues.extend(found);
    }
    if options.rail_side {
        let found = validate_rail_side(scene);
        debug!(issues = found.len(), "rail_side_checked");
        issues.extend(found);
    }
    if options.empty_frames {
        let found = validate_empty_frames(scene);
        debug!(issues = found.len(), "empty_frames_checked");
        issues.extend(found);
    }
    if options.sensors {
        let found = validate_sensors(scene);
        debug!(issues = found.len(), "sensors_checked");
        issues.extend(found);
    }

    issues
}
