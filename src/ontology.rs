//! Domain ontology: which object classes exist and what their annotations
//! must carry.

use crate::attribute::AttributeTypeRegistry;
use crate::error::ConfigError;
use crate::issue::{Issue, IssueIdentifiers, IssueKind};
use crate::object_class::ObjectClass;
use crate::scene::Scene;
use crate::scope::{AnnotationRef, check_scope_consistency};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Mapping from class name to [`ObjectClass`]. Immutable once built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ontology {
    classes: BTreeMap<String, ObjectClass>,
}

impl Ontology {
    pub fn new(classes: impl IntoIterator<Item = (String, ObjectClass)>) -> Self {
        Ontology {
            classes: classes.into_iter().collect(),
        }
    }

    /// Builds the ontology from a decoded configuration value using the
    /// standard attribute registry.
    pub fn from_value(value: &Value) -> Result<Ontology, ConfigError> {
        Self::from_value_with(&AttributeTypeRegistry::standard(), value)
    }

    pub fn from_value_with(
        registry: &AttributeTypeRegistry,
        value: &Value,
    ) -> Result<Ontology, ConfigError> {
        let obj = match value {
            Value::Object(obj) => obj,
            Value::Null => return Ok(Ontology::default()),
            other => {
                return Err(ConfigError::invalid(
                    "$",
                    format!("ontology must be a mapping of class names, got {}", other),
                ));
            }
        };

        let classes = obj
            .iter()
            .map(|(name, class)| {
                let class = ObjectClass::from_value(registry, class, &format!("$.{}", name))?;
                Ok((name.clone(), class))
            })
            .collect::<Result<BTreeMap<_, _>, ConfigError>>()?;

        debug!(classes = classes.len(), "ontology_parsed");
        Ok(Ontology { classes })
    }

    pub fn classes(&self) -> &BTreeMap<String, ObjectClass> {
        &self.classes
    }

    pub fn class(&self, name: &str) -> Option<&ObjectClass> {
        self.classes.get(name)
    }

    /// Checks a scene against the ontology: undefined object types, then
    /// per-annotation attribute checks, then scope consistency.
    pub fn check(&self, scene: &Scene) -> Vec<Issue> {
        let mut issues = self.check_object_types(scene);

        let annotations = AnnotationRef::compile(scene);
        debug!(annotations = annotations.len(), "ontology_annotations_compiled");

        for annotation in &annotations {
            let Some(class) = self.classes.get(annotation.object_type) else {
                continue;
            };
            issues.extend(class.check(
                annotation.annotation,
                annotation.sensor_type,
                &annotation.to_identifiers(None),
            ));
        }

        issues.extend(check_scope_consistency(self, &annotations));
        issues
    }

    fn check_object_types(&self, scene: &Scene) -> Vec<Issue> {
        scene
            .objects
            .iter()
            .filter(|(_, object)| !self.classes.contains_key(&object.object_type))
            .map(|(id, object)| {
                Issue::new(
                    IssueKind::ObjectTypeUndefined,
                    IssueIdentifiers::new()
                        .object(id.as_str())
                        .object_type(object.object_type.as_str()),
                )
                .with_reason(format!(
                    "Object type '{}' is not defined in the ontology.",
                    object.object_type
                ))
            })
            .collect()
    }
}
