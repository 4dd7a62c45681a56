//! Cross-annotation consistency of frame- and object-scoped attributes.

use crate::attribute::AttributeDefinition;
use crate::enums::{Scope, SensorType};
use crate::issue::{Issue, IssueIdentifiers};
use crate::ontology::Ontology;
use crate::scene::{Annotation, Scene};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// An annotation together with where it sits in the scene.
#[derive(Clone, Debug)]
pub struct AnnotationRef<'a> {
    pub id: &'a str,
    pub frame_id: u64,
    pub annotation: &'a Annotation,
    pub object_type: &'a str,
    pub sensor_type: Option<SensorType>,
}

impl<'a> AnnotationRef<'a> {
    /// Every annotation of the scene whose object is declared, in frame order.
    pub fn compile(scene: &'a Scene) -> Vec<AnnotationRef<'a>> {
        scene
            .frames
            .iter()
            .flat_map(|(frame_id, frame)| {
                frame.annotations.iter().filter_map(move |(id, annotation)| {
                    let object_type = scene.object_type(&annotation.object_id)?;
                    Some(AnnotationRef {
                        id,
                        frame_id: *frame_id,
                        annotation,
                        object_type,
                        sensor_type: annotation
                            .sensor_id
                            .as_deref()
                            .and_then(|sensor| scene.sensor_type(sensor)),
                    })
                })
            })
            .collect()
    }

    pub fn is_same(&self, other: &AnnotationRef<'_>) -> bool {
        self.frame_id == other.frame_id && self.id == other.id
    }

    pub fn to_identifiers(&self, attribute: Option<&str>) -> IssueIdentifiers {
        let mut ids = IssueIdentifiers::new()
            .annotation(self.id)
            .frame(self.frame_id)
            .object(self.annotation.object_id.as_str())
            .object_type(self.object_type);
        if let Some(sensor) = &self.annotation.sensor_id {
            ids = ids.sensor(sensor.as_str());
        }
        if let Some(attribute) = attribute {
            ids = ids.attribute(attribute);
        }
        ids
    }
}

/// Runs the pairwise scope rule for every (object type, attribute name)
/// once. Annotations are grouped by object type up front; within a group
/// every ordered pair is compared. The definition that decides the scope is
/// the one applicable to the second annotation's sensor type, so a
/// sensor-type block overrides a class attribute of the same name.
pub fn check_scope_consistency(
    ontology: &Ontology,
    annotations: &[AnnotationRef<'_>],
) -> Vec<Issue> {
    let mut by_type: BTreeMap<&str, Vec<&AnnotationRef<'_>>> = BTreeMap::new();
    for annotation in annotations {
        by_type.entry(annotation.object_type).or_default().push(annotation);
    }

    let mut issues = Vec::new();

    for (class_name, class) in ontology.classes() {
        let Some(group) = by_type.get(class_name.as_str()) else {
            continue;
        };

        let mut applicable: HashMap<Option<SensorType>, BTreeMap<&str, &AttributeDefinition>> =
            HashMap::new();
        for annotation in group {
            applicable
                .entry(annotation.sensor_type)
                .or_insert_with(|| class.applicable_attributes(annotation.sensor_type));
        }

        let names: BTreeSet<&str> = class.all_attributes().map(|(name, _)| name).collect();
        for name in names {
            for first in group {
                for second in group {
                    let Some(definition) = applicable
                        .get(&second.sensor_type)
                        .and_then(|attributes| attributes.get(name))
                    else {
                        continue;
                    };
                    if definition.scope == Scope::Annotation {
                        continue;
                    }
                    issues.extend(definition.check_scope_for_two_annotations(
                        name,
                        definition.scope,
                        first,
                        second,
                    ));
                }
            }
        }
    }

    issues
}
