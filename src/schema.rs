//! Structural pre-check of raw scene documents.
//!
//! Runs before any ontology or geometry check. Any issue reported here
//! makes the orchestrator skip the remaining checks for that scene.

use crate::issue::{Issue, IssueKind, PathSegment};
use crate::scene::Scene;
use serde_json::{Map, Value};

/// Extension point for schema validation of a raw scene document.
pub trait SchemaValidator {
    /// Returns one [`IssueKind::Schema`] issue per violation; empty when the
    /// document is structurally valid.
    fn validate(&self, raw: &Value) -> Vec<Issue>;
}

/// Default validator: checks field presence and JSON kinds of the scene
/// shape documented on [`Scene`], plus object and sensor references.
#[derive(Clone, Copy, Debug, Default)]
pub struct StructuralSchema;

const ROOT_KEYS: &[&str] = &["sensors", "objects", "frames"];
const GEOMETRY_TYPES: &[&str] = &["bbox", "cuboid", "poly2d", "poly3d", "seg3d"];

impl SchemaValidator for StructuralSchema {
    fn validate(&self, raw: &Value) -> Vec<Issue> {
        let mut walker = Walker::default();
        walker.root(raw);
        walker.issues
    }
}

/// Decodes a structurally valid document into a [`Scene`]. A residual
/// decoding failure is reported as a single schema issue at the root.
pub fn decode_scene(raw: &Value) -> Result<Scene, Vec<Issue>> {
    Scene::from_value(raw).map_err(|e| {
        vec![Issue::new(IssueKind::Schema, Vec::<PathSegment>::new()).with_reason(e.to_string())]
    })
}

#[derive(Default)]
struct Walker {
    path: Vec<PathSegment>,
    issues: Vec<Issue>,
}

impl Walker {
    fn report(&mut self, reason: impl Into<String>) {
        self.issues
            .push(Issue::new(IssueKind::Schema, self.path.clone()).with_reason(reason));
    }

    fn at<T>(&mut self, segment: impl Into<PathSegment>, f: impl FnOnce(&mut Self) -> T) -> T {
        self.path.push(segment.into());
        let out = f(self);
        self.path.pop();
        out
    }

    fn mapping<'v>(&mut self, value: &'v Value) -> Option<&'v Map<String, Value>> {
        let obj = value.as_object();
        if obj.is_none() {
            self.report(format!("expected a mapping, got {}", kind_of(value)));
        }
        obj
    }

    fn required_str(&mut self, obj: &Map<String, Value>, key: &str) {
        match obj.get(key) {
            None => self.report(format!("required field '{}' is missing", key)),
            Some(Value::String(_)) => {}
            Some(other) => self.at(key, |w| {
                w.report(format!("expected a string, got {}", kind_of(other)))
            }),
        }
    }

    fn required_kind(&mut self, obj: &Map<String, Value>, key: &str, expected: &str) {
        match obj.get(key) {
            None => self.report(format!("required field '{}' is missing", key)),
            Some(value) if kind_of(value) == expected => {}
            Some(value) => self.at(key, |w| {
                w.report(format!("expected {}, got {}", expected, kind_of(value)))
            }),
        }
    }

    fn root(&mut self, raw: &Value) {
        let Some(root) = self.mapping(raw) else {
            return;
        };

        for key in root.keys() {
            if !ROOT_KEYS.contains(&key.as_str()) {
                self.at(key.as_str(), |w| w.report("unknown top-level field"));
            }
        }

        if let Some(sensors) = root.get("sensors") {
            self.at("sensors", |w| w.sensors(sensors));
        }
        if let Some(objects) = root.get("objects") {
            self.at("objects", |w| w.objects(objects));
        }
        if let Some(frames) = root.get("frames") {
            let objects = root.get("objects").and_then(Value::as_object);
            let sensors = root.get("sensors").and_then(Value::as_object);
            self.at("frames", |w| w.frames(frames, objects, sensors));
        }
    }

    fn sensors(&mut self, value: &Value) {
        let Some(sensors) = self.mapping(value) else {
            return;
        };
        for (id, sensor) in sensors {
            self.at(id.as_str(), |w| {
                if let Some(sensor) = w.mapping(sensor) {
                    w.required_str(sensor, "type");
                }
            });
        }
    }

    fn objects(&mut self, value: &Value) {
        let Some(objects) = self.mapping(value) else {
            return;
        };
        for (id, object) in objects {
            self.at(id.as_str(), |w| {
                if let Some(object) = w.mapping(object) {
                    w.required_str(object, "type");
                }
            });
        }
    }

    fn frames(
        &mut self,
        value: &Value,
        objects: Option<&Map<String, Value>>,
        sensors: Option<&Map<String, Value>>,
    ) {
        let Some(frames) = self.mapping(value) else {
            return;
        };
        for (id, frame) in frames {
            self.at(id.as_str(), |w| {
                if id.parse::<u64>().is_err() {
                    w.report(format!("frame id '{}' is not a non-negative integer", id));
                }
                let Some(frame) = w.mapping(frame) else {
                    return;
                };
                let Some(annotations) = frame.get("annotations") else {
                    return;
                };
                w.at("annotations", |w| {
                    let Some(annotations) = w.mapping(annotations) else {
                        return;
                    };
                    for (annotation_id, annotation) in annotations {
                        w.at(annotation_id.as_str(), |w| {
                            w.annotation(annotation, objects, sensors)
                        });
                    }
                });
            });
        }
    }

    fn annotation(
        &mut self,
        value: &Value,
        objects: Option<&Map<String, Value>>,
        sensors: Option<&Map<String, Value>>,
    ) {
        let Some(annotation) = self.mapping(value) else {
            return;
        };

        self.required_str(annotation, "object_id");
        if let Some(object_id) = annotation.get("object_id").and_then(Value::as_str)
            && !objects.is_some_and(|o| o.contains_key(object_id))
        {
            self.at("object_id", |w| {
                w.report(format!("references unknown object '{}'", object_id))
            });
        }

        match annotation.get("sensor_id") {
            None | Some(Value::Null) => {}
            Some(Value::String(sensor_id)) => {
                if !sensors.is_some_and(|s| s.contains_key(sensor_id)) {
                    self.at("sensor_id", |w| {
                        w.report(format!("references unknown sensor '{}'", sensor_id))
                    });
                }
            }
            Some(other) => self.at("sensor_id", |w| {
                w.report(format!("expected a string, got {}", kind_of(other)))
            }),
        }

        if let Some(attributes) = annotation.get("attributes") {
            self.at("attributes", |w| w.attributes(attributes));
        }

        self.required_str(annotation, "type");
        let Some(geometry) = annotation.get("type").and_then(Value::as_str) else {
            return;
        };
        match geometry {
            "bbox" => {
                self.required_kind(annotation, "pos", "mapping");
                self.required_kind(annotation, "size", "mapping");
            }
            "cuboid" => {
                self.required_kind(annotation, "pos", "mapping");
                self.required_kind(annotation, "quaternion", "list");
                self.required_kind(annotation, "size", "mapping");
            }
            "poly2d" | "poly3d" => self.required_kind(annotation, "points", "list"),
            "seg3d" => self.required_kind(annotation, "point_ids", "list"),
            other => self.at("type", |w| {
                w.report(format!(
                    "unknown annotation type '{}' (expected one of {})",
                    other,
                    GEOMETRY_TYPES.join(", ")
                ))
            }),
        }
    }

    fn attributes(&mut self, value: &Value) {
        let Some(attributes) = self.mapping(value) else {
            return;
        };
        for (name, attribute) in attributes {
            let valid = match attribute {
                Value::Array(items) => items.iter().all(is_primitive),
                other => is_primitive(other),
            };
            if !valid {
                self.at(name.as_str(), |w| {
                    w.report("attribute values must be a boolean, number, string or list of those")
                });
            }
        }
    }
}

fn is_primitive(value: &Value) -> bool {
    matches!(value, Value::Bool(_) | Value::Number(_) | Value::String(_))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}
