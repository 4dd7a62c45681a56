use crate::attribute::{AttributeDefinition, AttributeTypeRegistry};
use crate::enums::SensorType;
use crate::error::ConfigError;
use crate::issue::{Issue, IssueIdentifiers, IssueKind};
use crate::scene::Annotation;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A named ontology class: its attribute definitions, plus attribute blocks
/// that only apply to annotations made in one sensor type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjectClass {
    pub attributes: BTreeMap<String, AttributeDefinition>,
    pub sensor_type_attributes: BTreeMap<SensorType, BTreeMap<String, AttributeDefinition>>,
}

impl ObjectClass {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: impl Into<String>, definition: AttributeDefinition) -> Self {
        self.attributes.insert(name.into(), definition);
        self
    }

    pub fn with_sensor_attribute(
        mut self,
        sensor_type: SensorType,
        name: impl Into<String>,
        definition: AttributeDefinition,
    ) -> Self {
        self.sensor_type_attributes
            .entry(sensor_type)
            .or_default()
            .insert(name.into(), definition);
        self
    }

    /// Parses `{attributes: {...}, sensor_types: {camera: {attributes: {...}}}}`.
    /// A null class body declares a class without attributes.
    pub fn from_value(
        registry: &AttributeTypeRegistry,
        value: &Value,
        path: &str,
    ) -> Result<ObjectClass, ConfigError> {
        let obj = match value {
            Value::Null => return Ok(ObjectClass::new()),
            Value::Object(obj) => obj,
            other => {
                return Err(ConfigError::invalid(
                    path,
                    format!("object class must be a mapping, got {}", other),
                ));
            }
        };

        let mut class = ObjectClass::new();
        for (key, value) in obj {
            match key.as_str() {
                "attributes" => {
                    class.attributes =
                        parse_attributes(registry, value, &format!("{}.attributes", path))?;
                }
                "sensor_types" => {
                    class.sensor_type_attributes =
                        parse_sensor_types(registry, value, &format!("{}.sensor_types", path))?;
                }
                other => {
                    return Err(ConfigError::invalid(
                        format!("{}.{}", path, other),
                        "unknown object class field",
                    ));
                }
            }
        }
        Ok(class)
    }

    /// Attributes an annotation made in `sensor_type` may carry. Without a
    /// known sensor type no filtering is applied.
    pub fn applicable_attributes(
        &self,
        sensor_type: Option<SensorType>,
    ) -> BTreeMap<&str, &AttributeDefinition> {
        let Some(sensor_type) = sensor_type else {
            let mut all = BTreeMap::new();
            for (name, def) in self.all_attributes() {
                all.entry(name).or_insert(def);
            }
            return all;
        };

        let mut applicable: BTreeMap<&str, &AttributeDefinition> = self
            .attributes
            .iter()
            .filter(|(_, def)| def.applies_to(sensor_type))
            .map(|(name, def)| (name.as_str(), def))
            .collect();
        if let Some(block) = self.sensor_type_attributes.get(&sensor_type) {
            applicable.extend(block.iter().map(|(name, def)| (name.as_str(), def)));
        }
        applicable
    }

    /// Every definition of this class: class-level first, then sensor-type
    /// blocks in sensor type order. Names may repeat across blocks.
    pub fn all_attributes(&self) -> impl Iterator<Item = (&str, &AttributeDefinition)> {
        self.attributes
            .iter()
            .chain(self.sensor_type_attributes.values().flatten())
            .map(|(name, def)| (name.as_str(), def))
    }

    /// Undefined, missing, then wrongly typed attributes, in that order.
    pub fn check(
        &self,
        annotation: &Annotation,
        sensor_type: Option<SensorType>,
        identifiers: &IssueIdentifiers,
    ) -> Vec<Issue> {
        let applicable = self.applicable_attributes(sensor_type);
        let mut issues = Vec::new();
        check_undefined_attributes(annotation, &applicable, identifiers, &mut issues);
        check_missing_attributes(annotation, &applicable, identifiers, &mut issues);
        check_false_attribute_type(annotation, &applicable, identifiers, &mut issues);
        issues
    }
}

fn check_undefined_attributes(
    annotation: &Annotation,
    applicable: &BTreeMap<&str, &AttributeDefinition>,
    identifiers: &IssueIdentifiers,
    issues: &mut Vec<Issue>,
) {
    for name in annotation.attributes.keys() {
        if !applicable.contains_key(name.as_str()) {
            issues.push(
                Issue::new(
                    IssueKind::AttributeUndefined,
                    identifiers.clone().attribute(name.as_str()),
                )
                .with_reason(format!(
                    "Attribute '{}' is not defined for this object type and sensor type.",
                    name
                )),
            );
        }
    }
}

fn check_missing_attributes(
    annotation: &Annotation,
    applicable: &BTreeMap<&str, &AttributeDefinition>,
    identifiers: &IssueIdentifiers,
    issues: &mut Vec<Issue>,
) {
    for (name, definition) in applicable {
        if !definition.optional && !annotation.attributes.contains_key(*name) {
            issues.push(
                Issue::new(IssueKind::AttributeMissing, identifiers.clone().attribute(*name))
                    .with_reason(format!("Required attribute '{}' is missing.", name)),
            );
        }
    }
}

fn check_false_attribute_type(
    annotation: &Annotation,
    applicable: &BTreeMap<&str, &AttributeDefinition>,
    identifiers: &IssueIdentifiers,
    issues: &mut Vec<Issue>,
) {
    for (name, value) in &annotation.attributes {
        if let Some(definition) = applicable.get(name.as_str()) {
            let ids = identifiers.clone().attribute(name.as_str());
            issues.extend(definition.check_type_and_value(name, value, &ids));
        }
    }
}

fn parse_attributes(
    registry: &AttributeTypeRegistry,
    value: &Value,
    path: &str,
) -> Result<BTreeMap<String, AttributeDefinition>, ConfigError> {
    let Some(obj) = as_mapping(value, path)? else {
        return Ok(BTreeMap::new());
    };
    obj.iter()
        .map(|(name, fragment)| {
            let definition = registry.parse(fragment, &format!("{}.{}", path, name))?;
            Ok((name.clone(), definition))
        })
        .collect()
}

fn parse_sensor_types(
    registry: &AttributeTypeRegistry,
    value: &Value,
    path: &str,
) -> Result<BTreeMap<SensorType, BTreeMap<String, AttributeDefinition>>, ConfigError> {
    let mut blocks = BTreeMap::new();
    let Some(obj) = as_mapping(value, path)? else {
        return Ok(blocks);
    };
    for (name, block) in obj {
        let sensor_type = SensorType::from_name(name).ok_or_else(|| ConfigError::InvalidSensorType {
            sensor_type: name.clone(),
        })?;
        let block_path = format!("{}.{}", path, name);
        let attributes = match block {
            Value::Null => BTreeMap::new(),
            Value::Object(obj) => {
                if let Some(key) = obj.keys().find(|k| k.as_str() != "attributes") {
                    return Err(ConfigError::invalid(
                        format!("{}.{}", block_path, key),
                        "unknown sensor type field",
                    ));
                }
                match obj.get("attributes") {
                    Some(attributes) => {
                        parse_attributes(registry, attributes, &format!("{}.attributes", block_path))?
                    }
                    None => BTreeMap::new(),
                }
            }
            other => {
                return Err(ConfigError::invalid(
                    block_path,
                    format!("sensor type block must be a mapping, got {}", other),
                ));
            }
        };
        blocks.insert(sensor_type, attributes);
    }
    Ok(blocks)
}

/// `None` for an explicit null, which YAML produces for an empty block.
fn as_mapping<'a>(
    value: &'a Value,
    path: &str,
) -> Result<Option<&'a Map<String, Value>>, ConfigError> {
    match value {
        Value::Object(obj) => Ok(Some(obj)),
        Value::Null => Ok(None),
        other => Err(ConfigError::invalid(
            path,
            format!("expected a mapping, got {}", other),
        )),
    }
}
