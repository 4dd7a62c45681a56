//! Attribute definitions of ontology classes and the registry that parses them.
//!
//! An attribute fragment is either a short tag (`"integer"`) or an object:
//!
//! ```yaml
//! attribute_type: single-select
//! options: [leftRail, rightRail]
//! optional: false
//! scope: object
//! sensor_types: [camera]
//! ```

use crate::enums::{Scope, SensorType};
use crate::error::ConfigError;
use crate::issue::{Issue, IssueIdentifiers, IssueKind};
use crate::scene::AttributeValue;
use crate::scope::AnnotationRef;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use uuid::Uuid;

const DISCRIMINATOR: &str = "attribute_type";
const COMMON_KEYS: &[&str] = &[DISCRIMINATOR, "optional", "scope", "sensor_types"];

// ─── Tags ───────────────────────────────────────────────────────────────────

/// Fieldless discriminator of an attribute kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeTag {
    Boolean,
    Integer,
    String,
    Vector,
    SingleSelect,
    MultiSelect,
    MultiReference,
    Any,
}

impl AttributeTag {
    pub const ALL: [AttributeTag; 8] = [
        AttributeTag::Boolean,
        AttributeTag::Integer,
        AttributeTag::String,
        AttributeTag::Vector,
        AttributeTag::SingleSelect,
        AttributeTag::MultiSelect,
        AttributeTag::MultiReference,
        AttributeTag::Any,
    ];

    /// Value of the `attribute_type` discriminator for this kind.
    pub fn identifier(&self) -> &'static str {
        match self {
            AttributeTag::Boolean => "boolean",
            AttributeTag::Integer => "integer",
            AttributeTag::String => "string",
            AttributeTag::Vector => "vector",
            AttributeTag::SingleSelect => "single-select",
            AttributeTag::MultiSelect => "multi-select",
            AttributeTag::MultiReference => "multi-reference",
            AttributeTag::Any => "any",
        }
    }

    /// Runtime value kind accepted by this attribute, `None` for `any`.
    pub fn expected_type(&self) -> Option<&'static str> {
        match self {
            AttributeTag::Boolean => Some("bool"),
            AttributeTag::Integer => Some("int"),
            AttributeTag::String | AttributeTag::SingleSelect => Some("str"),
            AttributeTag::Vector | AttributeTag::MultiSelect | AttributeTag::MultiReference => {
                Some("list")
            }
            AttributeTag::Any => None,
        }
    }

    pub fn is_list(&self) -> bool {
        self.expected_type() == Some("list")
    }

    fn has_options(&self) -> bool {
        matches!(self, AttributeTag::SingleSelect | AttributeTag::MultiSelect)
    }

    /// Whether the fragment selects this kind.
    pub fn supports(&self, fragment: &Value) -> bool {
        match fragment {
            Value::String(tag) => tag == self.identifier(),
            Value::Object(obj) => obj
                .get(DISCRIMINATOR)
                .and_then(Value::as_str)
                .is_some_and(|tag| tag == self.identifier()),
            _ => false,
        }
    }
}

// ─── Registry ───────────────────────────────────────────────────────────────

/// Ordered set of attribute kinds the ontology parser may select from.
///
/// Built once per ontology construction and passed to the parser.
#[derive(Clone, Debug)]
pub struct AttributeTypeRegistry {
    tags: Vec<AttributeTag>,
}

impl Default for AttributeTypeRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl AttributeTypeRegistry {
    /// Registry with every built-in attribute kind.
    pub fn standard() -> Self {
        AttributeTypeRegistry {
            tags: AttributeTag::ALL.to_vec(),
        }
    }

    pub fn with_tags(tags: impl IntoIterator<Item = AttributeTag>) -> Self {
        AttributeTypeRegistry {
            tags: tags.into_iter().collect(),
        }
    }

    pub fn tags(&self) -> &[AttributeTag] {
        &self.tags
    }

    /// Selects exactly one kind for the fragment.
    pub fn resolve(&self, fragment: &Value) -> Result<AttributeTag, ConfigError> {
        let matches: Vec<AttributeTag> = self
            .tags
            .iter()
            .copied()
            .filter(|tag| tag.supports(fragment))
            .collect();

        match matches.as_slice() {
            [tag] => Ok(*tag),
            [] => Err(ConfigError::UnsupportedAttributeType {
                fragment: fragment.to_string(),
            }),
            _ => Err(ConfigError::AmbiguousAttributeType {
                candidates: matches.iter().map(|t| t.identifier().to_string()).collect(),
            }),
        }
    }

    /// Parses a fragment into a definition.
    pub fn from_fragment(&self, fragment: &Value) -> Result<AttributeDefinition, ConfigError> {
        self.parse(fragment, "$")
    }

    /// Like [`from_fragment`](Self::from_fragment), with `path` naming the
    /// fragment's location in error messages.
    pub fn parse(&self, fragment: &Value, path: &str) -> Result<AttributeDefinition, ConfigError> {
        let tag = self.resolve(fragment)?;
        match fragment {
            Value::Object(obj) => AttributeDefinition::decode(tag, obj, path),
            _ => {
                if tag.has_options() {
                    return Err(ConfigError::MissingOptions {
                        attribute_type: tag.identifier().to_string(),
                    });
                }
                Ok(AttributeDefinition::new(AttributeKind::from_tag(tag)))
            }
        }
    }
}

// ─── Kinds ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttributeKind {
    Boolean,
    Integer,
    String,
    Vector,
    SingleSelect { options: BTreeSet<String> },
    MultiSelect { options: BTreeSet<String> },
    MultiReference,
    Any,
}

impl AttributeKind {
    /// Kind for a tag; select kinds get an empty option set.
    fn from_tag(tag: AttributeTag) -> AttributeKind {
        match tag {
            AttributeTag::Boolean => AttributeKind::Boolean,
            AttributeTag::Integer => AttributeKind::Integer,
            AttributeTag::String => AttributeKind::String,
            AttributeTag::Vector => AttributeKind::Vector,
            AttributeTag::SingleSelect => AttributeKind::SingleSelect {
                options: BTreeSet::new(),
            },
            AttributeTag::MultiSelect => AttributeKind::MultiSelect {
                options: BTreeSet::new(),
            },
            AttributeTag::MultiReference => AttributeKind::MultiReference,
            AttributeTag::Any => AttributeKind::Any,
        }
    }

    pub fn tag(&self) -> AttributeTag {
        match self {
            AttributeKind::Boolean => AttributeTag::Boolean,
            AttributeKind::Integer => AttributeTag::Integer,
            AttributeKind::String => AttributeTag::String,
            AttributeKind::Vector => AttributeTag::Vector,
            AttributeKind::SingleSelect { .. } => AttributeTag::SingleSelect,
            AttributeKind::MultiSelect { .. } => AttributeTag::MultiSelect,
            AttributeKind::MultiReference => AttributeTag::MultiReference,
            AttributeKind::Any => AttributeTag::Any,
        }
    }

    fn accepts(&self, value: &AttributeValue) -> bool {
        match (self, value) {
            (AttributeKind::Any, _) => true,
            (AttributeKind::Boolean, AttributeValue::Boolean(_)) => true,
            (AttributeKind::Integer, AttributeValue::Integer(_)) => true,
            (AttributeKind::String | AttributeKind::SingleSelect { .. }, AttributeValue::Text(_)) => {
                true
            }
            (
                AttributeKind::Vector | AttributeKind::MultiSelect { .. } | AttributeKind::MultiReference,
                AttributeValue::List(_),
            ) => true,
            _ => false,
        }
    }
}

// ─── Definition ─────────────────────────────────────────────────────────────

/// One declared attribute of an object class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeDefinition {
    pub kind: AttributeKind,
    pub optional: bool,
    pub scope: Scope,
    pub sensor_types: BTreeSet<SensorType>,
}

impl AttributeDefinition {
    /// Definition with default modifiers: required, annotation scope,
    /// camera/lidar/radar.
    pub fn new(kind: AttributeKind) -> Self {
        AttributeDefinition {
            kind,
            optional: false,
            scope: Scope::Annotation,
            sensor_types: SensorType::default_applicable(),
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn sensor_types(mut self, sensor_types: impl IntoIterator<Item = SensorType>) -> Self {
        self.sensor_types = sensor_types.into_iter().collect();
        self
    }

    pub fn applies_to(&self, sensor_type: SensorType) -> bool {
        self.sensor_types.contains(&sensor_type)
    }

    fn decode(tag: AttributeTag, obj: &Map<String, Value>, path: &str) -> Result<Self, ConfigError> {
        for key in obj.keys() {
            let known = COMMON_KEYS.contains(&key.as_str()) || (tag.has_options() && key == "options");
            if !known {
                return Err(ConfigError::invalid(
                    format!("{}.{}", path, key),
                    format!("unknown field for attribute type '{}'", tag.identifier()),
                ));
            }
        }

        let optional = match obj.get("optional") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                return Err(ConfigError::invalid(
                    format!("{}.optional", path),
                    format!("expected a boolean, got {}", other),
                ));
            }
        };

        let scope = match obj.get("scope") {
            None | Some(Value::Null) => Scope::Annotation,
            Some(Value::String(s)) => {
                Scope::from_name(s).ok_or_else(|| ConfigError::InvalidScope { scope: s.clone() })?
            }
            Some(other) => {
                return Err(ConfigError::InvalidScope {
                    scope: other.to_string(),
                });
            }
        };

        let sensor_types = match obj.get("sensor_types") {
            None | Some(Value::Null) => SensorType::default_applicable(),
            Some(value) => decode_sensor_types(value, &format!("{}.sensor_types", path))?,
        };

        let kind = match tag {
            AttributeTag::SingleSelect => AttributeKind::SingleSelect {
                options: decode_options(tag, obj.get("options"), path)?,
            },
            AttributeTag::MultiSelect => AttributeKind::MultiSelect {
                options: decode_options(tag, obj.get("options"), path)?,
            },
            other => AttributeKind::from_tag(other),
        };

        Ok(AttributeDefinition {
            kind,
            optional,
            scope,
            sensor_types,
        })
    }

    /// Checks the runtime kind of a value, and option membership for select
    /// kinds. Returns no issues when the value conforms.
    pub fn check_type_and_value(
        &self,
        name: &str,
        value: &AttributeValue,
        identifiers: &IssueIdentifiers,
    ) -> Vec<Issue> {
        if !self.kind.accepts(value) {
            let expected = self.kind.tag().expected_type().unwrap_or("any");
            return vec![
                Issue::new(IssueKind::AttributeType, identifiers.clone()).with_reason(format!(
                    "Attribute '{}' is of type {} (should be {}).",
                    name,
                    value.type_name(),
                    expected
                )),
            ];
        }

        match (&self.kind, value) {
            (AttributeKind::SingleSelect { options }, AttributeValue::Text(text)) => {
                if options.contains(text) {
                    vec![]
                } else {
                    vec![undefined_option(name, value, options, identifiers)]
                }
            }
            (AttributeKind::MultiSelect { options }, AttributeValue::List(items)) => items
                .iter()
                .find(|item| !item.as_str().is_some_and(|s| options.contains(s)))
                .map(|item| vec![undefined_option(name, item, options, identifiers)])
                .unwrap_or_default(),
            (AttributeKind::MultiReference, AttributeValue::List(items)) => items
                .iter()
                .find(|item| !item.as_str().is_some_and(|s| Uuid::parse_str(s).is_ok()))
                .map(|item| {
                    vec![
                        Issue::new(IssueKind::AttributeValue, identifiers.clone()).with_reason(
                            format!("Attribute '{}' has a non-UUID value '{}'.", name, item),
                        ),
                    ]
                })
                .unwrap_or_default(),
            _ => vec![],
        }
    }

    /// Pairwise scope rule: `second` must carry the same value as `first`
    /// when both share the attribute's scope. Issues point at `second`.
    pub fn check_scope_for_two_annotations(
        &self,
        name: &str,
        scope: Scope,
        first: &AnnotationRef<'_>,
        second: &AnnotationRef<'_>,
    ) -> Vec<Issue> {
        if first.is_same(second) || first.object_type != second.object_type {
            return vec![];
        }

        match scope {
            Scope::Annotation => return vec![],
            Scope::Frame if first.frame_id != second.frame_id => return vec![],
            Scope::Frame | Scope::Object => {}
        }

        let (Some(value_1), Some(value_2)) = (
            first.annotation.attributes.get(name),
            second.annotation.attributes.get(name),
        ) else {
            return vec![];
        };

        let consistent = match (value_1, value_2) {
            (AttributeValue::List(a), AttributeValue::List(b)) if self.kind.tag().is_list() => {
                same_elements(a, b)
            }
            _ => value_1 == value_2,
        };

        if consistent {
            return vec![];
        }

        vec![
            Issue::new(IssueKind::AttributeScope, second.to_identifiers(Some(name))).with_reason(
                format!(
                    "Attribute '{}' is inconsistent with referenced annotation '{}' (considering scope {}).",
                    name, first.id, scope
                ),
            ),
        ]
    }
}

fn undefined_option(
    name: &str,
    value: &AttributeValue,
    options: &BTreeSet<String>,
    identifiers: &IssueIdentifiers,
) -> Issue {
    let defined = options
        .iter()
        .map(|o| format!("'{}'", o))
        .collect::<Vec<_>>()
        .join(", ");
    Issue::new(IssueKind::AttributeValue, identifiers.clone()).with_reason(format!(
        "Attribute '{}' has an undefined value '{}' (defined options: {}).",
        name, value, defined
    ))
}

/// Multiset equality, ignoring element order.
pub fn same_elements(a: &[AttributeValue], b: &[AttributeValue]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut used = vec![false; b.len()];
    a.iter().all(|item| {
        match (0..b.len()).find(|&i| !used[i] && b[i] == *item) {
            Some(i) => {
                used[i] = true;
                true
            }
            None => false,
        }
    })
}

fn decode_options(
    tag: AttributeTag,
    value: Option<&Value>,
    path: &str,
) -> Result<BTreeSet<String>, ConfigError> {
    let Some(value) = value else {
        return Err(ConfigError::MissingOptions {
            attribute_type: tag.identifier().to_string(),
        });
    };
    let items = value.as_array().ok_or_else(|| {
        ConfigError::invalid(format!("{}.options", path), "expected a list of strings")
    })?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                ConfigError::invalid(format!("{}.options[{}]", path, i), "expected a string")
            })
        })
        .collect()
}

pub(crate) fn decode_sensor_types(
    value: &Value,
    path: &str,
) -> Result<BTreeSet<SensorType>, ConfigError> {
    let items = value
        .as_array()
        .ok_or_else(|| ConfigError::invalid(path, "expected a list of sensor types"))?;
    items
        .iter()
        .map(|item| {
            let name = item
                .as_str()
                .ok_or_else(|| ConfigError::InvalidSensorType {
                    sensor_type: item.to_string(),
                })?;
            SensorType::from_name(name).ok_or_else(|| ConfigError::InvalidSensorType {
                sensor_type: name.to_string(),
            })
        })
        .collect()
}
