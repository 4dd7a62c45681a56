//! In-memory scene model consumed read-only by all checkers.
//!
//! Decoded from a JSON/YAML value shaped like:
//!
//! ```yaml
//! sensors:
//!   rgb_center: { type: camera }
//! objects:
//!   a1082ef9-555b-4b69-a888-7da531d8a2eb: { name: track0001, type: track }
//! frames:
//!   0:
//!     annotations:
//!       325b1f55-a2ef-475f-a780-13e1a9e823c3:
//!         type: poly2d
//!         object_id: a1082ef9-555b-4b69-a888-7da531d8a2eb
//!         sensor_id: rgb_center
//!         points: [{ x: 0, y: 0 }, { x: 0, y: 1 }]
//!         attributes: { railSide: leftRail }
//! ```

use crate::enums::SensorType;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Full set of sensors, objects and per-frame annotations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub sensors: BTreeMap<String, Sensor>,
    #[serde(default)]
    pub objects: BTreeMap<String, Object>,
    #[serde(default)]
    pub frames: BTreeMap<u64, Frame>,
}

impl Scene {
    /// Decodes an already-parsed scene document.
    pub fn from_value(value: &Value) -> Result<Scene, serde_json::Error> {
        Scene::deserialize(value)
    }

    pub fn sensor_type(&self, sensor_id: &str) -> Option<SensorType> {
        self.sensors.get(sensor_id).map(|s| s.sensor_type)
    }

    pub fn object_type(&self, object_id: &str) -> Option<&str> {
        self.objects.get(object_id).map(|o| o.object_type.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sensor {
    #[serde(rename = "type")]
    pub sensor_type: SensorType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub object_type: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(default)]
    pub annotations: BTreeMap<String, Annotation>,
}

/// One labeled shape of an object in one sensor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub object_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_id: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
    #[serde(flatten)]
    pub geometry: Geometry,
}

impl Annotation {
    pub fn polyline_2d(&self) -> Option<&Polyline2d> {
        match &self.geometry {
            Geometry::Poly2d(line) => Some(line),
            _ => None,
        }
    }
}

/// Geometric payload, tagged by `type` in the serialized form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    Bbox {
        pos: Point2d,
        size: Point2d,
    },
    Cuboid {
        pos: Point3d,
        quaternion: [f64; 4],
        size: Point3d,
    },
    Poly2d(Polyline2d),
    Poly3d {
        points: Vec<Point3d>,
        #[serde(default)]
        closed: bool,
    },
    Seg3d {
        point_ids: Vec<u64>,
    },
}

impl Geometry {
    pub fn name(&self) -> &'static str {
        match self {
            Geometry::Bbox { .. } => "bbox",
            Geometry::Cuboid { .. } => "cuboid",
            Geometry::Poly2d(_) => "poly2d",
            Geometry::Poly3d { .. } => "poly3d",
            Geometry::Seg3d { .. } => "seg3d",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline2d {
    pub points: Vec<Point2d>,
    #[serde(default)]
    pub closed: bool,
}

impl Polyline2d {
    pub fn new(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Polyline2d {
            points: points.into_iter().map(|(x, y)| Point2d { x, y }).collect(),
            closed: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Value stored in an annotation's attribute map.
///
/// Integers and floats are kept apart so that integer-typed attributes can
/// reject fractional values. Integers are wide enough for the whole `i64`
/// and `u64` ranges.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Boolean(bool),
    Integer(i128),
    Float(f64),
    Text(String),
    List(Vec<AttributeValue>),
}

// Decoded through `Value`: buffered untagged enums cannot deserialize `i128`.
impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        AttributeValue::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<Value> for AttributeValue {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(AttributeValue::Boolean(b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(AttributeValue::Integer(i.into()))
                } else if let Some(u) = n.as_u64() {
                    Ok(AttributeValue::Integer(u.into()))
                } else {
                    n.as_f64()
                        .map(AttributeValue::Float)
                        .ok_or_else(|| format!("unrepresentable number {}", n))
                }
            }
            Value::String(s) => Ok(AttributeValue::Text(s)),
            Value::Array(items) => items
                .into_iter()
                .map(AttributeValue::try_from)
                .collect::<Result<_, _>>()
                .map(AttributeValue::List),
            other => Err(format!(
                "attribute values must be a boolean, number, string or list, got {}",
                other
            )),
        }
    }
}

impl AttributeValue {
    /// Short runtime kind name used in issue reasons.
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::Boolean(_) => "bool",
            AttributeValue::Integer(_) => "int",
            AttributeValue::Float(_) => "float",
            AttributeValue::Text(_) => "str",
            AttributeValue::List(_) => "list",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::Boolean(b) => write!(f, "{}", b),
            AttributeValue::Integer(i) => write!(f, "{}", i),
            AttributeValue::Float(x) => write!(f, "{}", x),
            AttributeValue::Text(s) => write!(f, "{}", s),
            AttributeValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Boolean(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value.into())
    }
}

impl From<u64> for AttributeValue {
    fn from(value: u64) -> Self {
        AttributeValue::Integer(value.into())
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl<T: Into<AttributeValue>> From<Vec<T>> for AttributeValue {
    fn from(values: Vec<T>) -> Self {
        AttributeValue::List(values.into_iter().map(Into::into).collect())
    }
}
