//! Closed enumerations shared by the scene model and the ontology.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Kind of sensor an annotation was made in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorType {
    Camera,
    Lidar,
    Radar,
    GpsImu,
    #[serde(other)]
    Other,
}

impl SensorType {
    /// Sensor types an attribute applies to when the ontology does not say.
    pub const DEFAULT_APPLICABLE: [SensorType; 3] =
        [SensorType::Camera, SensorType::Lidar, SensorType::Radar];

    pub fn default_applicable() -> BTreeSet<SensorType> {
        Self::DEFAULT_APPLICABLE.into_iter().collect()
    }

    /// Parses an ontology sensor type name. `other` is not a valid ontology key.
    pub fn from_name(name: &str) -> Option<SensorType> {
        match name {
            "camera" => Some(SensorType::Camera),
            "lidar" => Some(SensorType::Lidar),
            "radar" => Some(SensorType::Radar),
            "gps_imu" => Some(SensorType::GpsImu),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SensorType::Camera => "camera",
            SensorType::Lidar => "lidar",
            SensorType::Radar => "radar",
            SensorType::GpsImu => "gps_imu",
            SensorType::Other => "other",
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Granularity at which an attribute value must stay consistent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    #[default]
    Annotation,
    Frame,
    Object,
}

impl Scope {
    pub fn from_name(name: &str) -> Option<Scope> {
        match name {
            "annotation" => Some(Scope::Annotation),
            "frame" => Some(Scope::Frame),
            "object" => Some(Scope::Object),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Annotation => "annotation",
            Scope::Frame => "frame",
            Scope::Object => "object",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of the `railSide` attribute on track polylines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RailSide {
    Left,
    Right,
}

impl RailSide {
    pub const ATTRIBUTE: &'static str = "railSide";

    pub fn from_value(value: &str) -> Option<RailSide> {
        match value {
            "leftRail" => Some(RailSide::Left),
            "rightRail" => Some(RailSide::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RailSide::Left => "left",
            RailSide::Right => "right",
        }
    }
}
