//! Standard sensor registry and the sensor id/type check.

use crate::enums::SensorType;
use crate::issue::{Issue, IssueIdentifiers, IssueKind};
use crate::scene::Scene;

/// A registry entry mapping a standard sensor id to its type and topic uri.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SensorEntry {
    pub id: &'static str,
    pub sensor_type: SensorType,
    pub uri: &'static str,
}

/// The standard sensor set of the recording vehicles.
pub static SENSOR_REGISTRY: &[SensorEntry] = &[
    // Cameras
    SensorEntry {
        id: "rgb_center",
        sensor_type: SensorType::Camera,
        uri: "/S1206063/image",
    },
    SensorEntry {
        id: "rgb_left",
        sensor_type: SensorType::Camera,
        uri: "/S1206062/image",
    },
    SensorEntry {
        id: "rgb_right",
        sensor_type: SensorType::Camera,
        uri: "/S1206064/image",
    },
    SensorEntry {
        id: "rgb_highres_center",
        sensor_type: SensorType::Camera,
        uri: "/S1213752/image",
    },
    SensorEntry {
        id: "rgb_highres_left",
        sensor_type: SensorType::Camera,
        uri: "/S1213751/image",
    },
    SensorEntry {
        id: "rgb_highres_right",
        sensor_type: SensorType::Camera,
        uri: "/S1213755/image",
    },
    SensorEntry {
        id: "rgb_longrange_center",
        sensor_type: SensorType::Camera,
        uri: "/S1213752/image",
    },
    SensorEntry {
        id: "rgb_longrange_left",
        sensor_type: SensorType::Camera,
        uri: "/S1213751/image",
    },
    SensorEntry {
        id: "rgb_longrange_right",
        sensor_type: SensorType::Camera,
        uri: "/S1213755/image",
    },
    SensorEntry {
        id: "ir_center",
        sensor_type: SensorType::Camera,
        uri: "/A0001781/image",
    },
    SensorEntry {
        id: "ir_left",
        sensor_type: SensorType::Camera,
        uri: "/A0001780/image",
    },
    SensorEntry {
        id: "ir_right",
        sensor_type: SensorType::Camera,
        uri: "/A0001782/image",
    },
    // Range sensors
    SensorEntry {
        id: "lidar",
        sensor_type: SensorType::Lidar,
        uri: "/lidar_merged",
    },
    SensorEntry {
        id: "radar",
        sensor_type: SensorType::Radar,
        uri: "/talker1/Nvt/Cartesian",
    },
    SensorEntry {
        id: "gps_imu",
        sensor_type: SensorType::GpsImu,
        uri: "/novatel/oem7/inspva",
    },
];

/// Look up a standard sensor by id.
pub fn lookup_sensor(id: &str) -> Option<&'static SensorEntry> {
    SENSOR_REGISTRY.iter().find(|e| e.id == id)
}

/// Reports sensors with non-standard ids and standard ids with the wrong type.
pub fn validate_sensors(scene: &Scene) -> Vec<Issue> {
    let mut issues = Vec::new();

    for (id, sensor) in &scene.sensors {
        let identifiers = IssueIdentifiers::new().sensor(id.as_str());
        match lookup_sensor(id) {
            None => {
                let supported: Vec<&str> = SENSOR_REGISTRY.iter().map(|e| e.id).collect();
                issues.push(
                    Issue::new(IssueKind::SensorIdUnknown, identifiers)
                        .with_reason(format!("Supported sensor ids: {}", supported.join(", "))),
                );
            }
            Some(entry) if entry.sensor_type != sensor.sensor_type => {
                issues.push(Issue::new(IssueKind::SensorTypeWrong, identifiers).with_reason(
                    format!(
                        "Sensor '{}' is of type {} (should be {}).",
                        id, sensor.sensor_type, entry.sensor_type
                    ),
                ));
            }
            Some(_) => {}
        }
    }

    issues
}
