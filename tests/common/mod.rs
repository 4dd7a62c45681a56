#![allow(dead_code)]

use raillabel_validator::enums::SensorType;
use raillabel_validator::scene::{
    Annotation, AttributeValue, Frame, Geometry, Object, Point2d, Polyline2d, Scene, Sensor,
};
use std::collections::BTreeMap;

pub const CAMERA: &str = "rgb_center";
pub const CAMERA_2: &str = "ir_center";
pub const LIDAR: &str = "lidar";
pub const TRACK: &str = "a1082ef9-555b-4b69-a888-7da531d8a2eb";
pub const TRACK_2: &str = "6e92e7af-3bc8-4225-b538-16d19e3f8aa7";
pub const PERSON: &str = "7df959d7-0ec2-4722-8b62-bb2e529de2ec";

/// Builds scenes for tests, one call per element.
#[derive(Default)]
pub struct SceneBuilder {
    scene: Scene,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sensor(mut self, id: &str, sensor_type: SensorType) -> Self {
        self.scene.sensors.insert(
            id.to_string(),
            Sensor {
                sensor_type,
                uri: None,
            },
        );
        self
    }

    pub fn object(mut self, id: &str, object_type: &str) -> Self {
        self.scene.objects.insert(
            id.to_string(),
            Object {
                name: format!("{}0000", object_type),
                object_type: object_type.to_string(),
            },
        );
        self
    }

    pub fn frame(mut self, frame_id: u64) -> Self {
        self.scene.frames.entry(frame_id).or_insert_with(Frame::default);
        self
    }

    pub fn annotation(mut self, frame_id: u64, id: &str, annotation: Annotation) -> Self {
        self.scene
            .frames
            .entry(frame_id)
            .or_default()
            .annotations
            .insert(id.to_string(), annotation);
        self
    }

    pub fn build(self) -> Scene {
        self.scene
    }
}

pub fn attributes(pairs: Vec<(&str, AttributeValue)>) -> BTreeMap<String, AttributeValue> {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

pub fn bbox(object_id: &str, sensor_id: Option<&str>, attrs: Vec<(&str, AttributeValue)>) -> Annotation {
    Annotation {
        object_id: object_id.to_string(),
        sensor_id: sensor_id.map(str::to_string),
        attributes: attributes(attrs),
        geometry: Geometry::Bbox {
            pos: Point2d { x: 0.0, y: 0.0 },
            size: Point2d { x: 1.0, y: 1.0 },
        },
    }
}

pub fn rail(object_id: &str, sensor_id: &str, side: &str, points: &[(f64, f64)]) -> Annotation {
    Annotation {
        object_id: object_id.to_string(),
        sensor_id: Some(sensor_id.to_string()),
        attributes: attributes(vec![("railSide", side.into())]),
        geometry: Geometry::Poly2d(Polyline2d::new(points.iter().copied())),
    }
}

pub fn line(points: &[(f64, f64)]) -> Polyline2d {
    Polyline2d::new(points.iter().copied())
}

/// A scene with one camera and one track object, and no frames yet.
pub fn track_scene() -> SceneBuilder {
    SceneBuilder::new()
        .sensor(CAMERA, SensorType::Camera)
        .object(TRACK, "track")
}
