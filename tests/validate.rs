mod common;

use common::{CAMERA, PERSON, SceneBuilder, TRACK, bbox};
use raillabel_validator::empty_frames::validate_empty_frames;
use raillabel_validator::enums::SensorType;
use raillabel_validator::load::parse_document;
use raillabel_validator::schema::{SchemaValidator, StructuralSchema};
use raillabel_validator::sensors::{lookup_sensor, validate_sensors};
use raillabel_validator::{
    ConfigError, Issue, IssueKind, IssueLocation, LoadError, Ontology, OntologySource,
    PathSegment, ValidateError, ValidateOptions, validate, validate_scene, validate_with,
};
use serde_json::{Value, json};

const ONTOLOGY: &str = r#"
person:
  attributes:
    isStanding: boolean
track:
  attributes:
    railSide:
      attribute_type: single-select
      options: [leftRail, rightRail]
"#;

fn ontology_source() -> OntologySource {
    OntologySource::Value(parse_document(ONTOLOGY).unwrap())
}

fn kinds(issues: &[Issue]) -> Vec<IssueKind> {
    issues.iter().map(|i| i.kind).collect()
}

fn rail(side: &str, x: f64) -> Value {
    json!({
        "type": "poly2d",
        "object_id": TRACK,
        "sensor_id": CAMERA,
        "points": [{"x": x, "y": 0.0}, {"x": x, "y": 100.0}],
        "closed": false,
        "attributes": {"railSide": side},
    })
}

fn scene() -> Value {
    json!({
        "sensors": {
            CAMERA: {"type": "camera", "uri": "/S1206063/image"},
        },
        "objects": {
            PERSON: {"name": "person0000", "type": "person"},
            TRACK: {"name": "track0000", "type": "track"},
        },
        "frames": {
            "0": {
                "annotations": {
                    "b40ceaa5-a4b5-4a28-a1bb-7cdbda1e1c38": {
                        "type": "bbox",
                        "object_id": PERSON,
                        "sensor_id": CAMERA,
                        "pos": {"x": 10.0, "y": 20.0},
                        "size": {"x": 5.0, "y": 15.0},
                        "attributes": {"isStanding": true},
                    },
                    "325b1f55-a2ef-475f-a780-13e1a9e823c3": rail("leftRail", 10.0),
                    "f3b53b5f-5c1b-4d7a-8c70-4a5b0b3d4b0a": rail("rightRail", 20.0),
                }
            }
        }
    })
}

// ─── Full pipeline ──────────────────────────────────────────────────────────

#[test]
fn valid_scene_has_no_issues() {
    let issues = validate(&scene(), &ontology_source()).unwrap();
    assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
}

#[test]
fn checker_issues_are_concatenated_in_order() {
    let mut raw = scene();
    raw["frames"]["0"]["annotations"]["325b1f55-a2ef-475f-a780-13e1a9e823c3"] =
        rail("leftRail", 30.0);
    raw["frames"]["0"]["annotations"]["b40ceaa5-a4b5-4a28-a1bb-7cdbda1e1c38"]["attributes"]
        ["isStanding"] = json!("yes");
    raw["frames"]["1"] = json!({"annotations": {}});

    let issues = validate(&raw, &ontology_source()).unwrap();
    assert_eq!(
        kinds(&issues),
        vec![
            IssueKind::AttributeType,
            IssueKind::RailSide,
            IssueKind::EmptyFrames
        ]
    );
}

#[test]
fn options_disable_checkers() {
    let mut raw = scene();
    raw["frames"]["1"] = json!({});

    let options = ValidateOptions {
        empty_frames: false,
        ..ValidateOptions::default()
    };
    let issues = validate_with(&raw, &ontology_source(), &options, &StructuralSchema).unwrap();
    assert!(issues.is_empty());
}

#[test]
fn disabled_ontology_is_not_built() {
    let broken = OntologySource::Value(json!({"person": {"attributes": {"x": "float"}}}));
    let options = ValidateOptions {
        ontology: false,
        ..ValidateOptions::default()
    };
    assert!(validate_with(&scene(), &broken, &options, &StructuralSchema).is_ok());
}

#[test]
fn ontology_errors_propagate() {
    let broken = OntologySource::Value(json!({"person": {"attributes": {"x": "float"}}}));
    match validate(&scene(), &broken) {
        Err(ValidateError::Config(ConfigError::UnsupportedAttributeType { .. })) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn ontology_from_file() {
    let path = std::env::temp_dir().join(format!(
        "raillabel-validator-ontology-{}.yaml",
        std::process::id()
    ));
    std::fs::write(&path, ONTOLOGY).unwrap();

    let issues = validate(&scene(), &OntologySource::from(path.as_path()));
    std::fs::remove_file(&path).unwrap();
    assert!(issues.unwrap().is_empty());
}

#[test]
fn missing_ontology_file() {
    let source = OntologySource::from(std::path::PathBuf::from("/nonexistent/ontology.yaml"));
    assert!(matches!(
        validate(&scene(), &source),
        Err(ValidateError::Load(LoadError::Io { .. }))
    ));
}

#[test]
fn validate_scene_runs_sensor_check_on_request() {
    let scene = SceneBuilder::new()
        .sensor("dashcam", SensorType::Camera)
        .object(PERSON, "person")
        .annotation(0, "a1", bbox(PERSON, Some("dashcam"), vec![("isStanding", true.into())]))
        .build();
    let ontology = ontology_source().resolve().unwrap();

    assert!(validate_scene(&scene, &ontology, &ValidateOptions::default()).is_empty());

    let options = ValidateOptions {
        sensors: true,
        ..ValidateOptions::default()
    };
    assert_eq!(
        kinds(&validate_scene(&scene, &ontology, &options)),
        vec![IssueKind::SensorIdUnknown]
    );
}

#[test]
fn options_from_value() {
    let options = ValidateOptions::from_value(&json!({"sensors": true})).unwrap();
    assert_eq!(
        options,
        ValidateOptions {
            ontology: true,
            rail_side: true,
            empty_frames: true,
            sensors: true,
        }
    );
    assert!(ValidateOptions::from_value(&json!({"colours": true})).is_err());
}

// ─── Schema pre-check ───────────────────────────────────────────────────────

fn schema_paths(issues: &[Issue]) -> Vec<Vec<PathSegment>> {
    issues
        .iter()
        .map(|i| match &i.identifiers {
            IssueLocation::RawPath(path) => path.clone(),
            IssueLocation::Identifiers(ids) => panic!("expected raw path, got {:?}", ids),
        })
        .collect()
}

fn path(segments: &[&str]) -> Vec<PathSegment> {
    segments.iter().map(|s| PathSegment::from(*s)).collect()
}

#[test]
fn schema_issues_short_circuit() {
    let mut raw = scene();
    raw["frames"]["0"]["annotations"]["b40ceaa5-a4b5-4a28-a1bb-7cdbda1e1c38"]["object_id"] =
        json!("unknown");
    raw["frames"]["1"] = json!({});

    let issues = validate(&raw, &ontology_source()).unwrap();
    assert_eq!(kinds(&issues), vec![IssueKind::Schema]);
    assert_eq!(
        schema_paths(&issues),
        vec![path(&[
            "frames",
            "0",
            "annotations",
            "b40ceaa5-a4b5-4a28-a1bb-7cdbda1e1c38",
            "object_id"
        ])]
    );
}

#[test]
fn schema_reports_missing_fields() {
    let raw = json!({
        "objects": {PERSON: {"name": "p"}},
        "frames": {
            "0": {"annotations": {"a1": {"object_id": PERSON, "type": "bbox", "pos": {"x": 0, "y": 0}}}}
        }
    });

    let issues = StructuralSchema.validate(&raw);
    let paths = schema_paths(&issues);
    assert_eq!(
        paths,
        vec![
            path(&["objects", PERSON]),
            path(&["frames", "0", "annotations", "a1"]),
        ]
    );
    assert!(issues[0].reason.as_deref().unwrap().contains("'type'"));
    assert!(issues[1].reason.as_deref().unwrap().contains("'size'"));
}

#[test]
fn schema_rejects_unknown_shapes() {
    let raw = json!({
        "metadata": {},
        "sensors": {"cam": {"type": 3}},
        "frames": {
            "first": {},
            "2": {"annotations": {"a1": {
                "object_id": "o",
                "type": "mesh",
                "sensor_id": "cam",
                "attributes": {"nested": {"a": 1}},
            }}},
        }
    });

    let issues = StructuralSchema.validate(&raw);
    assert!(issues.iter().all(|i| i.kind == IssueKind::Schema));
    assert_eq!(
        schema_paths(&issues),
        vec![
            path(&["metadata"]),
            path(&["sensors", "cam", "type"]),
            path(&["frames", "first"]),
            path(&["frames", "2", "annotations", "a1", "object_id"]),
            path(&["frames", "2", "annotations", "a1", "attributes", "nested"]),
            path(&["frames", "2", "annotations", "a1", "type"]),
        ]
    );
}

#[test]
fn schema_rejects_non_mapping_root() {
    let issues = StructuralSchema.validate(&json!([1, 2]));
    assert_eq!(schema_paths(&issues), vec![Vec::<PathSegment>::new()]);
}

struct AcceptAll;

impl SchemaValidator for AcceptAll {
    fn validate(&self, _raw: &Value) -> Vec<Issue> {
        vec![]
    }
}

#[test]
fn decode_failure_becomes_schema_issue() {
    let raw = json!({"frames": {"first": {}}});
    let issues =
        validate_with(&raw, &ontology_source(), &ValidateOptions::default(), &AcceptAll).unwrap();
    assert_eq!(kinds(&issues), vec![IssueKind::Schema]);
    assert_eq!(schema_paths(&issues), vec![Vec::<PathSegment>::new()]);
}

// ─── Empty frames and sensors ───────────────────────────────────────────────

#[test]
fn empty_frames_are_reported() {
    let scene = SceneBuilder::new()
        .object(PERSON, "person")
        .frame(0)
        .annotation(1, "a1", bbox(PERSON, None, vec![]))
        .frame(2)
        .build();

    let issues = validate_empty_frames(&scene);
    let frames: Vec<u64> = issues
        .iter()
        .filter_map(|i| i.identifiers()?.frame)
        .collect();
    assert_eq!(frames, vec![0, 2]);
    assert!(issues.iter().all(|i| i.kind == IssueKind::EmptyFrames));
}

#[test]
fn sensor_registry() {
    let entry = lookup_sensor("rgb_center").unwrap();
    assert_eq!(entry.sensor_type, SensorType::Camera);
    assert_eq!(lookup_sensor("gps_imu").unwrap().sensor_type, SensorType::GpsImu);
    assert!(lookup_sensor("dashcam").is_none());
}

#[test]
fn sensor_ids_and_types() {
    let scene = SceneBuilder::new()
        .sensor(CAMERA, SensorType::Camera)
        .sensor("lidar", SensorType::Camera)
        .sensor("dashcam", SensorType::Camera)
        .build();

    let issues = validate_sensors(&scene);
    assert_eq!(
        kinds(&issues),
        vec![IssueKind::SensorIdUnknown, IssueKind::SensorTypeWrong]
    );
    assert_eq!(
        issues[1].reason.as_deref(),
        Some("Sensor 'lidar' is of type camera (should be lidar).")
    );
}

// ─── Loading ────────────────────────────────────────────────────────────────

#[test]
fn load_errors() {
    assert_eq!(parse_document("  \n"), Err(LoadError::EmptyInput));
    assert_eq!(parse_document("- a\n- b\n"), Err(LoadError::NotAMapping));
    assert!(matches!(
        parse_document("---\na: 1\n---\nb: 2\n"),
        Err(LoadError::Syntax { .. })
    ));
    assert!(matches!(
        parse_document("a: [1, 2\n"),
        Err(LoadError::Syntax { .. })
    ));
}

#[test]
fn json_text_loads_as_yaml() {
    let value = parse_document(r#"{"person": {"attributes": {"isStanding": "boolean"}}}"#).unwrap();
    let ontology = Ontology::from_value(&value).unwrap();
    assert!(ontology.class("person").is_some());
}
