#![no_main]

use libfuzzer_sys::fuzz_target;
use raillabel_validator::load::parse_document;
use raillabel_validator::{OntologySource, ValidateOptions, validate_with};
use raillabel_validator::schema::StructuralSchema;
use serde_json::json;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    let Ok(scene) = parse_document(&s) else {
        return;
    };

    let ontology = OntologySource::Value(json!({
        "person": {"attributes": {"isStanding": "boolean", "carrying": {
            "attribute_type": "multi-select", "options": ["bag"], "scope": "object"
        }}},
        "track": {"attributes": {"railSide": {
            "attribute_type": "single-select", "options": ["leftRail", "rightRail"]
        }}},
    }));
    let options = ValidateOptions {
        sensors: true,
        ..ValidateOptions::default()
    };

    let _ = validate_with(&scene, &ontology, &options, &StructuralSchema);
});
