#![no_main]

use libfuzzer_sys::fuzz_target;
use raillabel_validator::Ontology;
use raillabel_validator::load::parse_document;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    if let Ok(value) = parse_document(&s) {
        let _ = Ontology::from_value(&value);
    }
});
