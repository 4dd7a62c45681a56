#![no_main]

use libfuzzer_sys::fuzz_target;
use raillabel_validator::serialize::{issues_from_json, issues_to_json};

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    let issues = match issues_from_json(&s) {
        Ok(issues) => issues,
        Err(_) => return,
    };

    let json = match issues_to_json(&issues) {
        Ok(j) => j,
        Err(_) => return,
    };

    // Any report we can read must be written back to the same issues.
    match issues_from_json(&json) {
        Ok(reparsed) => assert_eq!(
            reparsed, issues,
            "Roundtrip failure.\nInput (lossy): {:?}\nSerialized:\n{}",
            s.get(..200).unwrap_or(&s),
            json.get(..500).unwrap_or(&json),
        ),
        Err(e) => panic!("serialized report cannot be re-read: {}", e),
    }
});
