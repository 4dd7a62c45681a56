use crate::common::{PERSON, SceneBuilder, bbox};
use proptest::prelude::*;
use raillabel_validator::enums::Scope;
use raillabel_validator::scene::{AttributeValue, Scene};
use raillabel_validator::{AttributeDefinition, AttributeKind, IssueKind, ObjectClass, Ontology};

fn ontology(kind: AttributeKind, scope: Scope) -> Ontology {
    let class = ObjectClass::new().with_attribute(
        "trackId",
        AttributeDefinition::new(kind).scope(scope).optional(true),
    );
    Ontology::new([("person".to_string(), class)])
}

/// One annotation per value, all in frame 0.
fn scene(values: &[AttributeValue]) -> Scene {
    let mut builder = SceneBuilder::new().object(PERSON, "person");
    for (i, value) in values.iter().enumerate() {
        builder = builder.annotation(
            0,
            &format!("a{}", i),
            bbox(PERSON, None, vec![("trackId", value.clone())]),
        );
    }
    builder.build()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn every_inconsistent_ordered_pair_is_reported(
        values in prop::collection::vec(prop::sample::select(vec!["t1", "t2", "t3"]), 1..6),
        scope in prop_oneof![Just(Scope::Frame), Just(Scope::Object)],
    ) {
        let values: Vec<AttributeValue> = values.into_iter().map(AttributeValue::from).collect();
        let issues = ontology(AttributeKind::String, scope).check(&scene(&values));

        let mut expected = 0;
        for (i, a) in values.iter().enumerate() {
            for (j, b) in values.iter().enumerate() {
                if i != j && a != b {
                    expected += 1;
                }
            }
        }
        prop_assert_eq!(issues.len(), expected);
        prop_assert!(issues.iter().all(|i| i.kind == IssueKind::AttributeScope));
    }

    #[test]
    fn annotation_scope_never_compares(
        values in prop::collection::vec("[a-z]{1,4}", 1..6),
    ) {
        let values: Vec<AttributeValue> = values.into_iter().map(AttributeValue::from).collect();
        let issues = ontology(AttributeKind::String, Scope::Annotation).check(&scene(&values));
        prop_assert!(issues.is_empty());
    }

    #[test]
    fn list_scope_ignores_element_order(
        items in prop::collection::vec("[a-z]{1,4}", 0..5),
        copies in 2usize..5,
    ) {
        let values: Vec<AttributeValue> = (0..copies)
            .map(|n| {
                let mut rotated = items.clone();
                if !rotated.is_empty() {
                    let k = n % rotated.len();
                    rotated.rotate_left(k);
                }
                AttributeValue::from(rotated)
            })
            .collect();
        let issues = ontology(AttributeKind::Vector, Scope::Object).check(&scene(&values));
        prop_assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
    }
}
