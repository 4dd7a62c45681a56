use proptest::prelude::*;
use raillabel_validator::attribute::same_elements;
use raillabel_validator::scene::AttributeValue;
use raillabel_validator::{AttributeDefinition, AttributeKind, IssueIdentifiers, IssueKind};
use std::collections::BTreeSet;

fn arb_primitive() -> impl Strategy<Value = AttributeValue> {
    prop_oneof![
        any::<bool>().prop_map(AttributeValue::Boolean),
        any::<i64>().prop_map(AttributeValue::from),
        (-1.0e6f64..1.0e6).prop_map(AttributeValue::Float),
        "[a-z]{0,8}".prop_map(AttributeValue::Text),
    ]
}

fn arb_value() -> impl Strategy<Value = AttributeValue> {
    prop_oneof![
        4 => arb_primitive(),
        1 => prop::collection::vec(arb_primitive(), 0..4).prop_map(AttributeValue::List),
    ]
}

const OPTIONS: &[&str] = &["bag", "umbrella", "stroller"];

fn select_options() -> BTreeSet<String> {
    OPTIONS.iter().map(|s| s.to_string()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn shuffled_lists_have_same_elements(
        (items, shuffled) in prop::collection::vec(arb_primitive(), 0..8)
            .prop_flat_map(|items| (Just(items.clone()), Just(items).prop_shuffle()))
    ) {
        prop_assert!(same_elements(&items, &shuffled));
        prop_assert!(same_elements(&shuffled, &items));
    }

    #[test]
    fn extra_element_breaks_equality(
        items in prop::collection::vec(arb_primitive(), 0..8),
        extra in arb_primitive(),
    ) {
        let mut longer = items.clone();
        longer.push(extra);
        prop_assert!(!same_elements(&items, &longer));
    }

    #[test]
    fn primitive_kinds_accept_exactly_their_type(value in arb_value()) {
        let ids = IssueIdentifiers::new().attribute("x");
        for (kind, type_name) in [
            (AttributeKind::Boolean, "bool"),
            (AttributeKind::Integer, "int"),
            (AttributeKind::String, "str"),
            (AttributeKind::Vector, "list"),
        ] {
            let issues = AttributeDefinition::new(kind).check_type_and_value("x", &value, &ids);
            if value.type_name() == type_name {
                prop_assert!(issues.is_empty());
            } else {
                prop_assert_eq!(issues.len(), 1);
                prop_assert_eq!(issues[0].kind, IssueKind::AttributeType);
            }
        }
        let any = AttributeDefinition::new(AttributeKind::Any);
        prop_assert!(any.check_type_and_value("x", &value, &ids).is_empty());
    }

    #[test]
    fn single_select_accepts_only_options(value in "[a-z]{1,10}") {
        let def = AttributeDefinition::new(AttributeKind::SingleSelect { options: select_options() });
        let issues = def.check_type_and_value(
            "carrying",
            &AttributeValue::Text(value.clone()),
            &IssueIdentifiers::new(),
        );
        if OPTIONS.contains(&value.as_str()) {
            prop_assert!(issues.is_empty());
        } else {
            prop_assert_eq!(issues.len(), 1);
            prop_assert_eq!(issues[0].kind, IssueKind::AttributeValue);
        }
    }

    #[test]
    fn multi_select_accepts_any_subset(
        picked in prop::sample::subsequence(OPTIONS.to_vec(), 0..=3).prop_shuffle()
    ) {
        let def = AttributeDefinition::new(AttributeKind::MultiSelect { options: select_options() });
        let value: AttributeValue = picked.into();
        prop_assert!(def.check_type_and_value("carrying", &value, &IssueIdentifiers::new()).is_empty());
    }
}
