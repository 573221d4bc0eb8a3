//! Property tests over generated schema trees.
use proptest::prelude::*;

use glue_schema_json::lexer::lex;
use glue_schema_json::{parse, Primitive, SchemaType, StructType};

fn field_name() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,10}"
}

fn primitive() -> impl Strategy<Value = Primitive> {
    prop::sample::select(Primitive::ALL.to_vec())
}

/// Duplicate generated names collapse to their first occurrence.
fn struct_of(inner: impl Strategy<Value = SchemaType>) -> impl Strategy<Value = SchemaType> {
    prop::collection::vec((field_name(), inner), 1..4).prop_map(|fields| {
        let mut s = StructType::new();
        for (name, ty) in fields {
            let _ = s.add_field(name, ty);
        }
        SchemaType::Struct(s)
    })
}

fn schema_type() -> impl Strategy<Value = SchemaType> {
    let leaf = primitive().prop_map(SchemaType::Primitive);
    leaf.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(SchemaType::array),
            struct_of(inner),
        ]
    })
}

fn root_schema() -> impl Strategy<Value = SchemaType> {
    struct_of(schema_type())
}

fn assert_well_formed(ty: &SchemaType) {
    match ty {
        SchemaType::Primitive(_) => {}
        SchemaType::Array(item) => assert_well_formed(item),
        SchemaType::Struct(s) => {
            let mut names: Vec<&str> = s.field_names().collect();
            let total = names.len();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), total, "duplicate field names");
            assert!(!s.is_empty());
            for (_, field) in s.fields() {
                assert_well_formed(field);
            }
        }
    }
}

/// Spread whitespace around every punctuation unit.
fn loosen(text: &str) -> String {
    text.replace('<', " <\n ").replace('>', "\t> ").replace(',', " ,  ").replace(':', " : ")
}

proptest! {
    #[test]
    fn debug_form_round_trips(tree in root_schema()) {
        let parsed = parse(&tree.to_string()).unwrap();
        assert_well_formed(&parsed);
        prop_assert_eq!(parsed, tree);
    }

    #[test]
    fn whitespace_never_changes_the_tree(tree in root_schema()) {
        let parsed = parse(&loosen(&tree.to_string())).unwrap();
        prop_assert_eq!(parsed, tree);
    }

    #[test]
    fn json_schema_line_is_valid_json(tree in root_schema()) {
        let line = tree.to_json_line().unwrap();
        prop_assert!(!line.contains('\n'));
        let back: serde_json::Value = serde_json::from_str(&line).unwrap();
        prop_assert_eq!(back, tree.to_json_schema());
    }

    #[test]
    fn depth_is_balanced_and_non_negative(tree in root_schema()) {
        let units = lex(&tree.to_string()).unwrap();
        prop_assert!(units.iter().all(|u| u.depth >= 0));
        prop_assert_eq!(units.last().map(|u| u.depth), Some(0));
    }
}
