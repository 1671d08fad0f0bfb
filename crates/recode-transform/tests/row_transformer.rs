//! Property tests for the row transformer.

use proptest::prelude::*;
use recode_model::{CellValue, MappingDict, MappingSet, Row, Table};
use recode_transform::{RowContext, RowStep, RowTransformer};

fn arb_cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Empty),
        "[A-Z]{0,3}".prop_map(CellValue::Text),
        (-50i64..3000).prop_map(CellValue::from),
    ]
}

fn arb_row() -> impl Strategy<Value = Row> {
    prop::collection::btree_map(
        prop_oneof![
            Just("status".to_string()),
            Just("gender".to_string()),
            Just("birthday_year".to_string()),
            Just("birthday_month".to_string()),
            Just("birthday_day".to_string()),
            Just("attendant_template".to_string()),
            Just("note".to_string()),
        ],
        arb_cell(),
        0..7,
    )
    .prop_map(|cells| Row { cells })
}

fn arb_mappings() -> impl Strategy<Value = MappingSet> {
    let dict = prop::collection::vec(("[A-Z]{1,3}", "[a-z]{1,5}"), 0..6)
        .prop_map(MappingDict::from_pairs);
    prop::collection::vec(
        (
            prop_oneof![
                Just("status"),
                Just("gender"),
                Just("attendant_template")
            ],
            dict,
        ),
        0..3,
    )
    .prop_map(|dicts| dicts.into_iter().collect())
}

proptest! {
    #[test]
    fn table_row_count_is_preserved(
        rows in prop::collection::vec(arb_row(), 0..20),
        mappings in arb_mappings(),
    ) {
        let mut table = Table::new(vec!["status".to_string(), "note".to_string()]);
        for row in rows {
            table.push_row(row);
        }
        let out = RowTransformer::default().transform_table(&table, &mappings);
        prop_assert_eq!(out.len(), table.len());
    }

    #[test]
    fn unmapped_columns_pass_through(row in arb_row(), mappings in arb_mappings()) {
        let out = RowTransformer::default().transform(&row, &mappings);
        for (column, value) in &row.cells {
            if !mappings.contains(column) {
                prop_assert_eq!(out.get(column), value);
            }
        }
    }

    #[test]
    fn every_output_row_carries_derived_fields(row in arb_row(), mappings in arb_mappings()) {
        let out = RowTransformer::default().transform(&row, &mappings);
        prop_assert!(out.contains("dob"));
        prop_assert!(out.contains("attendant_template_id"));
    }

    #[test]
    fn empty_mappings_only_add_derived_fields(row in arb_row()) {
        let out = RowTransformer::default().transform(&row, &MappingSet::empty());
        for (column, value) in &row.cells {
            prop_assert_eq!(out.get(column), value);
        }
        prop_assert_eq!(
            out.get("attendant_template_id"),
            row.get("attendant_template")
        );
    }
}

#[test]
fn custom_steps_run_after_standard_steps() {
    struct UppercaseNote;

    impl RowStep for UppercaseNote {
        fn apply(&self, mut row: Row, _ctx: &RowContext<'_>) -> Row {
            let note = row.get("note").to_string().to_uppercase();
            row.set("note", CellValue::Text(note));
            row
        }

        fn step_name(&self) -> &str {
            "uppercase_note"
        }
    }

    let transformer = RowTransformer::default().add_step(Box::new(UppercaseNote));
    assert_eq!(
        transformer.step_names(),
        vec!["substitution", "date_of_birth", "template_id", "uppercase_note"]
    );

    let mappings: MappingSet = [("note", MappingDict::from_pairs([("hi", "hello")]))]
        .into_iter()
        .collect();
    let out = transformer.transform(&Row::new().with("note", "hi"), &mappings);
    assert_eq!(out.get("note"), &CellValue::text("HELLO"));
}
