use hg_ams_acas::data::{InputDataset, Value};
use hg_ams_acas::projector::{NameIndex, project, project_with};
use hg_ams_acas::registry::{self, ColumnSpec};
use proptest::prelude::*;

fn text(value: &str) -> Option<Value> {
    Value::from_text(value)
}

fn manifest() -> InputDataset {
    let mut input = InputDataset::new([
        "BG Number",
        "  Bag  ID ",
        "Tracking Number",
        "SHIPPER",
        "sender state",
        "lastmile",
        "TOTAL DECLARE VALUE",
        "product description",
        "WEIGHT",
    ]);
    input.push_row(vec![
        text("BG-1"),
        text("BAG-77"),
        text("TN0001"),
        text("Acme Exports"),
        text("ZZ"),
        text("DIRECT"),
        Some(Value::Float(19.99)),
        text("Cotton T-shirts, assorted colours"),
        Some(Value::Float(0.4)),
    ]);
    input.push_row(vec![
        text("BG-2"),
        text("BAG-78"),
        None,
        text("Acme Exports"),
        None,
        None,
        Some(Value::Integer(5)),
        None,
        None,
    ]);
    input
}

#[test]
fn every_row_has_the_full_registry_in_order() {
    let output = project(&manifest());
    let expected = registry::columns()
        .iter()
        .map(|spec| spec.output_name)
        .collect::<Vec<_>>();
    assert_eq!(output.headers(), expected);
    assert_eq!(output.len(), 2);
    for row in output.rows() {
        assert_eq!(row.len(), 80);
    }
}

#[test]
fn empty_input_yields_headers_and_no_rows() {
    let output = project(&InputDataset::new(["Bag ID"]));
    assert!(output.is_empty());
    assert_eq!(output.headers().len(), 80);

    let no_headers = project(&InputDataset::default());
    assert!(no_headers.is_empty());
}

#[test]
fn enforced_columns_ignore_conflicting_inputs() {
    let output = project(&manifest());
    for row in 0..output.len() {
        assert_eq!(output.text(row, "sender_state"), "GD");
        assert_eq!(output.text(row, "lastmile"), "CONSOL");
    }
}

#[test]
fn enforced_columns_hold_without_registry_defaults() {
    let columns = [
        ColumnSpec {
            position: 1,
            source_name: "State",
            output_name: "sender_state",
            default_value: "",
        },
        ColumnSpec {
            position: 2,
            source_name: "Service",
            output_name: "lastmile",
            default_value: "",
        },
    ];
    let mut input = InputDataset::new(["State", "Service"]);
    input.push_row(vec![text("CA"), text("DIRECT")]);
    let output = project_with(&columns, &input);
    assert_eq!(output.rows()[0], vec![text("GD"), text("CONSOL")]);
}

#[test]
fn names_match_ignoring_case_and_spacing() {
    let output = project(&manifest());
    assert_eq!(output.text(0, "receptacle_id"), "BAG-77");
    assert_eq!(output.text(0, "description"), "Cotton T-shirts, assorted colours");
    assert_eq!(output.text(1, "consignor_item_id"), "BG-2");
}

#[test]
fn unmatched_and_unsourced_columns_are_blank() {
    let output = project(&manifest());
    for row in 0..output.len() {
        assert_eq!(output.text(row, "display_id"), "");
        assert_eq!(output.text(row, "harmonization_code"), "");
        assert!(output.value(row, "recipient_name").is_none());
    }
    assert_eq!(output.text(1, "tracking_number"), "");
}

#[test]
fn shared_source_feeds_every_referencing_column() {
    let output = project(&manifest());
    for row in 0..output.len() {
        let value = output.value(row, "value").cloned();
        assert!(value.is_some());
        assert_eq!(output.value(row, "unit_value").cloned(), value);
        assert_eq!(output.value(row, "total_value").cloned(), value);
    }
    assert_eq!(output.text(1, "total_value"), "5");
    assert_eq!(output.text(0, "weight"), output.text(0, "total_weight"));
}

#[test]
fn absent_description_becomes_empty_text() {
    let output = project(&manifest());
    assert_eq!(
        output.value(1, "description"),
        Some(&Value::String(String::new()))
    );
}

#[test]
fn long_descriptions_keep_the_first_75_characters() {
    let long = "Ж".repeat(80);
    let mut input = InputDataset::new(["PRODUCT DESCRIPTION"]);
    input.push_row(vec![text(&long)]);
    input.push_row(vec![Some(Value::Integer(1234567))]);
    let output = project(&input);

    let truncated = output.text(0, "description");
    assert_eq!(truncated.chars().count(), 75);
    assert_eq!(truncated, "Ж".repeat(75));
    assert_eq!(output.text(1, "description"), "1234567");
}

#[test]
fn last_duplicate_header_wins() {
    let mut input = InputDataset::new(["Bag ID", "BAG ID"]);
    input.push_row(vec![text("first"), text("second")]);
    let output = project(&input);
    assert_eq!(output.text(0, "receptacle_id"), "second");
}

#[test]
fn projection_is_deterministic() {
    let input = manifest();
    assert_eq!(project(&input), project(&input));
}

#[test]
fn name_index_ignores_case_and_spacing() {
    let headers = vec!["  Consignee   Post Code".to_string()];
    let index = NameIndex::build(&headers);
    assert_eq!(index.lookup("consignee post code"), Some(0));
    assert_eq!(index.lookup("Consignee PostCode"), None);
}

proptest! {
    #[test]
    fn description_never_exceeds_75_characters(description in "\\PC{0,120}") {
        let mut input = InputDataset::new(["PRODUCT DESCRIPTION", "Sender State"]);
        input.push_row(vec![text(&description), text(&description)]);
        let output = project(&input);
        let projected = output.text(0, "description");
        prop_assert!(projected.chars().count() <= 75);
        let expected = description.chars().take(75).collect::<String>();
        prop_assert_eq!(projected, expected);
        prop_assert_eq!(output.text(0, "sender_state"), "GD");
    }
}
