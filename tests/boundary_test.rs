//! Boundary Tests for json2xlsx
//!
//! Edge cases of the profile transformation: missing and null fields,
//! unexpected value types, unknown effect types, and column layout.

use json2xlsx::{
    character_headers, transform_str, CellValue, JsonToXlsxError, ParseIssue, StatCategory,
    TrackedCube,
};

fn col(name: &str) -> usize {
    character_headers()
        .iter()
        .position(|h| *h == name)
        .unwrap_or_else(|| panic!("no column {}", name))
}

#[test]
fn test_empty_document() {
    let report = transform_str("{}").unwrap();

    assert_eq!(report.summary.player, CellValue::from("N/A"));
    assert_eq!(report.summary.synchro_level, CellValue::from("N/A"));
    for cube in TrackedCube::ALL {
        assert_eq!(*report.summary.cube_level(cube), CellValue::from("N/A"));
    }

    assert_eq!(report.characters.len(), 1);
    assert!(report.characters[0].is_placeholder());
    assert_eq!(report.characters[0].player, CellValue::from("N/A"));
}

#[test]
fn test_null_scalars_become_empty_cells() {
    let report = transform_str(
        r#"{"name":null,"synchroLevel":null,"cubes":{"遗迹巨熊魔方":{"cube_level":null}},
            "elements":{"Fire":{"CharA":{"id":null,"priority":2}}}}"#,
    )
    .unwrap();

    assert_eq!(report.summary.player, CellValue::Empty);
    assert_eq!(report.summary.synchro_level, CellValue::Empty);
    assert_eq!(
        *report.summary.cube_level(TrackedCube::RelicBastion),
        CellValue::Empty
    );

    let row = &report.character_table().rows[0];
    assert_eq!(row[col("ID")], CellValue::Empty);
    assert_eq!(row[col("Priority")], CellValue::Number(2.0));
    assert_eq!(row[col("Name Code")], CellValue::from("N/A"));
}

#[test]
fn test_cube_without_level_is_not_available() {
    let report = transform_str(r#"{"cubes":{"战术巨熊魔方":{}}}"#).unwrap();
    assert_eq!(
        *report.summary.cube_level(TrackedCube::TacticalBastion),
        CellValue::from("N/A")
    );
}

#[test]
fn test_untracked_cubes_never_surface() {
    let report =
        transform_str(r#"{"cubes":{"量子魔方":{"cube_level":99},"遗迹巨熊魔方":{"cube_level":1}}}"#)
            .unwrap();
    let table = report.summary_table();

    assert_eq!(table.headers.len(), 4);
    assert!(!table.headers.contains(&"量子魔方"));
    assert!(!table.rows[0].contains(&CellValue::Number(99.0)));
    assert_eq!(table.rows[0][2], CellValue::Number(1.0));
}

#[test]
fn test_untracked_cubes_of_any_shape_are_ignored() {
    let docs = [
        r#"{"cubes":{"量子魔方":5,"遗迹巨熊魔方":{"cube_level":3}}}"#,
        r#"{"cubes":{"遗迹巨熊魔方":{"cube_level":3},"量子魔方":"x"}}"#,
        r#"{"cubes":{"量子魔方":{"cube_level":[1,2]},"遗迹巨熊魔方":{"cube_level":3}}}"#,
        r#"{"cubes":{"量子魔方":[{"cube_level":9}],"遗迹巨熊魔方":{"cube_level":3}}}"#,
    ];

    for doc in docs {
        let report = transform_str(doc).unwrap_or_else(|e| panic!("{}: {}", doc, e));
        assert_eq!(
            *report.summary.cube_level(TrackedCube::RelicBastion),
            CellValue::Number(3.0)
        );
        assert_eq!(
            *report.summary.cube_level(TrackedCube::TacticalBastion),
            CellValue::from("N/A")
        );
    }
}

#[test]
fn test_duplicate_record_keys_keep_last_value() {
    let report = transform_str(
        r#"{"name":"first","name":"second","elements":{"Fire":{"C":{
            "equipments":{"0":[{"function_type":"StatAtk","function_value":1,"function_value":2}]}}}}}"#,
    )
    .unwrap();

    assert_eq!(report.summary.player, CellValue::from("second"));
    assert_eq!(report.characters[0].stats.get(StatCategory::Attack), 2.0);
}

#[test]
fn test_null_containers_are_missing_fields() {
    let cases = [
        (r#"{"cubes":null}"#, "cubes"),
        (r#"{"elements":null}"#, "elements"),
        (r#"{"elements":{"Fire":null}}"#, "elements.Fire"),
        (r#"{"cubes":{"遗迹巨熊魔方":null}}"#, "cubes.遗迹巨熊魔方"),
        (
            r#"{"elements":{"Fire":{"CharA":{"equipments":null}}}}"#,
            "elements.Fire.CharA.equipments",
        ),
        (
            r#"{"elements":{"Fire":{"CharA":{"equipments":{"1":[null]}}}}}"#,
            "elements.Fire.CharA.equipments.1[0]",
        ),
    ];

    for (doc, expected) in cases {
        match transform_str(doc) {
            Err(JsonToXlsxError::MissingRequiredField(key)) => assert_eq!(key, expected),
            other => panic!("{}: expected MissingRequiredField, got {:?}", doc, other),
        }
    }
}

#[test]
fn test_wrong_types_are_unexpected_errors() {
    let cases = [
        r#"[]"#,
        r#""profile""#,
        r#"{"cubes":[]}"#,
        r#"{"elements":{"Fire":[]}}"#,
        r#"{"elements":{"Fire":{"CharA":"x"}}}"#,
        r#"{"elements":{"Fire":{"CharA":{"equipments":{"0":{}}}}}}"#,
        r#"{"elements":{"Fire":{"CharA":{"equipments":{"0":["StatAtk"]}}}}}"#,
        r#"{"name":["a","b"]}"#,
    ];

    for doc in cases {
        assert!(
            matches!(transform_str(doc), Err(JsonToXlsxError::UnexpectedError(_))),
            "{} should be an unexpected error",
            doc
        );
    }
}

#[test]
fn test_invalid_syntax_is_json_error() {
    for doc in ["", "{", "{\"name\": }", "{} trailing"] {
        assert!(
            matches!(transform_str(doc), Err(JsonToXlsxError::Json(_))),
            "{:?} should be a JSON syntax error",
            doc
        );
    }
}

#[test]
fn test_bad_values_do_not_affect_other_effects() {
    let report = transform_str(
        r#"{"elements":{"Fire":{"CharA":{"equipments":{
            "0":[{"function_type":"StatDef","function_value":"1.5"},
                 {"function_type":"StatDef","function_value":""},
                 {"function_type":"StatDef"},
                 {"function_type":"StatDef","function_value":null},
                 {"function_type":"StatDef","function_value":"NaN"},
                 {"function_type":"StatDef","function_value":[2]},
                 {"function_type":"StatDef","function_value":"2.5"}]}}}}}"#,
    )
    .unwrap();

    assert_eq!(report.characters[0].stats.get(StatCategory::Defense), 4.0);

    let issues: Vec<&ParseIssue> = report.warnings.iter().map(|w| &w.issue).collect();
    assert_eq!(
        issues,
        vec![
            &ParseIssue::Empty,
            &ParseIssue::Missing,
            &ParseIssue::Null,
            &ParseIssue::NotFinite,
            &ParseIssue::Unsupported("array"),
        ]
    );
    assert!(report
        .warnings
        .iter()
        .all(|w| w.category == StatCategory::Defense && w.function_type == "StatDef"));
}

#[test]
fn test_warnings_identify_character_and_element() {
    let report = transform_str(
        r#"{"elements":{
            "Fire":{"CharA":{"equipments":{"0":[{"function_type":"StatAtk","function_value":"x"}]}}},
            "Water":{"CharB":{"equipments":{"2":[{"function_type":"StatAmmoLoad","function_value":"y"}]}}}}}"#,
    )
    .unwrap();

    assert_eq!(report.warnings.len(), 2);
    assert_eq!(report.warnings[0].element, "Fire");
    assert_eq!(report.warnings[0].character, "CharA");
    assert_eq!(report.warnings[0].value, "x");
    assert_eq!(report.warnings[1].element, "Water");
    assert_eq!(report.warnings[1].character, "CharB");
    assert_eq!(report.warnings[1].category, StatCategory::AmmoCapacity);
    assert!(report.warnings[1].to_string().contains("'弹夹'"));
}

#[test]
fn test_column_set_independent_of_input_field_order() {
    let a = transform_str(
        r#"{"name":"P","elements":{"Fire":{"C":{"id":1,"name_code":2,"equipments":{
            "0":[{"function_type":"StatCriticalDamage","function_value":1}]}}}}}"#,
    )
    .unwrap();
    let b = transform_str(
        r#"{"elements":{"Fire":{"C":{"equipments":{
            "0":[{"function_value":1,"function_type":"StatCriticalDamage"}]},"name_code":2,"id":1}}},"name":"P"}"#,
    )
    .unwrap();

    let (ta, tb) = (a.character_table(), b.character_table());
    assert_eq!(ta.headers, tb.headers);
    assert_eq!(ta.rows, tb.rows);
    assert_eq!(ta.headers.len(), 3 + 9 + 9);
    let stat_labels: Vec<&str> = StatCategory::ALL.iter().map(|c| c.label()).collect();
    assert_eq!(ta.headers[12..], stat_labels[..]);
}

#[test]
fn test_rounding_to_two_decimals() {
    let report = transform_str(
        r#"{"elements":{"Fire":{"C":{"equipments":{
            "0":[{"function_type":"StatChargeTime","function_value":0.1},
                 {"function_type":"StatChargeTime","function_value":0.2},
                 {"function_type":"StatChargeDamage","function_value":"1.005"},
                 {"function_type":"StatAccuracyCircle","function_value":"2.3456"}]}}}}}"#,
    )
    .unwrap();

    let stats = report.characters[0].stats;
    assert_eq!(stats.get(StatCategory::ChargeSpeed), 0.3);
    assert_eq!(stats.get(StatCategory::HitRate), 2.35);
    // 1.005 は二進表現で 1.00499... になる
    assert_eq!(stats.get(StatCategory::ChargeDamage), 1.0);
}

#[test]
fn test_exact_halves_round_to_even() {
    let report = transform_str(
        r#"{"elements":{"Fire":{"C":{"equipments":{
            "0":[{"function_type":"StatAtk","function_value":0.125},
                 {"function_type":"StatDef","function_value":"0.375"},
                 {"function_type":"StatCritical","function_value":0.625},
                 {"function_type":"StatCriticalDamage","function_value":0.5},
                 {"function_type":"StatCriticalDamage","function_value":0.375}]}}}}}"#,
    )
    .unwrap();

    let stats = report.characters[0].stats;
    assert_eq!(stats.get(StatCategory::Attack), 0.12);
    assert_eq!(stats.get(StatCategory::Defense), 0.38);
    assert_eq!(stats.get(StatCategory::CriticalRate), 0.62);
    assert_eq!(stats.get(StatCategory::CriticalDamage), 0.88);
}

#[test]
fn test_no_data_marker_collides_with_real_element() {
    let report = transform_str(r#"{"elements":{"无数据":{"C":{}}}}"#).unwrap();
    assert_eq!(report.characters.len(), 1);
    assert_eq!(report.characters[0].element, "无数据");
    assert!(!report.characters[0].is_placeholder());
}
