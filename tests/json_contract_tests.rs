use timeline_rs::api::{
    TIMELINE_VIEW_JSON_SCHEMA_V1, TimelineEngine, TimelineEngineConfig, TimelineView,
    records_from_json_compat_str, records_to_json_contract_v1_pretty,
};
use timeline_rs::core::{CalendarDay, TimelineRecord};
use timeline_rs::layout::{LayoutConfig, compute_layout_at};

fn day(token: &str) -> CalendarDay {
    CalendarDay::parse(token).expect("valid day token")
}

fn sample_view() -> TimelineView {
    let records = vec![
        TimelineRecord::new("2024-01-01", "2024-01-05")
            .with_id(1)
            .with_name("A")
            .with_stage("alpha"),
        TimelineRecord::new("2024-01-03", "2024-01-04")
            .with_id("b")
            .with_name("B"),
    ];
    TimelineEngine::new(records, TimelineEngineConfig::default())
        .expect("engine init")
        .view_at(day("2024-01-02"))
}

#[test]
fn view_contract_v1_round_trip() {
    let view = sample_view();
    let json = view
        .to_json_contract_v1_pretty()
        .expect("serialize contract");
    assert!(json.contains("\"schema_version\": 1"));

    let parsed = TimelineView::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(parsed, view);
}

#[test]
fn bare_view_payload_is_accepted() {
    let view = sample_view();
    let json = view.to_json_pretty().expect("serialize view");
    let parsed = TimelineView::from_json_compat_str(&json).expect("parse bare view");
    assert_eq!(parsed, view);
}

#[test]
fn view_json_uses_host_field_names() {
    let json = sample_view().to_json_pretty().expect("serialize view");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

    assert_eq!(value["timeframe"], "two-week");
    assert_eq!(value["range"]["startDate"], "2024-01-01");
    assert_eq!(value["lanes"][0][0]["itemId"], "1");
    assert_eq!(value["lanes"][0][0]["recordId"], 1);
    assert_eq!(value["lanes"][0][0]["stageTone"], "alpha");
    assert_eq!(value["lanes"][1][0]["recordId"], "b");
    assert_eq!(value["todayMarker"]["label"], "Jan 2");
}

#[test]
fn unsupported_schema_version_is_rejected() {
    let view = sample_view();
    let json = view
        .to_json_contract_v1_pretty()
        .expect("serialize contract");
    let mut value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    value["schema_version"] = serde_json::json!(TIMELINE_VIEW_JSON_SCHEMA_V1 + 1);

    let err = TimelineView::from_json_compat_str(&value.to_string()).expect_err("version 2");
    assert!(err.to_string().contains("unsupported timeline view schema version"));
    assert!(TimelineView::from_json_compat_str("{}").is_err());
}

#[test]
fn layout_serializes_with_record_payloads() {
    let records = vec![TimelineRecord::new("2024-01-01", "2024-01-01").with_id(7)];
    let layout = compute_layout_at(&records, LayoutConfig::default(), day("2024-01-01"));
    let value = serde_json::to_value(&layout).expect("serialize layout");

    assert_eq!(value["totalDays"], 2);
    let entry = &value["lanes"][0]["entries"][0];
    assert_eq!(entry["itemId"], "7");
    assert_eq!(entry["record"]["id"], 7);
    assert_eq!(entry["visualEndDate"], "2024-01-02");
    assert_eq!(entry["displaySpanDays"], 2);
    assert!(value.get("positions").is_none());
}

#[test]
fn record_set_contract_round_trip() {
    let records = vec![
        TimelineRecord::new("2024-01-01", "2024-01-05")
            .with_id(1)
            .with_name("A")
            .with_release("2024-01-09"),
        TimelineRecord::new("2024-01-03", "2024-01-04").with_id("b"),
    ];
    let json = records_to_json_contract_v1_pretty(&records).expect("serialize records");
    assert!(json.contains("\"schema_version\": 1"));
    assert_eq!(
        records_from_json_compat_str(&json).expect("parse records"),
        records
    );
}

#[test]
fn bare_record_array_keeps_every_object_element() {
    let input = r#"[
        {"id": 1, "start": "2024-01-01", "end": "2024-01-02"},
        42,
        {"id": {"nested": true}, "start": "2024-01-02", "end": "2024-01-02"},
        {"id": 9, "stage": 7, "release": false, "start": "2024-01-03", "end": "2024-01-04"},
        {"name": "anonymous", "start": "2024-01-03", "end": "2024-01-03"}
    ]"#;
    let records = records_from_json_compat_str(input).expect("lenient array");
    assert_eq!(records.len(), 4);
    assert_eq!(records[1].id, None);
    assert_eq!(records[1].start.as_deref(), Some("2024-01-02"));
    assert_eq!(records[2].stage, None);
    assert_eq!(records[2].end.as_deref(), Some("2024-01-04"));
    assert_eq!(records[3].name.as_deref(), Some("anonymous"));
}

#[test]
fn record_set_envelope_shape_is_checked() {
    for input in [
        r#"{"records": []}"#,
        r#"{"schema_version": 2, "records": []}"#,
        r#"{"schema_version": 1, "records": {}}"#,
        r#""2024-01-01""#,
        "not json",
    ] {
        assert!(
            records_from_json_compat_str(input).is_err(),
            "{input} should be rejected"
        );
    }
    assert_eq!(
        records_from_json_compat_str(r#"{"schema_version": 1, "records": []}"#)
            .expect("empty envelope"),
        Vec::<TimelineRecord>::new()
    );
}
