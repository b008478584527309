use approx::assert_relative_eq;
use timeline_rs::core::{CalendarDay, RecordId, TimelineRecord};
use timeline_rs::layout::{
    DropReason, LayoutConfig, compute_layout_at, compute_layout_from_json, validate_record,
};

fn day(token: &str) -> CalendarDay {
    CalendarDay::parse(token).expect("valid day token")
}

fn today() -> CalendarDay {
    day("2026-10-19")
}

fn lane_ids(layout: &timeline_rs::TimelineLayout<'_>) -> Vec<Vec<String>> {
    layout
        .lanes
        .iter()
        .map(|lane| lane.iter().map(|entry| entry.item_id.clone()).collect())
        .collect()
}

#[test]
fn overlapping_records_split_into_two_lanes() {
    let records = vec![
        TimelineRecord::new("2024-01-01", "2024-01-05").with_id(1).with_name("A"),
        TimelineRecord::new("2024-01-03", "2024-01-04").with_id(2).with_name("B"),
        TimelineRecord::new("2024-01-06", "2024-01-08").with_id(3).with_name("C"),
    ];
    let layout = compute_layout_at(&records, LayoutConfig::default(), today());

    assert_eq!(layout.lane_count(), 2);
    assert_eq!(lane_ids(&layout), vec![vec!["1", "3"], vec!["2"]]);
    assert_eq!(layout.start_date, day("2024-01-01"));
    assert!(layout.end_date >= day("2024-01-08"));
    assert!(layout.total_days >= 8);
    assert_eq!(layout.dropped_count, 0);
}

#[test]
fn inverted_record_yields_single_day_fallback() {
    let records = vec![TimelineRecord::new("2024-02-10", "2024-02-09").with_id(1)];
    let layout = compute_layout_at(&records, LayoutConfig::default(), today());

    assert!(layout.is_empty());
    assert_eq!(layout.lane_count(), 0);
    assert_eq!(layout.start_date, today());
    assert_eq!(layout.end_date, today());
    assert_eq!(layout.total_days, 1);
    assert_eq!(layout.dropped_count, 1);
    assert_eq!(
        validate_record(&records[0]),
        Err(DropReason::EndBeforeStart)
    );
}

#[test]
fn empty_input_yields_single_day_fallback() {
    let layout = compute_layout_at(&[], LayoutConfig::default(), today());
    assert!(layout.is_empty());
    assert_eq!(layout.total_days, 1);
    assert_relative_eq!(layout.content_width_px(), 48.0);
}

#[test]
fn long_label_is_clamped_and_flagged_for_tooltip() {
    let name = "Quarterly platform migration kickoff review";
    let records = vec![
        TimelineRecord::new("2024-03-01", "2024-03-01")
            .with_id("launch")
            .with_name(name),
    ];
    let config = LayoutConfig::default()
        .with_px_per_day(48.0)
        .with_min_item_width_px(72.0)
        .with_label_character_px(7.0)
        .with_label_padding_px(24.0)
        .with_max_overflow_days(3);
    let layout = compute_layout_at(&records, config, today());

    let (lane, entry) = layout.find("launch").expect("entry laid out");
    assert_eq!(lane, 0);
    assert_eq!(entry.span_days, 1);
    assert_relative_eq!(
        entry.label_width_px,
        name.chars().count() as f64 * 7.0 + 24.0
    );
    assert_eq!(entry.display_span_days, 4);
    assert_relative_eq!(entry.display_width_px, 4.0 * 48.0);
    assert_eq!(entry.visual_end_date, day("2024-03-04"));
    assert!(entry.requires_tooltip);
    assert_eq!(layout.end_date, day("2024-03-04"));
    assert_eq!(layout.total_days, 4);
}

#[test]
fn label_that_fits_within_overflow_needs_no_tooltip() {
    // 6 * 7 + 24 = 66px; at 20px/day that is 4 days, within 1 + 3.
    let records = vec![
        TimelineRecord::new("2024-03-01", "2024-03-01")
            .with_id(1)
            .with_name("Freeze"),
    ];
    let config = LayoutConfig::default()
        .with_px_per_day(20.0)
        .with_min_item_width_px(20.0);
    let layout = compute_layout_at(&records, config, today());
    let entry = layout.entries().next().expect("one entry");
    assert_eq!(entry.display_span_days, 4);
    assert!(!entry.requires_tooltip);
}

#[test]
fn touching_records_never_share_a_lane() {
    let config = LayoutConfig::default()
        .with_min_item_width_px(4.0)
        .with_max_overflow_days(0);
    let records = vec![
        TimelineRecord::new("2024-01-01", "2024-01-03").with_id(1),
        TimelineRecord::new("2024-01-03", "2024-01-05").with_id(2),
    ];
    let layout = compute_layout_at(&records, config, today());
    assert_eq!(lane_ids(&layout), vec![vec!["1"], vec!["2"]]);
}

#[test]
fn malformed_records_are_dropped_without_affecting_the_rest() {
    let records = vec![
        TimelineRecord::new("2024-05-01", "2024-05-03").with_id(1),
        TimelineRecord {
            id: Some(RecordId::from(2)),
            start: Some("2024-05-02".to_owned()),
            ..TimelineRecord::default()
        },
        TimelineRecord::new("05/02/2024", "2024-05-09").with_id(3),
        TimelineRecord::new("2024-02-30", "2024-03-01").with_id(4),
        TimelineRecord::new("2024-05-04", "2024-05-04").with_id(5),
    ];
    let layout = compute_layout_at(&records, LayoutConfig::default(), today());

    assert_eq!(layout.dropped_count, 3);
    assert_eq!(layout.entry_count(), 2);
    assert!(layout.find("1").is_some());
    assert!(layout.find("5").is_some());
    assert!(layout.find("2").is_none());
    assert_eq!(layout.start_date, day("2024-05-01"));
}

#[test]
fn anonymous_records_get_fallback_ids() {
    let records = vec![
        TimelineRecord::new("2024-01-01", "2024-01-02").with_name("  Kickoff "),
        TimelineRecord::new("2024-01-10", "2024-01-11"),
    ];
    let layout = compute_layout_at(&records, LayoutConfig::default(), today());
    assert!(layout.find("2024-01-01-2024-01-02-Kickoff").is_some());
    assert!(layout.find("2024-01-10-2024-01-11-item").is_some());
}

#[test]
fn entry_pixels_follow_the_layout_origin() {
    let records = vec![
        TimelineRecord::new("2024-01-01", "2024-01-02").with_id(1),
        TimelineRecord::new("2024-01-05", "2024-01-07").with_id(2),
    ];
    let config = LayoutConfig::default().with_px_per_day(52.0);
    let layout = compute_layout_at(&records, config, today());
    let (_, entry) = layout.find("2").expect("entry 2");
    assert_relative_eq!(entry.left_px(layout.start_date, layout.px_per_day), 4.0 * 52.0);
    assert_relative_eq!(layout.left_for_day(day("2024-01-03")), 2.0 * 52.0);
    assert_relative_eq!(
        layout.content_width_px(),
        layout.total_days as f64 * 52.0
    );
}

#[test]
fn invalid_config_values_fall_back_to_defaults() {
    let records = vec![TimelineRecord::new("2024-01-01", "2024-01-01").with_id(1)];
    let config = LayoutConfig::default()
        .with_px_per_day(f64::NAN)
        .with_min_item_width_px(-5.0);
    let layout = compute_layout_at(&records, config, today());
    assert_relative_eq!(layout.px_per_day, 48.0);
    let entry = layout.entries().next().expect("one entry");
    assert_eq!(entry.display_span_days, 2);
}

#[test]
fn json_payload_is_laid_out_leniently() {
    let records = serde_json::json!([
        {"id": 1, "name": "A", "start": "2024-01-01", "end": "2024-01-05"},
        {"id": "beta", "name": "B", "start": "2024-01-03", "end": "2024-01-04", "stage": "beta"},
        {"id": 3, "start": 20240106, "end": "2024-01-08"},
        "not a record",
        {"id": 4, "name": "D", "start": "2024-01-06", "end": "2024-01-08", "extra": true}
    ]);
    let options = serde_json::json!({"pxPerDay": 40, "max_overflow_days": 2.9});
    let owned = compute_layout_from_json(&records, &options, today());
    let layout = owned.layout();

    assert_relative_eq!(layout.px_per_day, 40.0);
    assert_eq!(layout.entry_count(), 3);
    assert!(layout.find("beta").is_some());
    assert!(layout.find("4").is_some());
    assert_eq!(owned.records().len(), 4);
    // id 3 has no usable start; the bare string never became a record
    assert_eq!(layout.dropped_count, 2);
}

#[test]
fn repeated_calls_are_identical_and_leave_input_untouched() {
    let records = vec![
        TimelineRecord::new("2024-01-03", "2024-01-04").with_id(2).with_name("B"),
        TimelineRecord::new("2024-01-01", "2024-01-05").with_id(1).with_name("A"),
    ];
    let snapshot = records.clone();
    let first = compute_layout_at(&records, LayoutConfig::default(), today());
    let second = compute_layout_at(&records, LayoutConfig::default(), today());
    assert_eq!(first, second);
    assert_eq!(records, snapshot);
}
