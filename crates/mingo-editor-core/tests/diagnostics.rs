use mingo_editor_core::{DiagnosticRecord, Generation, Marker, MarkerSet, SourceBuffer, map_records};

#[test]
fn test_map_empty_records() {
    assert!(map_records(&[]).is_empty());
}

#[test]
fn test_map_preserves_order_and_duplicates() {
    let records = vec![
        DiagnosticRecord::new(3, 1, "third"),
        DiagnosticRecord::new(1, 5, "first"),
        DiagnosticRecord::new(1, 5, "first"),
    ];
    let markers = map_records(&records);

    assert_eq!(
        markers.iter().map(|m| m.message.as_str()).collect::<Vec<_>>(),
        vec!["third", "first", "first"]
    );
    assert_eq!(markers[1], markers[2]);
}

#[test]
fn test_markers_are_one_column_wide_and_one_based() {
    let records = vec![
        DiagnosticRecord::new(2, 4, "a"),
        DiagnosticRecord::new(0, 0, "b"),
        DiagnosticRecord::new(-7, i64::MAX, "c"),
    ];
    for marker in map_records(&records) {
        assert!(marker.start_line >= 1);
        assert!(1 <= marker.start_column);
        assert!(marker.start_column <= marker.end_column);
        assert_eq!(marker.start_line, marker.end_line);
    }

    let marker = Marker::from_record(&records[0]);
    assert_eq!(
        (marker.start_line, marker.start_column, marker.end_line, marker.end_column),
        (2, 4, 2, 5)
    );
}

#[test]
fn test_records_decode_either_key_case() {
    let lower: Vec<DiagnosticRecord> =
        serde_json::from_str(r#"[{"msg":"boom","line":2,"column":3}]"#).unwrap();
    let upper: Vec<DiagnosticRecord> =
        serde_json::from_str(r#"[{"Msg":"boom","Line":2,"Column":3}]"#).unwrap();
    assert_eq!(lower, upper);
    assert_eq!(lower[0], DiagnosticRecord::new(2, 3, "boom"));

    let sparse: Vec<DiagnosticRecord> = serde_json::from_str(r#"[{}]"#).unwrap();
    let marker = Marker::from_record(&sparse[0]);
    assert_eq!((marker.start_line, marker.start_column), (1, 1));
    assert_eq!(marker.message, "Error");
}

#[test]
fn test_clamp_marker_to_buffer_extents() {
    let buffer = SourceBuffer::new("let x = 1;\nprint(x);");
    let marker = Marker::from_record(&DiagnosticRecord::new(40, 90, "past the end"));
    let clamped = buffer.clamp_marker(&marker);

    assert_eq!((clamped.start_line, clamped.start_column), (2, 10));
    assert_eq!((clamped.end_line, clamped.end_column), (2, 10));
    assert_eq!(buffer.marker_offsets(&clamped), 20..20);

    let marker = Marker::from_record(&DiagnosticRecord::new(1, 5, "x"));
    assert_eq!(buffer.marker_offsets(&marker), 4..5);
}

#[test]
fn test_marker_set_generation() {
    let set = MarkerSet::from_records(Generation::new(4), &[DiagnosticRecord::new(1, 1, "x")]);
    assert!(set.is_current(Generation::new(4)));
    assert!(!set.is_current(Generation::new(5)));
    assert_eq!(set.len(), 1);

    let failed = MarkerSet::failed(Generation::new(4), "expected value at line 1");
    assert!(failed.is_empty());
    assert_eq!(failed.error.as_deref(), Some("expected value at line 1"));
}

#[test]
fn test_loosely_typed_fields_do_not_drop_the_array() {
    let records: Vec<DiagnosticRecord> = serde_json::from_str(
        r#"[
            {"msg": null, "line": 2.0, "column": 5},
            {"Msg": "bad token", "Line": "3", "Column": null},
            {"msg": 42, "line": [1], "column": {"x": 1}},
            {"msg": "ok", "line": 4, "column": 1}
        ]"#,
    )
    .unwrap();

    assert_eq!(
        records,
        vec![
            DiagnosticRecord::new(2, 5, ""),
            DiagnosticRecord::new(3, 0, "bad token"),
            DiagnosticRecord::new(0, 0, ""),
            DiagnosticRecord::new(4, 1, "ok"),
        ]
    );

    let markers = map_records(&records);
    assert_eq!(markers[0].message, "Error");
    assert_eq!((markers[0].start_line, markers[0].start_column), (2, 5));
    assert_eq!((markers[1].start_line, markers[1].start_column), (3, 1));
    assert_eq!((markers[2].start_line, markers[2].start_column), (1, 1));
}
