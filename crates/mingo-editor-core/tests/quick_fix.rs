use mingo_editor_core::{
    DiagnosticRecord, Marker, MarkerSet, SourceBuffer, TextEdit, TextPosition, propose,
    propose_all,
};

fn marker(line: i64, column: i64, message: &str) -> Marker {
    Marker::from_record(&DiagnosticRecord::new(line, column, message))
}

#[test]
fn test_unrecognized_message_yields_nothing() {
    assert_eq!(propose(&marker(1, 1, "unexpected token"), 5), None);
    assert_eq!(propose(&marker(1, 1, "undefined variable y"), 5), None);
}

#[test]
fn test_missing_semicolon_inserts_at_line_end() {
    for message in [
        "expected next token to be SEMICOLON",
        "Expected Next Token To Be Semicolon, got LET instead",
        "missing semicolon",
    ] {
        let fix = propose(&marker(2, 3, message), 11).expect("fix");
        assert_eq!(fix.edit, TextEdit::insert(TextPosition::new(2, 11), ";"));
    }
}

#[test]
fn test_apply_fix_to_buffer() {
    let mut buffer = SourceBuffer::new("let x = 10\nprint(x);");
    let generation = buffer.generation();
    let markers = MarkerSet::from_records(
        generation,
        &[DiagnosticRecord::new(1, 4, "expected next token to be SEMICOLON")],
    );

    let fixes = propose_all(&buffer, &markers);
    assert_eq!(fixes.len(), 1);

    let replaced = buffer.apply_edit(&fixes[0].edit);
    assert_eq!(replaced, 10..10);
    assert_eq!(buffer.text(), "let x = 10;\nprint(x);");
    assert_eq!(buffer.generation(), generation.next());
}

#[test]
fn test_propose_all_skips_unrecognized_and_dedups_lines() {
    let buffer = SourceBuffer::new("a\nb");
    let markers = MarkerSet::from_records(
        buffer.generation(),
        &[
            DiagnosticRecord::new(1, 1, "missing semicolon"),
            DiagnosticRecord::new(1, 2, "expected next token to be SEMICOLON"),
            DiagnosticRecord::new(2, 1, "unexpected token"),
            DiagnosticRecord::new(99, 1, "missing semicolon"),
        ],
    );

    let fixes = propose_all(&buffer, &markers);
    let at = fixes.iter().map(|f| f.edit.start).collect::<Vec<_>>();
    assert_eq!(at, vec![TextPosition::new(1, 2), TextPosition::new(2, 2)]);
}

#[test]
fn test_fix_lands_on_oracle_line_despite_unicode_separators() {
    let mut buffer = SourceBuffer::new("let s = 1\u{2028}2;\nprint(x)");
    let markers = MarkerSet::from_records(
        buffer.generation(),
        &[DiagnosticRecord::new(2, 9, "expected next token to be SEMICOLON")],
    );

    let fixes = propose_all(&buffer, &markers);
    assert_eq!(fixes.len(), 1);
    assert_eq!(fixes[0].edit, TextEdit::insert(TextPosition::new(2, 9), ";"));
    buffer.apply_edit(&fixes[0].edit);
    assert_eq!(buffer.text(), "let s = 1\u{2028}2;\nprint(x);");
}
