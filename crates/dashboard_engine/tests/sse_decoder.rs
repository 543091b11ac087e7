use dashboard_engine::SseLineDecoder;
use pretty_assertions::assert_eq;

#[test]
fn complete_lines_are_returned_without_terminators() {
    let mut decoder = SseLineDecoder::new();

    let lines = decoder.push(b"data: one\n\ndata: two\r\n");

    assert_eq!(lines, vec!["data: one", "", "data: two"]);
    assert_eq!(decoder.finish(), None);
}

#[test]
fn partial_line_waits_for_the_rest() {
    let mut decoder = SseLineDecoder::new();

    assert!(decoder.push(b"data: {\"type\":\"out").is_empty());
    assert!(decoder.push(b"put\",\"line\":\"x\"}").is_empty());
    let lines = decoder.push(b"\ndata: next");

    assert_eq!(lines, vec![r#"data: {"type":"output","line":"x"}"#]);
    assert_eq!(decoder.finish(), Some("data: next".to_string()));
    assert_eq!(decoder.finish(), None);
}

#[test]
fn multibyte_character_split_across_chunks_survives() {
    let mut decoder = SseLineDecoder::new();
    let text = "✓ done\n".as_bytes();

    assert!(decoder.push(&text[..1]).is_empty());
    let lines = decoder.push(&text[1..]);

    assert_eq!(lines, vec!["✓ done"]);
}
