/*!
 * Tests for ASS document rendering
 */

use anyhow::Result;
use youtube_ass::annotations::{EventRecord, ParsedAnnotations, StyleRecord};
use youtube_ass::ass_document::{AssDocument, EVENTS_FORMAT, STYLES_FORMAT, format_dialogue_line, format_style_line};
use youtube_ass::position::Canvas;
use crate::common;

fn record_pair(text: &str, start: &str, end: &str, alignment: u8) -> (EventRecord, StyleRecord) {
    (
        EventRecord {
            text: text.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        },
        StyleRecord {
            primary_colour: "1".to_string(),
            back_colour: "0".to_string(),
            alignment,
            margin_left: 5.0,
            margin_right: 12.5,
            margin_vertical: 3.0,
        },
    )
}

#[test]
fn test_formatStyleLine_shouldFillFixedColumns() {
    let (_, style) = record_pair("x", "1", "2", 9);
    assert_eq!(
        format_style_line("s1", &style),
        "Style: s1,Arial,4.5,1,1,1,0,0,0,1,0.1,0.2,9,5,12.5,3,0,0"
    );
}

#[test]
fn test_formatDialogueLine_multilineText_shouldEscapeBreaks() {
    let (event, _) = record_pair("first\nsecond\r\nthird", "1", "2", 7);
    assert_eq!(
        format_dialogue_line("d1", &event),
        "Dialogue: Marked=0,1,2,d1,Speaker,0,0,0,,first\\Nsecond\\Nthird"
    );
}

#[test]
fn test_fromAnnotations_shouldRenderSectionsInOrder() {
    let mut annotations = ParsedAnnotations::new();
    let (event, style) = record_pair("zed", "5", "6", 1);
    annotations.insert("z", event, style);
    let (event, style) = record_pair("ay", "1", "2", 7);
    annotations.insert("a", event, style);

    let document = AssDocument::from_annotations(&annotations, &Canvas::default());
    let text = document.to_string();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        &lines[..5],
        &["[Script Info]", "ScriptType: V4.00+", "PlayResX: 100", "PlayResY: 100", ""]
    );
    assert_eq!(lines[5], "[V4 Styles]");
    assert_eq!(lines[6], STYLES_FORMAT);
    assert!(lines[7].starts_with("Style: a,"));
    assert!(lines[8].starts_with("Style: z,"));
    assert_eq!(lines[10], "[Events]");
    assert_eq!(lines[11], EVENTS_FORMAT);
    assert!(lines[12].contains(",a,Speaker,"));
    assert!(lines[13].contains(",z,Speaker,"));
    assert_eq!(document.event_count(), 2);
}

#[test]
fn test_fromAnnotations_empty_shouldKeepHeaders() {
    let document = AssDocument::from_annotations(&ParsedAnnotations::new(), &Canvas::default());
    assert_eq!(document.event_count(), 0);
    assert!(document.style_lines().is_empty());
    assert!(document.dialogue_lines().is_empty());

    let text = document.to_string();
    assert!(text.contains("[V4 Styles]"));
    assert!(text.contains("[Events]"));
}

#[test]
fn test_writeToFile_shouldCreateDirectoriesAndWriteDocument() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested").join("out.ass");

    let mut annotations = ParsedAnnotations::new();
    let (event, style) = record_pair("hello", "1", "2", 7);
    annotations.insert("h", event, style);
    let document = AssDocument::from_annotations(&annotations, &Canvas::default());

    document.write_to_file(&path)?;
    assert_eq!(std::fs::read_to_string(&path)?, document.to_string());
    Ok(())
}
