use anyhow::Result;
use std::fmt;
use std::path::Path;

use crate::annotations::{EventRecord, ParsedAnnotations, StyleRecord};
use crate::file_utils::FileManager;
use crate::position::Canvas;

// @module: ASS (SubStation Alpha v4+) document assembly

// @const: Column layout of the style table
pub const STYLES_FORMAT: &str = "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, \
TertiaryColour, BackColour, Bold, Italic, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, \
MarginV, AlphaLevel, Encoding";

// @const: Column layout of the events table
pub const EVENTS_FORMAT: &str =
    "Format: Marked, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text";

// Style columns that annotations have no equivalent for.
// Font size, outline and shadow are relative to the 100x100 canvas.
const FONT_NAME: &str = "Arial";
const FONT_SIZE: &str = "4.5";
const BOLD: &str = "0";
const ITALIC: &str = "0";
const BORDER_STYLE: &str = "1";
const OUTLINE: &str = "0.1";
const SHADOW: &str = "0.2";
const ALPHA_LEVEL: &str = "0";
const ENCODING: &str = "0";

// Dialogue columns that annotations have no equivalent for
const MARKED: &str = "Marked=0";
const SPEAKER: &str = "Speaker";

/// Format one `Style:` line
pub fn format_style_line(name: &str, style: &StyleRecord) -> String {
    format!(
        "Style: {name},{FONT_NAME},{FONT_SIZE},{fg},{fg},{fg},{bg},{BOLD},{ITALIC},{BORDER_STYLE},\
{OUTLINE},{SHADOW},{alignment},{ml},{mr},{mv},{ALPHA_LEVEL},{ENCODING}",
        fg = style.primary_colour,
        bg = style.back_colour,
        alignment = style.alignment,
        ml = style.margin_left,
        mr = style.margin_right,
        mv = style.margin_vertical,
    )
}

/// Format one `Dialogue:` line; the style name is the annotation id
pub fn format_dialogue_line(name: &str, event: &EventRecord) -> String {
    format!(
        "Dialogue: {MARKED},{start},{end},{name},{SPEAKER},0,0,0,,{text}",
        start = event.start,
        end = event.end,
        text = escape_text(&event.text),
    )
}

/// ASS dialogue text is a single line; hard breaks are written as `\N`
fn escape_text(text: &str) -> String {
    text.replace("\r\n", "\\N").replace('\n', "\\N")
}

/// A complete ASS document, held as lines per section
#[derive(Debug, Clone, PartialEq)]
pub struct AssDocument {
    script_info: Vec<String>,
    styles: Vec<String>,
    events: Vec<String>,
}

impl AssDocument {
    /// Build the document from parsed annotations.
    /// Records are emitted sorted by annotation id so output is reproducible.
    pub fn from_annotations(annotations: &ParsedAnnotations, canvas: &Canvas) -> Self {
        let script_info = vec![
            "[Script Info]".to_string(),
            "ScriptType: V4.00+".to_string(),
            format!("PlayResX: {}", canvas.width),
            format!("PlayResY: {}", canvas.height),
        ];

        let ids = annotations.sorted_ids();

        let mut styles = Vec::with_capacity(ids.len() + 2);
        styles.push("[V4 Styles]".to_string());
        styles.push(STYLES_FORMAT.to_string());
        styles.extend(
            ids.iter()
                .filter_map(|id| annotations.style(id).map(|s| format_style_line(id, s))),
        );

        let mut events = Vec::with_capacity(ids.len() + 2);
        events.push("[Events]".to_string());
        events.push(EVENTS_FORMAT.to_string());
        events.extend(
            ids.iter()
                .filter_map(|id| annotations.event(id).map(|e| format_dialogue_line(id, e))),
        );

        Self {
            script_info,
            styles,
            events,
        }
    }

    /// Number of dialogue lines in the document
    pub fn event_count(&self) -> usize {
        self.events.len().saturating_sub(2)
    }

    /// `Style:` lines, without the section header
    pub fn style_lines(&self) -> &[String] {
        self.styles.get(2..).unwrap_or_default()
    }

    /// `Dialogue:` lines, without the section header
    pub fn dialogue_lines(&self) -> &[String] {
        self.events.get(2..).unwrap_or_default()
    }

    /// Write the document to a file, creating parent directories if needed.
    /// The file is only created once the whole text is assembled.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        FileManager::write_to_file(path, self.to_string())
    }
}

impl fmt::Display for AssDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for section in [&self.script_info, &self.styles, &self.events] {
            for line in section {
                writeln!(f, "{}", line)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
