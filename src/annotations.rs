/*!
 * Parsing of Youtube annotation documents into ASS event and style records.
 *
 * The consumed part of the schema is:
 *
 * ```text
 * annotations/annotation[@id, @type]
 *     TEXT
 *     segment/movingRegion/{rectRegion | anchoredRegion}[@t, @x, @y, @w, @h]
 *     appearance[@fgColor, @bgColor]
 * ```
 *
 * Each retained annotation yields one [`EventRecord`] and one [`StyleRecord`]
 * stored under the annotation id. Annotations that cannot be converted are
 * reported to a [`DiagnosticsSink`] and skipped.
 */

use log::debug;
use std::collections::HashMap;

use crate::diagnostics::{DiagnosticsSink, SkipDiagnostic, SkipReason};
use crate::errors::ConversionError;
use crate::position::{BoundingBox, Canvas, Placement};
use crate::xml_tree::Element;

/// Time value marking an annotation that is never displayed
pub const NEVER: &str = "never";

/// Text colour used when an annotation has no `appearance` element
pub const DEFAULT_FOREGROUND: &str = "1";

/// Background colour used when an annotation has no `appearance` element
pub const DEFAULT_BACKGROUND: &str = "0";

/// A dialogue line: what is shown and when
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub text: String,
    pub start: String,
    pub end: String,
}

/// Per-annotation style: colours and placement
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRecord {
    pub primary_colour: String,
    pub back_colour: String,
    pub alignment: u8,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_vertical: f64,
}

impl StyleRecord {
    fn new(primary_colour: String, back_colour: String, placement: Placement) -> Self {
        Self {
            primary_colour,
            back_colour,
            alignment: placement.alignment,
            margin_left: placement.margin_left,
            margin_right: placement.margin_right,
            margin_vertical: placement.margin_vertical,
        }
    }
}

/// Events and styles keyed by annotation id.
///
/// Both maps always hold exactly the same keys: records are only ever
/// inserted in pairs through [`ParsedAnnotations::insert`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedAnnotations {
    events: HashMap<String, EventRecord>,
    styles: HashMap<String, StyleRecord>,
}

impl ParsedAnnotations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the event and style of one annotation.
    /// A repeated id replaces both records of the earlier annotation.
    pub fn insert(&mut self, id: impl Into<String>, event: EventRecord, style: StyleRecord) {
        let id = id.into();
        self.events.insert(id.clone(), event);
        self.styles.insert(id, style);
    }

    pub fn events(&self) -> &HashMap<String, EventRecord> {
        &self.events
    }

    pub fn styles(&self) -> &HashMap<String, StyleRecord> {
        &self.styles
    }

    pub fn event(&self, id: &str) -> Option<&EventRecord> {
        self.events.get(id)
    }

    pub fn style(&self, id: &str) -> Option<&StyleRecord> {
        self.styles.get(id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Annotation ids in sorted order, for deterministic output
    pub fn sorted_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.events.keys().map(|k| k.as_str()).collect();
        ids.sort_unstable();
        ids
    }
}

/// Parse an annotation document.
///
/// Only malformed XML or a missing `annotations` container is fatal; every
/// other problem skips the affected annotation and is reported to `sink`.
pub fn parse_annotations(
    xml: &str,
    canvas: &Canvas,
    sink: &mut dyn DiagnosticsSink,
) -> Result<ParsedAnnotations, ConversionError> {
    let root = Element::parse(xml)?;

    // The container may be the root itself or one of its children
    let container = if root.name() == "annotations" {
        &root
    } else {
        root.child("annotations")
            .ok_or(ConversionError::MissingElement("annotations"))?
    };

    let mut parsed = ParsedAnnotations::new();
    for element in container.children_named("annotation") {
        let id = element.attr("id");
        match convert_annotation(element, canvas) {
            Ok((event, style)) => parsed.insert(id.unwrap_or_default(), event, style),
            Err(reason) => sink.report(SkipDiagnostic::new(id, reason)),
        }
    }

    Ok(parsed)
}

/// Turn one `<annotation>` into its record pair, or say why it is skipped
fn convert_annotation(
    annotation: &Element,
    canvas: &Canvas,
) -> Result<(EventRecord, StyleRecord), SkipReason> {
    let kind = annotation.attr("type");
    if kind != Some("text") {
        return Err(SkipReason::NotText(kind.map(str::to_string)));
    }

    let text = annotation
        .child("TEXT")
        .map(|t| t.text())
        .filter(|t| !t.is_empty())
        .ok_or(SkipReason::EmptyText)?;

    let moving_region = annotation
        .child("segment")
        .and_then(|s| s.child("movingRegion"))
        .ok_or(SkipReason::NoRegion)?;

    let mut regions: Vec<&Element> = moving_region.children_named("rectRegion").collect();
    if regions.is_empty() {
        regions = moving_region.children_named("anchoredRegion").collect();
    }
    if regions.is_empty() {
        return Err(SkipReason::NoRegion);
    }
    if regions.len() < 2 {
        return Err(SkipReason::MissingKeyframe);
    }

    // Keyframe times are ordered as strings, not as numbers
    let first = regions[0].attr("t").unwrap_or_default();
    let second = regions[1].attr("t").unwrap_or_default();
    let start = first.min(second);
    let end = first.max(second);
    if start == NEVER || end == NEVER {
        return Err(SkipReason::NeverShown);
    }

    let bounds = read_bounds(regions[0])?;
    let placement = canvas.place(&bounds);
    debug!(
        "Annotation {} placed {} from {} to {}",
        annotation.attr("id").unwrap_or("<none>"),
        placement,
        start,
        end
    );

    let (foreground, background) = match annotation.child("appearance") {
        Some(appearance) => (
            appearance.attr("fgColor").unwrap_or(DEFAULT_FOREGROUND),
            appearance.attr("bgColor").unwrap_or(DEFAULT_BACKGROUND),
        ),
        None => (DEFAULT_FOREGROUND, DEFAULT_BACKGROUND),
    };

    let event = EventRecord {
        text: text.to_string(),
        start: start.to_string(),
        end: end.to_string(),
    };
    let style = StyleRecord::new(foreground.to_string(), background.to_string(), placement);

    Ok((event, style))
}

fn read_bounds(region: &Element) -> Result<BoundingBox, SkipReason> {
    let coord = |name: &str| -> Result<f64, SkipReason> {
        region
            .attr(name)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .ok_or_else(|| SkipReason::InvalidGeometry(name.to_string()))
    };

    Ok(BoundingBox::new(coord("x")?, coord("y")?, coord("w")?, coord("h")?))
}
