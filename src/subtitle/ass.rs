// ASS subtitle format (named sections, key/value event records)
use super::{timecode, TimeShifter};
use crate::error::Result;

/// Section carrying time-bearing records.
const EVENTS_SECTION: &str = "Events";

/// The time-bearing event keys. Only these become structured records; other
/// event keys (Picture, Sound, Movie, Command) carry no shiftable fields and
/// stay raw so they round-trip byte for byte, separator included.
const SHIFTED_KEYS: [&str; 2] = ["Dialogue", "Comment"];

/// Default field template for event records, used when no `Format:` line has
/// declared an ordering. The trailing `Text` field absorbs embedded commas.
const DEFAULT_EVENT_FIELDS: [&str; 10] = [
    "Layer", "Start", "End", "Style", "Name", "MarginL", "MarginR", "MarginV", "Effect", "Text",
];

/// A parsed ASS document: ordered sections plus any lines preceding the first
/// section header. Non-Events content is held as raw lines so serialization
/// reproduces it byte for byte.
#[derive(Debug, Clone)]
pub struct AssDocument {
    pub preamble: Vec<String>,
    pub sections: Vec<AssSection>,
    trailing_newline: bool,
}

#[derive(Debug, Clone)]
pub struct AssSection {
    pub name: String,
    pub lines: Vec<AssLine>,
}

#[derive(Debug, Clone)]
pub enum AssLine {
    Event(EventRecord),
    Raw(String),
}

/// An event record: key plus ordered field-name/field-text pairs mapped from
/// the line's comma-separated positional values.
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub key: String,
    pub fields: Vec<(String, String)>,
}

impl EventRecord {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn shift_times(&mut self, offset_secs: f64) -> Result<()> {
        for (name, value) in &mut self.fields {
            if name == "Start" || name == "End" {
                let secs = timecode::parse(value)?;
                *value = timecode::format(secs + offset_secs);
            }
        }
        Ok(())
    }
}

pub struct AssShifter;

impl TimeShifter for AssShifter {
    fn shift(&self, content: &str, offset_secs: f64) -> Result<String> {
        let mut doc = parse(content);
        shift_document(&mut doc, offset_secs)?;
        Ok(serialize(&doc))
    }

    fn extension(&self) -> &'static str {
        "ass"
    }
}

/// Partition content into sections by `[Name]` headers. Only lines inside
/// `[Events]` whose leading key token is time-bearing become structured
/// records; everything else is kept raw. A `Format:` line inside `[Events]`
/// overrides the field template for the records that follow it.
pub fn parse(content: &str) -> AssDocument {
    let normalized = content.replace("\r\n", "\n");
    let trailing_newline = normalized.ends_with('\n');

    let mut doc = AssDocument {
        preamble: Vec::new(),
        sections: Vec::new(),
        trailing_newline,
    };
    let mut template: Vec<String> = DEFAULT_EVENT_FIELDS.iter().map(|s| s.to_string()).collect();

    let body = normalized.strip_suffix('\n').unwrap_or(&normalized);

    for line in body.split('\n') {
        let trimmed = line.trim();
        if trimmed.len() >= 2 && trimmed.starts_with('[') && trimmed.ends_with(']') {
            doc.sections.push(AssSection {
                name: trimmed[1..trimmed.len() - 1].to_string(),
                lines: Vec::new(),
            });
            continue;
        }

        match doc.sections.last_mut() {
            None => doc.preamble.push(line.to_string()),
            Some(section) if section.name == EVENTS_SECTION => {
                if let Some(names) = parse_format_line(line) {
                    template = names;
                    section.lines.push(AssLine::Raw(line.to_string()));
                } else if let Some(record) = parse_event_line(line, &template) {
                    section.lines.push(AssLine::Event(record));
                } else {
                    section.lines.push(AssLine::Raw(line.to_string()));
                }
            }
            Some(section) => section.lines.push(AssLine::Raw(line.to_string())),
        }
    }

    doc
}

/// Reconstruct the document text. Raw lines and field values are emitted
/// exactly as parsed; only shifted time fields differ from the input.
pub fn serialize(doc: &AssDocument) -> String {
    let mut out: Vec<String> = doc.preamble.clone();

    for section in &doc.sections {
        out.push(format!("[{}]", section.name));
        for line in &section.lines {
            match line {
                AssLine::Raw(raw) => out.push(raw.clone()),
                AssLine::Event(record) => {
                    let values: Vec<&str> =
                        record.fields.iter().map(|(_, v)| v.as_str()).collect();
                    out.push(format!("{}: {}", record.key, values.join(",")));
                }
            }
        }
    }

    let mut text = out.join("\n");
    if doc.trailing_newline {
        text.push('\n');
    }
    text
}

/// Apply the offset to `Start`/`End` of every Dialogue and Comment record.
/// A document without an Events section passes through unchanged.
pub fn shift_document(doc: &mut AssDocument, offset_secs: f64) -> Result<()> {
    for section in &mut doc.sections {
        if section.name != EVENTS_SECTION {
            continue;
        }
        for line in &mut section.lines {
            if let AssLine::Event(record) = line {
                record.shift_times(offset_secs)?;
            }
        }
    }
    Ok(())
}

fn parse_format_line(line: &str) -> Option<Vec<String>> {
    let rest = line.strip_prefix("Format:")?;
    Some(rest.split(',').map(|name| name.trim().to_string()).collect())
}

fn parse_event_line(line: &str, template: &[String]) -> Option<EventRecord> {
    let (key, rest) = line.split_once(':')?;
    if !SHIFTED_KEYS.contains(&key) {
        return None;
    }

    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    let values: Vec<&str> = rest.splitn(template.len(), ',').collect();
    let fields = template
        .iter()
        .zip(values)
        .map(|(name, value)| (name.clone(), value.to_string()))
        .collect();

    Some(EventRecord {
        key: key.to_string(),
        fields,
    })
}
