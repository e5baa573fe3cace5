// SRT subtitle format (numbered blocks, comma-millisecond time codes)
use super::TimeShifter;
use crate::error::{Result, SubshiftError};

/// One SRT block. The sequence number and body text are opaque to shifting
/// and round-trip verbatim; only the timing line changes.
#[derive(Debug, Clone)]
pub struct SrtEntry {
    pub index: String,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

pub struct SrtShifter;

impl TimeShifter for SrtShifter {
    fn shift(&self, content: &str, offset_secs: f64) -> Result<String> {
        let mut entries = parse(content)?;
        for entry in &mut entries {
            entry.start += offset_secs;
            entry.end += offset_secs;
        }
        Ok(serialize(&entries))
    }

    fn extension(&self) -> &'static str {
        "srt"
    }
}

/// Parse SRT content into entries: blocks separated by blank lines, each with
/// a sequence number line, a `start --> end` timing line, and a body.
pub fn parse(content: &str) -> Result<Vec<SrtEntry>> {
    let normalized = content.replace("\r\n", "\n");
    let mut entries = Vec::new();

    for block in normalized.split("\n\n") {
        let block = block.trim_matches('\n');
        if block.trim().is_empty() {
            continue;
        }

        let mut lines = block.lines();
        let index = lines
            .next()
            .ok_or_else(|| SubshiftError::Format("empty subtitle block".to_string()))?
            .trim()
            .to_string();
        let timing = lines.next().ok_or_else(|| {
            SubshiftError::Format(format!("block {} is missing a timing line", index))
        })?;

        let (start_text, end_text) = timing.split_once("-->").ok_or_else(|| {
            SubshiftError::Format(format!("invalid timing line '{}'", timing))
        })?;

        let start = parse_timestamp(start_text.trim())?;
        let end = parse_timestamp(end_text.trim())?;
        let text = lines.collect::<Vec<_>>().join("\n");

        entries.push(SrtEntry {
            index,
            start,
            end,
            text,
        });
    }

    Ok(entries)
}

/// Re-emit entries as SRT text, preserving indices and bodies verbatim.
pub fn serialize(entries: &[SrtEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "{}\n{} --> {}\n{}\n",
                entry.index,
                format_timestamp(entry.start),
                format_timestamp(entry.end),
                entry.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse an `HH:MM:SS,mmm` timestamp into seconds.
fn parse_timestamp(text: &str) -> Result<f64> {
    let malformed = || SubshiftError::Format(format!("invalid timestamp '{}'", text));

    let (head, millis) = text.rsplit_once(',').ok_or_else(malformed)?;
    let parts: Vec<&str> = head.split(':').collect();
    if parts.len() != 3 {
        return Err(malformed());
    }

    let hours: i64 = parts[0].trim().parse().map_err(|_| malformed())?;
    let minutes: i64 = parts[1].parse().map_err(|_| malformed())?;
    let seconds: i64 = parts[2].parse().map_err(|_| malformed())?;
    let millis: i64 = millis.trim().parse().map_err(|_| malformed())?;

    Ok(hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds as f64 + millis as f64 / 1000.0)
}

/// Render seconds as an `HH:MM:SS,mmm` timestamp, clamping negatives to zero.
/// Units derive from the total rounded millisecond count so carries cascade.
fn format_timestamp(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let total_ms = (seconds * 1000.0).round() as u64;

    format!(
        "{:02}:{:02}:{:02},{:03}",
        total_ms / 3_600_000,
        total_ms % 3_600_000 / 60_000,
        total_ms % 60_000 / 1_000,
        total_ms % 1_000
    )
}
