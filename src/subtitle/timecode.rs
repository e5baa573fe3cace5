// ASS time codes: H:MM:SS.cs (hours unpadded, centisecond precision)
use crate::error::{Result, SubshiftError};

/// Parse an `H:MM:SS.cs` time code into seconds.
///
/// The head is split on the last `.` so the centisecond tail never collides
/// with the colon-delimited components.
pub fn parse(text: &str) -> Result<f64> {
    let (head, tail) = text
        .rsplit_once('.')
        .ok_or_else(|| malformed(text))?;

    let parts: Vec<&str> = head.split(':').collect();
    if parts.len() != 3 {
        return Err(malformed(text));
    }

    let hours: i64 = parts[0].trim().parse().map_err(|_| malformed(text))?;
    let minutes: i64 = parts[1].parse().map_err(|_| malformed(text))?;
    let seconds: i64 = parts[2].parse().map_err(|_| malformed(text))?;
    let centis: i64 = tail.parse().map_err(|_| malformed(text))?;

    Ok(hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds as f64 + centis as f64 / 100.0)
}

/// Render seconds as an `H:MM:SS.cs` time code.
///
/// Negative input clamps to zero; a negative time code is never emitted. All
/// units are re-derived from the total rounded centisecond count so a
/// centisecond carry cascades into seconds, minutes, and hours.
pub fn format(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let total_cs = (seconds * 100.0).round() as u64;

    let hours = total_cs / 360_000;
    let minutes = total_cs % 360_000 / 6_000;
    let secs = total_cs % 6_000 / 100;
    let centis = total_cs % 100;

    format!("{}:{:02}:{:02}.{:02}", hours, minutes, secs, centis)
}

fn malformed(text: &str) -> SubshiftError {
    SubshiftError::Format(format!("invalid time code '{}'", text))
}
