// Byte-range planning for partial-content responses
use crate::error::{Result, SubshiftError};
use serde::Serialize;

/// The serving window computed for one request. This is a response-shaping
/// decision only; the byte reading belongs to the I/O layer that owns the
/// file handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangePlan {
    pub status: u16,
    pub start: u64,
    pub end: u64,
    pub content_length: u64,
    pub headers: Vec<(String, String)>,
}

/// Compute the serving window for a resource of `resource_length` bytes.
///
/// Without a range header the whole resource is served with status 200. With
/// a `bytes=<start>-[<end>]` header a 206 window is computed; a missing end
/// resolves to the last byte and an end past the resource clamps to it. A
/// start past the end or past the resource is unsatisfiable. Multi-range and
/// suffix (`bytes=-N`) requests are rejected rather than guessed at.
pub fn plan(resource_length: u64, range_header: Option<&str>) -> Result<RangePlan> {
    match range_header {
        None => Ok(full_plan(resource_length)),
        Some(header) => partial_plan(resource_length, header),
    }
}

fn full_plan(len: u64) -> RangePlan {
    RangePlan {
        status: 200,
        start: 0,
        end: len.saturating_sub(1),
        content_length: len,
        headers: vec![
            ("Accept-Ranges".to_string(), "bytes".to_string()),
            ("Content-Length".to_string(), len.to_string()),
        ],
    }
}

fn partial_plan(len: u64, header: &str) -> Result<RangePlan> {
    let spec = header
        .strip_prefix("bytes=")
        .ok_or_else(|| SubshiftError::Range(format!("unsupported range unit in '{}'", header)))?;

    if spec.contains(',') {
        return Err(SubshiftError::Range(
            "multiple ranges are not supported".to_string(),
        ));
    }

    let (start_text, end_text) = spec
        .split_once('-')
        .ok_or_else(|| SubshiftError::Range(format!("invalid range '{}'", header)))?;

    let start: u64 = start_text
        .trim()
        .parse()
        .map_err(|_| SubshiftError::Range(format!("invalid range start in '{}'", header)))?;

    let end = if end_text.trim().is_empty() {
        len.saturating_sub(1)
    } else {
        let requested: u64 = end_text
            .trim()
            .parse()
            .map_err(|_| SubshiftError::Range(format!("invalid range end in '{}'", header)))?;
        requested.min(len.saturating_sub(1))
    };

    if start > end || start >= len {
        return Err(SubshiftError::Range(format!(
            "bytes {}-{} of a {}-byte resource",
            start, end, len
        )));
    }

    let content_length = end - start + 1;
    Ok(RangePlan {
        status: 206,
        start,
        end,
        content_length,
        headers: vec![
            (
                "Content-Range".to_string(),
                format!("bytes {}-{}/{}", start, end, len),
            ),
            ("Accept-Ranges".to_string(), "bytes".to_string()),
            ("Content-Length".to_string(), content_length.to_string()),
        ],
    })
}
