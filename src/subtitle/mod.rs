pub mod ass;
pub mod srt;
pub mod timecode;

use crate::config::SubtitleFormat;
use crate::error::Result;

/// Adapter applying a uniform time offset to one subtitle container format.
pub trait TimeShifter {
    fn shift(&self, content: &str, offset_secs: f64) -> Result<String>;
    fn extension(&self) -> &'static str;
}

pub fn create_shifter(format: SubtitleFormat) -> Box<dyn TimeShifter> {
    match format {
        SubtitleFormat::Srt => Box::new(srt::SrtShifter),
        SubtitleFormat::Ass => Box::new(ass::AssShifter),
    }
}

/// Shift every time-bearing field in `content` by `offset_secs`, dispatching
/// to the adapter for the declared format. The format comes from the boundary
/// (filename extension), never from content sniffing.
pub fn shift_content(content: &str, format: SubtitleFormat, offset_secs: f64) -> Result<String> {
    create_shifter(format).shift(content, offset_secs)
}
