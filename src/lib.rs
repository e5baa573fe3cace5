pub mod config;
pub mod error;
pub mod media;
pub mod shift;
pub mod subtitle;

pub use config::{Config, SubtitleFormat};
pub use error::{Result, SubshiftError};
pub use shift::{
    derive_output_path, print_summary, shift_file, shift_files, BatchOptions, BatchReport,
    FileOutcome,
};
pub use subtitle::shift_content;
