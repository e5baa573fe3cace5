pub mod browse;
pub mod range;

pub use browse::{list_directory, resolve_within, MediaEntry};
pub use range::{plan, RangePlan};
