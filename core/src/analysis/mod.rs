pub mod bounds;
pub mod filter;
pub mod summary;

pub use bounds::{Bounds, Extent};
pub use filter::{RecordFilter, Region};
pub use summary::{analyze_user, FileSummary, ScanOptions, UserSummary};
