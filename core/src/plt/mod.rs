pub mod header;
pub mod record;

pub use header::{skip_header, HEADER_LINES};
pub use record::MovementRecord;
