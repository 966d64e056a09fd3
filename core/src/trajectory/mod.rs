pub mod file_set;
pub mod stream;

pub use file_set::{TrajectoryFile, TrajectoryFileSet, PLT_SUFFIX};
pub use stream::RecordStream;
