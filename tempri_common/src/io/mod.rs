//! Text I/O for temporal graphs and occurrences.

mod format;
mod labels;
mod reader;
mod writer;

pub use format::OccurrenceFormatter;
pub use labels::LabelInterner;
pub use reader::GraphReader;
pub use writer::GraphWriter;
