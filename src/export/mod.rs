//! Export subsystem - artifact numbering and xlsx workbook generation

pub mod counter;
pub mod workbook;

pub use counter::ExportCounter;
pub use workbook::{ExportError, ExportFile, ExportGenerator};
