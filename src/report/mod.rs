mod assemble;
mod document;

pub use assemble::assemble;
pub use document::{Block, ReportDocument, ReportScope, Section, Stat, Table};
