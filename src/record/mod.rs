mod normalize;
mod record;
mod sheet;

pub(crate) use normalize::*;
pub use record::{normalize_sheet, ColumnLayout, VoterRecord};
pub use sheet::RawSheet;
