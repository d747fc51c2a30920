#![doc = "Eleitorado public API"]
mod aggregate;
mod boundary;
mod cache;
mod choropleth;
mod common;
mod dataset;
mod filter;
mod rank;
mod record;
mod report;
mod source;
mod types;
mod view;

#[doc(inline)]
pub use types::{Counter, Dimension, GeoLevel};

#[doc(inline)]
pub use record::{normalize_sheet, ColumnLayout, RawSheet, VoterRecord};

#[doc(inline)]
pub use dataset::Dataset;

#[doc(inline)]
pub use source::{load_sheets, CancelToken, CsvSheetSource, LoadOutcome, SheetSource};

#[cfg(feature = "download")]
#[doc(inline)]
pub use source::HttpSheetSource;

#[doc(inline)]
pub use filter::{category_options, options, visible, FilterState, Selection};

#[doc(inline)]
pub use aggregate::{
    aggregate, entity_totals, summarize, AggregatedMetric, CategoryTotals, EntityBreakdown,
    STATEWIDE,
};

#[doc(inline)]
pub use rank::{percent_of, rank, RankEntry};

#[doc(inline)]
pub use choropleth::{Choropleth, ColorScale, FeatureStyle, Indicator, LegendEntry, MISSING_FILL};

#[doc(inline)]
pub use boundary::{BoundaryFeature, BoundaryLayer};

#[doc(inline)]
pub use cache::{AggregateCache, BlobStore, CachedAggregate, FileStore, MemoryStore};

#[doc(inline)]
pub use report::{assemble, Block, ReportDocument, ReportScope, Section, Stat, Table};

#[doc(inline)]
pub use view::{compute_view, DimensionBreakdown, FilterOptions, HeadlineTotals, ViewModel};
