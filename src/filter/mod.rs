mod cascade;
mod state;

pub use cascade::{category_options, options, visible};
pub use state::{FilterState, Selection};
