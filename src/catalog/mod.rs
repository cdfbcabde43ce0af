pub mod data;
pub mod filters;

pub use data::{load_catalog, Catalog, TOP_RATED_COUNT};
pub use filters::{apply_filters, FilterState, SortKey};
