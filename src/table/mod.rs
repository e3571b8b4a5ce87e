//! Data table: columns, sorting, filtering and pagination.

pub mod column;
pub mod controller;

pub use column::{Column, SortDirection, SortKey};
pub use controller::{highlight_ranges, TableController, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
