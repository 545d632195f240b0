//! Data model: the fixed destination layout and the normalized row type.

mod row;
mod schema;

pub use row::NormalizedRow;
pub use schema::{destination_column, COLUMN_MAP, TARGET_COLUMNS};
