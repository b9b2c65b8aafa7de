mod bind_map;
mod rendered;
mod row;
mod sql_value;

pub(crate) use bind_map::placeholder_name;
pub use bind_map::BindMap;
pub use rendered::{PlaceholderStyle, RenderedStatement, StatementKind};
pub use row::{QueryResult, RawQueryResult, Row};
pub use sql_value::SqlValue;
