pub mod types;
pub mod filter;
pub mod filter_where;
pub mod filter_order;
pub mod error;

pub use types::{FilterData, SqlResult};
pub use error::FilterError;
pub use filter::Filter;
