pub mod types;
pub mod filter_where;
pub mod filter_order;

pub use types::*;
pub use filter_order::MovieSort;
pub use filter_where::contains_pattern;
