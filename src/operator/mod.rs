//! Relational operators consumed by the join graph.

mod multi_join;
pub use multi_join::*;
mod table_scan;
pub use table_scan::*;
