//! Default regexes and the table that maps placeholders onto them

pub mod regexes;
pub mod table;

pub use table::NodeMappingTable;
