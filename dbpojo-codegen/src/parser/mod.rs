//! Schema metadata parsing: sources, descriptor model and the parser

mod ddl;
mod metadata_parser;
mod model;
mod source;
#[cfg(feature = "sqlite")]
mod sqlite;
mod sql_type;

pub use ddl::*;
pub use metadata_parser::*;
pub use model::*;
pub use source::*;
#[cfg(feature = "sqlite")]
pub use sqlite::*;
pub use sql_type::*;
