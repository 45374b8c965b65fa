//! Database access for bstore-mkt
//!
//! Operation-per-function modules over the shared SQLite pool. Schema
//! creation lives in `bstore-common`.

pub mod beats;
pub mod profiles;
