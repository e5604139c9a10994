//! Query construction and execution.
//!
//! Builds the fixed `SELECT * FROM <schema>.<table> LIMIT 1` statement and
//! submits it through a statement executor.

pub mod executor;

pub use executor::{select_first_sql, QueryExecutor};
