//! Integration tests for rds-data-mapper.

pub mod live_test;
pub mod select_first_test;
