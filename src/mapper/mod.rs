//! Result-to-record mapping.
//!
//! A destination type implements [`Record`] to declare which result columns
//! it receives and to hand out a settable reference for each of them. The
//! [`record!`](crate::record) macro writes that impl from a
//! `"column" => field` table; fields left out of the table are never touched.
//!
//! ```ignore
//! #[derive(Debug, Default)]
//! struct Transaction {
//!     id: i64,
//!     label: Option<String>,
//!     cached_total: f64, // not mapped
//! }
//!
//! rds_data_mapper::record!(Transaction {
//!     "id" => id,
//!     "label" => label,
//! });
//! ```

mod value;

pub use value::{ColumnValue, FromValue};

use crate::db::QueryResult;
use crate::error::{MapperError, Result};
use std::collections::HashSet;
use tracing::{debug, trace};

/// A destination whose fields are filled from one result row.
pub trait Record {
    /// Column names this record receives, in declaration order.
    fn columns() -> &'static [&'static str];

    /// Returns the field declared for `column`, or `None` when no field is.
    fn field_mut(&mut self, column: &str) -> Option<&mut dyn ColumnValue>;
}

/// Set of column names a record declares, built once per mapping call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    columns: HashSet<&'static str>,
}

impl FieldMap {
    /// Builds the field map for `R`. Two fields claiming the same column is a shape error.
    pub fn for_record<R: Record>() -> Result<Self> {
        let mut columns = HashSet::new();
        for column in R::columns() {
            if !columns.insert(*column) {
                return Err(MapperError::shape(format!(
                    "column '{column}' is declared by more than one field"
                )));
            }
        }
        Ok(Self { columns })
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains(column)
    }
}

/// Copies the first row of `result` into `dest`.
///
/// With no rows the destination is left as it is. Columns without a declared
/// field are ignored. Every matched value is validated before any field is
/// written, so on error `dest` is unchanged.
pub fn map_first_row<R: Record>(dest: &mut R, result: &QueryResult) -> Result<()> {
    let field_map = FieldMap::for_record::<R>()?;
    apply_first_row(dest, &field_map, result)
}

/// Same as [`map_first_row`] with a field map the caller already built for `R`.
///
/// A row shorter than the column metadata maps the positions it has. A longer
/// row is a shape error.
pub fn apply_first_row<R: Record>(
    dest: &mut R,
    field_map: &FieldMap,
    result: &QueryResult,
) -> Result<()> {
    debug!("Field map: {:?}", field_map);

    let Some(row) = result.rows.first() else {
        debug!("Result has no rows, destination left unchanged");
        return Ok(());
    };

    if row.len() > result.columns.len() {
        return Err(MapperError::shape(format!(
            "row has {} values but the result describes {} columns",
            row.len(),
            result.columns.len()
        )));
    }

    let matched: Vec<_> = result
        .columns
        .iter()
        .zip(row)
        .filter(|(column, _)| field_map.contains(&column.name))
        .map(|(column, value)| (column.name.as_str(), value))
        .collect();

    for (column, value) in &matched {
        declared_field(dest, column)?.check(column, value)?;
    }

    for (column, value) in &matched {
        if declared_field(dest, column)?.assign(column, value)? {
            trace!("Set field for column '{}' to {}", column, value);
        }
    }

    Ok(())
}

fn declared_field<'a, R: Record>(
    dest: &'a mut R,
    column: &str,
) -> Result<&'a mut dyn ColumnValue> {
    dest.field_mut(column).ok_or_else(|| {
        MapperError::shape(format!(
            "column '{column}' is declared but the record has no field for it"
        ))
    })
}

/// Implements [`Record`] for a struct from a `"column" => field` table.
///
/// Each listed field must implement [`FromValue`].
#[macro_export]
macro_rules! record {
    ($ty:ty { $($column:literal => $field:ident),* $(,)? }) => {
        impl $crate::mapper::Record for $ty {
            fn columns() -> &'static [&'static str] {
                &[$($column),*]
            }

            fn field_mut(
                &mut self,
                column: &str,
            ) -> ::std::option::Option<&mut dyn $crate::mapper::ColumnValue> {
                match column {
                    $(
                        $column => ::std::option::Option::Some(
                            &mut self.$field as &mut dyn $crate::mapper::ColumnValue,
                        ),
                    )*
                    _ => ::std::option::Option::None,
                }
            }
        }
    };
}
