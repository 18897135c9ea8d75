//! Repository layer: table-scoped database operations.
//!
//! One sub-module per table. All public functions are re-exported here.

mod appointment;
mod doctor;
mod document;
mod notification;
mod patient;
mod prescription;

use rusqlite::types::Type;
use rusqlite::Row;
use uuid::Uuid;

pub use appointment::*;
pub use doctor::*;
pub use document::*;
pub use notification::*;
pub use patient::*;
pub use prescription::*;

/// Read a TEXT column holding a UUID.
///
/// A malformed value surfaces as a conversion error instead of being
/// silently replaced, so corrupted rows are visible to the caller.
pub(crate) fn uuid_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(idx)?;
    Uuid::parse_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    #[test]
    fn uuid_column_rejects_garbage() {
        let conn = open_memory_database().unwrap();
        let result = conn.query_row("SELECT 'not-a-uuid'", [], |row| uuid_column(row, 0));
        assert!(matches!(
            result,
            Err(rusqlite::Error::FromSqlConversionFailure(0, Type::Text, _))
        ));
    }

    #[test]
    fn uuid_column_parses_hyphenated() {
        let conn = open_memory_database().unwrap();
        let id = Uuid::new_v4();
        let parsed = conn
            .query_row("SELECT ?1", [id.to_string()], |row| uuid_column(row, 0))
            .unwrap();
        assert_eq!(parsed, id);
    }
}
