use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::uuid_column;
use crate::db::DatabaseError;
use crate::models::{CompletedAppointment, PartitionKey, ScheduledAppointment};

/// How a completed visit landed in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// A scheduled appointment with the same id existed and was replaced.
    Transitioned,
    /// No scheduled row existed; the completed row was created or overwritten.
    Upserted,
}

pub fn insert_scheduled_appointment(
    conn: &Connection,
    appt: &ScheduledAppointment,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO scheduled_appointments (id, patient_id, doctor_id, date_scheduled, notes)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            appt.id.to_string(),
            appt.patient_id.to_string(),
            appt.doctor_id.to_string(),
            appt.date_scheduled,
            appt.notes,
        ],
    )?;
    Ok(())
}

pub fn get_scheduled_appointment(
    conn: &Connection,
    id: &Uuid,
) -> Result<Option<ScheduledAppointment>, DatabaseError> {
    conn.query_row(
        "SELECT id, patient_id, doctor_id, date_scheduled, notes
         FROM scheduled_appointments WHERE id = ?1",
        params![id.to_string()],
        scheduled_from_row,
    )
    .optional()
    .map_err(DatabaseError::from)
}

/// Conditional delete: `NotFound` when nothing was scheduled under `id`.
pub fn delete_scheduled_appointment(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "DELETE FROM scheduled_appointments WHERE id = ?1",
        params![id.to_string()],
    )?;
    if changed == 0 {
        return Err(DatabaseError::not_found("ScheduledAppointment", id));
    }
    Ok(())
}

/// Record a visit: drop the scheduled row (if any) and upsert the completed
/// row under the same identifier, in one transaction.
pub fn complete_appointment(
    conn: &Connection,
    visit: &CompletedAppointment,
) -> Result<CompletionOutcome, DatabaseError> {
    let tx = conn.unchecked_transaction()?;

    let removed = tx.execute(
        "DELETE FROM scheduled_appointments WHERE id = ?1",
        params![visit.id.to_string()],
    )?;

    tx.execute(
        "INSERT INTO completed_appointments (id, patient_id, doctor_id, date_visited,
         breathing_rate, heart_rate, blood_oxygen_level, blood_pressure, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
         ON CONFLICT(id) DO UPDATE SET
            patient_id = excluded.patient_id,
            doctor_id = excluded.doctor_id,
            date_visited = excluded.date_visited,
            breathing_rate = excluded.breathing_rate,
            heart_rate = excluded.heart_rate,
            blood_oxygen_level = excluded.blood_oxygen_level,
            blood_pressure = excluded.blood_pressure,
            notes = excluded.notes",
        params![
            visit.id.to_string(),
            visit.patient_id.to_string(),
            visit.doctor_id.to_string(),
            visit.date_visited,
            visit.breathing_rate,
            visit.heart_rate,
            visit.blood_oxygen_level,
            visit.blood_pressure,
            visit.notes,
        ],
    )?;

    tx.commit()?;

    Ok(if removed > 0 {
        CompletionOutcome::Transitioned
    } else {
        CompletionOutcome::Upserted
    })
}

pub fn get_completed_appointment(
    conn: &Connection,
    id: &Uuid,
) -> Result<Option<CompletedAppointment>, DatabaseError> {
    conn.query_row(
        "SELECT id, patient_id, doctor_id, date_visited, breathing_rate, heart_rate,
         blood_oxygen_level, blood_pressure, notes
         FROM completed_appointments WHERE id = ?1",
        params![id.to_string()],
        completed_from_row,
    )
    .optional()
    .map_err(DatabaseError::from)
}

/// Range scan over scheduled appointments sharing a partition key, in
/// insertion order. Rows are handed to `visit` one at a time; an error
/// from either the store or the visitor stops the scan.
pub fn for_each_scheduled_appointment(
    conn: &Connection,
    key: &PartitionKey,
    visit: &mut dyn FnMut(ScheduledAppointment) -> Result<(), DatabaseError>,
) -> Result<(), DatabaseError> {
    let sql = format!(
        "SELECT id, patient_id, doctor_id, date_scheduled, notes
         FROM scheduled_appointments WHERE {} = ?1 ORDER BY rowid",
        key.column()
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![key.id().to_string()])?;
    while let Some(row) = rows.next()? {
        visit(scheduled_from_row(row)?)?;
    }
    Ok(())
}

/// Completed-appointment counterpart of [`for_each_scheduled_appointment`].
pub fn for_each_completed_appointment(
    conn: &Connection,
    key: &PartitionKey,
    visit: &mut dyn FnMut(CompletedAppointment) -> Result<(), DatabaseError>,
) -> Result<(), DatabaseError> {
    let sql = format!(
        "SELECT id, patient_id, doctor_id, date_visited, breathing_rate, heart_rate,
         blood_oxygen_level, blood_pressure, notes
         FROM completed_appointments WHERE {} = ?1 ORDER BY rowid",
        key.column()
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![key.id().to_string()])?;
    while let Some(row) = rows.next()? {
        visit(completed_from_row(row)?)?;
    }
    Ok(())
}

fn scheduled_from_row(row: &Row<'_>) -> rusqlite::Result<ScheduledAppointment> {
    Ok(ScheduledAppointment {
        id: uuid_column(row, 0)?,
        patient_id: uuid_column(row, 1)?,
        doctor_id: uuid_column(row, 2)?,
        date_scheduled: row.get(3)?,
        notes: row.get(4)?,
    })
}

fn completed_from_row(row: &Row<'_>) -> rusqlite::Result<CompletedAppointment> {
    Ok(CompletedAppointment {
        id: uuid_column(row, 0)?,
        patient_id: uuid_column(row, 1)?,
        doctor_id: uuid_column(row, 2)?,
        date_visited: row.get(3)?,
        breathing_rate: row.get(4)?,
        heart_rate: row.get(5)?,
        blood_oxygen_level: row.get(6)?,
        blood_pressure: row.get(7)?,
        notes: row.get(8)?,
    })
}
