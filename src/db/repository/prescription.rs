use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use super::uuid_column;
use crate::db::DatabaseError;
use crate::models::Prescription;

/// Insert a batch of prescriptions atomically: either all land or none do.
pub fn insert_prescriptions(
    conn: &Connection,
    prescriptions: &[Prescription],
) -> Result<(), DatabaseError> {
    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO prescriptions (id, patient_id, doctor_id, doctor_name, drug,
             start_date, end_date, instructions)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        for rx in prescriptions {
            stmt.execute(params![
                rx.id.to_string(),
                rx.patient_id.to_string(),
                rx.doctor_id.to_string(),
                rx.doctor_name,
                rx.drug,
                rx.start_date,
                rx.end_date,
                rx.instructions,
            ])?;
        }
    }
    tx.commit()?;
    Ok(())
}

/// A patient's prescriptions, most recently ending first.
///
/// Ties on end date fall back to start date (latest first), then id, so the
/// order is total. A patient with no prescriptions yields an empty list.
pub fn get_prescriptions_by_patient(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<Prescription>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, doctor_id, doctor_name, drug, start_date, end_date, instructions
         FROM prescriptions
         WHERE patient_id = ?1
         ORDER BY end_date DESC, start_date DESC, id ASC",
    )?;
    let rows = stmt.query_map(params![patient_id.to_string()], prescription_from_row)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

fn prescription_from_row(row: &Row<'_>) -> rusqlite::Result<Prescription> {
    Ok(Prescription {
        id: uuid_column(row, 0)?,
        patient_id: uuid_column(row, 1)?,
        doctor_id: uuid_column(row, 2)?,
        doctor_name: row.get(3)?,
        drug: row.get(4)?,
        start_date: row.get(5)?,
        end_date: row.get(6)?,
        instructions: row.get(7)?,
    })
}
