use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::uuid_column;
use crate::db::DatabaseError;
use crate::models::Patient;

const PATIENT_COLUMNS: &str = "id, name, address, blood_type, date_of_birth, emergency_contact,
     gender, medical_number, phone, notes";

pub fn insert_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO patients (id, name, address, blood_type, date_of_birth, emergency_contact,
         gender, medical_number, phone, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            patient.id.to_string(),
            patient.name,
            patient.address,
            patient.blood_type,
            patient.date_of_birth,
            patient.emergency_contact,
            patient.gender,
            patient.medical_number,
            patient.phone,
            patient.notes,
        ],
    )?;
    Ok(())
}

/// Overwrite every mutable field of an existing patient.
///
/// Returns `NotFound` when no row carries the identifier; the update never
/// creates a patient.
pub fn update_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE patients SET name = ?1, address = ?2, blood_type = ?3, date_of_birth = ?4,
         emergency_contact = ?5, gender = ?6, medical_number = ?7, phone = ?8, notes = ?9
         WHERE id = ?10",
        params![
            patient.name,
            patient.address,
            patient.blood_type,
            patient.date_of_birth,
            patient.emergency_contact,
            patient.gender,
            patient.medical_number,
            patient.phone,
            patient.notes,
            patient.id.to_string(),
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::not_found("Patient", patient.id));
    }
    Ok(())
}

pub fn get_patient(conn: &Connection, id: &Uuid) -> Result<Option<Patient>, DatabaseError> {
    let sql = format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?1");
    conn.query_row(&sql, params![id.to_string()], patient_from_row)
        .optional()
        .map_err(DatabaseError::from)
}

/// Name-only lookup used when resolving appointment views.
pub fn get_patient_name(conn: &Connection, id: &Uuid) -> Result<Option<String>, DatabaseError> {
    conn.query_row(
        "SELECT name FROM patients WHERE id = ?1",
        params![id.to_string()],
        |row| row.get(0),
    )
    .optional()
    .map_err(DatabaseError::from)
}

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: uuid_column(row, 0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        blood_type: row.get(3)?,
        date_of_birth: row.get(4)?,
        emergency_contact: row.get(5)?,
        gender: row.get(6)?,
        medical_number: row.get(7)?,
        phone: row.get(8)?,
        notes: row.get(9)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    fn make_patient(name: &str) -> Patient {
        Patient {
            id: Uuid::new_v4(),
            name: name.into(),
            address: Some("12 Harbour Road".into()),
            blood_type: Some("O+".into()),
            date_of_birth: 631152000,
            emergency_contact: None,
            gender: "female".into(),
            medical_number: Some("MRN-0042".into()),
            phone: Some("555-0100".into()),
            notes: None,
        }
    }

    #[test]
    fn patient_insert_and_retrieve() {
        let conn = open_memory_database().unwrap();
        let patient = make_patient("Ada Lovelace");
        insert_patient(&conn, &patient).unwrap();

        let loaded = get_patient(&conn, &patient.id).unwrap().unwrap();
        assert_eq!(loaded, patient);
        assert_eq!(
            get_patient_name(&conn, &patient.id).unwrap().as_deref(),
            Some("Ada Lovelace")
        );
    }

    #[test]
    fn missing_patient_is_none() {
        let conn = open_memory_database().unwrap();
        assert!(get_patient(&conn, &Uuid::new_v4()).unwrap().is_none());
        assert!(get_patient_name(&conn, &Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn update_overwrites_fields_in_place() {
        let conn = open_memory_database().unwrap();
        let mut patient = make_patient("Ada Lovelace");
        insert_patient(&conn, &patient).unwrap();

        patient.name = "Ada King".into();
        patient.blood_type = None;
        update_patient(&conn, &patient).unwrap();

        let loaded = get_patient(&conn, &patient.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Ada King");
        assert_eq!(loaded.blood_type, None);
    }

    #[test]
    fn update_missing_patient_is_not_found() {
        let conn = open_memory_database().unwrap();
        let result = update_patient(&conn, &make_patient("Nobody"));
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
        assert!(get_patient(&conn, &Uuid::new_v4()).unwrap().is_none());
    }
}
