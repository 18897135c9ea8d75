use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::uuid_column;
use crate::db::DatabaseError;
use crate::models::Doctor;

pub fn insert_doctor(conn: &Connection, doctor: &Doctor) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO doctors (id, name, phone, primary_facility, primary_specialty, gender)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            doctor.id.to_string(),
            doctor.name,
            doctor.phone,
            doctor.primary_facility,
            doctor.primary_specialty,
            doctor.gender,
        ],
    )?;
    Ok(())
}

pub fn get_doctor(conn: &Connection, id: &Uuid) -> Result<Option<Doctor>, DatabaseError> {
    conn.query_row(
        "SELECT id, name, phone, primary_facility, primary_specialty, gender
         FROM doctors WHERE id = ?1",
        params![id.to_string()],
        doctor_from_row,
    )
    .optional()
    .map_err(DatabaseError::from)
}

/// All doctors, alphabetical.
pub fn get_all_doctors(conn: &Connection) -> Result<Vec<Doctor>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, phone, primary_facility, primary_specialty, gender
         FROM doctors ORDER BY name ASC",
    )?;
    let rows = stmt.query_map([], doctor_from_row)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

fn doctor_from_row(row: &Row<'_>) -> rusqlite::Result<Doctor> {
    Ok(Doctor {
        id: uuid_column(row, 0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        primary_facility: row.get(3)?,
        primary_specialty: row.get(4)?,
        gender: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    fn make_doctor(name: &str) -> Doctor {
        Doctor {
            id: Uuid::new_v4(),
            name: name.into(),
            phone: "555-0199".into(),
            primary_facility: Some("City Clinic".into()),
            primary_specialty: None,
            gender: "male".into(),
        }
    }

    #[test]
    fn doctor_insert_and_retrieve() {
        let conn = open_memory_database().unwrap();
        let doctor = make_doctor("Dr. Chen");
        insert_doctor(&conn, &doctor).unwrap();
        assert_eq!(get_doctor(&conn, &doctor.id).unwrap(), Some(doctor));
    }

    #[test]
    fn doctors_listed_by_name() {
        let conn = open_memory_database().unwrap();
        insert_doctor(&conn, &make_doctor("Dr. Moreau")).unwrap();
        insert_doctor(&conn, &make_doctor("Dr. Chen")).unwrap();

        let names: Vec<String> = get_all_doctors(&conn)
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["Dr. Chen", "Dr. Moreau"]);
    }

    #[test]
    fn duplicate_doctor_id_rejected() {
        let conn = open_memory_database().unwrap();
        let doctor = make_doctor("Dr. Chen");
        insert_doctor(&conn, &doctor).unwrap();
        assert!(insert_doctor(&conn, &doctor).is_err());
    }
}
