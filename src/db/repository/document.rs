use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::uuid_column;
use crate::db::DatabaseError;
use crate::models::{Document, DocumentContent};

pub fn insert_document(
    conn: &Connection,
    doc: &Document,
    content: &[u8],
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO documents (id, patient_id, filename, date_uploaded, content)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            doc.id.to_string(),
            doc.patient_id.to_string(),
            doc.filename,
            doc.date_uploaded,
            content,
        ],
    )?;
    Ok(())
}

pub fn get_document_content(
    conn: &Connection,
    id: &Uuid,
) -> Result<Option<DocumentContent>, DatabaseError> {
    conn.query_row(
        "SELECT filename, content FROM documents WHERE id = ?1",
        params![id.to_string()],
        |row| {
            Ok(DocumentContent {
                filename: row.get(0)?,
                bytes: row.get(1)?,
            })
        },
    )
    .optional()
    .map_err(DatabaseError::from)
}

/// Metadata for every document of a patient, newest upload first. Content is not loaded.
pub fn get_documents_by_patient(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<Document>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, filename, date_uploaded
         FROM documents
         WHERE patient_id = ?1
         ORDER BY date_uploaded DESC",
    )?;
    let rows = stmt.query_map(params![patient_id.to_string()], |row| {
        Ok(Document {
            id: uuid_column(row, 0)?,
            patient_id: uuid_column(row, 1)?,
            filename: row.get(2)?,
            date_uploaded: row.get(3)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    fn doc(patient: Uuid, name: &str, uploaded: i64) -> Document {
        Document {
            id: Uuid::new_v4(),
            patient_id: patient,
            filename: name.into(),
            date_uploaded: uploaded,
        }
    }

    #[test]
    fn content_round_trips_bytes() {
        let conn = open_memory_database().unwrap();
        let d = doc(Uuid::new_v4(), "scan.pdf", 10);
        let bytes = vec![0x25, 0x50, 0x44, 0x46, 0x00, 0xff];
        insert_document(&conn, &d, &bytes).unwrap();

        let loaded = get_document_content(&conn, &d.id).unwrap().unwrap();
        assert_eq!(loaded.filename, "scan.pdf");
        assert_eq!(loaded.bytes, bytes);
    }

    #[test]
    fn missing_document_is_none() {
        let conn = open_memory_database().unwrap();
        assert!(get_document_content(&conn, &Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn listing_is_metadata_newest_first() {
        let conn = open_memory_database().unwrap();
        let patient = Uuid::new_v4();
        insert_document(&conn, &doc(patient, "old.png", 1), b"a").unwrap();
        insert_document(&conn, &doc(patient, "new.png", 2), b"b").unwrap();
        insert_document(&conn, &doc(Uuid::new_v4(), "other.png", 3), b"c").unwrap();

        let names: Vec<String> = get_documents_by_patient(&conn, &patient)
            .unwrap()
            .into_iter()
            .map(|d| d.filename)
            .collect();
        assert_eq!(names, vec!["new.png", "old.png"]);
    }
}
