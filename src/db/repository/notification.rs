use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use super::uuid_column;
use crate::db::DatabaseError;
use crate::models::Notification;

pub fn insert_notification(conn: &Connection, note: &Notification) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO notifications (id, receiver_id, sender_id, sender_name, message, date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            note.id.to_string(),
            note.receiver_id.to_string(),
            note.sender_id.to_string(),
            note.sender_name,
            note.message,
            note.date,
        ],
    )?;
    Ok(())
}

/// The `limit` most recent notifications addressed to `receiver_id`, newest first.
pub fn get_recent_notifications(
    conn: &Connection,
    receiver_id: &Uuid,
    limit: u32,
) -> Result<Vec<Notification>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, receiver_id, sender_id, sender_name, message, date
         FROM notifications
         WHERE receiver_id = ?1
         ORDER BY date DESC, rowid DESC
         LIMIT ?2",
    )?;
    let rows = stmt.query_map(
        params![receiver_id.to_string(), limit],
        notification_from_row,
    )?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

fn notification_from_row(row: &Row<'_>) -> rusqlite::Result<Notification> {
    Ok(Notification {
        id: uuid_column(row, 0)?,
        receiver_id: uuid_column(row, 1)?,
        sender_id: uuid_column(row, 2)?,
        sender_name: row.get(3)?,
        message: row.get(4)?,
        date: row.get(5)?,
    })
}
