// src/db/rooms.rs
use chrono::Utc;
use rusqlite::{params, Row};

use crate::db::businesses::business_exists;
use crate::db::connection::Database;
use crate::domain::listing::{BusinessSummary, NewRoom, Room};
use crate::errors::ServerError;

fn room_from_row(row: &Row<'_>) -> rusqlite::Result<Room> {
    Ok(Room {
        id: row.get(0)?,
        name: row.get(1)?,
        capacity: row.get(2)?,
        price_per_night: row.get(3)?,
        created_at: row.get(4)?,
        businesses: BusinessSummary {
            id: row.get(5)?,
            name: row.get(6)?,
            slug: row.get(7)?,
            featured_order: row.get(8)?,
            is_omd_member: row.get(9)?,
        },
    })
}

/// Insert a room under an existing business. Unknown business -> NotFound.
pub fn insert_room(db: &Database, new: &NewRoom) -> Result<i64, ServerError> {
    let now = Utc::now().naive_utc();

    db.with_conn(|conn| {
        if !business_exists(conn, new.business_id)? {
            return Err(ServerError::NotFound);
        }

        conn.execute(
            r#"
            INSERT INTO rooms (business_id, name, capacity, price_per_night, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                new.business_id,
                new.name.trim(),
                new.capacity,
                new.price_per_night,
                now
            ],
        )?;
        Ok(conn.last_insert_rowid())
    })
}

/// Every room of a tenant's businesses, with the owning business embedded.
pub fn list_rooms(db: &Database, tenant: &str) -> Result<Vec<Room>, ServerError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            r#"
            SELECT r.id, r.name, r.capacity, r.price_per_night, r.created_at,
                   b.id, b.name, b.slug, b.featured_order, b.is_omd_member
            FROM rooms r
            JOIN businesses b ON b.id = r.business_id
            WHERE b.tenant = ?1
            ORDER BY b.name, r.name, r.id
            "#,
        )?;
        let rows = stmt.query_map(params![tenant], room_from_row)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    })
}
