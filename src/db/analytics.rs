// src/db/analytics.rs
use chrono::Utc;
use rusqlite::params;

use crate::db::connection::Database;
use crate::domain::analytics::{EventCount, EventType, NewAnalyticsEvent};
use crate::errors::ServerError;

pub fn insert_event(db: &Database, ev: &NewAnalyticsEvent) -> Result<i64, ServerError> {
    let now = Utc::now().naive_utc();

    db.with_conn(|conn| {
        conn.execute(
            r#"
            INSERT INTO analytics_events (tenant, event_type, business_id, path, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                ev.tenant.trim(),
                ev.event_type.as_str(),
                ev.business_id,
                ev.path,
                now
            ],
        )?;
        Ok(conn.last_insert_rowid())
    })
}

/// Event counts per type for one tenant, most frequent first.
pub fn count_by_type(db: &Database, tenant: &str) -> Result<Vec<EventCount>, ServerError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            r#"
            SELECT event_type, COUNT(*) AS n
            FROM analytics_events
            WHERE tenant = ?1
            GROUP BY event_type
            ORDER BY n DESC, event_type
            "#,
        )?;
        let rows = stmt.query_map(params![tenant], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut out = Vec::new();
        for r in rows {
            let (event_type, count) = r?;
            out.push(EventCount {
                event_type: event_type.parse::<EventType>()?,
                count,
            });
        }
        Ok(out)
    })
}
