// src/db/businesses.rs
use chrono::Utc;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

use crate::db::connection::Database;
use crate::domain::listing::{Business, ListingKind, NewBusiness};
use crate::errors::ServerError;

impl ToSql for ListingKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ListingKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: ServerError| FromSqlError::Other(Box::new(e)))
    }
}

const SELECT_BUSINESS: &str = r#"
    SELECT id, tenant, kind, name, slug, area, description,
           featured_order, is_omd_member, created_at
    FROM businesses
"#;

fn business_from_row(row: &Row<'_>) -> rusqlite::Result<Business> {
    Ok(Business {
        id: row.get(0)?,
        tenant: row.get(1)?,
        kind: row.get(2)?,
        name: row.get(3)?,
        slug: row.get(4)?,
        area: row.get(5)?,
        description: row.get(6)?,
        featured_order: row.get(7)?,
        is_omd_member: row.get(8)?,
        created_at: row.get(9)?,
    })
}

/// Insert a business and return its id. Duplicate slugs within a tenant are rejected.
pub fn insert_business(db: &Database, new: &NewBusiness) -> Result<i64, ServerError> {
    let now = Utc::now().naive_utc();
    let slug = new.slug.clone().unwrap_or_default();

    db.with_conn(|conn| {
        let inserted = conn.execute(
            r#"
            INSERT INTO businesses (
                tenant, kind, name, slug, area, description,
                featured_order, is_omd_member, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                new.tenant,
                new.kind,
                new.name,
                slug,
                new.area,
                new.description,
                new.featured_order,
                new.is_omd_member,
                now,
            ],
        );

        match inserted {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                return Err(ServerError::BadRequest(format!(
                    "slug '{slug}' already exists for tenant '{}'",
                    new.tenant
                )));
            }
            Err(e) => return Err(e.into()),
        }
        Ok(conn.last_insert_rowid())
    })
}

/// All businesses of a tenant, optionally restricted to one kind.
/// Returned in name order; display order is decided by the ranking layer.
pub fn list_businesses(
    db: &Database,
    tenant: &str,
    kind: Option<ListingKind>,
) -> Result<Vec<Business>, ServerError> {
    db.with_conn(|conn| {
        let sql = format!(
            "{SELECT_BUSINESS} WHERE tenant = ?1 AND (?2 IS NULL OR kind = ?2) ORDER BY name, id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![tenant, kind], business_from_row)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    })
}

pub fn business_exists(conn: &Connection, id: i64) -> Result<bool, ServerError> {
    let found: Option<i64> = conn
        .query_row("SELECT 1 FROM businesses WHERE id = ?1", [id], |row| row.get(0))
        .optional()?;
    Ok(found.is_some())
}
