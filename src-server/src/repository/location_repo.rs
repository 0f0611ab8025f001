//! Storage Location Repository

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};

use super::db::DbConn;
use super::traits::Repository;
use crate::domain::{DomainError, DomainResult, StorageLocation};

const SELECT_LOCATION: &str = "SELECT l.id, l.name, l.icon, l.color, l.created_at,
        (SELECT COUNT(*) FROM products p WHERE p.storage_location_id = l.id AND p.quantity > 0)
    FROM storage_locations l";

pub struct LocationRepository {
    conn: DbConn,
}

impl LocationRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }
}

fn row_to_location(row: &Row<'_>) -> rusqlite::Result<StorageLocation> {
    Ok(StorageLocation {
        id: row.get(0)?,
        name: row.get(1)?,
        icon: row.get(2)?,
        color: row.get(3)?,
        created_at: row.get(4)?,
        items_count: row.get(5)?,
    })
}

#[async_trait]
impl Repository<StorageLocation> for LocationRepository {
    async fn create(&self, entity: &StorageLocation) -> DomainResult<StorageLocation> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO storage_locations (name, icon, color, created_at) VALUES (?, ?, ?, ?)",
            params![entity.name.trim(), entity.icon, entity.color, entity.created_at],
        )?;
        let id = conn.last_insert_rowid();
        let location = conn.query_row(&format!("{SELECT_LOCATION} WHERE l.id = ?"), params![id], row_to_location)?;
        Ok(location)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<StorageLocation>> {
        let conn = self.conn.lock().await;
        let location = conn
            .query_row(&format!("{SELECT_LOCATION} WHERE l.id = ?"), params![id], row_to_location)
            .optional()?;
        Ok(location)
    }

    async fn list(&self) -> DomainResult<Vec<StorageLocation>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!("{SELECT_LOCATION} ORDER BY l.created_at, l.id"))?;
        let locations = stmt
            .query_map([], row_to_location)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(locations)
    }

    async fn update(&self, entity: &StorageLocation) -> DomainResult<StorageLocation> {
        let conn = self.conn.lock().await;
        let changed = conn.execute(
            "UPDATE storage_locations SET name = ?, icon = ?, color = ? WHERE id = ?",
            params![entity.name.trim(), entity.icon, entity.color, entity.id],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("storage location {}", entity.id)));
        }
        let location = conn.query_row(&format!("{SELECT_LOCATION} WHERE l.id = ?"), params![entity.id], row_to_location)?;
        Ok(location)
    }

    /// Products of the location go with it
    async fn delete(&self, id: i64) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn.execute("DELETE FROM storage_locations WHERE id = ?", params![id])?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("storage location {id}")));
        }
        Ok(())
    }
}
