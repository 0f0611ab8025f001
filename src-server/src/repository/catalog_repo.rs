//! Product Catalog Repository
//!
//! Name comparisons happen in Rust: SQLite's LOWER() only folds ASCII,
//! and catalog names are mostly Cyrillic.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::db::DbConn;
use super::traits::{Repository, SearchableRepository};
use crate::domain::{CatalogEntry, DomainError, DomainResult};

const SELECT_ENTRY: &str = "SELECT id, name, category, calories_per_100g, default_unit FROM product_catalog";

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<CatalogEntry> {
    Ok(CatalogEntry {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        calories_per_100g: row.get(3)?,
        default_unit: row.get(4)?,
    })
}

/// Case- and whitespace-insensitive form of a product name
pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

pub(crate) fn all_entries(conn: &Connection) -> rusqlite::Result<Vec<CatalogEntry>> {
    let mut stmt = conn.prepare(&format!("{SELECT_ENTRY} ORDER BY name, id"))?;
    let entries = stmt.query_map([], row_to_entry)?.collect();
    entries
}

pub(crate) fn insert_entry(conn: &Connection, entry: &CatalogEntry) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO product_catalog (name, category, calories_per_100g, default_unit) VALUES (?, ?, ?, ?)",
        params![entry.name.trim(), entry.category, entry.calories_per_100g, entry.default_unit],
    )?;
    Ok(conn.last_insert_rowid())
}

fn find_entry(conn: &Connection, id: i64) -> rusqlite::Result<Option<CatalogEntry>> {
    conn.query_row(&format!("{SELECT_ENTRY} WHERE id = ?"), params![id], row_to_entry)
        .optional()
}

/// Entry whose normalized name equals `name`'s, other than `except`
fn find_duplicate(conn: &Connection, name: &str, except: Option<i64>) -> rusqlite::Result<Option<CatalogEntry>> {
    let wanted = normalize_name(name);
    Ok(all_entries(conn)?
        .into_iter()
        .find(|entry| Some(entry.id) != except && normalize_name(&entry.name) == wanted))
}

pub struct CatalogRepository {
    conn: DbConn,
}

impl CatalogRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<CatalogEntry> for CatalogRepository {
    async fn create(&self, entity: &CatalogEntry) -> DomainResult<CatalogEntry> {
        let conn = self.conn.lock().await;
        if find_duplicate(&conn, &entity.name, None)?.is_some() {
            return Err(DomainError::Conflict(format!("catalog already has '{}'", entity.name.trim())));
        }
        let id = insert_entry(&conn, entity)?;
        find_entry(&conn, id)?.ok_or_else(|| DomainError::Internal(format!("catalog entry {id} vanished after insert")))
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<CatalogEntry>> {
        let conn = self.conn.lock().await;
        Ok(find_entry(&conn, id)?)
    }

    async fn list(&self) -> DomainResult<Vec<CatalogEntry>> {
        let conn = self.conn.lock().await;
        Ok(all_entries(&conn)?)
    }

    async fn update(&self, entity: &CatalogEntry) -> DomainResult<CatalogEntry> {
        let conn = self.conn.lock().await;
        if find_duplicate(&conn, &entity.name, Some(entity.id))?.is_some() {
            return Err(DomainError::Conflict(format!("catalog already has '{}'", entity.name.trim())));
        }
        let changed = conn.execute(
            "UPDATE product_catalog SET name = ?, category = ?, calories_per_100g = ?, default_unit = ? WHERE id = ?",
            params![entity.name.trim(), entity.category, entity.calories_per_100g, entity.default_unit, entity.id],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("catalog entry {}", entity.id)));
        }
        find_entry(&conn, entity.id)?.ok_or_else(|| DomainError::NotFound(format!("catalog entry {}", entity.id)))
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn.execute("DELETE FROM product_catalog WHERE id = ?", params![id])?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("catalog entry {id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl SearchableRepository<CatalogEntry> for CatalogRepository {
    /// Case-insensitive substring match over name and category
    async fn search(&self, query: &str) -> DomainResult<Vec<CatalogEntry>> {
        let needle = query.trim().to_lowercase();
        let entries = self.list().await?;
        if needle.is_empty() {
            return Ok(entries);
        }
        Ok(entries
            .into_iter()
            .filter(|entry| {
                entry.name.to_lowercase().contains(&needle)
                    || entry
                        .category
                        .as_deref()
                        .is_some_and(|category| category.to_lowercase().contains(&needle))
            })
            .collect())
    }
}
