//! Shopping List Repository

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::db::DbConn;
use super::traits::Repository;
use crate::domain::{DomainError, DomainResult, ShoppingItem};

const SELECT_ITEM: &str =
    "SELECT id, name, quantity, unit, category, is_purchased, added_date, notes FROM shopping_items";

fn row_to_item(row: &Row<'_>) -> rusqlite::Result<ShoppingItem> {
    Ok(ShoppingItem {
        id: row.get(0)?,
        name: row.get(1)?,
        quantity: row.get(2)?,
        unit: row.get(3)?,
        category: row.get(4)?,
        is_purchased: row.get(5)?,
        added_date: row.get(6)?,
        notes: row.get(7)?,
    })
}

fn find_item(conn: &Connection, id: i64) -> rusqlite::Result<Option<ShoppingItem>> {
    conn.query_row(&format!("{SELECT_ITEM} WHERE id = ?"), params![id], row_to_item)
        .optional()
}

/// Insert a new unpurchased entry; shared with recipe planning
pub(crate) fn insert_item(conn: &Connection, item: &ShoppingItem) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO shopping_items (name, quantity, unit, category, is_purchased, added_date, notes)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        params![
            item.name.trim(),
            item.quantity,
            item.unit,
            item.category,
            item.is_purchased,
            item.added_date,
            item.notes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub struct ShoppingRepository {
    conn: DbConn,
}

impl ShoppingRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    /// Set the purchased flag of one entry
    pub async fn set_purchased(&self, id: i64, is_purchased: bool) -> DomainResult<ShoppingItem> {
        let conn = self.conn.lock().await;
        let changed = conn.execute(
            "UPDATE shopping_items SET is_purchased = ? WHERE id = ?",
            params![is_purchased, id],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("shopping item {id}")));
        }
        find_item(&conn, id)?.ok_or_else(|| DomainError::NotFound(format!("shopping item {id}")))
    }
}

#[async_trait]
impl Repository<ShoppingItem> for ShoppingRepository {
    async fn create(&self, entity: &ShoppingItem) -> DomainResult<ShoppingItem> {
        let conn = self.conn.lock().await;
        let id = insert_item(&conn, entity)?;
        find_item(&conn, id)?.ok_or_else(|| DomainError::Internal(format!("shopping item {id} vanished after insert")))
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<ShoppingItem>> {
        let conn = self.conn.lock().await;
        Ok(find_item(&conn, id)?)
    }

    /// Items still to buy come first, then newest first
    async fn list(&self) -> DomainResult<Vec<ShoppingItem>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!("{SELECT_ITEM} ORDER BY is_purchased, added_date DESC, id DESC"))?;
        let items = stmt.query_map([], row_to_item)?.collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    async fn update(&self, entity: &ShoppingItem) -> DomainResult<ShoppingItem> {
        let conn = self.conn.lock().await;
        let changed = conn.execute(
            "UPDATE shopping_items SET name = ?, quantity = ?, unit = ?, category = ?, is_purchased = ?, notes = ?
             WHERE id = ?",
            params![
                entity.name.trim(),
                entity.quantity,
                entity.unit,
                entity.category,
                entity.is_purchased,
                entity.notes,
                entity.id,
            ],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("shopping item {}", entity.id)));
        }
        find_item(&conn, entity.id)?.ok_or_else(|| DomainError::NotFound(format!("shopping item {}", entity.id)))
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn.execute("DELETE FROM shopping_items WHERE id = ?", params![id])?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("shopping item {id}")));
        }
        Ok(())
    }
}
