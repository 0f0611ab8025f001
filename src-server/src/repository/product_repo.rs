//! Product Repository
//!
//! On-hand products. A product whose quantity reaches zero stays in the
//! table but disappears from every listing.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::db::DbConn;
use crate::domain::{Consumption, DomainError, DomainResult, Product, ProductInput};

pub(crate) const SELECT_PRODUCT: &str = "SELECT id, name, quantity, unit, category, expiry_date,
        storage_location_id, added_date, notes, calories_per_100g
    FROM products";

pub(crate) fn row_to_product(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        quantity: row.get(2)?,
        unit: row.get(3)?,
        category: row.get(4)?,
        expiry_date: row.get(5)?,
        storage_location_id: row.get(6)?,
        added_date: row.get(7)?,
        notes: row.get(8)?,
        calories_per_100g: row.get(9)?,
    })
}

/// Every product with a positive quantity, oldest first
pub(crate) fn in_stock(conn: &Connection) -> rusqlite::Result<Vec<Product>> {
    let mut stmt = conn.prepare(&format!("{SELECT_PRODUCT} WHERE quantity > 0 ORDER BY id"))?;
    let products = stmt.query_map([], row_to_product)?.collect();
    products
}

pub(crate) fn find_product(conn: &Connection, id: i64) -> rusqlite::Result<Option<Product>> {
    conn.query_row(&format!("{SELECT_PRODUCT} WHERE id = ?"), params![id], row_to_product)
        .optional()
}

/// Lower the quantity by `amount`, never below zero
pub(crate) fn deduct(conn: &Connection, id: i64, amount: f64) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE products SET quantity = MAX(0, quantity - ?) WHERE id = ?",
        params![amount, id],
    )
}

fn location_exists(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    conn.query_row("SELECT EXISTS(SELECT 1 FROM storage_locations WHERE id = ?)", params![id], |row| row.get(0))
}

pub struct ProductRepository {
    conn: DbConn,
}

impl ProductRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    pub async fn create(&self, input: &ProductInput) -> DomainResult<Product> {
        let conn = self.conn.lock().await;
        if !location_exists(&conn, input.storage_location_id)? {
            return Err(DomainError::InvalidInput(format!(
                "storage location {} does not exist",
                input.storage_location_id
            )));
        }
        let now = chrono::Local::now().naive_local();
        conn.execute(
            "INSERT INTO products (name, quantity, unit, category, expiry_date, storage_location_id, added_date, notes, calories_per_100g)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                input.name.trim(),
                input.quantity,
                input.unit,
                input.category,
                input.expiry_date,
                input.storage_location_id,
                now,
                input.notes,
                input.calories_per_100g,
            ],
        )?;
        let id = conn.last_insert_rowid();
        find_product(&conn, id)?.ok_or_else(|| DomainError::Internal(format!("product {id} vanished after insert")))
    }

    pub async fn find_by_id(&self, id: i64) -> DomainResult<Option<Product>> {
        let conn = self.conn.lock().await;
        Ok(find_product(&conn, id)?)
    }

    pub async fn list_in_stock(&self) -> DomainResult<Vec<Product>> {
        let conn = self.conn.lock().await;
        Ok(in_stock(&conn)?)
    }

    /// Products of one location with a positive quantity, newest first
    pub async fn list_by_location(&self, location_id: i64) -> DomainResult<Vec<Product>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "{SELECT_PRODUCT} WHERE storage_location_id = ? AND quantity > 0 ORDER BY added_date DESC, id DESC"
        ))?;
        let products = stmt
            .query_map(params![location_id], row_to_product)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }

    pub async fn update(&self, id: i64, input: &ProductInput) -> DomainResult<Product> {
        let conn = self.conn.lock().await;
        if !location_exists(&conn, input.storage_location_id)? {
            return Err(DomainError::InvalidInput(format!(
                "storage location {} does not exist",
                input.storage_location_id
            )));
        }
        let changed = conn.execute(
            "UPDATE products SET name = ?, quantity = ?, unit = ?, category = ?, expiry_date = ?,
                storage_location_id = ?, notes = ?, calories_per_100g = ?
             WHERE id = ?",
            params![
                input.name.trim(),
                input.quantity,
                input.unit,
                input.category,
                input.expiry_date,
                input.storage_location_id,
                input.notes,
                input.calories_per_100g,
                id,
            ],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("product {id}")));
        }
        find_product(&conn, id)?.ok_or_else(|| DomainError::NotFound(format!("product {id}")))
    }

    /// Mark a product as used up
    pub async fn mark_used_up(&self, id: i64) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn.execute("UPDATE products SET quantity = 0 WHERE id = ?", params![id])?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("product {id}")));
        }
        Ok(())
    }

    /// Apply several decrements at once; unknown ids fail the whole batch
    pub async fn consume(&self, items: &[Consumption]) -> DomainResult<Vec<Product>> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        let mut updated = Vec::with_capacity(items.len());
        for item in items {
            if item.quantity < 0.0 {
                return Err(DomainError::InvalidInput("consumed quantity must not be negative".into()));
            }
            if deduct(&tx, item.product_id, item.quantity)? == 0 {
                return Err(DomainError::NotFound(format!("product {}", item.product_id)));
            }
            if let Some(product) = find_product(&tx, item.product_id)? {
                updated.push(product);
            }
        }
        tx.commit()?;
        Ok(updated)
    }
}
