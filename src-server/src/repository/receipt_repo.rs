//! Receipt Repository
//!
//! Processing a scanned receipt fans out into the catalog, the shopping
//! list and the budget ledger within a single transaction.

use std::collections::HashMap;

use rusqlite::{params, Connection, Row};

use super::budget_repo::insert_transaction;
use super::catalog_repo::{all_entries, insert_entry, normalize_name};
use super::db::DbConn;
use crate::domain::{
    CatalogEntry, DomainResult, ProcessedReceipt, Receipt, ReceiptInput, TransactionInput, TransactionKind,
    DEFAULT_UNIT, GROCERIES_CATEGORY, RECEIPT_PENDING, RECEIPT_PROCESSED,
};

const SELECT_RECEIPT: &str = "SELECT id, qr_code, total_amount, scan_date, status FROM receipts";

fn row_to_receipt(row: &Row<'_>) -> rusqlite::Result<Receipt> {
    Ok(Receipt {
        id: row.get(0)?,
        qr_code: row.get(1)?,
        total_amount: row.get(2)?,
        scan_date: row.get(3)?,
        status: row.get(4)?,
    })
}

/// Expense category ids keyed by normalized name
fn expense_categories(conn: &Connection) -> rusqlite::Result<HashMap<String, i64>> {
    let mut stmt = conn.prepare("SELECT id, name FROM budget_categories WHERE type = ?")?;
    let rows = stmt.query_map(params![TransactionKind::Expense], |row| {
        Ok((normalize_name(&row.get::<_, String>(1)?), row.get::<_, i64>(0)?))
    })?;
    rows.collect()
}

/// Unpurchased shopping entries as (id, normalized name), oldest first
fn open_shopping_items(conn: &Connection) -> rusqlite::Result<Vec<(i64, String)>> {
    let mut stmt = conn.prepare("SELECT id, name FROM shopping_items WHERE is_purchased = 0 ORDER BY id")?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, normalize_name(&row.get::<_, String>(1)?))))?;
    rows.collect()
}

pub struct ReceiptRepository {
    conn: DbConn,
}

impl ReceiptRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    /// Newest first
    pub async fn list(&self) -> DomainResult<Vec<Receipt>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!("{SELECT_RECEIPT} ORDER BY scan_date DESC, id DESC"))?;
        let receipts = stmt.query_map([], row_to_receipt)?.collect::<Result<Vec<_>, _>>()?;
        Ok(receipts)
    }

    /// Record a receipt and its lines, then:
    /// - add unknown product names to the catalog,
    /// - tick off matching shopping entries,
    /// - book the total as one groceries expense.
    pub async fn process(&self, input: &ReceiptInput) -> DomainResult<ProcessedReceipt> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        let now = chrono::Local::now().naive_local();

        tx.execute(
            "INSERT INTO receipts (qr_code, total_amount, scan_date, status) VALUES (?, ?, ?, ?)",
            params![input.qr_code.trim(), input.total_amount, now, RECEIPT_PENDING],
        )?;
        let receipt_id = tx.last_insert_rowid();

        let categories = expense_categories(&tx)?;
        let default_category = categories.get(&normalize_name(GROCERIES_CATEGORY)).copied();
        let mut catalog: Vec<(i64, String)> = all_entries(&tx)?
            .into_iter()
            .map(|entry| (entry.id, normalize_name(&entry.name)))
            .collect();
        let mut open_items = open_shopping_items(&tx)?;

        let mut total_amount = 0.0;
        for item in &input.items {
            let line_total = item.line_total();
            total_amount += line_total;

            let category_name = item.category_name();
            let category_id = categories.get(&normalize_name(category_name)).copied().or(default_category);

            let key = normalize_name(&item.name);
            let existing = catalog.iter().find(|(_, name)| *name == key).map(|(id, _)| *id);
            let catalog_id = match existing {
                Some(id) => id,
                None => {
                    let entry = CatalogEntry {
                        id: 0,
                        name: item.name.trim().to_string(),
                        category: Some(category_name.to_string()),
                        calories_per_100g: None,
                        default_unit: DEFAULT_UNIT.to_string(),
                    };
                    let id = insert_entry(&tx, &entry)?;
                    catalog.push((id, key.clone()));
                    id
                }
            };

            tx.execute(
                "INSERT INTO receipt_items (receipt_id, name, quantity, price, total, budget_category_name, category_id, catalog_id)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    receipt_id,
                    item.name.trim(),
                    item.quantity,
                    item.price,
                    line_total,
                    category_name,
                    category_id,
                    catalog_id,
                ],
            )?;

            if let Some(pos) = open_items.iter().position(|(_, name)| *name == key) {
                let (shopping_id, _) = open_items.remove(pos);
                tx.execute("UPDATE shopping_items SET is_purchased = 1 WHERE id = ?", params![shopping_id])?;
            }
        }

        tx.execute(
            "UPDATE receipts SET total_amount = ?, status = ? WHERE id = ?",
            params![total_amount, RECEIPT_PROCESSED, receipt_id],
        )?;

        let expense = TransactionInput {
            kind: TransactionKind::Expense,
            amount: total_amount,
            category_id: default_category,
            description: Some(format!("Чек от {}", now.format("%d.%m.%Y"))),
            date: Some(now.date()),
        };
        insert_transaction(&tx, &expense, Some(receipt_id))?;

        let receipt = tx.query_row(&format!("{SELECT_RECEIPT} WHERE id = ?"), params![receipt_id], row_to_receipt)?;
        tx.commit()?;

        Ok(ProcessedReceipt {
            receipt,
            total_amount,
            items_count: input.items.len(),
        })
    }
}
