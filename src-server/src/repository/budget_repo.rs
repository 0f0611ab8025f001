//! Budget Repositories
//!
//! Categories, the transaction ledger and the settings row.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::db::DbConn;
use super::traits::Repository;
use crate::domain::{
    BudgetCategory, CategoryTotal, DomainError, DomainResult, Settings, Summary, Transaction,
    TransactionInput, TransactionsPage,
};

// ========================
// Categories
// ========================

const SELECT_CATEGORY: &str = "SELECT id, name, type, icon, color FROM budget_categories";

fn row_to_category(row: &Row<'_>) -> rusqlite::Result<BudgetCategory> {
    Ok(BudgetCategory {
        id: row.get(0)?,
        name: row.get(1)?,
        kind: row.get(2)?,
        icon: row.get(3)?,
        color: row.get(4)?,
    })
}

fn find_category(conn: &Connection, id: i64) -> rusqlite::Result<Option<BudgetCategory>> {
    conn.query_row(&format!("{SELECT_CATEGORY} WHERE id = ?"), params![id], row_to_category)
        .optional()
}

pub struct CategoryRepository {
    conn: DbConn,
}

impl CategoryRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<BudgetCategory> for CategoryRepository {
    async fn create(&self, entity: &BudgetCategory) -> DomainResult<BudgetCategory> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO budget_categories (name, type, icon, color) VALUES (?, ?, ?, ?)",
            params![entity.name, entity.kind, entity.icon, entity.color],
        )?;
        let id = conn.last_insert_rowid();
        find_category(&conn, id)?.ok_or_else(|| DomainError::Internal(format!("category {id} vanished after insert")))
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<BudgetCategory>> {
        let conn = self.conn.lock().await;
        Ok(find_category(&conn, id)?)
    }

    async fn list(&self) -> DomainResult<Vec<BudgetCategory>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!("{SELECT_CATEGORY} ORDER BY type, name"))?;
        let categories = stmt.query_map([], row_to_category)?.collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    async fn update(&self, entity: &BudgetCategory) -> DomainResult<BudgetCategory> {
        let conn = self.conn.lock().await;
        let changed = conn.execute(
            "UPDATE budget_categories SET name = ?, type = ?, icon = ?, color = ? WHERE id = ?",
            params![entity.name, entity.kind, entity.icon, entity.color, entity.id],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("category {}", entity.id)));
        }
        find_category(&conn, entity.id)?.ok_or_else(|| DomainError::NotFound(format!("category {}", entity.id)))
    }

    /// Transactions of the category are kept without a category
    async fn delete(&self, id: i64) -> DomainResult<()> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        tx.execute("UPDATE transactions SET category_id = NULL WHERE category_id = ?", params![id])?;
        let changed = tx.execute("DELETE FROM budget_categories WHERE id = ?", params![id])?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("category {id}")));
        }
        tx.commit()?;
        Ok(())
    }
}

// ========================
// Transactions
// ========================

const SELECT_TRANSACTION: &str = "SELECT t.id, t.type, t.amount, t.category_id, bc.name, bc.icon, bc.color,
        t.description, t.date, t.receipt_id, t.created_at
    FROM transactions t
    LEFT JOIN budget_categories bc ON t.category_id = bc.id";

fn row_to_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: row.get(0)?,
        kind: row.get(1)?,
        amount: row.get(2)?,
        category_id: row.get(3)?,
        category_name: row.get(4)?,
        icon: row.get(5)?,
        color: row.get(6)?,
        description: row.get(7)?,
        date: row.get(8)?,
        receipt_id: row.get(9)?,
        created_at: row.get(10)?,
    })
}

/// Insert a ledger entry; shared with receipt processing
pub(crate) fn insert_transaction(
    conn: &Connection,
    input: &TransactionInput,
    receipt_id: Option<i64>,
) -> DomainResult<i64> {
    if let Some(category_id) = input.category_id {
        if find_category(conn, category_id)?.is_none() {
            return Err(DomainError::InvalidInput(format!("category {category_id} does not exist")));
        }
    }
    let now = chrono::Local::now().naive_local();
    let date = input.date.unwrap_or_else(|| now.date());
    conn.execute(
        "INSERT INTO transactions (type, amount, category_id, description, date, receipt_id, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        params![input.kind, input.amount, input.category_id, input.description, date, receipt_id, now],
    )?;
    Ok(conn.last_insert_rowid())
}

pub struct TransactionRepository {
    conn: DbConn,
}

impl TransactionRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    pub async fn create(&self, input: &TransactionInput) -> DomainResult<Transaction> {
        let conn = self.conn.lock().await;
        let id = insert_transaction(&conn, input, None)?;
        let transaction = conn.query_row(&format!("{SELECT_TRANSACTION} WHERE t.id = ?"), params![id], row_to_transaction)?;
        Ok(transaction)
    }

    /// Transactions between the optional bounds (inclusive), newest first, with totals
    pub async fn list(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> DomainResult<TransactionsPage> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "{SELECT_TRANSACTION}
             WHERE (?1 IS NULL OR t.date >= ?1) AND (?2 IS NULL OR t.date <= ?2)
             ORDER BY t.date DESC, t.created_at DESC, t.id DESC"
        ))?;
        let transactions = stmt
            .query_map(params![start, end], row_to_transaction)?
            .collect::<Result<Vec<_>, _>>()?;

        let summary = conn.query_row(
            "SELECT
                COALESCE(SUM(CASE WHEN type = 'income' THEN amount ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN type = 'expense' THEN amount ELSE 0 END), 0)
             FROM transactions
             WHERE (?1 IS NULL OR date >= ?1) AND (?2 IS NULL OR date <= ?2)",
            params![start, end],
            |row| {
                Ok(Summary {
                    total_income: row.get(0)?,
                    total_expense: row.get(1)?,
                })
            },
        )?;

        Ok(TransactionsPage { transactions, summary })
    }

    /// Totals per category over the last `period_days` days, largest first
    pub async fn analytics(&self, period_days: i64) -> DomainResult<Vec<CategoryTotal>> {
        if period_days < 0 {
            return Err(DomainError::InvalidInput("period must not be negative".into()));
        }
        let start = chrono::Local::now().date_naive() - Duration::days(period_days);
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT bc.id, bc.name, bc.type, bc.icon, bc.color, COALESCE(SUM(t.amount), 0) AS total
             FROM budget_categories bc
             LEFT JOIN transactions t ON t.category_id = bc.id AND t.date >= ?
             GROUP BY bc.id, bc.name, bc.type, bc.icon, bc.color
             ORDER BY total DESC, bc.id",
        )?;
        let totals = stmt
            .query_map(params![start], |row| {
                Ok(CategoryTotal {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    kind: row.get(2)?,
                    icon: row.get(3)?,
                    color: row.get(4)?,
                    total: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(totals)
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn.execute("DELETE FROM transactions WHERE id = ?", params![id])?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("transaction {id}")));
        }
        Ok(())
    }
}

// ========================
// Settings
// ========================

pub struct SettingsRepository {
    conn: DbConn,
    default_calorie_goal: i64,
}

impl SettingsRepository {
    pub fn new(conn: DbConn, default_calorie_goal: i64) -> Self {
        Self { conn, default_calorie_goal }
    }

    /// The single settings row, created with the default goal on first read
    pub async fn get(&self) -> DomainResult<Settings> {
        let conn = self.conn.lock().await;
        self.get_or_create(&conn)
    }

    pub async fn update_goal(&self, daily_calorie_goal: i64) -> DomainResult<Settings> {
        let conn = self.conn.lock().await;
        let settings = self.get_or_create(&conn)?;
        conn.execute(
            "UPDATE user_settings SET daily_calorie_goal = ?, updated_at = ? WHERE id = ?",
            params![daily_calorie_goal, chrono::Local::now().naive_local(), settings.id],
        )?;
        Ok(Settings { daily_calorie_goal, ..settings })
    }

    fn get_or_create(&self, conn: &Connection) -> DomainResult<Settings> {
        let existing = conn
            .query_row("SELECT id, daily_calorie_goal FROM user_settings ORDER BY id LIMIT 1", [], |row| {
                Ok(Settings {
                    id: row.get(0)?,
                    daily_calorie_goal: row.get(1)?,
                })
            })
            .optional()?;
        if let Some(settings) = existing {
            return Ok(settings);
        }
        conn.execute(
            "INSERT INTO user_settings (daily_calorie_goal, updated_at) VALUES (?, ?)",
            params![self.default_calorie_goal, chrono::Local::now().naive_local()],
        )?;
        Ok(Settings {
            id: conn.last_insert_rowid(),
            daily_calorie_goal: self.default_calorie_goal,
        })
    }
}
