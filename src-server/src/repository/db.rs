//! Database Connection and Setup
//!
//! Manages the SQLite connection, migrations and seed data.

use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainResult, TransactionKind};

/// Shared handle every repository locks before touching the database
pub type DbConn = Arc<Mutex<Connection>>;

/// Database state wrapper
pub struct DbState {
    conn: DbConn,
}

impl DbState {
    /// Get a handle to the connection
    pub fn connection(&self) -> DbConn {
        self.conn.clone()
    }
}

/// Open (or create) the database at `db_path`; `:memory:` gives a private in-memory database
pub fn init_db(db_path: &Path) -> DomainResult<DbState> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    run_migrations(&conn)?;
    seed_budget_categories(&conn)?;

    Ok(DbState {
        conn: Arc::new(Mutex::new(conn)),
    })
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS storage_locations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            icon TEXT NOT NULL,
            color TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            quantity REAL NOT NULL DEFAULT 0,
            unit TEXT NOT NULL,
            category TEXT,
            expiry_date TEXT,
            storage_location_id INTEGER NOT NULL REFERENCES storage_locations(id) ON DELETE CASCADE,
            added_date TEXT NOT NULL,
            notes TEXT,
            calories_per_100g REAL
        );
        CREATE INDEX IF NOT EXISTS idx_products_location ON products(storage_location_id);

        CREATE TABLE IF NOT EXISTS shopping_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            quantity REAL NOT NULL,
            unit TEXT NOT NULL,
            category TEXT,
            is_purchased INTEGER NOT NULL DEFAULT 0,
            added_date TEXT NOT NULL,
            notes TEXT
        );

        CREATE TABLE IF NOT EXISTS budget_categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
            icon TEXT NOT NULL,
            color TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS receipts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            qr_code TEXT NOT NULL,
            total_amount REAL,
            scan_date TEXT NOT NULL,
            status TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
            amount REAL NOT NULL,
            category_id INTEGER REFERENCES budget_categories(id) ON DELETE SET NULL,
            description TEXT,
            date TEXT NOT NULL,
            receipt_id INTEGER REFERENCES receipts(id) ON DELETE SET NULL,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);

        CREATE TABLE IF NOT EXISTS user_settings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            daily_calorie_goal INTEGER NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS recipes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT,
            total_calories REAL,
            cooking_time INTEGER,
            servings INTEGER NOT NULL DEFAULT 1,
            image_url TEXT,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS recipe_ingredients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
            product_name TEXT NOT NULL,
            quantity REAL NOT NULL,
            unit TEXT NOT NULL,
            position INTEGER NOT NULL DEFAULT 0
        );
        CREATE INDEX IF NOT EXISTS idx_ingredients_recipe ON recipe_ingredients(recipe_id);

        CREATE TABLE IF NOT EXISTS planned_recipes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
            status TEXT NOT NULL,
            missing_products TEXT NOT NULL DEFAULT '[]',
            planned_date TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS prepared_meals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
            total_calories REAL,
            total_weight REAL,
            prepared_date TEXT NOT NULL,
            servings_left INTEGER NOT NULL,
            status TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS food_diary (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            meal_name TEXT NOT NULL,
            portion_weight REAL NOT NULL,
            calories REAL NOT NULL,
            meal_type TEXT,
            eaten_date TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_food_diary_date ON food_diary(eaten_date);

        CREATE TABLE IF NOT EXISTS product_catalog (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            category TEXT,
            calories_per_100g REAL,
            default_unit TEXT NOT NULL DEFAULT 'г'
        );

        CREATE TABLE IF NOT EXISTS receipt_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            receipt_id INTEGER NOT NULL REFERENCES receipts(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            quantity REAL NOT NULL,
            price REAL NOT NULL,
            total REAL NOT NULL,
            budget_category_name TEXT,
            category_id INTEGER REFERENCES budget_categories(id) ON DELETE SET NULL,
            catalog_id INTEGER REFERENCES product_catalog(id) ON DELETE SET NULL
        );",
    )?;

    Ok(())
}

const DEFAULT_CATEGORIES: &[(&str, TransactionKind, &str, &str)] = &[
    ("Продукты", TransactionKind::Expense, "ShoppingCart", "bg-green-500"),
    ("Транспорт", TransactionKind::Expense, "Car", "bg-blue-500"),
    ("Жильё", TransactionKind::Expense, "Home", "bg-purple-500"),
    ("Развлечения", TransactionKind::Expense, "Gamepad2", "bg-pink-500"),
    ("Здоровье", TransactionKind::Expense, "Heart", "bg-red-500"),
    ("Прочее", TransactionKind::Expense, "MoreHorizontal", "bg-gray-500"),
    ("Зарплата", TransactionKind::Income, "Briefcase", "bg-emerald-500"),
    ("Подарки", TransactionKind::Income, "Gift", "bg-orange-500"),
    ("Прочие доходы", TransactionKind::Income, "PlusCircle", "bg-cyan-500"),
];

/// Insert the default budget categories into an empty table
fn seed_budget_categories(conn: &Connection) -> DomainResult<()> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM budget_categories", [], |row| row.get(0))?;
    if count > 0 {
        return Ok(());
    }

    let mut stmt = conn.prepare("INSERT INTO budget_categories (name, type, icon, color) VALUES (?, ?, ?, ?)")?;
    for (name, kind, icon, color) in DEFAULT_CATEGORIES {
        stmt.execute(params![name, kind, icon, color])?;
    }
    Ok(())
}
