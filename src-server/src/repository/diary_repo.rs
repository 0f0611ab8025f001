//! Food Diary Repository

use chrono::NaiveDate;
use rusqlite::{params, Row};

use super::db::DbConn;
use crate::domain::{DiaryDay, DiaryInput, DomainError, DomainResult, FoodDiaryEntry};

const SELECT_ENTRY: &str =
    "SELECT id, meal_name, portion_weight, calories, meal_type, eaten_date, created_at FROM food_diary";

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<FoodDiaryEntry> {
    Ok(FoodDiaryEntry {
        id: row.get(0)?,
        meal_name: row.get(1)?,
        portion_weight: row.get(2)?,
        calories: row.get(3)?,
        meal_type: row.get(4)?,
        eaten_date: row.get(5)?,
        created_at: row.get(6)?,
    })
}

pub struct DiaryRepository {
    conn: DbConn,
}

impl DiaryRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    /// Entries eaten on `date` in the order they were logged, with their calorie sum
    pub async fn day(&self, date: NaiveDate) -> DomainResult<DiaryDay> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!("{SELECT_ENTRY} WHERE eaten_date = ? ORDER BY created_at, id"))?;
        let entries = stmt
            .query_map(params![date], row_to_entry)?
            .collect::<Result<Vec<_>, _>>()?;
        let total_calories = entries.iter().map(|entry| entry.calories).sum();
        Ok(DiaryDay { entries, total_calories })
    }

    pub async fn add(&self, input: &DiaryInput) -> DomainResult<FoodDiaryEntry> {
        let conn = self.conn.lock().await;
        let now = chrono::Local::now().naive_local();
        conn.execute(
            "INSERT INTO food_diary (meal_name, portion_weight, calories, meal_type, eaten_date, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                input.meal_name.trim(),
                input.portion_weight,
                input.calories,
                input.meal_type.as_deref().filter(|t| !t.is_empty()),
                input.eaten_date.unwrap_or_else(|| now.date()),
                now,
            ],
        )?;
        let id = conn.last_insert_rowid();
        let entry = conn.query_row(&format!("{SELECT_ENTRY} WHERE id = ?"), params![id], row_to_entry)?;
        Ok(entry)
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn.execute("DELETE FROM food_diary WHERE id = ?", params![id])?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("diary entry {id}")));
        }
        Ok(())
    }
}
