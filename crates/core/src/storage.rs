use anyhow::{Context, Result};
use rusqlite::{named_params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::model::{normalize_description, Task, TaskTime};

/// Record layout of the `time` column: the due components plus the description.
#[derive(Debug, Serialize, Deserialize)]
struct StoredTime {
    hours: String,
    minutes: String,
    year: String,
    month: String,
    day: String,
    #[serde(default)]
    description: String,
}

impl From<&Task> for StoredTime {
    fn from(task: &Task) -> Self {
        Self {
            hours: task.time.hours.clone(),
            minutes: task.time.minutes.clone(),
            year: task.time.year.clone(),
            month: task.time.month.clone(),
            day: task.time.day.clone(),
            description: task.description.clone().unwrap_or_default(),
        }
    }
}

impl StoredTime {
    fn into_task(self, title: String) -> Task {
        Task {
            title,
            time: TaskTime {
                hours: self.hours,
                minutes: self.minutes,
                year: self.year,
                month: self.month,
                day: self.day,
            },
            description: normalize_description(Some(self.description)),
        }
    }
}

/// Key-value store of reminders keyed by title.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (creating on first use) the store. A `Database` only exists once the
    /// schema is in place, so every save/delete happens after open completes.
    pub fn initialize(config: &AppConfig) -> Result<Self> {
        let conn = Connection::open(config.db_path()).with_context(|| {
            format!("Failed to open database at {}", config.db_path().display())
        })?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to configure SQLite WAL mode")?;

        let db = Self { conn };
        db.apply_migrations()?;
        tracing::debug!(path = %config.db_path().display(), "opened reminder store");
        Ok(db)
    }

    /// Insert or replace the record stored under `task.title`.
    pub fn save(&self, task: &Task) -> Result<()> {
        let time = serde_json::to_string(&StoredTime::from(task))
            .context("Failed to serialize reminder time")?;
        self.conn
            .execute(
                "INSERT INTO notifications (title, time) VALUES (:title, :time)
                 ON CONFLICT(title) DO UPDATE SET time = excluded.time",
                named_params! {
                    ":title": task.title,
                    ":time": time,
                },
            )
            .with_context(|| format!("Failed to save reminder '{}'", task.title))?;
        Ok(())
    }

    /// Every stored reminder, in key order.
    pub fn load_all(&self) -> Result<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare("SELECT title, time FROM notifications ORDER BY title")?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(map_task(row)?);
        }
        Ok(tasks)
    }

    pub fn fetch(&self, title: &str) -> Result<Option<Task>> {
        let raw = self
            .conn
            .query_row(
                "SELECT title, time FROM notifications WHERE title = :title",
                named_params! { ":title": title },
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;
        raw.map(|(title, time)| decode_task(title, &time))
            .transpose()
    }

    /// Remove the record for `title`; returns whether one existed.
    pub fn delete(&self, title: &str) -> Result<bool> {
        let affected = self.conn.execute(
            "DELETE FROM notifications WHERE title = :title",
            named_params! { ":title": title },
        )?;
        Ok(affected > 0)
    }

    fn apply_migrations(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS notifications (
                    title TEXT PRIMARY KEY,
                    time TEXT NOT NULL
                 );",
            )
            .context("Failed to create notifications table")?;
        Ok(())
    }
}

fn map_task(row: &Row<'_>) -> Result<Task> {
    let title: String = row.get(0)?;
    let time: String = row.get(1)?;
    decode_task(title, &time)
}

fn decode_task(title: String, time: &str) -> Result<Task> {
    let stored: StoredTime = serde_json::from_str(time)
        .with_context(|| format!("Corrupt time record for reminder '{}'", title))?;
    Ok(stored.into_task(title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn temp_config() -> (AppConfig, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");
        (config, dir)
    }

    fn task(title: &str, hour: u32, description: Option<&str>) -> Task {
        Task::new(
            title,
            TaskTime::new(2031, 6, 15, hour, 30),
            description.map(str::to_string),
        )
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (config, _dir) = temp_config();
        let db = Database::initialize(&config).expect("init db");

        let saved = task("Buy milk", 9, Some("semi-skimmed"));
        db.save(&saved).expect("save");

        let loaded = db.load_all().expect("load");
        assert_eq!(loaded, vec![saved]);
    }

    #[test]
    fn records_survive_reopen() {
        let (config, _dir) = temp_config();
        {
            let db = Database::initialize(&config).expect("init db");
            db.save(&task("Water plants", 7, None)).expect("save");
        }

        let reopened = Database::initialize(&config).expect("reopen db");
        let loaded = reopened.load_all().expect("load");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "Water plants");
        assert_eq!(loaded[0].description, None);
    }

    #[test]
    fn save_upserts_by_title() {
        let (config, _dir) = temp_config();
        let db = Database::initialize(&config).expect("init db");

        db.save(&task("Call mum", 8, Some("first"))).expect("save first");
        let latest = task("Call mum", 20, Some("second"));
        db.save(&latest).expect("save second");

        let loaded = db.load_all().expect("load");
        assert_eq!(loaded, vec![latest]);
    }

    #[test]
    fn delete_removes_record_and_ignores_missing() {
        let (config, _dir) = temp_config();
        let db = Database::initialize(&config).expect("init db");
        db.save(&task("Gym", 6, None)).expect("save");
        db.save(&task("Dentist", 14, None)).expect("save");

        assert!(db.delete("Gym").expect("delete"));
        assert!(!db.delete("Gym").expect("delete again"));

        let titles: Vec<String> = db
            .load_all()
            .expect("load")
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["Dentist".to_string()]);
    }

    #[test]
    fn stored_record_keeps_description_inside_time() {
        let (config, _dir) = temp_config();
        let db = Database::initialize(&config).expect("init db");
        db.save(&task("Pay rent", 10, Some("landlord"))).expect("save");

        let raw: String = db
            .conn
            .query_row(
                "SELECT time FROM notifications WHERE title = 'Pay rent'",
                [],
                |row| row.get(0),
            )
            .expect("raw row");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(value["hours"], "10");
        assert_eq!(value["minutes"], "30");
        assert_eq!(value["year"], "2031");
        assert_eq!(value["month"], "06");
        assert_eq!(value["day"], "15");
        assert_eq!(value["description"], "landlord");
    }

    #[test]
    fn fetch_returns_single_record() {
        let (config, _dir) = temp_config();
        let db = Database::initialize(&config).expect("init db");
        let saved = task("Book flights", 11, None);
        db.save(&saved).expect("save");

        assert_eq!(db.fetch("Book flights").expect("fetch"), Some(saved));
        assert_eq!(db.fetch("missing").expect("fetch missing"), None);
    }
}
