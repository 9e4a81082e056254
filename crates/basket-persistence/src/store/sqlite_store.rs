use async_trait::async_trait;
use basket_core::{BasketError, BasketResult};
use basket_domain::validation::names_match;
use basket_domain::{ListId, ListRepository, NewList, StoredList};
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::path::{Path, PathBuf};

const SCHEMA: &str = include_str!("../../schema.sql");

const LIST_COLUMNS: &str = "id, name, items, is_temporary, created_at, last_performed_at";

/// Format of SQLite's `CURRENT_TIMESTAMP`, used by rows created without an
/// explicit `created_at`.
const SQLITE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn db_err(e: sqlx::Error) -> BasketError {
    BasketError::Database(e.to_string())
}

fn write_err(e: sqlx::Error, name: &str) -> BasketError {
    match e.as_database_error() {
        Some(db) if db.is_unique_violation() => BasketError::DuplicateName(name.to_string()),
        _ => db_err(e),
    }
}

fn parse_timestamp(value: &str) -> BasketResult<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, SQLITE_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| BasketError::Serialization(format!("invalid timestamp '{}': {}", value, e)))
}

pub struct SqliteListStore {
    path: PathBuf,
    pool: tokio::sync::OnceCell<Pool<Sqlite>>,
}

impl SqliteListStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            pool: tokio::sync::OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn get_pool(&self) -> BasketResult<&Pool<Sqlite>> {
        self.pool
            .get_or_try_init(|| async {
                if let Some(parent) = self.path.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }

                let options = SqliteConnectOptions::new()
                    .filename(&self.path)
                    .create_if_missing(true);

                let pool = SqlitePoolOptions::new()
                    .max_connections(5)
                    .connect_with(options)
                    .await
                    .map_err(db_err)?;

                // Initialize schema
                sqlx::raw_sql(SCHEMA).execute(&pool).await.map_err(db_err)?;

                tracing::info!("Opened SQLite database at {}", self.path.display());
                Ok(pool)
            })
            .await
    }

    /// Inserts a list with the given name when the database holds none.
    /// Returns the created list, if any.
    pub async fn seed_default_list(&self, name: &str) -> BasketResult<Option<StoredList>> {
        if self.count().await? > 0 {
            return Ok(None);
        }
        let list = self.insert(NewList::new(name)).await?;
        tracing::info!("Seeded default list '{}'", list.name);
        Ok(Some(list))
    }

    fn row_to_list(row: &SqliteRow) -> BasketResult<StoredList> {
        let created_at: String = row.try_get("created_at").map_err(db_err)?;
        let last_performed_at: Option<String> =
            row.try_get("last_performed_at").map_err(db_err)?;

        Ok(StoredList {
            id: ListId(row.try_get("id").map_err(db_err)?),
            name: row.try_get("name").map_err(db_err)?,
            items_raw: row
                .try_get::<Option<String>, _>("items")
                .map_err(db_err)?
                .unwrap_or_default(),
            is_temporary: row.try_get::<i64, _>("is_temporary").map_err(db_err)? != 0,
            created_at: parse_timestamp(&created_at)?,
            last_performed_at: last_performed_at
                .as_deref()
                .map(parse_timestamp)
                .transpose()?,
        })
    }

    async fn update_row(&self, id: ListId, sql: &str, value: &str) -> BasketResult<()> {
        let pool = self.get_pool().await?;
        let result = sqlx::query(sql)
            .bind(value)
            .bind(id.0)
            .execute(pool)
            .await
            .map_err(|e| write_err(e, value))?;

        if result.rows_affected() == 0 {
            return Err(BasketError::not_found_list(id));
        }
        Ok(())
    }
}

#[async_trait]
impl ListRepository for SqliteListStore {
    async fn insert(&self, list: NewList) -> BasketResult<StoredList> {
        let pool = self.get_pool().await?;
        let items_raw = list.items_raw();
        let created_at = Utc::now();

        let result = sqlx::query(
            "INSERT INTO lists (name, items, is_temporary, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&list.name)
        .bind(&items_raw)
        .bind(list.is_temporary)
        .bind(created_at.to_rfc3339())
        .execute(pool)
        .await
        .map_err(|e| write_err(e, &list.name))?;

        let id = ListId(result.last_insert_rowid());
        tracing::debug!("Inserted list {} into {}", id, self.path.display());

        Ok(StoredList {
            id,
            name: list.name,
            items_raw,
            is_temporary: list.is_temporary,
            created_at,
            last_performed_at: None,
        })
    }

    async fn find_by_id(&self, id: ListId) -> BasketResult<Option<StoredList>> {
        let pool = self.get_pool().await?;
        let row = sqlx::query(&format!("SELECT {} FROM lists WHERE id = ?", LIST_COLUMNS))
            .bind(id.0)
            .fetch_optional(pool)
            .await
            .map_err(db_err)?;

        row.as_ref().map(Self::row_to_list).transpose()
    }

    async fn find_all(&self) -> BasketResult<Vec<StoredList>> {
        let pool = self.get_pool().await?;
        sqlx::query(&format!("SELECT {} FROM lists ORDER BY id", LIST_COLUMNS))
            .fetch_all(pool)
            .await
            .map_err(db_err)?
            .iter()
            .map(Self::row_to_list)
            .collect()
    }

    async fn find_recent(&self, limit: usize) -> BasketResult<Vec<StoredList>> {
        let pool = self.get_pool().await?;
        // DESC puts never-performed lists (NULL) last.
        sqlx::query(&format!(
            "SELECT {} FROM lists ORDER BY last_performed_at DESC, id LIMIT ?",
            LIST_COLUMNS
        ))
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(pool)
        .await
        .map_err(db_err)?
        .iter()
        .map(Self::row_to_list)
        .collect()
    }

    async fn find_by_name_ci(&self, name: &str) -> BasketResult<Option<StoredList>> {
        // SQLite's lower() only folds ASCII, so names are compared here.
        Ok(self
            .find_all()
            .await?
            .into_iter()
            .find(|list| names_match(&list.name, name)))
    }

    async fn update_name(&self, id: ListId, name: &str) -> BasketResult<()> {
        self.update_row(id, "UPDATE lists SET name = ? WHERE id = ?", name)
            .await
    }

    async fn update_items(&self, id: ListId, items_raw: &str) -> BasketResult<()> {
        self.update_row(id, "UPDATE lists SET items = ? WHERE id = ?", items_raw)
            .await
    }

    async fn set_last_performed(&self, id: ListId, at: DateTime<Utc>) -> BasketResult<()> {
        self.update_row(
            id,
            "UPDATE lists SET last_performed_at = ? WHERE id = ?",
            &at.to_rfc3339(),
        )
        .await
    }

    async fn complete_session(
        &self,
        id: ListId,
        items_raw: &str,
        at: DateTime<Utc>,
    ) -> BasketResult<()> {
        let pool = self.get_pool().await?;
        let result = sqlx::query("UPDATE lists SET items = ?, last_performed_at = ? WHERE id = ?")
            .bind(items_raw)
            .bind(at.to_rfc3339())
            .bind(id.0)
            .execute(pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(BasketError::not_found_list(id));
        }
        tracing::debug!("Stored session result for list {}", id);
        Ok(())
    }

    async fn delete(&self, id: ListId) -> BasketResult<bool> {
        let pool = self.get_pool().await?;
        let result = sqlx::query("DELETE FROM lists WHERE id = ?")
            .bind(id.0)
            .execute(pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> BasketResult<i64> {
        let pool = self.get_pool().await?;
        sqlx::query_scalar("SELECT COUNT(*) FROM lists")
            .fetch_one(pool)
            .await
            .map_err(db_err)
    }
}
