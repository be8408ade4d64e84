use std::str::FromStr;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{QueryBuilder, Result, Sqlite, SqlitePool};

use crate::models::dto::NewUser;
use crate::models::User;

/// Column list for `users` queries.
const COLUMNS: &str = "id, name, age, phone_number, home_address, created_at, updated_at";

/// Connects to the SQLite database at `db_url`, creating the file if it does
/// not exist yet, and returns a connection pool for accessing it
pub async fn connect_sqlx(db_url: &str) -> SqlitePool {
    let options = SqliteConnectOptions::from_str(db_url)
        .expect("Invalid database URL")
        .create_if_missing(true);
    SqlitePoolOptions::new()
        .acquire_timeout(Duration::from_secs(2))
        .max_connections(8)
        .connect_with(options)
        .await
        .expect("Could not connect to the database")
}

/// Admin console query: every field is optional and absent fields do not
/// constrain the result.
#[derive(Debug, Default)]
pub struct AdminFilter {
    pub age: Option<i64>,
    pub created: Option<NaiveDate>,
    pub q: Option<String>,
}

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub fn new(pool: SqlitePool) -> Self {
        Database { pool }
    }

    /// Creates the employee table if this is a fresh database.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                age INTEGER NOT NULL,
                phone_number TEXT NOT NULL,
                home_address TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert a new employee record. The store assigns the id and sets both
    /// timestamps to the same instant.
    pub async fn create_user(&self, new_user: &NewUser) -> Result<User> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO users (name, age, phone_number, home_address, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&new_user.name)
            .bind(new_user.age)
            .bind(&new_user.phone_number)
            .bind(&new_user.home_address)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await
    }

    /// Full scan, newest first. Ties on `created_at` fall back to the id so
    /// the order stays deterministic.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, User>(&query)
            .fetch_all(&self.pool)
            .await
    }

    /// Get an employee record by ID
    pub async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Persist the writable fields of an existing record, recomputing
    /// `updated_at`. `created_at` is never touched.
    pub async fn update_user(&self, user: &User) -> Result<User> {
        let query = format!(
            "UPDATE users SET name = ?, age = ?, phone_number = ?, home_address = ?, updated_at = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&user.name)
            .bind(user.age)
            .bind(&user.phone_number)
            .bind(&user.home_address)
            .bind(Utc::now())
            .bind(user.id)
            .fetch_one(&self.pool)
            .await
    }

    /// Delete an employee record by ID, returning whether a row existed.
    pub async fn delete_user(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_users(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
    }

    /// Filtered scan for the admin console: exact age, calendar date of
    /// creation, and a substring search over the free-text fields.
    pub async fn search_users(&self, filter: &AdminFilter) -> Result<Vec<User>> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM users WHERE 1 = 1"));

        if let Some(age) = filter.age {
            builder.push(" AND age = ").push_bind(age);
        }
        if let Some(created) = filter.created {
            builder
                .push(" AND date(created_at) = ")
                .push_bind(created.to_string());
        }
        if let Some(q) = &filter.q {
            let pattern = format!("%{q}%");
            builder
                .push(" AND (name LIKE ")
                .push_bind(pattern.clone())
                .push(" OR phone_number LIKE ")
                .push_bind(pattern.clone())
                .push(" OR home_address LIKE ")
                .push_bind(pattern)
                .push(")");
        }

        builder.push(" ORDER BY created_at DESC, id DESC");
        builder
            .build_query_as::<User>()
            .fetch_all(&self.pool)
            .await
    }
}
