use std::path::Path;

use serde_json::{Map, Value};
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteConnectOptions, SqliteRow};
use sqlx::{Column, ConnectOptions, Connection, Row, SqliteConnection, TypeInfo, ValueRef};

/// One result row, keyed by column name in column order.
pub type Record = Map<String, Value>;

/// A positional bind value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        SqlParam::Text(v.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        SqlParam::Text(v)
    }
}

#[derive(Debug)]
pub enum StorageError {
    /// Opening the file or executing a statement failed, constraint
    /// violations included.
    Operational(sqlx::Error),
    /// A stored value could not be read back.
    Decode(sqlx::Error),
}

impl StorageError {
    /// Driver message with quote characters stripped, suitable for logs.
    pub fn sanitized(&self) -> String {
        let err = match self {
            StorageError::Operational(err) | StorageError::Decode(err) => err,
        };
        err.to_string().replace(['\'', '"'], "")
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Operational(err) => write!(f, "Operational error: {err}"),
            StorageError::Decode(err) => write!(f, "Decode error: {err}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Thin statement runner over a single SQLite connection.
///
/// A gateway is opened per request and must be closed with [`Gateway::close`]
/// once the statement has run. Every statement autocommits.
pub struct Gateway {
    conn: SqliteConnection,
}

impl Gateway {
    /// Opens an existing database file read-write with foreign keys enforced.
    /// A missing file is an error, never silently created.
    pub async fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = SqliteConnectOptions::new()
            .filename(path)
            .read_only(false)
            .create_if_missing(false)
            .foreign_keys(true)
            .connect()
            .await
            .map_err(StorageError::Operational)?;

        tracing::debug!("Opened database {}", path.display());
        Ok(Self { conn })
    }

    pub async fn select(
        &mut self,
        sql: &str,
        params: &[SqlParam],
    ) -> Result<Vec<Record>, StorageError> {
        let rows = bind_all(sql, params)
            .fetch_all(&mut self.conn)
            .await
            .map_err(StorageError::Operational)?;

        rows.iter()
            .map(row_to_record)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StorageError::Decode)
    }

    /// Returns the number of rows written.
    pub async fn insert(&mut self, sql: &str, params: &[SqlParam]) -> Result<u64, StorageError> {
        self.execute(sql, params).await
    }

    /// Returns the number of rows modified.
    pub async fn update(&mut self, sql: &str, params: &[SqlParam]) -> Result<u64, StorageError> {
        self.execute(sql, params).await
    }

    /// Returns the number of rows removed.
    pub async fn delete(&mut self, sql: &str, params: &[SqlParam]) -> Result<u64, StorageError> {
        self.execute(sql, params).await
    }

    /// Releases the underlying file handle. Close failures are logged only:
    /// the statement result has already been committed.
    pub async fn close(self) {
        if let Err(e) = self.conn.close().await {
            tracing::warn!("Failed to close database connection: {e}");
        }
    }

    async fn execute(&mut self, sql: &str, params: &[SqlParam]) -> Result<u64, StorageError> {
        let result = bind_all(sql, params)
            .execute(&mut self.conn)
            .await
            .map_err(StorageError::Operational)?;
        Ok(result.rows_affected())
    }
}

fn bind_all<'q>(sql: &'q str, params: &'q [SqlParam]) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    params.iter().fold(sqlx::query(sql), |query, param| match param {
        SqlParam::Integer(v) => query.bind(*v),
        SqlParam::Real(v) => query.bind(*v),
        SqlParam::Text(v) => query.bind(v.as_str()),
    })
}

fn row_to_record(row: &SqliteRow) -> Result<Record, sqlx::Error> {
    let mut record = Map::new();

    for column in row.columns() {
        let idx = column.ordinal();
        let raw = row.try_get_raw(idx)?;

        let value = if raw.is_null() {
            Value::Null
        } else {
            let type_name = raw.type_info().name().to_string();
            match type_name.as_str() {
                "INTEGER" => Value::from(row.try_get::<i64, _>(idx)?),
                "REAL" => Value::from(row.try_get::<f64, _>(idx)?),
                "BLOB" => Value::from(hex::encode(row.try_get::<Vec<u8>, _>(idx)?)),
                _ => Value::from(row.try_get::<String, _>(idx)?),
            }
        };

        record.insert(column.name().to_string(), value);
    }

    Ok(record)
}
