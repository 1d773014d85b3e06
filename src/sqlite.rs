use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Context, Result};
use log::*;
use rusqlite::params_from_iter;
use rusqlite::types::{ToSql, ToSqlOutput, ValueRef};

use crate::{Connection, QueryResult, Row, TableConfig, Value};

/// [`Connection`] backed by a SQLite database.
///
/// Access to the underlying handle is serialized, so one instance can be
/// shared between adaptors and threads behind an `Arc`.
#[derive(Debug)]
pub struct SqliteConnection {
    conn: Mutex<rusqlite::Connection>,
}

impl SqliteConnection {
    /// Open or create the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = rusqlite::Connection::open(path)
            .with_context(|| format!("Unable to open database at {:?}", path))?;
        debug!("Opened SQLite database at {:?}", path);
        Ok(Self::from_connection(conn))
    }

    /// Private in-memory database, dropped with the connection.
    pub fn open_in_memory() -> Result<Self> {
        let conn = rusqlite::Connection::open_in_memory()
            .context("Unable to open in-memory database")?;
        Ok(Self::from_connection(conn))
    }

    /// Wrap an already opened handle.
    pub fn from_connection(conn: rusqlite::Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Create the table described by `config` unless it exists.
    ///
    /// The key column becomes the primary key, which the adaptor's upsert
    /// depends on.
    pub fn create_table(&self, config: &TableConfig) -> Result<()> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} ({} TEXT PRIMARY KEY NOT NULL, {})",
            self.quote_identifier(&config.table_name)?,
            self.quote_identifier(&config.key_field)?,
            self.quote_identifier(&config.value_field)?
        );
        trace!("{}", sql);
        self.lock()?.execute(&sql, [])?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, rusqlite::Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("Failed to acquire connection lock."))
    }
}

impl Connection for SqliteConnection {
    fn quote_identifier(&self, name: &str) -> Result<String> {
        Ok(name
            .split('.')
            .map(|part| format!("\"{}\"", part.replace('"', "\"\"")))
            .collect::<Vec<_>>()
            .join("."))
    }

    fn execute_statement(&self, sql: &str, params: &[Value]) -> Result<usize> {
        let conn = self.lock()?;
        let affected = conn.execute(sql, params_from_iter(params.iter()))?;
        trace!("{} row(s) affected", affected);
        Ok(affected)
    }

    fn execute_query(&self, sql: &str, params: &[Value]) -> Result<Box<dyn QueryResult>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        let mut buffered = VecDeque::new();
        while let Some(row) = rows.next()? {
            let mut mapped = Row::with_capacity(columns.len());
            for (idx, name) in columns.iter().enumerate() {
                mapped.insert(name.clone(), value_from_ref(row.get_ref(idx)?)?);
            }
            buffered.push_back(mapped);
        }
        trace!("{} row(s) fetched", buffered.len());
        Ok(Box::new(BufferedResult { rows: buffered }))
    }
}

/// Query result read fully into memory; the SQLite statement is already
/// finalized when this is handed out.
struct BufferedResult {
    rows: VecDeque<Row>,
}

impl QueryResult for BufferedResult {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn fetch_associative(&mut self) -> Result<Option<Row>> {
        Ok(self.rows.pop_front())
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let value = match self {
            Value::Null => ValueRef::Null,
            Value::Integer(i) => ValueRef::Integer(*i),
            Value::Real(r) => ValueRef::Real(*r),
            Value::Text(s) => ValueRef::Text(s.as_bytes()),
            Value::Bytes(b) => ValueRef::Blob(b.as_slice()),
        };
        Ok(ToSqlOutput::Borrowed(value))
    }
}

fn value_from_ref(value: ValueRef<'_>) -> Result<Value> {
    Ok(match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(r) => Value::Real(r),
        ValueRef::Text(t) => Value::Text(std::str::from_utf8(t)?.to_owned()),
        ValueRef::Blob(b) => Value::Bytes(b.to_vec()),
    })
}
