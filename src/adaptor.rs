use anyhow::Result;
use log::*;
use mockall::automock;

use crate::{Connection, Dialect, KeyNotFound, Value};

/// Alias the stored value is selected under.
pub const VALUE_FIELD_ALIAS: &str = "value_field";

/// Key-value operations a repository backend should obey.
#[automock]
pub trait Repository {
    /// Insert a key-value pair, replacing any value already stored for `key`.
    fn set(&self, key: &str, value: Value) -> Result<()>;
    /// Value stored for `key`, `Value::Null` if a row exists without one,
    /// or [`KeyNotFound`] if there is no row.
    fn get(&self, key: &str) -> Result<Value>;
    /// Remove the record for `key`, or report [`KeyNotFound`].
    fn delete(&self, key: &str) -> Result<()>;
}

/// Repository over one table with a key column and a value column.
///
/// Table and column names are quoted once through the connection when the
/// adaptor is built. Every operation is a single statement sent through the
/// connection; backend errors are returned as they are.
///
/// The key column must carry a primary or unique key constraint. The upsert
/// in [`Repository::set`] relies on it and the adaptor does not check it.
///
/// Example usage:
/// ```rust
/// # use keystore::{Adaptor, Dialect, Repository, SqliteConnection, TableConfig, Value};
/// # fn main() -> keystore::Result<()> {
/// let connection = SqliteConnection::open_in_memory()?;
/// connection.create_table(&TableConfig::new("settings", "name", "data"))?;
/// let adaptor = Adaptor::with_dialect(connection, Dialect::Sqlite, "settings", "name", "data")?;
///
/// adaptor.set("theme", Value::from("dark"))?;
/// adaptor.set("theme", Value::from("light"))?;
/// assert_eq!(adaptor.get("theme")?, Value::from("light"));
///
/// adaptor.set("empty", Value::Null)?;
/// assert_eq!(adaptor.get("empty")?, Value::Null);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Adaptor<C> {
    connection: C,
    dialect: Dialect,
    table_name: String,
    key_field: String,
    value_field: String,
}

impl<C: Connection> Adaptor<C> {
    /// Adaptor issuing MySQL-flavoured upserts.
    pub fn new(connection: C, table_name: &str, key_field: &str, value_field: &str) -> Result<Self> {
        Self::with_dialect(connection, Dialect::MySql, table_name, key_field, value_field)
    }

    /// Adaptor issuing upserts in `dialect`.
    pub fn with_dialect(
        connection: C,
        dialect: Dialect,
        table_name: &str,
        key_field: &str,
        value_field: &str,
    ) -> Result<Self> {
        let table_name = connection.quote_identifier(table_name)?;
        let key_field = connection.quote_identifier(key_field)?;
        let value_field = connection.quote_identifier(value_field)?;
        debug!(
            "Adaptor bound to {} ({}, {}), dialect: {}",
            table_name, key_field, value_field, dialect
        );
        Ok(Self {
            connection,
            dialect,
            table_name,
            key_field,
            value_field,
        })
    }

    /// Quoted table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Quoted key column.
    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    /// Quoted value column.
    pub fn value_field(&self) -> &str {
        &self.value_field
    }

    /// Upsert flavour in use.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// The underlying connection.
    pub fn connection(&self) -> &C {
        &self.connection
    }
}

impl<C: Connection> Repository for Adaptor<C> {
    fn set(&self, key: &str, value: Value) -> Result<()> {
        let sql = self
            .dialect
            .upsert_sql(&self.table_name, &self.key_field, &self.value_field);
        trace!("{}", sql);
        self.connection
            .execute_statement(&sql, &[Value::from(key), value])?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Value> {
        let sql = format!(
            "SELECT {} AS {} FROM {} WHERE {} = ?",
            self.value_field, VALUE_FIELD_ALIAS, self.table_name, self.key_field
        );
        trace!("{}", sql);
        let mut result = self.connection.execute_query(&sql, &[Value::from(key)])?;
        if result.row_count() == 0 {
            debug!("No row for key: {}", key);
            return Err(KeyNotFound::new(key).into());
        }
        let value = result
            .fetch_associative()?
            .and_then(|mut row| row.remove(VALUE_FIELD_ALIAS))
            .filter(|value| !value.is_null())
            .unwrap_or(Value::Null);
        Ok(value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = ?",
            self.table_name, self.key_field
        );
        trace!("{}", sql);
        let affected = self
            .connection
            .execute_statement(&sql, &[Value::from(key)])?;
        if affected == 0 {
            debug!("No rows deleted for key: {}", key);
            return Err(KeyNotFound::new(key).into());
        }
        Ok(())
    }
}
