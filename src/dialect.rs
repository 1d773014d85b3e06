use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::bail;

/// SQL flavour used for the upsert statement.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Dialect {
    /// `ON DUPLICATE KEY UPDATE`.
    MySql,
    /// `ON CONFLICT (...) DO UPDATE`.
    Sqlite,
}

impl Dialect {
    /// Insert-or-replace of one row. Identifiers must already be quoted.
    pub fn upsert_sql(self, table_name: &str, key_field: &str, value_field: &str) -> String {
        match self {
            Dialect::MySql => format!(
                "INSERT INTO {} ({}, {}) VALUES (?, ?) ON DUPLICATE KEY UPDATE {} = VALUES({})",
                table_name, key_field, value_field, value_field, value_field
            ),
            Dialect::Sqlite => format!(
                "INSERT INTO {} ({}, {}) VALUES (?, ?) ON CONFLICT({}) DO UPDATE SET {} = excluded.{}",
                table_name, key_field, value_field, key_field, value_field, value_field
            ),
        }
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect::MySql
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Dialect::MySql => "mysql",
            Dialect::Sqlite => "sqlite",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Dialect {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "sqlite" => Ok(Dialect::Sqlite),
            _ => bail!("Invalid dialect: {}", s),
        }
    }
}
