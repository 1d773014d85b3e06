#![warn(missing_docs)]
//! Key-value repository stored in a single two-column SQL table.
//!
//! The [`Adaptor`] turns `set`/`get`/`delete` into parameterized SQL against a
//! table whose name and columns are chosen at construction time. Statement
//! execution is delegated to a [`Connection`]; [`SqliteConnection`] is the
//! bundled implementation.
//!
//! ```rust
//! # use keystore::{Adaptor, Dialect, Repository, SqliteConnection, TableConfig, Value};
//! # fn main() -> keystore::Result<()> {
//! let connection = SqliteConnection::open_in_memory()?;
//! let config = TableConfig::new("kv", "k", "v");
//! connection.create_table(&config)?;
//!
//! let adaptor = Adaptor::with_dialect(&connection, Dialect::Sqlite, "kv", "k", "v")?;
//! adaptor.set("alpha", Value::from("1"))?;
//! assert_eq!(adaptor.get("alpha")?, Value::from("1"));
//! adaptor.delete("alpha")?;
//! assert!(keystore::is_key_not_found(&adaptor.get("alpha").unwrap_err()));
//! # Ok(())
//! # }
//! ```

pub use anyhow::{bail, Result};

pub use adaptor::{Adaptor, Repository, VALUE_FIELD_ALIAS};
pub use config::TableConfig;
pub use connection::{Connection, QueryResult, Row};
pub use dialect::Dialect;
pub use error::{is_key_not_found, KeyNotFound};
pub use factory::Factory;
pub use sqlite::SqliteConnection;
pub use value::Value;

/// Mocks of the collaborator traits, for tests of code built on this crate.
pub mod mock {
    pub use crate::adaptor::MockRepository;
    pub use crate::connection::{MockConnection, MockQueryResult};
}

mod adaptor;
mod config;
mod connection;
mod dialect;
mod error;
mod factory;
mod sqlite;
mod value;
