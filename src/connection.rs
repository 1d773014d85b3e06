use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use mockall::automock;

use crate::Value;

/// One fetched row, keyed by column name or alias.
pub type Row = HashMap<String, Value>;

/// Database handle the adaptor sends its SQL through.
///
/// Quoting, statement execution and query execution are all delegated here;
/// errors returned by an implementation reach the adaptor's caller untouched.
/// Thread safety is the implementation's concern.
#[automock]
pub trait Connection {
    /// Quote a raw identifier for interpolation into SQL text.
    fn quote_identifier(&self, name: &str) -> Result<String>;
    /// Run an INSERT/UPDATE/DELETE and report how many rows it changed.
    fn execute_statement(&self, sql: &str, params: &[Value]) -> Result<usize>;
    /// Run a SELECT. The returned result is released when dropped.
    fn execute_query(&self, sql: &str, params: &[Value]) -> Result<Box<dyn QueryResult>>;
}

/// Rows produced by [`Connection::execute_query`].
#[automock]
pub trait QueryResult {
    /// Number of rows in the result.
    fn row_count(&self) -> usize;
    /// Fetch the next row as a column-to-value mapping, `None` once exhausted.
    fn fetch_associative(&mut self) -> Result<Option<Row>>;
}

impl<C: Connection + ?Sized> Connection for &C {
    fn quote_identifier(&self, name: &str) -> Result<String> {
        (**self).quote_identifier(name)
    }

    fn execute_statement(&self, sql: &str, params: &[Value]) -> Result<usize> {
        (**self).execute_statement(sql, params)
    }

    fn execute_query(&self, sql: &str, params: &[Value]) -> Result<Box<dyn QueryResult>> {
        (**self).execute_query(sql, params)
    }
}

impl<C: Connection + ?Sized> Connection for Arc<C> {
    fn quote_identifier(&self, name: &str) -> Result<String> {
        (**self).quote_identifier(name)
    }

    fn execute_statement(&self, sql: &str, params: &[Value]) -> Result<usize> {
        (**self).execute_statement(sql, params)
    }

    fn execute_query(&self, sql: &str, params: &[Value]) -> Result<Box<dyn QueryResult>> {
        (**self).execute_query(sql, params)
    }
}
