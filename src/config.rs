use serde::{Deserialize, Serialize};
use structopt::StructOpt;

/// Names of the table backing a repository and of its two columns.
///
/// The names are raw; quoting happens when an adaptor is built from them.
#[derive(Debug, Clone, PartialEq, StructOpt, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Table holding the records.
    #[structopt(long = "table", default_value = "keystore")]
    pub table_name: String,
    /// Column holding the keys. Must be a primary or unique key.
    #[structopt(long = "key-field", default_value = "key")]
    pub key_field: String,
    /// Column holding the values.
    #[structopt(long = "value-field", default_value = "value")]
    pub value_field: String,
}

impl TableConfig {
    /// Config naming `table_name` with columns `key_field` and `value_field`.
    pub fn new(
        table_name: impl Into<String>,
        key_field: impl Into<String>,
        value_field: impl Into<String>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            key_field: key_field.into(),
            value_field: value_field.into(),
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new("keystore", "key", "value")
    }
}
