use anyhow::Result;

use crate::{Adaptor, Connection, Dialect, TableConfig};

/// Builds adaptors with a fixed upsert dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct Factory {
    dialect: Dialect,
}

impl Factory {
    /// Factory for MySQL-flavoured adaptors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory for adaptors speaking `dialect`.
    pub fn with_dialect(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Adaptor over `table_name` (`key_field`, `value_field`) on `connection`.
    pub fn create_dbal_adaptor<C: Connection>(
        &self,
        connection: C,
        table_name: &str,
        key_field: &str,
        value_field: &str,
    ) -> Result<Adaptor<C>> {
        Adaptor::with_dialect(connection, self.dialect, table_name, key_field, value_field)
    }

    /// Adaptor over the table described by `config`.
    pub fn create_from_config<C: Connection>(
        &self,
        connection: C,
        config: &TableConfig,
    ) -> Result<Adaptor<C>> {
        self.create_dbal_adaptor(
            connection,
            &config.table_name,
            &config.key_field,
            &config.value_field,
        )
    }
}
