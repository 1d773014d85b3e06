use thiserror::Error;

/// No record exists for the requested key.
///
/// Returned inside an [`anyhow::Error`] by `get` when the lookup matches no row
/// and by `delete` when no row was removed. Backend failures are never turned
/// into this error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Key: {key} not found")]
pub struct KeyNotFound {
    key: String,
}

impl KeyNotFound {
    /// Not-found error for `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// The key that was looked up.
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Whether `err` is a [`KeyNotFound`] rather than a backend failure.
pub fn is_key_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<KeyNotFound>().is_some()
}
