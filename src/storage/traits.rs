//! Trait abstraction over the storage medium to enable mocking in tests

use super::StorageError;

/// String-keyed, string-valued storage with a single writer.
///
/// Every `set` fully overwrites the previous value for that key.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key` (no-op when absent)
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}
