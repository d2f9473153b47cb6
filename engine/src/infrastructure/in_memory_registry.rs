//! In-Memory Registry Store
//! Thread-safe implementation of the RegistryStore port
//!
//! Serves tests, non-Windows hosts, and the e2e harness. Key paths are
//! stored verbatim (no case folding); writes create missing subkeys the
//! way the OS write API does.

use crate::domain::ports::{RegistryStore, RegistryValue, StoreError};
use crate::domain::value_objects::RegistryHive;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

type KeyPath = (RegistryHive, String);

/// Thread-safe in-memory registry store
#[derive(Clone, Default)]
pub struct InMemoryRegistryStore {
    keys: Arc<RwLock<HashMap<KeyPath, HashMap<String, RegistryValue>>>>,
}

impl InMemoryRegistryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an empty subkey, so reads can distinguish "key exists,
    /// value absent" from "key absent"
    pub fn create_key(&self, hive: RegistryHive, key: &str) {
        let mut keys = self.keys.write().unwrap();
        keys.entry((hive, key.to_string())).or_default();
    }

    /// Seeds one value, creating the subkey as needed
    pub fn set_value(&self, hive: RegistryHive, key: &str, value_name: &str, value: RegistryValue) {
        let mut keys = self.keys.write().unwrap();
        keys.entry((hive, key.to_string()))
            .or_default()
            .insert(value_name.to_string(), value);
    }

    fn read(
        &self,
        hive: RegistryHive,
        key: &str,
        value_name: &str,
    ) -> Result<Option<RegistryValue>, StoreError> {
        let keys = self.keys.read().unwrap();
        match keys.get(&(hive, key.to_string())) {
            None => Err(StoreError::KeyNotFound {
                hive,
                key: key.to_string(),
            }),
            Some(values) => Ok(values.get(value_name).cloned()),
        }
    }
}

impl RegistryStore for InMemoryRegistryStore {
    fn read_int(
        &self,
        hive: RegistryHive,
        key: &str,
        value_name: &str,
    ) -> Result<Option<i32>, StoreError> {
        match self.read(hive, key, value_name)? {
            None => Ok(None),
            Some(RegistryValue::Integer(value)) => Ok(Some(value)),
            Some(RegistryValue::Text(_)) => Err(StoreError::WrongType {
                value_name: value_name.to_string(),
            }),
        }
    }

    fn read_string(
        &self,
        hive: RegistryHive,
        key: &str,
        value_name: &str,
    ) -> Result<Option<String>, StoreError> {
        match self.read(hive, key, value_name)? {
            None => Ok(None),
            Some(RegistryValue::Text(value)) => Ok(Some(value)),
            Some(RegistryValue::Integer(_)) => Err(StoreError::WrongType {
                value_name: value_name.to_string(),
            }),
        }
    }

    fn write_int(
        &self,
        hive: RegistryHive,
        key: &str,
        value_name: &str,
        value: i32,
    ) -> Result<(), StoreError> {
        self.set_value(hive, key, value_name, RegistryValue::Integer(value));
        Ok(())
    }

    fn write_string(
        &self,
        hive: RegistryHive,
        key: &str,
        value_name: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        self.set_value(hive, key, value_name, RegistryValue::Text(value.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_from_absent_key_is_key_not_found() {
        let store = InMemoryRegistryStore::new();
        let err = store
            .read_int(RegistryHive::CurrentUser, "Missing", "Value")
            .unwrap_err();
        assert!(matches!(err, StoreError::KeyNotFound { .. }));
    }

    #[test]
    fn test_absent_value_under_existing_key_is_none() {
        let store = InMemoryRegistryStore::new();
        store.create_key(RegistryHive::CurrentUser, "SubKey");
        assert_eq!(
            store
                .read_int(RegistryHive::CurrentUser, "SubKey", "Missing")
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_write_then_read_back() {
        let store = InMemoryRegistryStore::new();
        store
            .write_string(RegistryHive::LocalMachine, "Software\\App", "Name", "demo")
            .unwrap();
        assert_eq!(
            store
                .read_string(RegistryHive::LocalMachine, "Software\\App", "Name")
                .unwrap(),
            Some("demo".to_string())
        );
    }

    #[test]
    fn test_hives_are_distinct_namespaces() {
        let store = InMemoryRegistryStore::new();
        store
            .write_int(RegistryHive::CurrentUser, "SubKey", "Value", 1)
            .unwrap();
        let err = store
            .read_int(RegistryHive::LocalMachine, "SubKey", "Value")
            .unwrap_err();
        assert!(matches!(err, StoreError::KeyNotFound { .. }));
    }

    #[test]
    fn test_clones_share_state() {
        let store = InMemoryRegistryStore::new();
        let clone = store.clone();
        store
            .write_int(RegistryHive::CurrentUser, "SubKey", "Value", 5)
            .unwrap();
        assert_eq!(
            clone
                .read_int(RegistryHive::CurrentUser, "SubKey", "Value")
                .unwrap(),
            Some(5)
        );
    }
}
