//! In-Memory System Parameter Store
//! Thread-safe implementation of the SystemParameterStore port

use crate::domain::ports::{StoreError, SystemParameterStore};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory system-parameter store
#[derive(Clone, Default)]
pub struct InMemorySystemParameterStore {
    values: Arc<RwLock<HashMap<u32, String>>>,
}

impl InMemorySystemParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one parameter value for tests
    pub fn preload(&self, action: u32, value: &str) {
        let mut values = self.values.write().unwrap();
        values.insert(action, value.to_string());
    }
}

impl SystemParameterStore for InMemorySystemParameterStore {
    fn get_value(&self, action: u32) -> Result<String, StoreError> {
        let values = self.values.read().unwrap();
        values
            .get(&action)
            .cloned()
            .ok_or_else(|| StoreError::Other(format!("unknown system parameter action {action}")))
    }

    fn set_value(&self, action: u32, value: &str, _update_profile: bool) -> Result<(), StoreError> {
        let mut values = self.values.write().unwrap();
        values.insert(action, value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_of_unknown_action_fails() {
        let store = InMemorySystemParameterStore::new();
        assert!(store.get_value(42).is_err());
    }

    #[test]
    fn test_set_then_get() {
        let store = InMemorySystemParameterStore::new();
        store.set_value(42, "answer", false).unwrap();
        assert_eq!(store.get_value(42).unwrap(), "answer");
    }
}
