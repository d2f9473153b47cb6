//! RegistryStore port
//! Interface for reading and writing named values under registry subkeys

use crate::domain::ports::StoreError;
use crate::domain::value_objects::RegistryHive;

/// A typed registry value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryValue {
    Integer(i32),
    Text(String),
}

/// Port for registry access
///
/// Read contract: `Ok(None)` means the subkey opened but the value is
/// absent (the caller substitutes its default); `Err(KeyNotFound)` means
/// the subkey itself could not be opened. The two cases are deliberately
/// distinct so executors cannot conflate them.
pub trait RegistryStore: Send + Sync {
    fn read_int(
        &self,
        hive: RegistryHive,
        key: &str,
        value_name: &str,
    ) -> Result<Option<i32>, StoreError>;

    fn read_string(
        &self,
        hive: RegistryHive,
        key: &str,
        value_name: &str,
    ) -> Result<Option<String>, StoreError>;

    /// Creates intermediate subkeys as needed, like the OS write API
    fn write_int(
        &self,
        hive: RegistryHive,
        key: &str,
        value_name: &str,
        value: i32,
    ) -> Result<(), StoreError>;

    fn write_string(
        &self,
        hive: RegistryHive,
        key: &str,
        value_name: &str,
        value: &str,
    ) -> Result<(), StoreError>;
}
