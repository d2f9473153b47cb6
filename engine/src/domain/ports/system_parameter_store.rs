//! SystemParameterStore port
//! Interface over the fixed-buffer system-parameter query/set API

use crate::domain::ports::StoreError;

/// Port for querying and setting system parameters by action code
pub trait SystemParameterStore: Send + Sync {
    /// Queries one parameter; the result is the API's buffer trimmed to
    /// the returned length
    fn get_value(&self, action: u32) -> Result<String, StoreError>;

    /// Sets one parameter; `update_profile` asks the OS to persist the
    /// change and broadcast it
    fn set_value(&self, action: u32, value: &str, update_profile: bool) -> Result<(), StoreError>;
}
