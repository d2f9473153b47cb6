//! RegistryHive value object
//! Identifies one of the top-level registry key views

use serde::{Deserialize, Serialize};
use std::fmt;

/// A top-level registry key view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistryHive {
    ClassesRoot,
    CurrentUser,
    LocalMachine,
    Users,
    CurrentConfig,
}

impl fmt::Display for RegistryHive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryHive::ClassesRoot => write!(f, "HKEY_CLASSES_ROOT"),
            RegistryHive::CurrentUser => write!(f, "HKEY_CURRENT_USER"),
            RegistryHive::LocalMachine => write!(f, "HKEY_LOCAL_MACHINE"),
            RegistryHive::Users => write!(f, "HKEY_USERS"),
            RegistryHive::CurrentConfig => write!(f, "HKEY_CURRENT_CONFIG"),
        }
    }
}
