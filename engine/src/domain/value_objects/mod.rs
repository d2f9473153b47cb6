pub mod registry_hive;

pub use registry_hive::RegistryHive;
