//! Live Win32 adapters, compiled only on Windows hosts

pub mod registry;
pub mod system_parameters;

pub use registry::WindowsRegistryStore;
pub use system_parameters::WindowsSystemParameterStore;
