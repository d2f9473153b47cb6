//! Windows Registry Store
//! RegistryStore adapter over the Win32 registry API
//!
//! Reads open the key view read-only; writes create intermediate subkeys
//! via RegCreateKeyExW. Only runs in the elevated broker for write paths.

use crate::domain::ports::{RegistryStore, StoreError};
use crate::domain::value_objects::RegistryHive;
use std::ptr;
use windows_sys::Win32::Foundation::{
    ERROR_ACCESS_DENIED, ERROR_FILE_NOT_FOUND, ERROR_SUCCESS,
};
use windows_sys::Win32::System::Registry::{
    RegCloseKey, RegCreateKeyExW, RegOpenKeyExW, RegQueryValueExW, RegSetValueExW, HKEY,
    HKEY_CLASSES_ROOT, HKEY_CURRENT_CONFIG, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, HKEY_USERS,
    KEY_READ, KEY_WRITE, REG_DWORD, REG_OPTION_NON_VOLATILE, REG_SZ,
};

/// RegistryStore backed by the live Windows registry
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsRegistryStore;

/// Closes the wrapped key handle on drop
struct KeyGuard(HKEY);

impl Drop for KeyGuard {
    fn drop(&mut self) {
        unsafe {
            RegCloseKey(self.0);
        }
    }
}

fn hive_handle(hive: RegistryHive) -> HKEY {
    match hive {
        RegistryHive::ClassesRoot => HKEY_CLASSES_ROOT,
        RegistryHive::CurrentUser => HKEY_CURRENT_USER,
        RegistryHive::LocalMachine => HKEY_LOCAL_MACHINE,
        RegistryHive::Users => HKEY_USERS,
        RegistryHive::CurrentConfig => HKEY_CURRENT_CONFIG,
    }
}

fn to_wide(text: &str) -> Vec<u16> {
    text.encode_utf16().chain(std::iter::once(0)).collect()
}

fn os_error(op: &str, status: u32) -> StoreError {
    if status == ERROR_ACCESS_DENIED {
        StoreError::AccessDenied(format!("{op} failed: os error {status}"))
    } else {
        StoreError::Other(format!("{op} failed: os error {status}"))
    }
}

fn open_read(hive: RegistryHive, key: &str) -> Result<KeyGuard, StoreError> {
    let subkey = to_wide(key);
    let mut handle: HKEY = ptr::null_mut();
    let status =
        unsafe { RegOpenKeyExW(hive_handle(hive), subkey.as_ptr(), 0, KEY_READ, &mut handle) };
    match status {
        ERROR_SUCCESS => Ok(KeyGuard(handle)),
        ERROR_FILE_NOT_FOUND => Err(StoreError::KeyNotFound {
            hive,
            key: key.to_string(),
        }),
        other => Err(os_error("RegOpenKeyExW", other)),
    }
}

fn open_write(hive: RegistryHive, key: &str) -> Result<KeyGuard, StoreError> {
    let subkey = to_wide(key);
    let mut handle: HKEY = ptr::null_mut();
    let status = unsafe {
        RegCreateKeyExW(
            hive_handle(hive),
            subkey.as_ptr(),
            0,
            ptr::null(),
            REG_OPTION_NON_VOLATILE,
            KEY_WRITE,
            ptr::null(),
            &mut handle,
            ptr::null_mut(),
        )
    };
    match status {
        ERROR_SUCCESS => Ok(KeyGuard(handle)),
        other => Err(os_error("RegCreateKeyExW", other)),
    }
}

/// Queries one value; Ok(None) when the value is absent under an opened key
fn query_value(
    guard: &KeyGuard,
    value_name: &str,
    expected_type: u32,
) -> Result<Option<Vec<u8>>, StoreError> {
    let name = to_wide(value_name);
    let mut kind = 0u32;
    let mut len = 0u32;
    let status = unsafe {
        RegQueryValueExW(
            guard.0,
            name.as_ptr(),
            ptr::null_mut(),
            &mut kind,
            ptr::null_mut(),
            &mut len,
        )
    };
    match status {
        ERROR_FILE_NOT_FOUND => return Ok(None),
        ERROR_SUCCESS => {}
        other => return Err(os_error("RegQueryValueExW", other)),
    }
    if kind != expected_type {
        return Err(StoreError::WrongType {
            value_name: value_name.to_string(),
        });
    }

    let mut data = vec![0u8; len as usize];
    let status = unsafe {
        RegQueryValueExW(
            guard.0,
            name.as_ptr(),
            ptr::null_mut(),
            &mut kind,
            data.as_mut_ptr(),
            &mut len,
        )
    };
    match status {
        ERROR_SUCCESS => {
            data.truncate(len as usize);
            Ok(Some(data))
        }
        other => Err(os_error("RegQueryValueExW", other)),
    }
}

impl RegistryStore for WindowsRegistryStore {
    fn read_int(
        &self,
        hive: RegistryHive,
        key: &str,
        value_name: &str,
    ) -> Result<Option<i32>, StoreError> {
        let guard = open_read(hive, key)?;
        match query_value(&guard, value_name, REG_DWORD)? {
            None => Ok(None),
            Some(data) => {
                let bytes: [u8; 4] = data.try_into().map_err(|_| StoreError::WrongType {
                    value_name: value_name.to_string(),
                })?;
                Ok(Some(i32::from_le_bytes(bytes)))
            }
        }
    }

    fn read_string(
        &self,
        hive: RegistryHive,
        key: &str,
        value_name: &str,
    ) -> Result<Option<String>, StoreError> {
        let guard = open_read(hive, key)?;
        match query_value(&guard, value_name, REG_SZ)? {
            None => Ok(None),
            Some(data) => {
                let wide: Vec<u16> = data
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .take_while(|&unit| unit != 0)
                    .collect();
                Ok(Some(String::from_utf16_lossy(&wide)))
            }
        }
    }

    fn write_int(
        &self,
        hive: RegistryHive,
        key: &str,
        value_name: &str,
        value: i32,
    ) -> Result<(), StoreError> {
        let guard = open_write(hive, key)?;
        let name = to_wide(value_name);
        let data = value.to_le_bytes();
        let status = unsafe {
            RegSetValueExW(
                guard.0,
                name.as_ptr(),
                0,
                REG_DWORD,
                data.as_ptr(),
                data.len() as u32,
            )
        };
        match status {
            ERROR_SUCCESS => Ok(()),
            other => Err(os_error("RegSetValueExW", other)),
        }
    }

    fn write_string(
        &self,
        hive: RegistryHive,
        key: &str,
        value_name: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        let guard = open_write(hive, key)?;
        let name = to_wide(value_name);
        let wide = to_wide(value);
        let data: Vec<u8> = wide.iter().flat_map(|unit| unit.to_le_bytes()).collect();
        let status = unsafe {
            RegSetValueExW(
                guard.0,
                name.as_ptr(),
                0,
                REG_SZ,
                data.as_ptr(),
                data.len() as u32,
            )
        };
        match status {
            ERROR_SUCCESS => Ok(()),
            other => Err(os_error("RegSetValueExW", other)),
        }
    }
}
