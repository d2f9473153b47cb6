//! Windows System Parameter Store
//! SystemParameterStore adapter over SystemParametersInfoW
//!
//! Queries hand the API a fixed-size buffer and must check the returned
//! status; a success yields the buffer trimmed to the written length.

use crate::constants::PARAM_BUFFER_LEN;
use crate::domain::ports::{StoreError, SystemParameterStore};
use std::ffi::c_void;
use windows_sys::Win32::Foundation::GetLastError;
use windows_sys::Win32::UI::WindowsAndMessaging::{
    SystemParametersInfoW, SPIF_SENDCHANGE, SPIF_UPDATEINIFILE,
};

/// SystemParameterStore backed by the live Win32 API
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsSystemParameterStore;

fn last_error(op: &str, action: u32) -> StoreError {
    let status = unsafe { GetLastError() };
    StoreError::Other(format!("{op} action {action} failed: os error {status}"))
}

impl SystemParameterStore for WindowsSystemParameterStore {
    fn get_value(&self, action: u32) -> Result<String, StoreError> {
        let mut buffer = [0u16; PARAM_BUFFER_LEN];
        let ok = unsafe {
            SystemParametersInfoW(
                action,
                buffer.len() as u32,
                buffer.as_mut_ptr() as *mut c_void,
                0,
            )
        };
        if ok == 0 {
            return Err(last_error("SystemParametersInfoW", action));
        }
        let len = buffer
            .iter()
            .position(|&unit| unit == 0)
            .unwrap_or(buffer.len());
        Ok(String::from_utf16_lossy(&buffer[..len]))
    }

    fn set_value(&self, action: u32, value: &str, update_profile: bool) -> Result<(), StoreError> {
        let mut wide: Vec<u16> = value.encode_utf16().chain(std::iter::once(0)).collect();
        let flags = if update_profile {
            SPIF_UPDATEINIFILE | SPIF_SENDCHANGE
        } else {
            0
        };
        let ok = unsafe {
            SystemParametersInfoW(action, 0, wide.as_mut_ptr() as *mut c_void, flags)
        };
        if ok == 0 {
            return Err(last_error("SystemParametersInfoW", action));
        }
        Ok(())
    }
}
